use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};
use assistant_core::{
    update, AnalysisOutcome, AppState, AppViewModel, Effect, Msg, SelectedFile, SubmissionState,
};
use assistant_logging::{assistant_info, assistant_warn};

use super::effects::EffectRunner;
use super::input::{InputParser, UserCommand};
use super::ui::console::{Console, ConsoleCommand};
use super::ui::constants::{BUSY_HINT, JD_TERMINATOR};
use super::ui::render::render;
use crate::cli::Cli;

/// Everything the app loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    Msg(Msg),
    Line(String),
    InputClosed,
}

pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let settings = cli.settings()?;
    assistant_info!(
        "Starting career assistant api_url={} one_shot={}",
        settings.base_url(),
        cli.is_one_shot()
    );

    let (event_tx, event_rx) = mpsc::channel();
    let effects = EffectRunner::new(settings, event_tx.clone())?;
    let console = Console::new(io::stdout(), cli.render_style());
    let mut app = App::new(console, effects, cli.is_one_shot());

    if cli.is_one_shot() {
        let mut form = Vec::new();
        if let Some(path) = &cli.resume {
            form.push(Msg::ResumeSelected(SelectedFile::from_path(path)));
        }
        if let Some(text) = cli.job_description_text()? {
            form.push(Msg::JobDescriptionChanged(text));
        }
        app.start(form, !cli.no_probe);
        app.dispatch(Msg::SubmitClicked);
        app.quit_when_idle = true;
    } else {
        app.start(Vec::new(), !cli.no_probe);
        app.console.exec(&ConsoleCommand::Help);
        spawn_input_reader(event_tx)?;
    }

    app.run(&event_rx);
    let succeeded = app.succeeded();
    assistant_info!("Career assistant exiting succeeded={}", succeeded);
    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn spawn_input_reader(tx: mpsc::Sender<AppEvent>) -> Result<()> {
    thread::Builder::new()
        .name("assistant-input".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(AppEvent::Line(line)).is_err() {
                            return;
                        }
                    }
                    Err(err) => {
                        assistant_warn!("Reading stdin failed: {}", err);
                        break;
                    }
                }
            }
            let _ = tx.send(AppEvent::InputClosed);
        })
        .context("spawning input thread")?;
    Ok(())
}

struct App<W: Write> {
    state: AppState,
    console: Console<W>,
    effects: EffectRunner,
    input: InputParser,
    last_view: Option<AppViewModel>,
    one_shot: bool,
    /// Leave once no analysis is in flight.
    quit_when_idle: bool,
    quit_now: bool,
}

impl<W: Write> App<W> {
    fn new(console: Console<W>, effects: EffectRunner, one_shot: bool) -> Self {
        Self {
            state: AppState::new(),
            console,
            effects,
            input: InputParser::new(),
            last_view: None,
            one_shot,
            quit_when_idle: false,
            quit_now: false,
        }
    }

    /// Fills the form without echoing each field, shows the whole form, then
    /// starts the connectivity check.
    fn start(&mut self, form: Vec<Msg>, probe: bool) {
        for msg in form {
            let state = std::mem::take(&mut self.state);
            let (state, _effects) = update(state, msg);
            self.state = state;
        }
        self.state.consume_dirty();
        self.show_status();
        if probe {
            self.dispatch(Msg::Started);
        }
    }

    fn run(&mut self, events: &mpsc::Receiver<AppEvent>) {
        while !self.should_quit() {
            match events.recv() {
                Ok(event) => self.handle(event),
                Err(_) => break,
            }
        }
    }

    fn should_quit(&self) -> bool {
        self.quit_now || (self.quit_when_idle && !self.state.is_loading())
    }

    /// Interactive sessions always succeed; a one-shot run succeeds only
    /// when an analysis came back.
    fn succeeded(&self) -> bool {
        if !self.one_shot {
            return true;
        }
        matches!(
            self.state.submission(),
            SubmissionState::Done(AnalysisOutcome::Analysis(_))
        )
    }

    fn handle(&mut self, event: AppEvent) {
        match event {
            AppEvent::Msg(msg) => self.dispatch(msg),
            AppEvent::Line(line) => {
                if let Some(command) = self.input.feed(&line) {
                    self.apply_command(command);
                }
            }
            AppEvent::InputClosed => {
                if let Some(command) = self.input.finish() {
                    self.apply_command(command);
                }
                self.quit_when_idle = true;
            }
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            let view = state.view();
            self.console.exec_all(&render(self.last_view.as_ref(), &view));
            self.last_view = Some(view);
        }
        self.state = state;

        for effect in effects {
            match effect {
                Effect::ShowAlert(err) => self.console.exec(&ConsoleCommand::Alert(err.to_string())),
                other => self.effects.enqueue(other),
            }
        }
    }

    fn apply_command(&mut self, command: UserCommand) {
        match command {
            UserCommand::SelectResume(path) => {
                self.dispatch(Msg::ResumeSelected(SelectedFile::from_path(path)))
            }
            UserCommand::BeginJobDescription => self.console.exec(&ConsoleCommand::Status(format!(
                "Paste the job description. End with a line containing only '{JD_TERMINATOR}'."
            ))),
            UserCommand::SetJobDescription(text) => self.dispatch(Msg::JobDescriptionChanged(text)),
            UserCommand::LoadJobDescription(path) => match std::fs::read_to_string(&path) {
                Ok(text) => self.dispatch(Msg::JobDescriptionChanged(text)),
                Err(err) => self.console.exec(&ConsoleCommand::Alert(format!(
                    "Could not read {}: {err}",
                    path.display()
                ))),
            },
            UserCommand::Submit => {
                if self.state.is_loading() {
                    self.console.exec(&ConsoleCommand::Status(BUSY_HINT.to_string()));
                } else {
                    self.dispatch(Msg::SubmitClicked);
                }
            }
            UserCommand::Status => self.show_status(),
            UserCommand::Help => self.console.exec(&ConsoleCommand::Help),
            UserCommand::Quit => self.quit_now = true,
            UserCommand::Unknown(text) => self.console.exec(&ConsoleCommand::Alert(format!(
                "Unknown command: {text}. Type 'help' for the list of commands."
            ))),
        }
    }

    fn show_status(&mut self) {
        let view = self.state.view();
        self.console.exec_all(&render(None, &view));
        self.last_view = Some(view);
    }
}
