use std::io::{self, Write};

use assistant_engine::{MarkdownRenderer, RenderStyle, TerminalRenderer};
use assistant_logging::assistant_error;

use super::constants::HELP_TEXT;

const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_RED: &str = "\x1b[31m";
const ANSI_DIM: &str = "\x1b[2m";
const ANSI_RESET: &str = "\x1b[0m";

/// One unit of terminal output. Produced by `render` and the app loop,
/// executed by `Console`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Title and tagline, then the backend greeting when known.
    Banner {
        title: String,
        tagline: String,
        backend_message: Option<String>,
    },
    Status(String),
    Alert(String),
    Progress(String),
    Heading(String),
    Markdown { text: String, is_error: bool },
    Help,
}

pub struct Console<W: Write> {
    out: W,
    style: RenderStyle,
    renderer: TerminalRenderer,
}

impl<W: Write> Console<W> {
    pub fn new(out: W, style: RenderStyle) -> Self {
        Self {
            out,
            style,
            renderer: TerminalRenderer::new(style),
        }
    }

    pub fn exec_all(&mut self, commands: &[ConsoleCommand]) {
        for command in commands {
            self.exec(command);
        }
    }

    pub fn exec(&mut self, command: &ConsoleCommand) {
        if let Err(err) = self.write_command(command).and_then(|_| self.out.flush()) {
            assistant_error!("Terminal write failed: {}", err);
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_command(&mut self, command: &ConsoleCommand) -> io::Result<()> {
        match command {
            ConsoleCommand::Banner {
                title,
                tagline,
                backend_message,
            } => {
                writeln!(self.out, "{}", self.styled(ANSI_BOLD, title))?;
                writeln!(self.out, "{tagline}")?;
                if let Some(message) = backend_message {
                    writeln!(self.out, "{}", self.styled(ANSI_DIM, message))?;
                }
            }
            ConsoleCommand::Status(text) => writeln!(self.out, "{text}")?,
            ConsoleCommand::Alert(text) => {
                writeln!(self.out, "{}", self.styled(ANSI_RED, &format!("! {text}")))?
            }
            ConsoleCommand::Progress(text) => {
                writeln!(self.out, "{}", self.styled(ANSI_DIM, &format!("… {text}")))?
            }
            ConsoleCommand::Heading(text) => {
                writeln!(self.out)?;
                writeln!(self.out, "{}", self.styled(ANSI_BOLD, text))?;
            }
            ConsoleCommand::Markdown { text, is_error } => {
                let rendered = self.renderer.render(text);
                if *is_error {
                    // Inline styles end in a reset; restore red after each one.
                    let rendered = rendered.replace(ANSI_RESET, &format!("{ANSI_RESET}{ANSI_RED}"));
                    writeln!(self.out, "{}", self.styled(ANSI_RED, &rendered))?;
                } else {
                    writeln!(self.out, "{rendered}")?;
                }
            }
            ConsoleCommand::Help => writeln!(self.out, "{HELP_TEXT}")?,
        }
        Ok(())
    }

    fn styled(&self, code: &str, text: &str) -> String {
        match self.style {
            RenderStyle::Plain => text.to_string(),
            RenderStyle::Ansi => format!("{code}{text}{ANSI_RESET}"),
        }
    }
}
