use assistant_core::{AppViewModel, ResultsPanel};

use super::console::ConsoleCommand;
use super::constants::*;

/// Turns a view model into terminal output. With `prev` only the parts that
/// changed are printed; without it the whole form is shown.
pub fn render(prev: Option<&AppViewModel>, view: &AppViewModel) -> Vec<ConsoleCommand> {
    match prev {
        None => render_full(view),
        Some(prev) => render_changes(prev, view),
    }
}

fn render_full(view: &AppViewModel) -> Vec<ConsoleCommand> {
    let mut cmds = vec![
        ConsoleCommand::Banner {
            title: APP_TITLE.to_string(),
            tagline: APP_TAGLINE.to_string(),
            backend_message: view.backend_message.clone(),
        },
        ConsoleCommand::Status(resume_line(view.selected_file_name.as_deref())),
        ConsoleCommand::Status(job_description_line(view.job_description_chars)),
        ConsoleCommand::Status(submit_line(view.submit_enabled)),
    ];
    cmds.extend(render_results(&view.results));
    cmds
}

fn render_changes(prev: &AppViewModel, view: &AppViewModel) -> Vec<ConsoleCommand> {
    let mut cmds = Vec::new();

    if prev.backend_message != view.backend_message {
        if let Some(message) = &view.backend_message {
            cmds.push(ConsoleCommand::Status(message.clone()));
        }
    }
    if prev.selected_file_name != view.selected_file_name {
        if let Some(name) = &view.selected_file_name {
            cmds.push(ConsoleCommand::Status(format!("Selected: {name}")));
        }
    }
    if prev.job_description_chars != view.job_description_chars {
        cmds.push(ConsoleCommand::Status(job_description_line(
            view.job_description_chars,
        )));
    }
    if prev.submit_enabled != view.submit_enabled {
        cmds.push(ConsoleCommand::Status(submit_line(view.submit_enabled)));
    }
    if prev.results != view.results {
        cmds.extend(render_results(&view.results));
    }

    cmds
}

fn render_results(results: &ResultsPanel) -> Vec<ConsoleCommand> {
    match results {
        ResultsPanel::Hidden => Vec::new(),
        ResultsPanel::Progress => vec![ConsoleCommand::Progress(LOADING_TEXT.to_string())],
        ResultsPanel::Markdown { text, is_error } => vec![
            ConsoleCommand::Heading(RESULTS_HEADING.to_string()),
            ConsoleCommand::Markdown {
                text: text.clone(),
                is_error: *is_error,
            },
        ],
    }
}

fn resume_line(file_name: Option<&str>) -> String {
    format!("Resume: {}", file_name.unwrap_or(NO_RESUME_SELECTED))
}

fn job_description_line(chars: usize) -> String {
    match chars {
        1 => "Job description: 1 character".to_string(),
        n => format!("Job description: {n} characters"),
    }
}

fn submit_line(enabled: bool) -> String {
    let label = if enabled { SUBMIT_LABEL } else { SUBMIT_BUSY_LABEL };
    format!("[{label}]")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn idle_view() -> AppViewModel {
        AppViewModel {
            submit_enabled: true,
            ..AppViewModel::default()
        }
    }

    #[test]
    fn full_render_shows_placeholders() {
        let cmds = render(None, &idle_view());
        assert_eq!(
            cmds,
            vec![
                ConsoleCommand::Banner {
                    title: APP_TITLE.to_string(),
                    tagline: APP_TAGLINE.to_string(),
                    backend_message: None,
                },
                ConsoleCommand::Status("Resume: (none)".to_string()),
                ConsoleCommand::Status("Job description: 0 characters".to_string()),
                ConsoleCommand::Status("[Analyze My Resume]".to_string()),
            ]
        );
    }

    #[test]
    fn full_render_while_loading_shows_busy_label_and_progress() {
        let view = AppViewModel {
            submit_enabled: false,
            results: ResultsPanel::Progress,
            ..AppViewModel::default()
        };
        let cmds = render(None, &view);
        assert!(cmds.contains(&ConsoleCommand::Status("[Analyzing...]".to_string())));
        assert_eq!(
            cmds.last(),
            Some(&ConsoleCommand::Progress(LOADING_TEXT.to_string()))
        );
    }

    #[test]
    fn unchanged_view_renders_nothing() {
        let view = idle_view();
        assert!(render(Some(&view), &view).is_empty());
    }

    #[test]
    fn changes_render_only_what_moved() {
        let prev = idle_view();
        let view = AppViewModel {
            selected_file_name: Some("resume.pdf".to_string()),
            job_description_chars: 1,
            ..idle_view()
        };
        assert_eq!(
            render(Some(&prev), &view),
            vec![
                ConsoleCommand::Status("Selected: resume.pdf".to_string()),
                ConsoleCommand::Status("Job description: 1 character".to_string()),
            ]
        );
    }

    #[test]
    fn submitting_switches_label_and_shows_progress() {
        let view = AppViewModel {
            submit_enabled: false,
            results: ResultsPanel::Progress,
            ..AppViewModel::default()
        };
        assert_eq!(
            render(Some(&idle_view()), &view),
            vec![
                ConsoleCommand::Status("[Analyzing...]".to_string()),
                ConsoleCommand::Progress(LOADING_TEXT.to_string()),
            ]
        );
    }

    #[test]
    fn finished_analysis_renders_heading_and_markdown() {
        let prev = AppViewModel {
            submit_enabled: false,
            results: ResultsPanel::Progress,
            ..AppViewModel::default()
        };
        let view = AppViewModel {
            results: ResultsPanel::Markdown {
                text: "**Error:** bad file".to_string(),
                is_error: true,
            },
            ..idle_view()
        };
        assert_eq!(
            render(Some(&prev), &view),
            vec![
                ConsoleCommand::Status("[Analyze My Resume]".to_string()),
                ConsoleCommand::Heading("Analysis Result".to_string()),
                ConsoleCommand::Markdown {
                    text: "**Error:** bad file".to_string(),
                    is_error: true,
                },
            ]
        );
    }
}
