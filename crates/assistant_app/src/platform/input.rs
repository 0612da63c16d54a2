use std::path::PathBuf;

use super::ui::constants::JD_TERMINATOR;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    SelectResume(PathBuf),
    /// `jd` without text: the following lines are the description.
    BeginJobDescription,
    SetJobDescription(String),
    LoadJobDescription(PathBuf),
    Submit,
    Status,
    Help,
    Quit,
    Unknown(String),
}

/// Turns terminal lines into commands. Holds the multi-line job description
/// while it is being typed.
#[derive(Debug, Default)]
pub struct InputParser {
    draft: Option<Vec<String>>,
}

impl InputParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, line: &str) -> Option<UserCommand> {
        if let Some(mut lines) = self.draft.take() {
            if line.trim_end() == JD_TERMINATOR {
                return Some(UserCommand::SetJobDescription(lines.join("\n")));
            }
            lines.push(line.to_string());
            self.draft = Some(lines);
            return None;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        let (word, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (trimmed, ""),
        };

        let command = match (word.to_ascii_lowercase().as_str(), rest.is_empty()) {
            ("resume", false) => UserCommand::SelectResume(PathBuf::from(unquote(rest))),
            ("jd", true) => {
                self.draft = Some(Vec::new());
                UserCommand::BeginJobDescription
            }
            ("jd", false) => UserCommand::SetJobDescription(rest.to_string()),
            ("jd-file", false) => UserCommand::LoadJobDescription(PathBuf::from(unquote(rest))),
            ("submit", true) => UserCommand::Submit,
            ("status", true) => UserCommand::Status,
            ("help" | "?", true) => UserCommand::Help,
            ("quit" | "exit", true) => UserCommand::Quit,
            _ => UserCommand::Unknown(trimmed.to_string()),
        };
        Some(command)
    }

    /// Input ended; an unfinished job description is kept as typed.
    pub fn finish(&mut self) -> Option<UserCommand> {
        self.draft
            .take()
            .map(|lines| UserCommand::SetJobDescription(lines.join("\n")))
    }
}

/// Terminals wrap dropped file paths in quotes.
fn unquote(path: &str) -> &str {
    path.trim_matches(|c| c == '"' || c == '\'')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resume_path_is_unquoted() {
        let mut parser = InputParser::new();
        assert_eq!(
            parser.feed("resume '/home/ada/My Resume.pdf'"),
            Some(UserCommand::SelectResume(PathBuf::from("/home/ada/My Resume.pdf")))
        );
    }

    #[test]
    fn multi_line_description_ends_at_terminator() {
        let mut parser = InputParser::new();
        assert_eq!(parser.feed("jd"), Some(UserCommand::BeginJobDescription));
        assert_eq!(parser.feed("Senior Rust Engineer"), None);
        assert_eq!(parser.feed(""), None);
        assert_eq!(parser.feed("  submit"), None);
        assert_eq!(
            parser.feed("."),
            Some(UserCommand::SetJobDescription(
                "Senior Rust Engineer\n\n  submit".to_string()
            ))
        );
        assert_eq!(parser.feed("submit"), Some(UserCommand::Submit));
    }

    #[test]
    fn inline_description_and_file() {
        let mut parser = InputParser::new();
        assert_eq!(
            parser.feed("jd Data engineer"),
            Some(UserCommand::SetJobDescription("Data engineer".to_string()))
        );
        assert_eq!(
            parser.feed("JD-FILE jd.txt"),
            Some(UserCommand::LoadJobDescription(PathBuf::from("jd.txt")))
        );
    }

    #[test]
    fn unfinished_description_is_flushed_on_finish() {
        let mut parser = InputParser::new();
        parser.feed("jd");
        parser.feed("line one");
        assert_eq!(
            parser.finish(),
            Some(UserCommand::SetJobDescription("line one".to_string()))
        );
        assert_eq!(parser.finish(), None);
    }

    #[test]
    fn unknown_and_blank_lines() {
        let mut parser = InputParser::new();
        assert_eq!(parser.feed("   "), None);
        assert_eq!(
            parser.feed("resume"),
            Some(UserCommand::Unknown("resume".to_string()))
        );
        assert_eq!(
            parser.feed("submit now"),
            Some(UserCommand::Unknown("submit now".to_string()))
        );
        assert_eq!(parser.feed("?"), Some(UserCommand::Help));
        assert_eq!(parser.feed("exit"), Some(UserCommand::Quit));
    }
}
