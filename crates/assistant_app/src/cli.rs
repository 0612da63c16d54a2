use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use assistant_engine::{ClientSettings, RenderStyle};
use clap::Parser;

/// Command line for the career assistant client.
///
/// Without form flags the client runs interactively. With any of
/// `--resume`, `--job-description` or `--job-description-file` it submits
/// once, prints the result and exits.
#[derive(Parser, Debug, Default)]
#[command(
    name = "career-assistant",
    version,
    about = "Upload your resume and a job description to get instant, AI-powered feedback."
)]
pub struct Cli {
    /// Base URL of the analysis service (overrides CAREER_API_URL).
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Resume file to upload (PDF expected).
    #[arg(long, value_name = "PATH")]
    pub resume: Option<PathBuf>,

    /// Job description text.
    #[arg(long, value_name = "TEXT", conflicts_with = "job_description_file")]
    pub job_description: Option<String>,

    /// Read the job description from a file.
    #[arg(long, value_name = "PATH")]
    pub job_description_file: Option<PathBuf>,

    /// Disable ANSI styling of the rendered analysis.
    #[arg(long)]
    pub plain: bool,

    /// Log at debug level.
    #[arg(long, short)]
    pub verbose: bool,

    /// Also write log lines to the terminal.
    #[arg(long)]
    pub log_to_terminal: bool,

    /// Skip the startup connectivity check.
    #[arg(long)]
    pub no_probe: bool,
}

impl Cli {
    pub fn is_one_shot(&self) -> bool {
        self.resume.is_some() || self.job_description.is_some() || self.job_description_file.is_some()
    }

    pub fn settings(&self) -> Result<ClientSettings> {
        let settings = ClientSettings::from_env()?;
        match &self.api_url {
            Some(url) => Ok(settings.with_base_url(url)?),
            None => Ok(settings),
        }
    }

    pub fn render_style(&self) -> RenderStyle {
        if self.plain || !std::io::stdout().is_terminal() {
            RenderStyle::Plain
        } else {
            RenderStyle::Ansi
        }
    }

    /// The job description given on the command line, if any.
    pub fn job_description_text(&self) -> Result<Option<String>> {
        if let Some(text) = &self.job_description {
            return Ok(Some(text.clone()));
        }
        match &self.job_description_file {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("reading job description from {}", path.display()))
                .map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn form_flags_switch_to_one_shot() {
        let cli = Cli::parse_from(["career-assistant", "--resume", "cv.pdf"]);
        assert!(cli.is_one_shot());
        assert_eq!(cli.resume, Some(PathBuf::from("cv.pdf")));

        let cli = Cli::parse_from(["career-assistant", "--plain"]);
        assert!(!cli.is_one_shot());
        assert_eq!(cli.render_style(), RenderStyle::Plain);
    }

    #[test]
    fn inline_and_file_descriptions_conflict() {
        let result = Cli::try_parse_from([
            "career-assistant",
            "--job-description",
            "x",
            "--job-description-file",
            "jd.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn job_description_is_read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Backend engineer, Rust").unwrap();
        let cli = Cli {
            job_description_file: Some(file.path().to_path_buf()),
            ..Cli::default()
        };

        assert_eq!(
            cli.job_description_text().unwrap().as_deref(),
            Some("Backend engineer, Rust")
        );
    }

    #[test]
    fn missing_description_file_is_an_error() {
        let cli = Cli {
            job_description_file: Some(PathBuf::from("/nonexistent/jd.txt")),
            ..Cli::default()
        };
        assert!(cli.job_description_text().is_err());
    }
}
