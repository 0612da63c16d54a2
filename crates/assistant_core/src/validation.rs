use thiserror::Error;

use crate::{SelectedFile, Submission};

/// Presence checks run on submit, in order. Content is never inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a resume file!")]
    MissingResume,
    #[error("Please paste the job description!")]
    MissingJobDescription,
}

/// Builds the submission snapshot, or reports the first missing field.
pub fn validate_submission(
    resume: Option<&SelectedFile>,
    job_description: &str,
) -> Result<Submission, ValidationError> {
    let resume = resume.ok_or(ValidationError::MissingResume)?;
    if job_description.is_empty() {
        return Err(ValidationError::MissingJobDescription);
    }
    Ok(Submission {
        resume: resume.clone(),
        job_description: job_description.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_resume_is_reported_before_missing_description() {
        assert_eq!(
            validate_submission(None, ""),
            Err(ValidationError::MissingResume)
        );
    }

    #[test]
    fn whitespace_description_counts_as_present() {
        let file = SelectedFile::from_path("resume.pdf");
        let submission = validate_submission(Some(&file), "  ").unwrap();
        assert_eq!(submission.job_description, "  ");
        assert_eq!(submission.resume, file);
    }
}
