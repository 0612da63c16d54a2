pub const APP_TITLE: &str = "AI Career Assistant";
pub const APP_TAGLINE: &str =
    "Upload your resume and a job description to get instant, AI-powered feedback.";

pub const RESULTS_HEADING: &str = "Analysis Result";
pub const LOADING_TEXT: &str = "Our AI is reviewing your documents...";

pub const SUBMIT_LABEL: &str = "Analyze My Resume";
pub const SUBMIT_BUSY_LABEL: &str = "Analyzing...";
pub const BUSY_HINT: &str = "An analysis is already running. Please wait for it to finish.";

pub const NO_RESUME_SELECTED: &str = "(none)";
pub const JD_TERMINATOR: &str = ".";

pub const HELP_TEXT: &str = "\
Commands:
  resume <path>      select the resume to upload (PDF)
  jd <text>          set the job description in one line
  jd                 type the job description; end with a line containing only '.'
  jd-file <path>     load the job description from a file
  submit             analyze the resume against the job description
  status             show the current form and result
  help               show this help
  quit               leave the assistant";
