#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultsPanel {
    /// Nothing submitted yet.
    #[default]
    Hidden,
    /// A submission is in flight.
    Progress,
    /// Markdown to render; failures are flagged so they can be styled.
    Markdown { text: String, is_error: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub backend_message: Option<String>,
    pub selected_file_name: Option<String>,
    pub job_description_chars: usize,
    pub submit_enabled: bool,
    pub results: ResultsPanel,
}
