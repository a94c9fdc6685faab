/// Errors that can occur across the mentor reviewer.
///
/// Each variant wraps a specific failure domain. The library crates use this
/// type directly; the binary decides at the top level which variants abort
/// the run and which merely reduce how many commits get reviewed.
///
/// # Examples
///
/// ```
/// use mentor_core::MentorError;
///
/// let err = MentorError::Config("GEMINI_API_KEY not set".into());
/// assert!(err.to_string().contains("GEMINI_API_KEY"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum MentorError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration (secrets, repository name).
    #[error("configuration error: {0}")]
    Config(String),

    /// The triggering event payload is missing or is not a pull request.
    #[error("event error: {0}")]
    Event(String),

    /// GitHub API or network failure.
    #[error("GitHub error: {0}")]
    GitHub(String),

    /// Generative model API or response error.
    #[error("LLM error: {0}")]
    Llm(String),

    /// JSON serialization / deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML deserialization failure.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
