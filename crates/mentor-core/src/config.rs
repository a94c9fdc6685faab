use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::MentorError;

/// Top-level configuration loaded from `.mentor.toml`.
///
/// Everything has a default, so the file is optional; secrets still come
/// from the environment.
///
/// # Examples
///
/// ```
/// use mentor_core::MentorConfig;
///
/// let config = MentorConfig::default();
/// assert_eq!(config.llm.model, "gemini-2.5-pro");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MentorConfig {
    /// Generative model settings.
    #[serde(default)]
    pub llm: LlmConfig,
    /// File-filter extensions to the built-in deny/allow lists.
    #[serde(default)]
    pub filter: FilterConfig,
}

impl MentorConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`MentorError::Io`] if the file cannot be read, or
    /// [`MentorError::Toml`] if the content is not valid TOML.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use mentor_core::MentorConfig;
    /// use std::path::Path;
    ///
    /// let config = MentorConfig::from_file(Path::new(".mentor.toml")).unwrap();
    /// ```
    pub fn from_file(path: &Path) -> Result<Self, MentorError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`MentorError::Toml`] if parsing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use mentor_core::MentorConfig;
    ///
    /// let toml = r#"
    /// [llm]
    /// model = "gemini-2.0-flash"
    /// "#;
    /// let config = MentorConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.llm.model, "gemini-2.0-flash");
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, MentorError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }
}

/// Generative model configuration.
///
/// # Examples
///
/// ```
/// use mentor_core::LlmConfig;
///
/// let config = LlmConfig::default();
/// assert_eq!(config.model, "gemini-2.5-pro");
/// assert!(config.api_key.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// API key; the `GEMINI_API_KEY` environment variable takes precedence.
    pub api_key: Option<String>,
    /// Custom base URL for API requests.
    pub base_url: Option<String>,
}

fn default_model() -> String {
    "gemini-2.5-pro".into()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key: None,
            base_url: None,
        }
    }
}

/// Additions to the built-in file filter.
///
/// All three lists are additive; the fixed denylist and allowlist that keep
/// review context focused on student-authored source always apply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Extra directory names to ignore.
    #[serde(default)]
    pub ignore_dirs: Vec<String>,
    /// Extra file extensions (without the dot) to allow.
    #[serde(default)]
    pub allow_extensions: Vec<String>,
    /// Glob patterns to skip even when the extension is allowed.
    #[serde(default)]
    pub skip_patterns: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = MentorConfig::default();
        assert_eq!(config.llm.model, "gemini-2.5-pro");
        assert!(config.llm.api_key.is_none());
        assert!(config.llm.base_url.is_none());
        assert!(config.filter.ignore_dirs.is_empty());
        assert!(config.filter.allow_extensions.is_empty());
        assert!(config.filter.skip_patterns.is_empty());
    }

    #[test]
    fn parse_minimal_toml() {
        let toml = r#"
[llm]
model = "gemini-2.0-flash"
"#;
        let config = MentorConfig::from_toml(toml).unwrap();
        assert_eq!(config.llm.model, "gemini-2.0-flash");
    }

    #[test]
    fn parse_full_toml() {
        let toml = r#"
[llm]
model = "gemini-2.5-pro"
base_url = "https://generativelanguage.googleapis.com"

[filter]
ignore_dirs = ["target", "storybook-static"]
allow_extensions = ["py"]
skip_patterns = ["*.min.js", "fixtures/**"]
"#;
        let config = MentorConfig::from_toml(toml).unwrap();
        assert_eq!(
            config.llm.base_url.as_deref(),
            Some("https://generativelanguage.googleapis.com")
        );
        assert_eq!(config.filter.ignore_dirs, vec!["target", "storybook-static"]);
        assert_eq!(config.filter.allow_extensions, vec!["py"]);
        assert_eq!(config.filter.skip_patterns, vec!["*.min.js", "fixtures/**"]);
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let config = MentorConfig::from_toml("").unwrap();
        assert_eq!(config.llm.model, "gemini-2.5-pro");
        assert!(config.filter.skip_patterns.is_empty());
    }

    #[test]
    fn invalid_toml_returns_error() {
        let result = MentorConfig::from_toml("{{invalid}}");
        assert!(result.is_err());
    }
}
