use std::time::Duration;

use mentor_core::{LlmConfig, MentorError};

/// Client for the Gemini `generateContent` REST endpoint.
///
/// One plain-text prompt in, one trimmed plain-text response out. Any
/// failure (network, quota, malformed response) surfaces as
/// [`MentorError::Llm`]; the review loop treats that as a per-commit skip.
///
/// # Examples
///
/// ```
/// use mentor_core::LlmConfig;
/// use mentor_review::llm::GeminiClient;
///
/// let config = LlmConfig {
///     api_key: Some("test-key".into()),
///     ..LlmConfig::default()
/// };
/// let client = GeminiClient::new(&config).unwrap();
/// assert_eq!(client.model(), "gemini-2.5-pro");
/// ```
#[derive(Debug)]
pub struct GeminiClient {
    client: reqwest::Client,
    config: LlmConfig,
    api_key: String,
}

impl GeminiClient {
    /// Create a client from configuration.
    ///
    /// The API key comes from the `GEMINI_API_KEY` environment variable,
    /// falling back to `config.api_key`.
    ///
    /// # Errors
    ///
    /// Returns [`MentorError::Config`] if no key is available, or
    /// [`MentorError::Llm`] if the HTTP client cannot be built.
    pub fn new(config: &LlmConfig) -> Result<Self, MentorError> {
        let api_key = match std::env::var("GEMINI_API_KEY") {
            Ok(k) if !k.is_empty() => k,
            _ => config.api_key.clone().ok_or_else(|| {
                MentorError::Config(
                    "GEMINI_API_KEY not set. Export it or add api_key under [llm] in .mentor.toml"
                        .into(),
                )
            })?,
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| MentorError::Llm(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config: config.clone(),
            api_key,
        })
    }

    /// Return the model identifier from the configuration.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send one prompt and return the model's trimmed text response.
    ///
    /// # Errors
    ///
    /// Returns [`MentorError::Llm`] on HTTP errors, non-success statuses,
    /// or a response without text content.
    pub async fn generate(&self, prompt: &str) -> Result<String, MentorError> {
        let base_url = self
            .config
            .base_url
            .as_deref()
            .unwrap_or("https://generativelanguage.googleapis.com");
        let url = format!(
            "{base_url}/v1beta/models/{}:generateContent",
            self.config.model
        );

        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| MentorError::Llm(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(MentorError::Llm(format!(
                "Gemini API error {status}: {body_text}"
            )));
        }

        let response_body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| MentorError::Llm(format!("failed to parse response: {e}")))?;

        extract_text(&response_body).ok_or_else(|| {
            MentorError::Llm(format!("unexpected response structure: {response_body}"))
        })
    }
}

/// Pull the text out of a `generateContent` response body.
///
/// Concatenates the text parts of the first candidate and trims the result.
/// Returns `None` when no text part is present.
fn extract_text(body: &serde_json::Value) -> Option<String> {
    let parts = body
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let mut text = String::new();
    for part in parts {
        if let Some(t) = part.get("text").and_then(|t| t.as_str()) {
            text.push_str(t);
        }
    }

    if text.trim().is_empty() {
        None
    } else {
        Some(text.trim().to_string())
    }
}
