use crate::config::EnhancerConfig;
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Separator used when collapsing explanation lines into one text block.
pub const EXPLANATION_SEPARATOR: &str = "\n\n";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, thiserror::Error)]
pub enum EnhancementError {
    #[error("rewrite request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("rewrite service returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("rewrite response contained no text")]
    EmptyResponse,
}

/// Boundary for the optional AI rewrite of the deterministic explanation.
/// Implementations must not panic; callers treat any `Err` as a signal to
/// keep the deterministic text.
#[async_trait]
pub trait ExplanationEnhancer: Send + Sync {
    async fn enhance(&self, explanation: &str) -> Result<String, EnhancementError>;
}

/// No-op implementation used when enhancement is disabled or unconfigured.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughEnhancer;

#[async_trait]
impl ExplanationEnhancer for PassthroughEnhancer {
    async fn enhance(&self, explanation: &str) -> Result<String, EnhancementError> {
        Ok(explanation.to_string())
    }
}

/// Gemini-backed rewrite client. One bounded-timeout attempt per request,
/// no retries; the key travels in a request header and is never logged.
#[derive(Debug)]
pub struct GeminiEnhancer {
    client: reqwest::Client,
    api_key: SecretString,
    model: String,
    base_url: String,
}

impl GeminiEnhancer {
    /// Returns `None` unless enhancement is enabled and a key is configured;
    /// process wiring then falls back to [`PassthroughEnhancer`].
    pub fn from_config(config: &EnhancerConfig) -> Option<Self> {
        if !config.enabled {
            return None;
        }
        let api_key = config.api_key.clone()?;
        let client = match reqwest::Client::builder().timeout(config.timeout).build() {
            Ok(client) => client,
            Err(err) => {
                warn!("AI explanation client unavailable: {err}");
                return None;
            }
        };
        Some(Self {
            client,
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn rewrite_prompt(explanation: &str) -> String {
        format!(
            "Rewrite the following cloud recommendation summary as a single \
             friendly paragraph. Keep every fact and number unchanged and do \
             not invent new ones.\n\n{explanation}"
        )
    }
}

#[async_trait]
impl ExplanationEnhancer for GeminiEnhancer {
    async fn enhance(&self, explanation: &str) -> Result<String, EnhancementError> {
        let request = GenerateContentRequest {
            contents: vec![ContentPayload {
                parts: vec![PartPayload {
                    text: Self::rewrite_prompt(explanation),
                }],
            }],
        };

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(EnhancementError::Status(response.status()));
        }

        let body: GenerateContentResponse = response.json().await?;
        let text = body
            .candidates
            .into_iter()
            .filter_map(|candidate| candidate.content)
            .flat_map(|content| content.parts)
            .map(|part| part.text)
            .find(|text| !text.trim().is_empty())
            .ok_or(EnhancementError::EmptyResponse)?;

        Ok(text.trim().to_string())
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<ContentPayload>,
}

#[derive(Debug, Serialize)]
struct ContentPayload {
    parts: Vec<PartPayload>,
}

#[derive(Debug, Serialize)]
struct PartPayload {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(enabled: bool, key: Option<&str>) -> EnhancerConfig {
        EnhancerConfig {
            enabled,
            api_key: key.map(|value| SecretString::new(value.to_string())),
            timeout: Duration::from_secs(1),
        }
    }

    #[tokio::test]
    async fn passthrough_returns_the_text_unchanged() {
        let text = "AWS was selected.\n\nKey strengths: breadth.";
        let enhanced = PassthroughEnhancer
            .enhance(text)
            .await
            .expect("passthrough never fails");
        assert_eq!(enhanced, text);
    }

    #[test]
    fn disabled_or_keyless_config_yields_no_client() {
        assert!(GeminiEnhancer::from_config(&config(false, Some("k"))).is_none());
        assert!(GeminiEnhancer::from_config(&config(true, None)).is_none());
        assert!(GeminiEnhancer::from_config(&config(true, Some("k"))).is_some());
    }

    #[test]
    fn prompt_embeds_the_explanation_verbatim() {
        let prompt = GeminiEnhancer::rewrite_prompt("GCP was selected.");
        assert!(prompt.ends_with("\n\nGCP was selected."));
    }

    #[tokio::test]
    async fn unreachable_endpoint_surfaces_a_transport_error() {
        let enhancer = GeminiEnhancer::from_config(&config(true, Some("k")))
            .expect("client builds")
            .with_base_url("http://127.0.0.1:9");
        let error = enhancer
            .enhance("text")
            .await
            .expect_err("nothing listens on the discard port");
        assert!(matches!(error, EnhancementError::Transport(_)));
    }

    #[test]
    fn response_parsing_skips_empty_candidates() {
        let body: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}},{"content":{"parts":[{"text":"A paragraph."}]}}]}"#,
        )
        .expect("valid json");
        let text = body
            .candidates
            .into_iter()
            .filter_map(|candidate| candidate.content)
            .flat_map(|content| content.parts)
            .map(|part| part.text)
            .find(|text| !text.trim().is_empty());
        assert_eq!(text.as_deref(), Some("A paragraph."));
    }
}
