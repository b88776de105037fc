//! Generative-text completion client.
//!
//! The coach views send a prompt and show whatever text comes back. Nothing
//! in the tracker depends on the answer: every failure is turned into a
//! fallback message by [`complete_or_fallback`].

use indoc::formatdoc;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::error::CompletionError;
use crate::storage::CompletionConfig;

/// Shown to the user whenever the service cannot produce an answer.
pub const FALLBACK_MESSAGE: &str =
    "Sorry, I couldn't reach the coach right now. Take a slow breath and try again in a moment.";

/// Anything that turns a prompt into a single text completion.
#[allow(async_fn_in_trait)]
pub trait TextCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

/// HTTP client for a `generateContent`-style endpoint.
pub struct HttpCompletionClient {
    client: Client,
    endpoint: Url,
}

impl HttpCompletionClient {
    /// # Errors
    /// Fails if `endpoint` is not a valid URL or the HTTP client cannot be built.
    pub fn new(endpoint: &str, api_key: &str, timeout: Duration) -> Result<Self, CompletionError> {
        let mut endpoint = Url::parse(endpoint)
            .map_err(|e| CompletionError::Malformed(format!("invalid endpoint: {e}")))?;
        endpoint.query_pairs_mut().append_pair("key", api_key);

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    /// Build from config, reading the API key from the configured env var.
    pub fn from_config(config: &CompletionConfig) -> Result<Self, CompletionError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| CompletionError::MissingApiKey {
                env_var: config.api_key_env.clone(),
            })?;
        Self::new(
            &config.endpoint,
            &api_key,
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn extract_text(body: &Value) -> Result<String, CompletionError> {
        body.pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .ok_or_else(|| CompletionError::Malformed("no completion text in response".into()))
    }
}

impl TextCompletion for HttpCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let resp = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let value: Value = resp
            .json()
            .await
            .map_err(|e| CompletionError::Malformed(e.to_string()))?;
        let text = Self::extract_text(&value)?;
        debug!(chars = text.len(), "completion received");
        Ok(text)
    }
}

/// Ask `client`, turning any failure into [`FALLBACK_MESSAGE`].
pub async fn complete_or_fallback<C: TextCompletion>(client: &C, prompt: &str) -> String {
    match client.complete(prompt).await {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "text completion failed, using fallback");
            FALLBACK_MESSAGE.to_string()
        }
    }
}

/// Prompt asking for support through an urge.
pub fn urge_support_prompt(habit: &str, trigger: Option<&str>) -> String {
    let trigger = trigger
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or("something I can't name");
    formatdoc! {"
        I'm working on quitting {habit} and I'm feeling a strong urge right now.
        The trigger is {trigger}.
        Give me three short, practical things I can do in the next ten minutes
        to ride out this urge. Be warm and encouraging, and keep it under 120 words.
    "}
}

/// Prompt for the mindset coach.
pub fn mindset_prompt(question: &str) -> String {
    formatdoc! {"
        You are a supportive mindset coach helping someone build healthier habits.
        Answer the question below in a calm, encouraging tone, in under 150 words.

        Question: {question}
    ", question = question.trim()}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_candidate_text() {
        let body = json!({
            "candidates": [{ "content": { "parts": [{ "text": "  Breathe.  " }] } }]
        });
        assert_eq!(HttpCompletionClient::extract_text(&body).unwrap(), "Breathe.");
    }

    #[test]
    fn missing_or_blank_text_is_malformed() {
        for body in [json!({}), json!({ "candidates": [] }), json!({
            "candidates": [{ "content": { "parts": [{ "text": "   " }] } }]
        })] {
            assert!(matches!(
                HttpCompletionClient::extract_text(&body),
                Err(CompletionError::Malformed(_))
            ));
        }
    }

    #[test]
    fn api_key_goes_into_query() {
        let client = HttpCompletionClient::new(
            "https://example.com/v1/models/m:generateContent",
            "secret",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.endpoint.query(), Some("key=secret"));
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        assert!(HttpCompletionClient::new("::nope", "k", Duration::from_secs(1)).is_err());
    }

    #[test]
    fn missing_api_key_env_is_reported() {
        let config = CompletionConfig {
            api_key_env: "HABITGROVE_TEST_KEY_THAT_IS_NEVER_SET".into(),
            ..CompletionConfig::default()
        };
        assert!(matches!(
            HttpCompletionClient::from_config(&config),
            Err(CompletionError::MissingApiKey { .. })
        ));
    }

    #[test]
    fn prompts_mention_their_inputs() {
        let prompt = urge_support_prompt("Smoking", Some("Stress"));
        assert!(prompt.contains("quitting Smoking"));
        assert!(prompt.contains("trigger is Stress"));
        assert!(urge_support_prompt("Vaping", None).contains("something I can't name"));
        assert!(mindset_prompt("  How do I restart?  ").contains("Question: How do I restart?"));
    }
}
