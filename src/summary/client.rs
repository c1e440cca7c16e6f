//! Text generation capability.
//!
//! The summary adapter only needs "prompt in, text out, may fail". Production
//! uses an OpenAI-compatible chat-completions endpoint; tests pass closures.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::GenerationConfig;

/// Generation errors. Never escalated past the summary adapter.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LlmError {
    #[error("API key not set (environment variable {0})")]
    MissingApiKey(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("HTTP {status} from generation service: {body}")]
    Status { status: u16, body: String },

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Generation service returned an empty response")]
    EmptyResponse,
}

/// A fallible text generator.
pub trait TextGenerator {
    fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

impl<F> TextGenerator for F
where
    F: Fn(&str) -> Result<String, LlmError>,
{
    fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self(prompt)
    }
}

// ── OpenAI-compatible client ──────────────────────────────────────────────────

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatRequestMessage<'a>; 1],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatRequestMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Blocking chat-completions client; one request per call, no retry.
pub struct HttpTextGenerator {
    config: GenerationConfig,
    api_key: String,
    client: reqwest::blocking::Client,
}

impl HttpTextGenerator {
    pub fn new(config: GenerationConfig, api_key: String) -> Result<Self, LlmError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Http(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    /// Reads the key from the variable named by `config.api_key_env`.
    pub fn from_env(config: GenerationConfig) -> Result<Self, LlmError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| LlmError::MissingApiKey(config.api_key_env.clone()))?;
        Self::new(config, api_key)
    }

    fn url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.config.endpoint.trim_end_matches('/')
        )
    }
}

impl TextGenerator for HttpTextGenerator {
    fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: [ChatRequestMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(self.url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(self.config.timeout_secs)
                } else {
                    LlmError::Http(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        extract_content(parsed)
    }
}

fn extract_content(response: ChatResponse) -> Result<String, LlmError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or(LlmError::EmptyResponse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_a_generator() {
        let generator = |prompt: &str| -> Result<String, LlmError> { Ok(prompt.to_uppercase()) };
        assert_eq!(generator.complete("abc").unwrap(), "ABC");
    }

    #[test]
    fn test_request_body_shape() {
        let body = ChatRequest {
            model: "gpt-4o-mini",
            messages: [ChatRequestMessage {
                role: "user",
                content: "hi",
            }],
            temperature: 0.5,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hi");
        assert_eq!(json["temperature"], 0.5);
    }

    #[test]
    fn test_extract_content() {
        let ok: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"  결제 관련 문의 접수 \n"}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_content(ok).unwrap(), "결제 관련 문의 접수");

        let empty: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(extract_content(empty), Err(LlmError::EmptyResponse));

        let blank: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"   "}}]}"#).unwrap();
        assert_eq!(extract_content(blank), Err(LlmError::EmptyResponse));

        let null: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert_eq!(extract_content(null), Err(LlmError::EmptyResponse));
    }

    #[test]
    fn test_url_joins_endpoint() {
        let config = GenerationConfig {
            endpoint: "http://localhost:8080/".into(),
            ..GenerationConfig::default()
        };
        let generator = HttpTextGenerator::new(config, "key".into()).unwrap();
        assert_eq!(generator.url(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_from_env_missing_key() {
        let config = GenerationConfig {
            api_key_env: "CS_DIGEST_TEST_KEY_THAT_IS_NEVER_SET".into(),
            ..GenerationConfig::default()
        };
        match HttpTextGenerator::from_env(config) {
            Err(LlmError::MissingApiKey(var)) => {
                assert_eq!(var, "CS_DIGEST_TEST_KEY_THAT_IS_NEVER_SET")
            }
            Err(e) => panic!("Expected MissingApiKey, got {e:?}"),
            Ok(_) => panic!("Expected MissingApiKey, got a client"),
        }
    }

    #[test]
    fn test_unreachable_endpoint_is_an_error() {
        let config = GenerationConfig {
            endpoint: "http://127.0.0.1:9".into(),
            timeout_secs: 2,
            ..GenerationConfig::default()
        };
        let generator = HttpTextGenerator::new(config, "key".into()).unwrap();
        assert!(generator.complete("hello").is_err());
    }
}
