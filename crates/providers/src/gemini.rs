//! Gemini `generateContent` client.
//!
//! One POST per request, no streaming, no retry — retry policy, if any,
//! belongs to the transport layer above. The reply is reduced to the first
//! candidate's first content part; anything structurally short of that is
//! a `MalformedReply`, never a panic.

use async_trait::async_trait;
use periscan_core::error::ProviderError;
use periscan_core::turn::ChatTurn;
use periscan_core::LanguageModel;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const REQUEST_TIMEOUT_SECS: u64 = 90;

/// Client for the Gemini generateContent API.
pub struct GeminiClient {
    name: String,
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

impl GeminiClient {
    /// Create a new Gemini client.
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            name: "gemini".into(),
            base_url: DEFAULT_BASE_URL.into(),
            model: DEFAULT_MODEL.into(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Create with a custom base URL (e.g., for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    /// Convert turns to the wire `contents` array.
    fn to_contents(turns: &[ChatTurn]) -> Vec<Content> {
        turns
            .iter()
            .map(|t| Content {
                role: t.role.as_str().into(),
                parts: vec![Part {
                    text: Some(t.text.clone()),
                }],
            })
            .collect()
    }

    /// Extract the first candidate's first content part's text.
    ///
    /// Any structural mismatch — no candidates, empty parts, missing text —
    /// is `None`.
    fn extract_reply(response: &GenerateResponse) -> Option<String> {
        response
            .candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .clone()
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, turns: &[ChatTurn]) -> Result<String, ProviderError> {
        let body = GenerateRequest {
            contents: Self::to_contents(turns),
        };

        debug!(model = %self.model, turns = turns.len(), "Sending generateContent request");

        let response = self
            .client
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(ProviderError::RateLimited { retry_after_secs: 5 });
        }
        if status == 401 || status == 403 {
            return Err(ProviderError::AuthenticationFailed(
                "Invalid Gemini API key".into(),
            ));
        }
        if !(200..300).contains(&status) {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Gemini API error");
            return Err(ProviderError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_resp: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedReply(format!("invalid reply JSON: {e}")))?;

        Self::extract_reply(&api_resp).ok_or_else(|| {
            ProviderError::MalformedReply("no candidate text in reply".into())
        })
    }
}

// --- Gemini API wire types ---

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use periscan_core::turn::Role;

    #[test]
    fn constructor() {
        let client = GeminiClient::new("test-key");
        assert_eq!(client.name(), "gemini");
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
        assert_eq!(client.model, DEFAULT_MODEL);
    }

    #[test]
    fn endpoint_includes_model_and_key() {
        let client = GeminiClient::new("k123")
            .with_base_url("https://proxy.example/")
            .with_model("gemini-test");
        assert_eq!(
            client.endpoint(),
            "https://proxy.example/v1beta/models/gemini-test:generateContent?key=k123"
        );
    }

    #[test]
    fn request_body_shape() {
        let turns = vec![ChatTurn::user("hi"), ChatTurn::model("hello")];
        let body = GenerateRequest {
            contents: GeminiClient::to_contents(&turns),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(json["contents"][1]["role"], "model");
        assert_eq!(json["contents"][1]["parts"][0]["text"], "hello");
    }

    #[test]
    fn roles_map_to_wire_strings() {
        let turns = vec![ChatTurn::model("x")];
        let contents = GeminiClient::to_contents(&turns);
        assert_eq!(contents[0].role, Role::Model.as_str());
    }

    #[test]
    fn extract_reply_from_well_formed_body() {
        let resp: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"pong"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(GeminiClient::extract_reply(&resp).as_deref(), Some("pong"));
    }

    #[test]
    fn empty_candidates_is_no_reply() {
        let resp: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert_eq!(GeminiClient::extract_reply(&resp), None);
    }

    #[test]
    fn missing_candidates_field_is_no_reply() {
        let resp: GenerateResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(GeminiClient::extract_reply(&resp), None);
    }

    #[test]
    fn missing_text_field_is_no_reply() {
        let resp: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{}]}}]}"#,
        )
        .unwrap();
        assert_eq!(GeminiClient::extract_reply(&resp), None);
    }

    #[test]
    fn candidate_without_content_is_no_reply() {
        let resp: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[{}]}"#).unwrap();
        assert_eq!(GeminiClient::extract_reply(&resp), None);
    }

    #[test]
    fn only_first_part_is_used() {
        let resp: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[
                {"content":{"parts":[{"text":"first"},{"text":"second"}]}},
                {"content":{"parts":[{"text":"other candidate"}]}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(GeminiClient::extract_reply(&resp).as_deref(), Some("first"));
    }
}
