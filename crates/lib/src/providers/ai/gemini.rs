use crate::{errors::ModelError, prompt::PromptPart, providers::ai::AiProvider};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

// --- Gemini-specific request and response structures ---

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Part {
    Text(String),
    InlineData(InlineData),
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Deserialize, Debug)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: ContentResponse,
}

#[derive(Deserialize, Debug)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize, Debug)]
struct PartResponse {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize, Debug, Default)]
struct GeminiErrorBody {
    #[serde(default)]
    error: GeminiErrorDetail,
}

#[derive(Deserialize, Debug, Default)]
struct GeminiErrorDetail {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: String,
}

// --- Gemini Provider implementation ---

/// A provider for interacting with the Google Gemini API.
#[derive(Clone, Debug)]
pub struct GeminiProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: String,
}

impl GeminiProvider {
    /// Creates a new `GeminiProvider`.
    ///
    /// The client carries no request timeout; the model call runs to
    /// completion or provider-side error.
    pub fn new(client: ReqwestClient, api_url: String, api_key: String) -> Self {
        Self {
            client,
            api_url,
            api_key,
        }
    }

    /// Maps a Gemini error body onto the provider error taxonomy.
    fn classify_error(http_status: reqwest::StatusCode, body: &str) -> ModelError {
        let detail: GeminiErrorBody = serde_json::from_str(body).unwrap_or_default();
        let status = detail.error.status.to_ascii_uppercase();
        let message = detail.error.message;

        if status == "FAILED_PRECONDITION" || message.contains("User location") {
            return ModelError::RegionRestricted;
        }
        if http_status == reqwest::StatusCode::UNAUTHORIZED
            || http_status == reqwest::StatusCode::FORBIDDEN
            || status == "UNAUTHENTICATED"
            || status == "PERMISSION_DENIED"
            || message.contains("API_KEY_INVALID")
            || message.contains("API key not valid")
        {
            return ModelError::InvalidCredentials;
        }
        if status == "INVALID_ARGUMENT"
            && (message.to_ascii_lowercase().contains("mime")
                || message.to_ascii_lowercase().contains("content"))
        {
            return ModelError::UnsupportedContent(message);
        }

        if message.is_empty() {
            ModelError::Other(format!("Request failed with status: {http_status}"))
        } else {
            ModelError::Other(message)
        }
    }
}

#[async_trait]
impl AiProvider for GeminiProvider {
    async fn complete(&self, parts: &[PromptPart]) -> Result<String, ModelError> {
        let wire_parts = parts
            .iter()
            .map(|part| match part {
                PromptPart::Text(text) => Part::Text(text.clone()),
                PromptPart::Inline { media_type, data } => Part::InlineData(InlineData {
                    mime_type: media_type.clone(),
                    data: general_purpose::STANDARD.encode(data),
                }),
            })
            .collect();

        let request_body = GeminiRequest {
            contents: vec![Content { parts: wire_parts }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .query(&[("key", &self.api_key)])
            .json(&request_body)
            .send()
            .await
            .map_err(ModelError::Request)?;

        let http_status = response.status();
        if !http_status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Self::classify_error(http_status, &error_text));
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Other(format!("Failed to deserialize response: {e}")))?;

        let raw_response = gemini_response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.trim().to_string())
            .ok_or_else(|| ModelError::Other("Response contained no candidates.".to_string()))?;

        Ok(raw_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method, MockServer};
    use serde_json::json;

    fn provider(server: &MockServer) -> GeminiProvider {
        GeminiProvider::new(
            ReqwestClient::new(),
            format!("{}/v1beta/models/gemini-1.5-flash:generateContent", server.base_url()),
            "test-key".to_string(),
        )
    }

    fn completion_body(text: &str) -> serde_json::Value {
        json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] })
    }

    #[tokio::test]
    async fn returns_trimmed_first_candidate() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(Method::POST)
                .path("/v1beta/models/gemini-1.5-flash:generateContent")
                .query_param("key", "test-key");
            then.status(200).json_body(completion_body("  diagnosis text  "));
        });

        let result = provider(&server)
            .complete(&[PromptPart::Text("hello".to_string())])
            .await
            .unwrap();
        assert_eq!(result, "diagnosis text");
    }

    #[tokio::test]
    async fn inline_parts_are_base64_encoded() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(Method::POST)
                .json_body_partial(
                    json!({
                        "contents": [{
                            "parts": [
                                { "text": "prompt" },
                                { "inline_data": { "mime_type": "image/png", "data": "AQID" } }
                            ]
                        }]
                    })
                    .to_string(),
                );
            then.status(200).json_body(completion_body("ok"));
        });

        let parts = vec![
            PromptPart::Text("prompt".to_string()),
            PromptPart::Inline {
                media_type: "image/png".to_string(),
                data: vec![1, 2, 3],
            },
        ];
        provider(&server).complete(&parts).await.unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn invalid_key_maps_to_invalid_credentials() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(Method::POST);
            then.status(400).json_body(json!({
                "error": {
                    "status": "INVALID_ARGUMENT",
                    "message": "API key not valid. Please pass a valid API key. [API_KEY_INVALID]"
                }
            }));
        });

        let err = provider(&server)
            .complete(&[PromptPart::Text("p".to_string())])
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::InvalidCredentials));
    }

    #[tokio::test]
    async fn location_failure_maps_to_region_restricted() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(Method::POST);
            then.status(400).json_body(json!({
                "error": {
                    "status": "FAILED_PRECONDITION",
                    "message": "User location is not supported for the API use."
                }
            }));
        });

        let err = provider(&server)
            .complete(&[PromptPart::Text("p".to_string())])
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::RegionRestricted));
    }

    #[tokio::test]
    async fn bad_mime_maps_to_unsupported_content() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(Method::POST);
            then.status(400).json_body(json!({
                "error": {
                    "status": "INVALID_ARGUMENT",
                    "message": "Unsupported MIME type: application/zip"
                }
            }));
        });

        let err = provider(&server)
            .complete(&[PromptPart::Text("p".to_string())])
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::UnsupportedContent(_)));
    }

    #[tokio::test]
    async fn empty_candidates_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(Method::POST);
            then.status(200).json_body(json!({ "candidates": [] }));
        });

        let err = provider(&server)
            .complete(&[PromptPart::Text("p".to_string())])
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::Other(_)));
    }
}
