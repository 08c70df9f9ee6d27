use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use matchday_protocol::gemini::error::ErrorResponse;
use matchday_protocol::gemini::generate_content::{
    GenerateContentPath, GenerateContentRequest, GenerateContentRequestBody,
    GenerateContentResponse,
};
use matchday_protocol::gemini::types::{Content, GenerationConfig};

use crate::candidates::Candidate;
use crate::credential::ApiCredential;
use crate::error::GenerationFailure;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Fixed generation parameters, identical for every candidate.
const TEMPERATURE: f64 = 0.6;
const MAX_OUTPUT_TOKENS: u32 = 400;

#[derive(Debug, Clone)]
pub struct GenerationReply {
    /// Trimmed generated text; may be empty, which is not a failure here.
    pub text: String,
}

/// Seam between the fallback engine and the upstream API.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(
        &self,
        credential: &ApiCredential,
        candidate: &Candidate,
        prompt: &str,
    ) -> Result<GenerationReply, GenerationFailure>;
}

#[derive(Debug, Clone)]
pub struct GenerationClientConfig {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for GenerationClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Clone)]
pub struct HttpGenerationClient {
    config: GenerationClientConfig,
    client: wreq::Client,
}

impl HttpGenerationClient {
    pub fn new(config: GenerationClientConfig) -> Result<Self, wreq::Error> {
        let client = wreq::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { config, client })
    }

    fn endpoint(&self, credential: &ApiCredential, candidate: &Candidate, model_path: &str) -> String {
        format!(
            "{}/{}/{}:generateContent?key={}",
            self.config.base_url.trim_end_matches('/'),
            candidate.version.as_str(),
            model_path,
            urlencoding::encode(credential.expose()),
        )
    }
}

fn build_request(candidate: &Candidate, prompt: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        path: GenerateContentPath {
            model: format!("models/{}", candidate.model.as_str()),
        },
        body: GenerateContentRequestBody {
            contents: vec![Content::user_text(prompt)],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                temperature: Some(TEMPERATURE),
                max_output_tokens: Some(MAX_OUTPUT_TOKENS),
                ..GenerationConfig::default()
            }),
        },
    }
}

fn failure_from_response(status: u16, body: &[u8], candidate: &Candidate) -> GenerationFailure {
    let details: Option<Value> = serde_json::from_slice(body).ok();
    let message = serde_json::from_slice::<ErrorResponse>(body)
        .ok()
        .and_then(|envelope| envelope.error.message)
        .or_else(|| {
            details
                .as_ref()
                .and_then(|value| value.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("HTTP {status}"));
    GenerationFailure::http(status, message, *candidate, details)
}

/// The request URL carries the credential as a query parameter, so transport
/// errors are rendered from their classification alone; the library error's
/// own formatting (which embeds the URL) must never reach a surfaced message.
fn map_transport_error(err: &wreq::Error, candidate: &Candidate) -> GenerationFailure {
    let kind = if err.is_timeout() {
        "request timed out"
    } else if err.is_connect() {
        "connect failure"
    } else if err.is_connection_reset() {
        "connection reset"
    } else {
        "transport failure"
    };
    GenerationFailure::transport(format!("upstream {kind}"), *candidate)
}

#[async_trait]
impl GenerationClient for HttpGenerationClient {
    async fn generate(
        &self,
        credential: &ApiCredential,
        candidate: &Candidate,
        prompt: &str,
    ) -> Result<GenerationReply, GenerationFailure> {
        let request = build_request(candidate, prompt);
        let url = self.endpoint(credential, candidate, &request.path.model);

        let response = self
            .client
            .post(url)
            .json(&request.body)
            .send()
            .await
            .map_err(|err| map_transport_error(&err, candidate))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|err| map_transport_error(&err, candidate))?;

        if !(200..300).contains(&status) {
            return Err(failure_from_response(status, &body, candidate));
        }

        // An unparseable success body degrades to the empty response; the
        // engine substitutes the conservative default for empty text.
        let parsed: GenerateContentResponse = serde_json::from_slice(&body).unwrap_or_default();
        Ok(GenerationReply {
            text: parsed.primary_text().trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::default_candidates;

    #[test]
    fn error_message_prefers_upstream_error_body() {
        let candidate = default_candidates()[0];
        let body = br#"{"error":{"code":404,"message":"model not found","status":"NOT_FOUND"}}"#;
        let failure = failure_from_response(404, body, &candidate);
        assert_eq!(failure.status, Some(404));
        assert_eq!(failure.message, "model not found");
        assert!(failure.details.is_some());
    }

    #[test]
    fn error_message_falls_back_to_top_level_then_status() {
        let candidate = default_candidates()[0];
        let failure = failure_from_response(502, br#"{"message":"bad gateway"}"#, &candidate);
        assert_eq!(failure.message, "bad gateway");
        let failure = failure_from_response(500, b"not json at all", &candidate);
        assert_eq!(failure.message, "HTTP 500");
        assert!(failure.details.is_none());
    }

    #[test]
    fn request_body_carries_fixed_generation_parameters() {
        let candidate = default_candidates()[0];
        let request = build_request(&candidate, "prompt text");
        let config = request.body.generation_config.unwrap();
        assert_eq!(config.temperature, Some(0.6));
        assert_eq!(config.max_output_tokens, Some(400));
        assert_eq!(request.path.model, "models/gemini-1.5-flash");
        assert_eq!(request.body.contents.len(), 1);
    }

    #[test]
    fn endpoint_encodes_the_credential() {
        let client = HttpGenerationClient::new(GenerationClientConfig::default()).unwrap();
        let credential = ApiCredential::new("abc/+=123").unwrap();
        let candidate = default_candidates()[0];
        let url = client.endpoint(&credential, &candidate, "models/gemini-1.5-flash");
        assert_eq!(
            url,
            "https://generativelanguage.googleapis.com/v1/models/gemini-1.5-flash:generateContent?key=abc%2F%2B%3D123"
        );
    }
}
