use std::sync::Arc;

use tracing::{info, warn};

use crate::candidates::Candidate;
use crate::client::GenerationClient;
use crate::credential::ApiCredential;
use crate::error::{GenerationFailure, RelayError};
use crate::prompt::{DEFAULT_ANALYSIS, build_prompt};

/// Marker carried in the response envelope when the upstream returned no
/// usable text and the conservative default was substituted.
pub const EMPTY_OUTPUT_NOTE: &str = "empty_output_fallback";

#[derive(Debug, Clone)]
pub struct Analysis {
    pub text: String,
    pub used: Candidate,
    pub note: Option<&'static str>,
}

/// Iterates the candidate list in order, short-circuiting on success or on an
/// auth-class failure. Candidates are attempted strictly sequentially; each
/// call runs to completion before the next decision.
pub struct RelayEngine {
    credential: Option<ApiCredential>,
    candidates: Vec<Candidate>,
    client: Arc<dyn GenerationClient>,
}

impl RelayEngine {
    pub fn new(
        credential: Option<ApiCredential>,
        candidates: Vec<Candidate>,
        client: Arc<dyn GenerationClient>,
    ) -> Self {
        Self {
            credential,
            candidates,
            client,
        }
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    pub async fn run(&self, input_text: &str) -> Result<Analysis, RelayError> {
        let Some(credential) = self.credential.as_ref() else {
            return Err(RelayError::MissingCredential);
        };

        let prompt = build_prompt(input_text);
        let mut last_failure: Option<GenerationFailure> = None;

        for candidate in &self.candidates {
            match self.client.generate(credential, candidate, &prompt).await {
                Ok(reply) if !reply.text.trim().is_empty() => {
                    info!(version = %candidate.version, model = %candidate.model, "generation succeeded");
                    return Ok(Analysis {
                        text: reply.text,
                        used: *candidate,
                        note: None,
                    });
                }
                Ok(_) => {
                    // Empty output means "emit the conservative default", not
                    // "try the next candidate".
                    info!(version = %candidate.version, model = %candidate.model, "empty output, substituting default");
                    return Ok(Analysis {
                        text: DEFAULT_ANALYSIS.to_string(),
                        used: *candidate,
                        note: Some(EMPTY_OUTPUT_NOTE),
                    });
                }
                Err(failure) if failure.is_auth() => {
                    warn!(
                        version = %candidate.version,
                        model = %candidate.model,
                        status = failure.status,
                        "credential rejected upstream, aborting fallback"
                    );
                    return Err(RelayError::UpstreamAuth(failure));
                }
                Err(failure) => {
                    warn!(
                        version = %candidate.version,
                        model = %candidate.model,
                        status = failure.status,
                        message = %failure.message,
                        "candidate failed, trying next"
                    );
                    last_failure = Some(failure);
                }
            }
        }

        match last_failure {
            Some(failure) => Err(RelayError::AllCandidatesFailed(failure)),
            None => Err(RelayError::NoCandidates),
        }
    }
}
