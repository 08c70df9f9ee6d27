use serde_json::Value;
use thiserror::Error;

use crate::candidates::Candidate;

/// A failed attempt against one generation candidate.
///
/// `status` is the upstream HTTP status; `None` for transport-level failures
/// (timeout, connect, reset) where no response was received. `details` is the
/// upstream error body when one came back. Neither field ever carries the
/// credential.
#[derive(Debug, Clone)]
pub struct GenerationFailure {
    pub status: Option<u16>,
    pub message: String,
    pub candidate: Option<Candidate>,
    pub details: Option<Value>,
}

impl GenerationFailure {
    pub fn transport(message: impl Into<String>, candidate: Candidate) -> Self {
        Self {
            status: None,
            message: message.into(),
            candidate: Some(candidate),
            details: None,
        }
    }

    pub fn http(
        status: u16,
        message: impl Into<String>,
        candidate: Candidate,
        details: Option<Value>,
    ) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
            candidate: Some(candidate),
            details,
        }
    }

    /// 401/403 mean the key itself is bad; trying other candidates cannot help.
    pub fn is_auth(&self) -> bool {
        matches!(self.status, Some(401) | Some(403))
    }

    /// Status to surface to the caller. Absent or out-of-range statuses
    /// collapse to 500.
    pub fn surfaced_status(&self) -> u16 {
        self.status
            .filter(|status| (100..600).contains(status))
            .unwrap_or(500)
    }
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("no API credential configured")]
    MissingCredential,
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error("no input text provided")]
    EmptyInput,
    #[error("method {0} not allowed")]
    MethodNotAllowed(String),
    #[error("upstream rejected the credential: {}", .0.message)]
    UpstreamAuth(GenerationFailure),
    #[error("all candidates failed: {}", .0.message)]
    AllCandidatesFailed(GenerationFailure),
    #[error("no generation candidates configured")]
    NoCandidates,
}

impl RelayError {
    pub fn status(&self) -> u16 {
        match self {
            RelayError::MissingCredential | RelayError::NoCandidates => 500,
            RelayError::InvalidBody(_) | RelayError::EmptyInput => 400,
            RelayError::MethodNotAllowed(_) => 405,
            RelayError::UpstreamAuth(failure) | RelayError::AllCandidatesFailed(failure) => {
                failure.surfaced_status()
            }
        }
    }

    /// The upstream failure carried by terminal generation errors.
    pub fn failure(&self) -> Option<&GenerationFailure> {
        match self {
            RelayError::UpstreamAuth(failure) | RelayError::AllCandidatesFailed(failure) => {
                Some(failure)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::default_candidates;

    #[test]
    fn auth_detection_covers_both_statuses() {
        let candidate = default_candidates()[0];
        assert!(GenerationFailure::http(401, "bad key", candidate, None).is_auth());
        assert!(GenerationFailure::http(403, "restricted", candidate, None).is_auth());
        assert!(!GenerationFailure::http(404, "no model", candidate, None).is_auth());
        assert!(!GenerationFailure::transport("timeout", candidate).is_auth());
    }

    #[test]
    fn absent_or_invalid_status_surfaces_as_500() {
        let candidate = default_candidates()[0];
        assert_eq!(
            GenerationFailure::transport("timeout", candidate).surfaced_status(),
            500
        );
        assert_eq!(
            GenerationFailure::http(42, "weird", candidate, None).surfaced_status(),
            500
        );
        assert_eq!(
            GenerationFailure::http(503, "busy", candidate, None).surfaced_status(),
            503
        );
    }

    #[test]
    fn relay_error_status_mapping() {
        assert_eq!(RelayError::MissingCredential.status(), 500);
        assert_eq!(RelayError::EmptyInput.status(), 400);
        assert_eq!(RelayError::InvalidBody("bad".into()).status(), 400);
        assert_eq!(RelayError::MethodNotAllowed("DELETE".into()).status(), 405);
        assert_eq!(RelayError::NoCandidates.status(), 500);
    }
}
