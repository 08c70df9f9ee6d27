use std::fmt;

use serde::{Deserialize, Serialize};

/// API versions attempted by the fallback loop, in priority order.
pub const PREFERRED_VERSIONS: [ApiVersion; 2] = [ApiVersion::V1, ApiVersion::V1Beta];

/// Models attempted per version, in priority order.
pub const PREFERRED_MODELS: [GeminiModel; 5] = [
    GeminiModel::Flash15,
    GeminiModel::Flash15Latest,
    GeminiModel::Pro15,
    GeminiModel::Pro10,
    GeminiModel::Pro,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    V1,
    V1Beta,
}

impl ApiVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1",
            ApiVersion::V1Beta => "v1beta",
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeminiModel {
    #[serde(rename = "gemini-1.5-flash")]
    Flash15,
    #[serde(rename = "gemini-1.5-flash-latest")]
    Flash15Latest,
    #[serde(rename = "gemini-1.5-pro")]
    Pro15,
    #[serde(rename = "gemini-1.0-pro")]
    Pro10,
    #[serde(rename = "gemini-pro")]
    Pro,
}

impl GeminiModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeminiModel::Flash15 => "gemini-1.5-flash",
            GeminiModel::Flash15Latest => "gemini-1.5-flash-latest",
            GeminiModel::Pro15 => "gemini-1.5-pro",
            GeminiModel::Pro10 => "gemini-1.0-pro",
            GeminiModel::Pro => "gemini-pro",
        }
    }
}

impl fmt::Display for GeminiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (version, model) pair attempted by the fallback loop. Distinct from
/// the upstream API's response "candidate", which is a generated output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    pub version: ApiVersion,
    pub model: GeminiModel,
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.version, self.model)
    }
}

/// The fixed attempt order: version priority outer, model priority inner.
pub fn default_candidates() -> Vec<Candidate> {
    let mut candidates = Vec::with_capacity(PREFERRED_VERSIONS.len() * PREFERRED_MODELS.len());
    for version in PREFERRED_VERSIONS {
        for model in PREFERRED_MODELS {
            candidates.push(Candidate { version, model });
        }
    }
    candidates
}
