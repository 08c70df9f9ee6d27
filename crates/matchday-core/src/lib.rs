pub mod candidates;
pub mod client;
pub mod credential;
pub mod decode;
pub mod engine;
pub mod error;
pub mod prompt;

pub use candidates::{ApiVersion, Candidate, GeminiModel, default_candidates};
pub use client::{
    DEFAULT_BASE_URL, GenerationClient, GenerationClientConfig, GenerationReply,
    HttpGenerationClient,
};
pub use credential::ApiCredential;
pub use engine::{Analysis, EMPTY_OUTPUT_NOTE, RelayEngine};
pub use error::{GenerationFailure, RelayError};
