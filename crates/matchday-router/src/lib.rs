pub mod analyze;
pub mod cors;
pub mod envelope;

pub use analyze::{RelayState, relay_router};
