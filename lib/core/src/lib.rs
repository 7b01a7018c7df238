//! Shared types for the blogsmith relay.
//!
//! Holds the `Result` alias used at process boundaries and the ULID-backed
//! identifiers that correlate inbound requests with provider generations.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{GenerationId, ParseIdError, RequestId};
