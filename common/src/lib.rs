//! Shared message types for the alpha enrichment pipeline.
//!
//! Messages move through three stages: a [`RawMessage`] as received from
//! upstream, a [`ValidatedMessage`] that has passed a [`MessageSchema`], and
//! an [`EnrichedMessage`] carrying the computed [`SignalRecord`] in its data.

pub mod error;
pub mod message;
pub mod schema;

pub use error::{ProcessError, ValidationError};
pub use message::{EnrichedMessage, RawMessage, SignalRecord, ValidatedMessage};
pub use schema::MessageSchema;

pub use serde_json::{Map, Value};
