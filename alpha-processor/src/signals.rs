use common::{ProcessError, SignalRecord, ValidatedMessage};
use tracing::debug;

/// Score assigned by [`PlaceholderAlphaModel`] to every message.
pub const PLACEHOLDER_ALPHA_SCORE: f64 = 1.0;

/// Signal computer trait
pub trait SignalComputer: Send + Sync {
    /// Derive a signal record from an already validated message.
    ///
    /// Implementations do not re-validate; a message missing the fields they
    /// read fails with a lookup error.
    fn compute(&self, message: &ValidatedMessage) -> Result<SignalRecord, ProcessError>;
    fn name(&self) -> &str;
}

/// Stand-in for a real factor model: every message scores the same.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderAlphaModel;

impl PlaceholderAlphaModel {
    pub fn new() -> Self {
        Self
    }
}

impl SignalComputer for PlaceholderAlphaModel {
    fn compute(&self, message: &ValidatedMessage) -> Result<SignalRecord, ProcessError> {
        let symbol = message.symbol()?;
        debug!("📊 Computing alpha factor for {}", symbol);

        Ok(SignalRecord {
            symbol: symbol.to_string(),
            timestamp: message.timestamp()?.clone(),
            alpha_score: PLACEHOLDER_ALPHA_SCORE,
        })
    }

    fn name(&self) -> &str {
        "placeholder-alpha"
    }
}
