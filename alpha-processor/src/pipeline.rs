// Message Processing Pipeline
// Validates a raw message, scores it and merges the signal into its data

use crate::config::ProcessorConfig;
use crate::signals::{PlaceholderAlphaModel, SignalComputer};
use crate::validators::{MessageValidator, RequiredFieldsSchema};
use common::{
    EnrichedMessage, MessageSchema, ProcessError, RawMessage, SignalRecord, ValidatedMessage,
};
use tracing::{debug, info, Dispatch};

/// Single-message enrichment pipeline.
///
/// Holds no per-message state, so one processor can serve any number of
/// callers. Diagnostics go to the injected [`Dispatch`] when one is set and
/// to the ambient subscriber otherwise.
pub struct MessageProcessor {
    validator: MessageValidator,
    computer: Box<dyn SignalComputer>,
    dispatch: Option<Dispatch>,
}

impl MessageProcessor {
    /// Processor with the default required-fields schema and placeholder model
    pub fn new() -> Self {
        Self::from_config(&ProcessorConfig::default())
    }

    pub fn from_config(config: &ProcessorConfig) -> Self {
        Self {
            validator: MessageValidator::new(Box::new(RequiredFieldsSchema::new(
                config.schema.clone(),
            ))),
            computer: Box::new(PlaceholderAlphaModel::new()),
            dispatch: None,
        }
    }

    /// Replace the schema predicate
    pub fn with_schema(mut self, schema: Box<dyn MessageSchema>) -> Self {
        self.validator = MessageValidator::new(schema);
        self
    }

    /// Replace the signal computer
    pub fn with_signal_computer(mut self, computer: Box<dyn SignalComputer>) -> Self {
        self.in_scope(|| info!("Setting signal computer: {}", computer.name()));
        self.computer = computer;
        self
    }

    /// Route this processor's diagnostics to `dispatch`
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    pub fn validate(&self, message: RawMessage) -> Result<ValidatedMessage, ProcessError> {
        self.in_scope(|| self.validator.validate(message).map_err(ProcessError::from))
    }

    pub fn compute_signal(&self, message: &ValidatedMessage) -> Result<SignalRecord, ProcessError> {
        self.in_scope(|| self.computer.compute(message))
    }

    /// Main entry point for processing a single message.
    ///
    /// Fails fast: a validation or lookup error aborts the call and no
    /// partial message is returned.
    pub fn process(&self, raw_message: RawMessage) -> Result<EnrichedMessage, ProcessError> {
        self.in_scope(|| -> Result<EnrichedMessage, ProcessError> {
            info!("🚦 Processing new message...");
            let validated = self.validator.validate(raw_message)?;
            let signal = self.computer.compute(&validated)?;

            let enriched = EnrichedMessage::merge(&validated, signal)?;
            debug!(
                "✅ Final enriched message: {}",
                serde_json::to_string(&enriched).unwrap_or_else(|_| format!("{enriched:?}"))
            );
            Ok(enriched)
        })
    }

    pub fn signal_computer_name(&self) -> &str {
        self.computer.name()
    }

    fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, f),
            None => f(),
        }
    }
}

impl Default for MessageProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Value;
    use serde_json::json;

    fn raw(value: Value) -> RawMessage {
        value.as_object().cloned().unwrap()
    }

    struct FixedScore(f64);

    impl SignalComputer for FixedScore {
        fn compute(&self, message: &ValidatedMessage) -> Result<SignalRecord, ProcessError> {
            Ok(SignalRecord {
                symbol: message.symbol()?.to_string(),
                timestamp: message.timestamp()?.clone(),
                alpha_score: self.0,
            })
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[test]
    fn test_default_processor() {
        let processor = MessageProcessor::default();
        assert_eq!(processor.signal_computer_name(), "placeholder-alpha");

        let enriched = processor
            .process(raw(json!({"symbol": "AAPL", "timestamp": 1000, "data": {"price": 150}})))
            .unwrap();
        assert_eq!(enriched.data["alpha_score"], json!(1.0));
    }

    #[test]
    fn test_schema_from_config() {
        let mut config = ProcessorConfig::default();
        config.schema.required_fields.push("venue".to_string());
        let processor = MessageProcessor::from_config(&config);

        let err = processor
            .process(raw(json!({"symbol": "AAPL", "timestamp": 1000, "data": {}})))
            .unwrap_err();
        assert!(err.is_validation());

        assert!(processor
            .process(raw(json!({"symbol": "AAPL", "timestamp": 1000, "data": {}, "venue": "XNAS"})))
            .is_ok());
    }

    #[test]
    fn test_custom_signal_computer() {
        let processor = MessageProcessor::new().with_signal_computer(Box::new(FixedScore(-0.5)));
        assert_eq!(processor.signal_computer_name(), "fixed");

        let enriched = processor
            .process(raw(json!({"symbol": "MSFT", "timestamp": 2000, "data": {}})))
            .unwrap();
        assert_eq!(enriched.data["alpha_score"], json!(-0.5));
    }

    #[test]
    fn test_non_object_data_propagates() {
        let processor = MessageProcessor::new().with_schema(Box::new(|_: &RawMessage| true));
        let err = processor
            .process(raw(json!({"symbol": "AAPL", "timestamp": 1000, "data": "oops"})))
            .unwrap_err();
        assert_eq!(
            err,
            ProcessError::FieldType { field: "data", expected: "an object" }
        );
    }
}
