use crate::error::ProcessError;
use crate::schema::MessageSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Untyped message as received from an upstream source
pub type RawMessage = Map<String, Value>;

/// A raw message that has passed a schema predicate.
///
/// The only constructor is [`ValidatedMessage::check`], so holding one proves
/// the predicate accepted it. The wrapped mapping is the input, unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidatedMessage(RawMessage);

impl ValidatedMessage {
    /// Run `schema` over `raw`, handing the message back untouched on rejection.
    pub fn check<S>(raw: RawMessage, schema: &S) -> Result<Self, RawMessage>
    where
        S: MessageSchema + ?Sized,
    {
        if schema.is_valid(&raw) {
            Ok(Self(raw))
        } else {
            Err(raw)
        }
    }

    pub fn symbol(&self) -> Result<&str, ProcessError> {
        match self.0.get("symbol") {
            Some(Value::String(symbol)) => Ok(symbol),
            Some(_) => Err(ProcessError::FieldType {
                field: "symbol",
                expected: "a string",
            }),
            None => Err(ProcessError::MissingField("symbol")),
        }
    }

    /// Point in time of the message; opaque to the pipeline.
    pub fn timestamp(&self) -> Result<&Value, ProcessError> {
        self.0
            .get("timestamp")
            .ok_or(ProcessError::MissingField("timestamp"))
    }

    pub fn data(&self) -> Result<&Map<String, Value>, ProcessError> {
        match self.0.get("data") {
            Some(Value::Object(data)) => Ok(data),
            Some(_) => Err(ProcessError::FieldType {
                field: "data",
                expected: "an object",
            }),
            None => Err(ProcessError::MissingField("data")),
        }
    }

    pub fn into_inner(self) -> RawMessage {
        self.0
    }
}

impl PartialEq<RawMessage> for ValidatedMessage {
    fn eq(&self, other: &RawMessage) -> bool {
        &self.0 == other
    }
}

/// Alpha signal derived from a single validated message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    pub symbol: String,
    pub timestamp: Value,
    pub alpha_score: f64,
}

impl SignalRecord {
    /// Fields in merge order: `symbol`, `timestamp`, `alpha_score`.
    pub fn into_fields(self) -> Map<String, Value> {
        let mut fields = Map::with_capacity(3);
        fields.insert("symbol".to_string(), Value::String(self.symbol));
        fields.insert("timestamp".to_string(), self.timestamp);
        fields.insert("alpha_score".to_string(), Value::from(self.alpha_score));
        fields
    }
}

/// Validated message with the signal merged into its data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedMessage {
    pub symbol: String,
    pub timestamp: Value,
    pub data: Map<String, Value>,
}

impl EnrichedMessage {
    /// Shallow union of the message data and the signal; signal fields win.
    pub fn merge(message: &ValidatedMessage, signal: SignalRecord) -> Result<Self, ProcessError> {
        let symbol = message.symbol()?.to_string();
        let timestamp = message.timestamp()?.clone();

        let mut data = message.data()?.clone();
        // Existing keys keep their position; new ones are appended
        data.extend(signal.into_fields());

        Ok(Self {
            symbol,
            timestamp,
            data,
        })
    }
}
