// Message Validators
// Gate raw messages before any signal is computed

use common::{MessageSchema, RawMessage, ValidatedMessage, ValidationError, Value};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// Configuration for the required-fields schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredFieldsConfig {
    /// Keys that must be present and non-null
    #[serde(default = "default_required_fields")]
    pub required_fields: Vec<String>,
    /// Also require `symbol` to be a non-empty string and `data` an object
    #[serde(default = "default_strict_types")]
    pub strict_types: bool,
}

impl Default for RequiredFieldsConfig {
    fn default() -> Self {
        Self {
            required_fields: default_required_fields(),
            strict_types: default_strict_types(),
        }
    }
}

fn default_required_fields() -> Vec<String> {
    vec!["symbol".to_string(), "timestamp".to_string(), "data".to_string()]
}

fn default_strict_types() -> bool {
    true
}

/// Accepts messages carrying every configured field
pub struct RequiredFieldsSchema {
    config: RequiredFieldsConfig,
}

impl RequiredFieldsSchema {
    pub fn new(config: RequiredFieldsConfig) -> Self {
        Self { config }
    }
}

impl Default for RequiredFieldsSchema {
    fn default() -> Self {
        Self::new(RequiredFieldsConfig::default())
    }
}

impl MessageSchema for RequiredFieldsSchema {
    fn is_valid(&self, message: &RawMessage) -> bool {
        let missing = self
            .config
            .required_fields
            .iter()
            .find(|field| matches!(message.get(field.as_str()), None | Some(Value::Null)));
        if let Some(field) = missing {
            debug!("Required field check failed: `{}` absent", field);
            return false;
        }

        if self.config.strict_types {
            let symbol_ok = match message.get("symbol") {
                Some(Value::String(symbol)) => !symbol.is_empty(),
                None => true,
                Some(_) => false,
            };
            let data_ok = matches!(message.get("data"), None | Some(Value::Object(_)));

            debug!("Field type check: symbol={}, data={}", symbol_ok, data_ok);
            return symbol_ok && data_ok;
        }

        debug!("Required field check passed");
        true
    }
}

/// Combines multiple schemas with AND logic
pub struct CompositeSchema {
    schemas: Vec<Box<dyn MessageSchema>>,
}

impl CompositeSchema {
    pub fn new() -> Self {
        Self {
            schemas: Vec::new(),
        }
    }

    pub fn add_schema(mut self, schema: Box<dyn MessageSchema>) -> Self {
        self.schemas.push(schema);
        self
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl Default for CompositeSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageSchema for CompositeSchema {
    fn is_valid(&self, message: &RawMessage) -> bool {
        match self.schemas.iter().position(|schema| !schema.is_valid(message)) {
            Some(index) => {
                debug!("Composite check failed at schema {} of {}", index, self.schemas.len());
                false
            }
            None => {
                debug!("Composite check passed ({} schemas)", self.schemas.len());
                true
            }
        }
    }
}

/// Upgrades raw messages to [`ValidatedMessage`] through a schema predicate
pub struct MessageValidator {
    schema: Box<dyn MessageSchema>,
}

impl MessageValidator {
    pub fn new(schema: Box<dyn MessageSchema>) -> Self {
        Self { schema }
    }

    /// Validate the incoming raw message against the schema.
    ///
    /// The message is moved into the result unchanged. On rejection the
    /// offending payload is logged at error level and dropped.
    pub fn validate(&self, message: RawMessage) -> Result<ValidatedMessage, ValidationError> {
        debug!("🔍 Validating message schema...");
        ValidatedMessage::check(message, self.schema.as_ref()).map_err(|rejected| {
            let payload = serde_json::to_string(&rejected).unwrap_or_else(|_| format!("{rejected:?}"));
            error!("❌ Message schema invalid: {}", payload);
            ValidationError
        })
    }
}

impl Default for MessageValidator {
    fn default() -> Self {
        Self::new(Box::new(RequiredFieldsSchema::default()))
    }
}
