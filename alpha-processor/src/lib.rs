// Alpha Processor
// Validates incoming messages, computes an alpha signal and enriches the payload

pub mod config;
pub mod pipeline;
pub mod signals;
pub mod validators;

pub use config::{create_config_template, load_config, save_config, LoggingConfig, ProcessorConfig};
pub use pipeline::MessageProcessor;
pub use signals::{PlaceholderAlphaModel, SignalComputer, PLACEHOLDER_ALPHA_SCORE};
pub use validators::{CompositeSchema, MessageValidator, RequiredFieldsConfig, RequiredFieldsSchema};

pub use common::{
    EnrichedMessage, MessageSchema, ProcessError, RawMessage, SignalRecord, ValidatedMessage,
    ValidationError,
};
