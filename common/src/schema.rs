use crate::message::RawMessage;

/// Boolean predicate over the shape of a raw message.
///
/// The pipeline treats the decision logic as opaque; alternate schema engines
/// plug in by implementing this trait.
pub trait MessageSchema: Send + Sync {
    fn is_valid(&self, message: &RawMessage) -> bool;
}

impl<F> MessageSchema for F
where
    F: Fn(&RawMessage) -> bool + Send + Sync,
{
    fn is_valid(&self, message: &RawMessage) -> bool {
        self(message)
    }
}

impl MessageSchema for Box<dyn MessageSchema> {
    fn is_valid(&self, message: &RawMessage) -> bool {
        (**self).is_valid(message)
    }
}
