//! Success response envelope.

use serde::Serialize;

/// The fixed success envelope `{message, validation, data}`.
///
/// `validation` is always empty on success; it exists so success and error
/// bodies share one shape.
#[must_use = "envelopes do nothing unless serialized"]
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    /// Human-readable outcome summary.
    pub message: String,
    /// Field-level validation messages (empty on success).
    pub validation: Vec<String>,
    /// Payload of the operation.
    pub data: T,
}

impl<T> Envelope<T> {
    /// Creates a new envelope around the given payload.
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            validation: Vec::new(),
            data,
        }
    }
}

/// Payload for operations that return no data; serializes as `{}`.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Empty {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_shape() {
        let envelope = Envelope::new("Success", vec![1, 2, 3]);
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["message"], "Success");
        assert_eq!(value["validation"], serde_json::json!([]));
        assert_eq!(value["data"], serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn empty_payload_serializes_as_object() {
        let envelope = Envelope::new("User has been logged out", Empty {});
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["data"], serde_json::json!({}));
    }
}
