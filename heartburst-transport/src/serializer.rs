//! Turns render frames into bytes for a [`Sender`](crate::Sender).

use heartburst_simulation::Frame;
use thiserror::Error;

/// Errors that can occur while encoding or decoding a frame.
#[derive(Error, Debug)]
pub enum SerializationError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Binary serialization failed: {0}")]
    Binary(#[from] bincode::Error),

    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Encodes a [`Frame`] into a single line of bytes.
pub trait FrameSerializer: Send + Sync {
    fn serialize(&self, frame: &Frame) -> Result<Vec<u8>, SerializationError>;
}

/// Serializes frames as JSON objects.
pub struct JsonSerializer;

impl FrameSerializer for JsonSerializer {
    fn serialize(&self, frame: &Frame) -> Result<Vec<u8>, SerializationError> {
        Ok(serde_json::to_vec(frame)?)
    }
}

/// Serializes frames with bincode, then base64 so each frame stays on one line.
pub struct BinarySerializer;

impl BinarySerializer {
    /// Reverses [`FrameSerializer::serialize`] for a binary frame.
    pub fn decode(line: &[u8]) -> Result<Frame, SerializationError> {
        let bytes = base64::decode(line)?;
        Ok(bincode::deserialize(&bytes)?)
    }
}

impl FrameSerializer for BinarySerializer {
    fn serialize(&self, frame: &Frame) -> Result<Vec<u8>, SerializationError> {
        let bytes = bincode::serialize(frame)?;
        Ok(base64::encode(bytes).into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heartburst_simulation::{Canvas, ExplosionParams, FieldSettings, HeartField};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn frame(debug_overlay: bool) -> Frame {
        let mut rng = StdRng::seed_from_u64(2);
        let settings = FieldSettings::new(3, ExplosionParams::new(200.0, 50.0).unwrap())
            .with_debug_overlay(debug_overlay);
        let mut field = HeartField::new(Canvas::new(800, 600).unwrap(), settings, &mut rng);
        field.advance();
        field.frame()
    }

    #[test]
    fn json_frame_has_render_fields() {
        let bytes = JsonSerializer.serialize(&frame(false)).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["tick"], 1);
        assert_eq!(value["width"], 800);
        assert_eq!(value["hearts"].as_array().unwrap().len(), 3);
        assert!(value["hearts"][0]["color"]["red"].is_number());
        assert!(value["hearts"][0]["hitbox"].is_null());
        assert!(value["debug"].is_null());
        assert!(!bytes.contains(&b'\n'));
    }

    #[test]
    fn binary_frame_is_single_line_and_decodes() {
        let original = frame(true);
        let bytes = BinarySerializer.serialize(&original).unwrap();

        assert!(!bytes.contains(&b'\n'));
        assert_eq!(BinarySerializer::decode(&bytes).unwrap(), original);
    }

    #[test]
    fn binary_decode_rejects_garbage() {
        assert!(matches!(
            BinarySerializer::decode(b"not base64 at all!"),
            Err(SerializationError::Base64(_))
        ));
    }
}
