//! Ships render frames to the outside world.
//!
//! Drawing is not part of this workspace: each frame is serialized and handed
//! to a [`Sender`], one line per frame, for whatever renders the canvas.

mod sender;
mod serializer;

use heartburst_config::{SenderType, SerializerType, TransportConfig};
use heartburst_simulation::Frame;
use thiserror::Error;

pub use self::sender::{FileSender, NullSender, Sender, StdioSender};
pub use self::serializer::{BinarySerializer, FrameSerializer, JsonSerializer, SerializationError};

/// Error types that can occur during data transport.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Pairs a serializer with a sender and decides which frames go out.
pub struct TransportController {
    serializer: Box<dyn FrameSerializer>,
    sender: Box<dyn Sender>,
    output_frequency: u32,
    frames_seen: u64,
    frames_sent: u64,
}

impl TransportController {
    pub fn new(serializer: Box<dyn FrameSerializer>, sender: Box<dyn Sender>, output_frequency: u32) -> Self {
        Self {
            serializer,
            sender,
            output_frequency: output_frequency.max(1),
            frames_seen: 0,
            frames_sent: 0,
        }
    }

    pub fn from_config(config: &TransportConfig) -> Result<Self, TransportError> {
        let serializer: Box<dyn FrameSerializer> = match config.serializer.serializer_type {
            SerializerType::Json => Box::new(JsonSerializer),
            SerializerType::Binary => Box::new(BinarySerializer),
        };

        let sender: Box<dyn Sender> = match config.sender.sender_type {
            SenderType::Stdio => Box::new(StdioSender::new()),
            SenderType::Null => Box::new(NullSender),
            SenderType::File => {
                let options = config
                    .sender
                    .file_options()
                    .map_err(|err| TransportError::Configuration(err.to_string()))?;
                Box::new(FileSender::new(&options.output_path)?)
            }
        };

        Ok(Self::new(serializer, sender, config.output_frequency))
    }

    /// Offers a frame; every `output_frequency`-th one is serialized and sent.
    ///
    /// Returns whether this frame was sent.
    pub fn publish(&mut self, frame: &Frame) -> Result<bool, TransportError> {
        self.frames_seen += 1;
        if self.frames_seen % self.output_frequency as u64 != 0 {
            return Ok(false);
        }

        let data = self.serializer.serialize(frame)?;
        self.sender.send(&data)?;
        self.frames_sent += 1;
        Ok(true)
    }

    pub fn flush(&mut self) -> Result<(), TransportError> {
        self.sender.flush()
    }

    pub fn frames_sent(&self) -> u64 {
        self.frames_sent
    }
}
