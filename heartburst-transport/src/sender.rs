//! Destinations for serialized frames.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::info;

use crate::TransportError;

/// Sends serialized data to a destination.
pub trait Sender: Send {
    /// Writes one frame. Implementations add their own framing (a newline for line-based sinks).
    fn send(&mut self, data: &[u8]) -> Result<(), TransportError>;

    fn flush(&mut self) -> Result<(), TransportError> {
        Ok(())
    }
}

/// Writes one frame per line to standard output.
pub struct StdioSender {
    stdout: io::Stdout,
}

impl StdioSender {
    pub fn new() -> Self {
        StdioSender { stdout: io::stdout() }
    }
}

impl Default for StdioSender {
    fn default() -> Self {
        Self::new()
    }
}

impl Sender for StdioSender {
    fn send(&mut self, data: &[u8]) -> Result<(), TransportError> {
        let mut out = self.stdout.lock();
        out.write_all(data)?;
        out.write_all(b"\n")?;
        out.flush()?; // Ensure it's written immediately
        Ok(())
    }
}

/// Writes one frame per line to a file, truncating it on creation.
pub struct FileSender {
    writer: BufWriter<File>,
}

impl FileSender {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, TransportError> {
        let path = path.as_ref();
        let file = File::create(path)?;
        info!("Writing frames to {}", path.display());
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl Sender for FileSender {
    fn send(&mut self, data: &[u8]) -> Result<(), TransportError> {
        self.writer.write_all(data)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Discards everything. Useful for headless benchmarking.
pub struct NullSender;

impl Sender for NullSender {
    fn send(&mut self, _data: &[u8]) -> Result<(), TransportError> {
        Ok(())
    }
}
