//! Output redirection for buffered emission.
//!
//! Emitters write through an [`OutputStack`]. A block whose position in
//! the final output is not known yet is written after [`OutputStack::diverge`]
//! and collected with [`OutputStack::restore`], which hands back the
//! diverged sink and reinstalls the previous one.

use std::fmt;
use std::io::{self, Write};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutputError {
    #[error("restore called without a matching diverge")]
    UnbalancedRestore,
}

/// A destination for generated text.
pub enum Sink {
    /// In-memory buffer, retrievable after restore.
    Buffer(Vec<u8>),
    Writer(Box<dyn Write>),
}

impl Sink {
    pub fn buffer() -> Self {
        Sink::Buffer(Vec::new())
    }

    pub fn writer(w: impl Write + 'static) -> Self {
        Sink::Writer(Box::new(w))
    }

    /// Buffered bytes, if this is a buffer sink.
    pub fn into_buffer(self) -> Option<Vec<u8>> {
        match self {
            Sink::Buffer(b) => Some(b),
            Sink::Writer(_) => None,
        }
    }

    /// Buffered text, if this is a buffer sink.
    pub fn into_string(self) -> Option<String> {
        self.into_buffer()
            .map(|b| String::from_utf8_lossy(&b).into_owned())
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sink::Buffer(b) => f.debug_tuple("Buffer").field(&b.len()).finish(),
            Sink::Writer(_) => f.write_str("Writer"),
        }
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Buffer(b) => b.write(buf),
            Sink::Writer(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Buffer(_) => Ok(()),
            Sink::Writer(w) => w.flush(),
        }
    }
}

/// Current output sink plus the sinks it has diverged from.
#[derive(Debug)]
pub struct OutputStack {
    current: Sink,
    saved: Vec<Sink>,
}

impl OutputStack {
    pub fn new(sink: Sink) -> Self {
        Self {
            current: sink,
            saved: Vec::new(),
        }
    }

    /// Number of diverges not yet restored.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Save the current sink and write to `sink` until the matching
    /// [`restore`](Self::restore).
    pub fn diverge(&mut self, sink: Sink) {
        let previous = std::mem::replace(&mut self.current, sink);
        self.saved.push(previous);
    }

    /// Diverge into a fresh in-memory buffer.
    pub fn diverge_buffer(&mut self) {
        self.diverge(Sink::buffer());
    }

    /// Reinstall the sink saved by the last diverge and return the one
    /// that was diverged to.
    pub fn restore(&mut self) -> Result<Sink, OutputError> {
        let previous = self.saved.pop().ok_or(OutputError::UnbalancedRestore)?;
        Ok(std::mem::replace(&mut self.current, previous))
    }

    /// Consume the stack, returning the base sink.
    pub fn into_inner(self) -> Result<Sink, OutputError> {
        if self.saved.is_empty() {
            Ok(self.current)
        } else {
            Err(OutputError::UnbalancedRestore)
        }
    }
}

impl Write for OutputStack {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.current.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.current.flush()
    }
}
