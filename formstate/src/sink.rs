//! Consumers of submitted form data.

use std::io::Write;

use crate::error::SinkError;
use crate::state::FormData;

/// Destination for the data a form produces on submit.
///
/// The store hands every submission to its sink. Implement this to forward
/// form data to a network client, a queue, or anything else.
pub trait SubmitSink: Send {
    /// Deliver one submission.
    fn deliver(&mut self, data: &FormData) -> Result<(), SinkError>;
}

impl<F> SubmitSink for F
where
    F: FnMut(&FormData) -> Result<(), SinkError> + Send,
{
    fn deliver(&mut self, data: &FormData) -> Result<(), SinkError> {
        self(data)
    }
}

/// Dumps each submission to the log at `info` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl SubmitSink for LogSink {
    fn deliver(&mut self, data: &FormData) -> Result<(), SinkError> {
        log::info!("Form submitted: {:#?}", **data);
        Ok(())
    }
}

/// Writes each submission as one line of JSON.
#[derive(Debug)]
pub struct JsonSink<W> {
    writer: W,
}

impl<W: Write + Send> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> SubmitSink for JsonSink<W> {
    fn deliver(&mut self, data: &FormData) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, data)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
