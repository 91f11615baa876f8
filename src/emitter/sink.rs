use super::banner::Banner;
use crate::error::{GenError, Result};
use std::io::{self, Write};

/// Exclusive, append-only handle on one output artifact.
///
/// The banner goes out on creation; `finish` flushes and hands the writer
/// back. Dropping a sink without finishing it leaves the artifact incomplete,
/// which the pipeline never commits.
pub struct OutputSink<W: Write> {
    label: String,
    writer: W,
    lines: usize,
}

impl<W: Write> OutputSink<W> {
    pub fn create(label: impl Into<String>, mut writer: W, banner: &Banner) -> Result<Self> {
        let label = label.into();
        write!(writer, "{}", banner).map_err(|e| write_error(&label, e))?;
        Ok(Self {
            label,
            writer,
            lines: 0,
        })
    }

    /// Append `text` exactly as given (it carries its own terminator).
    pub fn push(&mut self, text: &str) -> Result<()> {
        self.writer
            .write_all(text.as_bytes())
            .map_err(|e| write_error(&self.label, e))?;
        self.lines += 1;
        Ok(())
    }

    pub fn finish(mut self) -> Result<W> {
        self.writer
            .flush()
            .map_err(|e| write_error(&self.label, e))?;
        tracing::debug!(artifact = %self.label, lines = self.lines, "artifact finalised");
        Ok(self.writer)
    }
}

fn write_error(label: &str, source: io::Error) -> GenError {
    GenError::OutputWrite {
        artifact: label.to_string(),
        source,
    }
}
