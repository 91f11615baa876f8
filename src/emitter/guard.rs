use super::sink::OutputSink;
use crate::error::{GenError, Result};
use crate::parser::Marker;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Lines wrapped around the define-mode section so only rank 0 runs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GuardLines {
    pub open: String,
    pub close: String,
}

impl Default for GuardLines {
    fn default() -> Self {
        Self {
            open: "if (grid.rank == 0) {".to_string(),
            close: "} // end if (grid.rank == 0)".to_string(),
        }
    }
}

/// Guard progress. Closing consumes the value, so it happens once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Pending,
    Open {
        line: usize,
        newline: &'static str,
    },
}

impl Guard {
    /// Emit the opening line right after the marker on `line`.
    pub fn open<W: Write>(
        self,
        line: usize,
        newline: &'static str,
        sink: &mut OutputSink<W>,
        lines: &GuardLines,
    ) -> Result<Guard> {
        match self {
            Guard::Pending => {
                sink.push(&format!("{}{}", lines.open, newline))?;
                tracing::debug!(line, "guard opened");
                Ok(Guard::Open { line, newline })
            }
            Guard::Open { .. } => Err(GenError::RepeatedMarker {
                marker: Marker::EnterDefineMode,
                line,
            }),
        }
    }

    /// Emit the closing line; returns the line number the guard opened at.
    pub fn close<W: Write>(self, sink: &mut OutputSink<W>, lines: &GuardLines) -> Result<usize> {
        match self {
            Guard::Open { line, newline } => {
                sink.push(&format!("{}{}", lines.close, newline))?;
                Ok(line)
            }
            Guard::Pending => Err(GenError::MissingMarker(Marker::EnterDefineMode)),
        }
    }
}
