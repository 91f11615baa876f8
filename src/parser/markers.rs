use crate::config::MarkerPatterns;
use crate::error::ConfigError;
use regex::Regex;
use std::fmt;

/// Structural boundaries in the generated source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    EntryPoint,
    AttributeVectors,
    EnterDefineMode,
    LeaveDefineMode,
}

impl Marker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Marker::EntryPoint => "entry point",
            Marker::AttributeVectors => "attribute vectors",
            Marker::EnterDefineMode => "enter define mode",
            Marker::LeaveDefineMode => "leave define mode",
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compiled marker patterns.
#[derive(Debug, Clone)]
pub struct MarkerSet {
    entry_point: Regex,
    attribute_vectors: Regex,
    enter_define_mode: Regex,
    leave_define_mode: Regex,
}

impl MarkerSet {
    pub fn compile(patterns: &MarkerPatterns) -> Result<Self, ConfigError> {
        Ok(Self {
            entry_point: compile_one(Marker::EntryPoint, &patterns.entry_point)?,
            attribute_vectors: compile_one(Marker::AttributeVectors, &patterns.attribute_vectors)?,
            enter_define_mode: compile_one(Marker::EnterDefineMode, &patterns.enter_define_mode)?,
            leave_define_mode: compile_one(Marker::LeaveDefineMode, &patterns.leave_define_mode)?,
        })
    }

    pub fn matches(&self, marker: Marker, line: &str) -> bool {
        let re = match marker {
            Marker::EntryPoint => &self.entry_point,
            Marker::AttributeVectors => &self.attribute_vectors,
            Marker::EnterDefineMode => &self.enter_define_mode,
            Marker::LeaveDefineMode => &self.leave_define_mode,
        };
        re.is_match(line)
    }
}

fn compile_one(marker: Marker, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::Pattern { marker, source })
}
