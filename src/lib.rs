//! Turns the C that `ncgen` generates from a CDL definition into the
//! `ncvars.h` declarations header and the rank-0 guarded
//! `write_attributes.c` body included by the model's output code.

pub mod compiler;
pub mod config;
pub mod emitter;
pub mod error;
pub mod parser;
pub mod pipeline;
pub mod rules;

pub use config::GeneratorConfig;
pub use error::{ConfigError, GenError, Result, ToolFailure};
pub use pipeline::{Generator, RunSummary, Source};
