use crate::parser::Marker;
use std::io;
use std::path::PathBuf;
use std::string::FromUtf8Error;

/// Everything that can stop a generator run. None of these are retried.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    #[error("schema compiler `{program}` failed")]
    ExternalTool {
        program: String,
        #[source]
        source: ToolFailure,
    },

    #[error("cannot read captured source `{}`", path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("`{0}' marker not found in generated source; has the compiler output format changed?")]
    MissingMarker(Marker),

    #[error("`{marker}' marker repeated at line {line}; nested guards are not supported")]
    RepeatedMarker { marker: Marker, line: usize },

    #[error("cannot write {artifact}")]
    OutputWrite {
        artifact: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// How the external compiler invocation went wrong.
#[derive(Debug, thiserror::Error)]
pub enum ToolFailure {
    #[error("could not be started")]
    Spawn(#[source] io::Error),

    #[error("exited with {status}: {stderr}")]
    Exit { status: String, stderr: String },

    #[error("produced output that is not valid UTF-8")]
    NotUtf8(#[source] FromUtf8Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config `{}`", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config `{}`", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid pattern for the `{marker}' marker")]
    Pattern {
        marker: Marker,
        #[source]
        source: regex::Error,
    },

    #[error("compiler command is empty")]
    EmptyCommand,

    #[error("cannot split compiler command `{0}` into arguments")]
    CommandLine(String),

    #[error("{rule_set} rule #{index} has an empty pattern")]
    EmptyRule { rule_set: &'static str, index: usize },
}

pub type Result<T> = std::result::Result<T, GenError>;
