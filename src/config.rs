//! Run configuration. Every field has a default matching the PISM build, so
//! an empty JSON object (or no file at all) reproduces the stock behaviour.

use crate::emitter::GuardLines;
use crate::error::ConfigError;
use crate::rules::SubstitutionRule;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_GENERATOR: &str = "ncgen-split";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Name written into the preamble banner.
    pub generator: String,
    pub compiler: CompilerConfig,
    pub outputs: OutputPaths,
    pub markers: MarkerPatterns,
    pub declaration_rules: Vec<SubstitutionRule>,
    pub define_mode_rules: Vec<SubstitutionRule>,
    pub guard: GuardLines,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            generator: DEFAULT_GENERATOR.to_string(),
            compiler: CompilerConfig::default(),
            outputs: OutputPaths::default(),
            markers: MarkerPatterns::default(),
            declaration_rules: crate::rules::grid_dimension_rules(),
            define_mode_rules: crate::rules::file_name_rules(),
            guard: GuardLines::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    /// Program and fixed flags; the definition path is appended.
    pub command: String,
    pub definition: PathBuf,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            command: "ncgen -v2 -c".to_string(),
            definition: PathBuf::from("pism_state.cdl"),
        }
    }
}

/// Artifact paths, relative ones resolved against the output directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputPaths {
    pub declarations: PathBuf,
    pub attributes: PathBuf,
    /// Where to keep the raw compiler output, if anywhere.
    pub source: Option<PathBuf>,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            declarations: PathBuf::from("ncvars.h"),
            attributes: PathBuf::from("write_attributes.c"),
            source: None,
        }
    }
}

/// Regular expressions for the structural markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkerPatterns {
    pub entry_point: String,
    pub attribute_vectors: String,
    pub enter_define_mode: String,
    pub leave_define_mode: String,
}

impl Default for MarkerPatterns {
    fn default() -> Self {
        Self {
            entry_point: r"^main\(\)".to_string(),
            attribute_vectors: "attribute vectors".to_string(),
            enter_define_mode: "enter define mode".to_string(),
            leave_define_mode: "leave define mode".to_string(),
        }
    }
}

impl GeneratorConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Checks that cannot be expressed in the serde schema.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.compiler.command.trim().is_empty() {
            return Err(ConfigError::EmptyCommand);
        }
        check_rules("declaration", &self.declaration_rules)?;
        check_rules("define-mode", &self.define_mode_rules)?;
        Ok(())
    }
}

fn check_rules(rule_set: &'static str, rules: &[SubstitutionRule]) -> Result<(), ConfigError> {
    match rules.iter().position(|r| r.pattern.is_empty()) {
        Some(index) => Err(ConfigError::EmptyRule { rule_set, index }),
        None => Ok(()),
    }
}
