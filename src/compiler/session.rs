use crate::error::{ConfigError, GenError, Result, ToolFailure};
use std::path::Path;
use std::process::{Command, Stdio};

/// The external schema compiler, e.g. `ncgen -v2 -c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaCompiler {
    program: String,
    args: Vec<String>,
}

impl SchemaCompiler {
    /// Split a command line with shell quoting rules; the first word is the
    /// program.
    pub fn from_command(command: &str) -> std::result::Result<Self, ConfigError> {
        let mut words = shlex::split(command)
            .ok_or_else(|| ConfigError::CommandLine(command.to_string()))?
            .into_iter();
        let program = words.next().ok_or(ConfigError::EmptyCommand)?;
        Ok(Self {
            program,
            args: words.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Run the compiler on `definition` and return everything it printed on
    /// stdout. The child runs to completion before anything is scanned.
    pub fn compile(&self, definition: &Path) -> Result<String> {
        tracing::info!(
            program = %self.program,
            args = ?self.args,
            definition = %definition.display(),
            "running schema compiler"
        );

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(definition)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.failure(ToolFailure::Spawn(e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(self.failure(ToolFailure::Exit {
                status: output.status.to_string(),
                stderr,
            }));
        }

        if !output.stderr.is_empty() {
            tracing::warn!(
                program = %self.program,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "schema compiler wrote to stderr"
            );
        }

        let text = String::from_utf8(output.stdout)
            .map_err(|e| self.failure(ToolFailure::NotUtf8(e)))?;
        tracing::debug!(bytes = text.len(), "captured compiler output");
        Ok(text)
    }

    fn failure(&self, source: ToolFailure) -> GenError {
        GenError::ExternalTool {
            program: self.program.clone(),
            source,
        }
    }
}
