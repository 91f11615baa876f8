use super::report::RunSummary;
use crate::compiler::SchemaCompiler;
use crate::config::GeneratorConfig;
use crate::emitter::{Banner, OutputSink, Splitter};
use crate::error::{GenError, Result};
use crate::parser::{split_lines, MarkerSet};
use crate::rules::RuleSet;
use std::fs;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// Where the generated source comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Run the schema compiler on the configured definition.
    Compiler,
    /// Output of an earlier compiler run saved to a file.
    Captured(PathBuf),
}

/// A configured generator, ready to run.
pub struct Generator {
    config: GeneratorConfig,
    compiler: SchemaCompiler,
    markers: MarkerSet,
    declaration_rules: RuleSet,
    define_mode_rules: RuleSet,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        let compiler = SchemaCompiler::from_command(&config.compiler.command)?;
        let markers = MarkerSet::compile(&config.markers)?;
        let declaration_rules = RuleSet::new(config.declaration_rules.clone());
        let define_mode_rules = RuleSet::new(config.define_mode_rules.clone());
        Ok(Self {
            config,
            compiler,
            markers,
            declaration_rules,
            define_mode_rules,
        })
    }

    /// Compile (or load), then split into both artifacts under `out_dir`.
    pub fn run(&self, source: &Source, out_dir: &Path) -> Result<RunSummary> {
        let generated = self.capture(source)?;
        let saved_source = self.save_source(&generated, out_dir)?;
        let mut summary = self.transform(&generated, out_dir)?;
        summary.saved_source = saved_source;
        Ok(summary)
    }

    pub fn capture(&self, source: &Source) -> Result<String> {
        match source {
            Source::Compiler => self.compiler.compile(&self.config.compiler.definition),
            Source::Captured(path) => {
                info!(path = %path.display(), "reading captured compiler output");
                fs::read_to_string(path).map_err(|source| GenError::SourceRead {
                    path: path.clone(),
                    source,
                })
            }
        }
    }

    /// Split `generated` into the two artifacts.
    ///
    /// Both are staged as temporary files next to their targets and only
    /// renamed into place once the whole split succeeded; on any error the
    /// staging files are removed and existing artifacts are left alone.
    pub fn transform(&self, generated: &str, out_dir: &Path) -> Result<RunSummary> {
        let outputs = &self.config.outputs;
        let declarations_path = out_dir.join(&outputs.declarations);
        let attributes_path = out_dir.join(&outputs.attributes);
        let declarations_label = format!("declarations `{}`", declarations_path.display());
        let attributes_label = format!("attributes `{}`", attributes_path.display());

        let banner = Banner::new(self.config.generator.as_str(), self.definition_name());
        let lines = split_lines(generated);
        info!(lines = lines.len(), "splitting generated source");

        let declarations = OutputSink::create(
            declarations_label.as_str(),
            BufWriter::new(staging_file(&declarations_path, &declarations_label)?),
            &banner,
        )?;
        let attributes = OutputSink::create(
            attributes_label.as_str(),
            BufWriter::new(staging_file(&attributes_path, &attributes_label)?),
            &banner,
        )?;

        let splitter = Splitter {
            markers: &self.markers,
            declaration_rules: &self.declaration_rules,
            define_mode_rules: &self.define_mode_rules,
            guard: &self.config.guard,
        };
        let outcome = splitter.split(&lines, declarations, attributes)?;

        commit(outcome.declarations, &declarations_path, &declarations_label)?;
        commit(outcome.attributes, &attributes_path, &attributes_label)?;
        info!(
            declarations = %declarations_path.display(),
            attributes = %attributes_path.display(),
            "artifacts written"
        );

        Ok(RunSummary {
            definition: self.config.compiler.definition.clone(),
            declarations: declarations_path,
            attributes: attributes_path,
            saved_source: None,
            stats: outcome.stats,
        })
    }

    /// Only the file name goes into the banner, so artifacts do not depend
    /// on where the build ran.
    fn definition_name(&self) -> String {
        let definition = &self.config.compiler.definition;
        match definition.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => definition.display().to_string(),
        }
    }

    fn save_source(&self, generated: &str, out_dir: &Path) -> Result<Option<PathBuf>> {
        let Some(relative) = &self.config.outputs.source else {
            return Ok(None);
        };
        let path = out_dir.join(relative);
        fs::write(&path, generated).map_err(|source| GenError::OutputWrite {
            artifact: format!("captured source `{}`", path.display()),
            source,
        })?;
        info!(path = %path.display(), "saved compiler output");
        Ok(Some(path))
    }
}

fn staging_file(target: &Path, label: &str) -> Result<NamedTempFile> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    NamedTempFile::new_in(dir).map_err(|source| output_error(label, source))
}

fn commit(writer: BufWriter<NamedTempFile>, target: &Path, label: &str) -> Result<()> {
    let mut staged = writer
        .into_inner()
        .map_err(|e| output_error(label, e.into_error()))?;
    // Staging files are created owner-only; artifacts are ordinary sources.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        staged
            .as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .map_err(|source| output_error(label, source))?;
    }
    staged
        .as_file_mut()
        .sync_all()
        .map_err(|source| output_error(label, source))?;
    staged
        .persist(target)
        .map_err(|e| output_error(label, e.error))?;
    Ok(())
}

fn output_error(label: &str, source: io::Error) -> GenError {
    GenError::OutputWrite {
        artifact: label.to_string(),
        source,
    }
}
