use clap::{ArgAction, Parser};
use ncgen_split::{GenError, Generator, GeneratorConfig, Source};
use std::error::Error;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Generate ncvars.h and write_attributes.c from ncgen output.
#[derive(Debug, Parser)]
#[command(name = "ncgen-split", version, about)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Schema definition passed to the compiler
    #[arg(short, long, value_name = "FILE")]
    definition: Option<PathBuf>,

    /// Use previously captured compiler output instead of running the compiler
    #[arg(long, value_name = "FILE")]
    from_source: Option<PathBuf>,

    /// Also keep the captured compiler output in this file (relative paths
    /// are resolved against --out-dir)
    #[arg(long, value_name = "FILE")]
    keep_source: Option<PathBuf>,

    /// Directory the artifacts are written to
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Print a JSON run summary on stdout
    #[arg(long)]
    report: bool,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", error_chain(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), GenError> {
    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(definition) = cli.definition {
        config.compiler.definition = definition;
    }
    if let Some(keep) = cli.keep_source {
        config.outputs.source = Some(keep);
    }

    let source = match cli.from_source {
        Some(path) => Source::Captured(path),
        None => Source::Compiler,
    };

    let generator = Generator::new(config)?;
    let summary = generator.run(&source, &cli.out_dir)?;

    eprintln!(
        "✅ {} ({} lines) and {} ({} lines, guard after line {})",
        summary.declarations.display(),
        summary.stats.declaration_lines,
        summary.attributes.display(),
        summary.stats.declaration_lines + summary.stats.statement_lines,
        summary.stats.guard_line
    );

    if cli.report {
        match summary.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::warn!("could not serialise run summary: {}", e),
        }
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

/// `outer: inner: innermost`, so the failing step and its cause both show.
fn error_chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
