//! Command-line entry point for the class-definition generator.

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use py2cpp::config::{sanitize_module_name, Settings};
use py2cpp::{generate, GenerateRequest};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "py2cpp",
    version,
    about = "Generates C++ JObject classes and pybind11 bindings from Python data-class definitions"
)]
struct Cli {
    /// Input .py files defining data classes; other files are ignored.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Write only the module-registration file, with declarations inline.
    #[arg(long)]
    no_headers: bool,

    /// Directory generated files are written to.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Extension module name (default: working directory base name).
    #[arg(short, long)]
    module: Option<String>,

    /// TOML configuration file (default: ./py2cpp.toml when present).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() {
    // Diagnostics and progress share stdout; RUST_LOG overrides the level.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stdout)
        .init();

    if let Err(err) = run() {
        error!("generation failed: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(output_dir) = cli.output_dir {
        settings.output_dir = output_dir;
    }
    if let Some(module) = cli.module {
        settings.module = Some(module);
    }
    if cli.no_headers {
        settings.emit_headers = false;
    }
    settings.validate().context("validating configuration")?;

    let module = match settings.module.clone() {
        Some(module) => module,
        None => default_module_name().context("deriving module name")?,
    };

    let request = GenerateRequest {
        inputs: cli.inputs,
        module,
        output_dir: settings.output_dir.clone(),
        emit_headers: settings.emit_headers,
        generated_at: Utc::now(),
    };
    let report = generate(&request)?;
    info!(
        "done: {} classes, {} files written",
        report.class_count,
        report.written.len()
    );
    Ok(())
}

/// Module name fallback: the working directory's base name, sanitized.
fn default_module_name() -> anyhow::Result<String> {
    let cwd = std::env::current_dir().context("resolving working directory")?;
    let base = cwd.file_name().and_then(|n| n.to_str()).unwrap_or("");
    Ok(sanitize_module_name(base))
}
