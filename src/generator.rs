//! The generation pipeline: parse inputs, emit artifacts, persist files.
//!
//! All inputs are parsed before anything is written, so an input that fails
//! to parse aborts the run with no partial output on disk. Skipped-attribute
//! diagnostics ride on the descriptors and are reported here, interleaved
//! with progress messages.

use crate::config;
use crate::core::{ClassDescriptor, EmittedArtifact, SkipReason};
use crate::emit;
use crate::error::{GenError, GenResult};
use crate::output;
use crate::parser;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{info, warn};

/// Extension recognized as a class-definition source file.
const SOURCE_EXTENSION: &str = "py";

/// One generation run's inputs and targets.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Candidate input files; entries without the `.py` extension are
    /// ignored with a notice.
    pub inputs: Vec<PathBuf>,
    /// Extension module name.
    pub module: String,
    /// Directory generated files are written to.
    pub output_dir: PathBuf,
    /// Whether per-class declaration headers are written in addition to the
    /// registration file.
    pub emit_headers: bool,
    /// Timestamp stamped into the generated banners.
    pub generated_at: DateTime<Utc>,
}

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    /// Number of classes emitted.
    pub class_count: usize,
    /// Paths written: headers first (when enabled), registration file last.
    pub written: Vec<PathBuf>,
}

/// Runs the full pipeline for one request.
pub fn generate(request: &GenerateRequest) -> GenResult<GenerateReport> {
    if !config::is_valid_module_name(&request.module) {
        return Err(GenError::Configuration(format!(
            "module name `{}` is not a valid identifier",
            request.module
        )));
    }
    let descriptors = parse_inputs(&request.inputs)?;
    for descriptor in &descriptors {
        report_skips(descriptor);
    }
    let artifacts: Vec<EmittedArtifact> = descriptors.iter().map(emit::emit_class).collect();
    let classes: Vec<(&ClassDescriptor, &EmittedArtifact)> =
        descriptors.iter().zip(artifacts.iter()).collect();
    let written = output::persist(
        &classes,
        &request.module,
        &request.output_dir,
        request.emit_headers,
        &request.generated_at,
    )?;
    info!(
        "generated {} classes into module `{}`",
        descriptors.len(),
        request.module
    );
    Ok(GenerateReport {
        class_count: descriptors.len(),
        written,
    })
}

fn parse_inputs(inputs: &[PathBuf]) -> GenResult<Vec<ClassDescriptor>> {
    let mut descriptors = Vec::new();
    let mut seen: HashMap<String, PathBuf> = HashMap::new();
    for input in inputs {
        if input.extension().and_then(|e| e.to_str()) != Some(SOURCE_EXTENSION) {
            warn!("ignoring {}: not a .py source file", input.display());
            continue;
        }
        info!("reading class definitions from {}", input.display());
        for descriptor in parser::parse_file(input)? {
            if let Some(first) = seen.get(&descriptor.name) {
                return Err(GenError::DuplicateClass {
                    name: descriptor.name,
                    first: first.clone(),
                    second: input.clone(),
                });
            }
            seen.insert(descriptor.name.clone(), input.clone());
            descriptors.push(descriptor);
        }
    }
    Ok(descriptors)
}

fn report_skips(descriptor: &ClassDescriptor) {
    for skip in &descriptor.skipped {
        match skip.reason {
            SkipReason::Method => info!(
                "{}.{} is a method and is not emitted as a field",
                descriptor.name, skip.name
            ),
            SkipReason::Unsupported(kind) => warn!(
                "{}.{} has unsupported kind `{}` and is ignored",
                descriptor.name, skip.name, kind
            ),
        }
    }
}
