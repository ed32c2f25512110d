//! Renders generated files and writes them to disk.
//!
//! Two layouts are supported, matching the tool's two historical output
//! modes: one header per class plus a registration file that includes them
//! (the default), or a single registration file with the class declarations
//! emitted inline. Every file starts with an autogenerated banner naming the
//! generator, the source file(s), and the generation timestamp; the
//! timestamp is an explicit parameter so runs over unchanged input differ
//! only in that line.
//!
//! Writes are plain create-or-overwrite with no backup or atomic rename.

use crate::core::{ClassDescriptor, EmittedArtifact};
use crate::error::GenResult;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Format of the banner timestamp line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Include the binding layer is compiled against.
const PYBIND_INCLUDE: &str = "#include <pybind11/pybind11.h>";

/// Include that provides the generated classes' base class.
const JOBJECT_INCLUDE: &str = "#include <JANA/JObject.h>";

fn banner(label: &str, sources: &str, generated_at: &DateTime<Utc>) -> String {
    format!(
        "// Auto-generated by py2cpp. Do not edit.\n// {label}: {sources}\n// Generated: {}\n",
        generated_at.format(TIMESTAMP_FORMAT)
    )
}

/// Renders the header file for one class.
pub fn render_header(
    descriptor: &ClassDescriptor,
    artifact: &EmittedArtifact,
    generated_at: &DateTime<Utc>,
) -> String {
    let mut text = banner("Source", &descriptor.source.display().to_string(), generated_at);
    text.push('\n');
    text.push_str("#pragma once\n\n");
    text.push_str(JOBJECT_INCLUDE);
    text.push_str("\n\n");
    text.push_str(&artifact.declaration);
    text
}

/// Renders the module-registration file.
///
/// With `inline_declarations` the class declarations are embedded ahead of
/// the `PYBIND11_MODULE` block instead of being pulled in through per-class
/// header includes.
pub fn render_module(
    module: &str,
    classes: &[(&ClassDescriptor, &EmittedArtifact)],
    generated_at: &DateTime<Utc>,
    inline_declarations: bool,
) -> String {
    let mut sources: Vec<String> = Vec::new();
    for (descriptor, _) in classes {
        let path = descriptor.source.display().to_string();
        if !sources.contains(&path) {
            sources.push(path);
        }
    }
    let mut text = banner("Sources", &sources.join(", "), generated_at);
    text.push('\n');
    text.push_str(PYBIND_INCLUDE);
    text.push('\n');
    if inline_declarations {
        text.push('\n');
        text.push_str(JOBJECT_INCLUDE);
        text.push('\n');
        for (_, artifact) in classes {
            text.push('\n');
            text.push_str(&artifact.declaration);
        }
    } else if !classes.is_empty() {
        text.push('\n');
        for (_, artifact) in classes {
            text.push_str(&format!("#include \"{}.h\"\n", artifact.class_name));
        }
    }
    text.push('\n');
    text.push_str("namespace py = pybind11;\n\n");
    text.push_str(
        "//==============================================================================\n",
    );
    text.push_str("// Module definition. Registers each generated class with the extension\n");
    text.push_str("// module and exposes its fields as read-only properties.\n");
    text.push_str(&format!("PYBIND11_MODULE({module}, m) {{\n"));
    for (_, artifact) in classes {
        text.push('\n');
        text.push_str(&artifact.binding);
    }
    text.push_str("\n}\n");
    text
}

/// Writes the generated files into `output_dir`, creating it if needed.
/// Returns the written paths: per-class headers first (when enabled), then
/// the registration file.
pub fn persist(
    classes: &[(&ClassDescriptor, &EmittedArtifact)],
    module: &str,
    output_dir: &Path,
    emit_headers: bool,
    generated_at: &DateTime<Utc>,
) -> GenResult<Vec<PathBuf>> {
    if !output_dir.exists() {
        fs::create_dir_all(output_dir)?;
    }
    let mut written = Vec::new();
    if emit_headers {
        for (descriptor, artifact) in classes {
            let path = output_dir.join(format!("{}.h", artifact.class_name));
            fs::write(&path, render_header(descriptor, artifact, generated_at))?;
            info!("wrote {}", path.display());
            written.push(path);
        }
    }
    let module_path = output_dir.join(format!("{module}.cc"));
    fs::write(
        &module_path,
        render_module(module, classes, generated_at, !emit_headers),
    )?;
    info!("wrote {}", module_path.display());
    written.push(module_path);
    Ok(written)
}
