//! Configuration loading for the generator.
//!
//! Settings are loaded with Figment from (in order of precedence):
//!
//! 1. Built-in defaults
//! 2. A TOML file (`py2cpp.toml` in the working directory, or the file given
//!    with `--config`)
//! 3. Environment variables prefixed with `PY2CPP_`
//!
//! CLI flags override all of these; the binary applies them on top of the
//! loaded settings.
//!
//! # Environment Variable Overrides
//!
//! ```text
//! PY2CPP_MODULE=detector
//! PY2CPP_OUTPUT_DIR=generated
//! PY2CPP_EMIT_HEADERS=false
//! ```

use crate::error::{GenError, GenResult};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "py2cpp.toml";

static MODULE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid module name pattern"));

/// Generator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Extension module name. When absent the binary derives one from the
    /// working directory's base name.
    #[serde(default)]
    pub module: Option<String>,
    /// Directory generated files are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Whether per-class declaration headers are written in addition to the
    /// registration file.
    #[serde(default = "default_emit_headers")]
    pub emit_headers: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_emit_headers() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            module: None,
            output_dir: default_output_dir(),
            emit_headers: default_emit_headers(),
        }
    }
}

impl Settings {
    /// Loads settings from the optional TOML file and `PY2CPP_`-prefixed
    /// environment variables. An explicitly given file must exist; the
    /// default file is optional.
    pub fn load(path: Option<&Path>) -> GenResult<Self> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()));
        figment = match path {
            Some(file) => {
                if !file.is_file() {
                    return Err(GenError::Configuration(format!(
                        "configuration file {} not found",
                        file.display()
                    )));
                }
                figment.merge(Toml::file(file))
            }
            None => figment.merge(Toml::file(DEFAULT_CONFIG_FILE)),
        };
        let settings: Settings = figment.merge(Env::prefixed("PY2CPP_")).extract()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validates semantic constraints that parsing alone does not catch.
    pub fn validate(&self) -> GenResult<()> {
        if let Some(module) = &self.module {
            if !is_valid_module_name(module) {
                return Err(GenError::Configuration(format!(
                    "module name `{module}` is not a valid identifier"
                )));
            }
        }
        Ok(())
    }
}

/// Returns whether `name` can be used verbatim as an extension module name.
pub fn is_valid_module_name(name: &str) -> bool {
    MODULE_NAME_RE.is_match(name)
}

/// Derives a usable module name from an arbitrary directory name by
/// replacing characters the binding layer cannot accept in an identifier.
pub fn sanitize_module_name(raw: &str) -> String {
    let mut name: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if name.is_empty() {
        return "extension".to_string();
    }
    if name.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}
