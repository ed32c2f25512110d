//! Custom error types for the generator.
//!
//! This module defines the primary error type, `GenError`, for the entire tool.
//! Using the `thiserror` crate, it provides a centralized and consistent way to
//! handle the fatal failure modes of a generation run:
//!
//! - **`Parse`**: An input file could not be parsed under the constrained
//!   class-definition dialect. Carries the file, line, and cause. A parse
//!   failure aborts the whole run before any output file is written.
//! - **`DuplicateClass`**: Two input files (or one file twice on the command
//!   line) define a class with the same name. Class names must be unique per
//!   run because each one becomes a header file and a module registration.
//! - **`Io`**: Wraps standard `std::io::Error`, covering reading input files
//!   and writing generated artifacts.
//! - **`Config`** / **`Configuration`**: Configuration load errors from
//!   `figment` and semantic validation errors (e.g. a module name that is not
//!   a valid C identifier), respectively.
//!
//! Skipped attributes (methods, unsupported initializer kinds) are not errors:
//! they are recorded on the [`ClassDescriptor`](crate::core::ClassDescriptor)
//! and reported as diagnostics, and generation continues without them.

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias for results using the generator error type.
pub type GenResult<T> = std::result::Result<T, GenError>;

/// Fatal failure modes of a generation run.
#[derive(Error, Debug)]
pub enum GenError {
    /// An input file is not valid under the class-definition dialect.
    #[error("parse error in {}:{line}: {message}", .file.display())]
    Parse {
        /// Source file that failed to parse.
        file: PathBuf,
        /// 1-based line number of the offending statement.
        line: usize,
        /// Human-readable cause.
        message: String,
    },

    /// The same class name was defined by more than one input.
    #[error("class `{name}` defined in both {} and {}", .first.display(), .second.display())]
    DuplicateClass {
        /// The colliding class name.
        name: String,
        /// File that defined the class first.
        first: PathBuf,
        /// File that redefined it.
        second: PathBuf,
    },

    /// I/O failure while reading inputs or writing artifacts.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration load error.
    #[error("configuration error: {0}")]
    Config(#[from] figment::Error),

    /// Configuration validation error.
    #[error("configuration validation error: {0}")]
    Configuration(String),
}
