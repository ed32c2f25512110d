//! Code generator mapping Python data-class definitions to C++ `JObject`
//! classes and pybind11 registration code.
//!
//! The library is a single linear pipeline:
//!
//! ```text
//! .py sources --parser--> ClassDescriptor --emit--> EmittedArtifact --output--> files
//! ```
//!
//! Input files are parsed statically (never evaluated) under a constrained
//! class-definition dialect; see the [`parser`] module for the accepted
//! subset. Each class yields a header with a default constructor, a
//! field-initializing constructor, and typed members, plus a registration
//! snippet exposing the fields as read-only properties on the extension
//! module. The `py2cpp` binary wraps [`generator::generate`] with a CLI,
//! configuration loading, and logging.

pub mod config;
pub mod core;
pub mod emit;
pub mod error;
pub mod generator;
pub mod output;
pub mod parser;

pub use crate::config::Settings;
pub use crate::core::{ClassDescriptor, EmittedArtifact, Field, FieldKind, SkipReason, SkippedAttr};
pub use crate::error::{GenError, GenResult};
pub use crate::generator::{generate, GenerateReport, GenerateRequest};
