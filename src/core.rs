//! Core data types for the class-definition generator.
//!
//! This module defines the value types that flow through the generation
//! pipeline, providing the hand-off points between its stages:
//!
//! - [`ClassDescriptor`]: One parsed class, with its retained fields and the
//!   attributes that were skipped (and why). Produced by the parser.
//! - [`FieldKind`]: The closed set of field kinds the generator can map to a
//!   native C++ type. Adding a kind without extending [`FieldKind::cpp_type`]
//!   is a compile error, so unsupported-kind handling can never silently rot.
//! - [`EmittedArtifact`]: The declaration and binding text derived from one
//!   descriptor. Produced by the emitter, consumed by the output stage.
//!
//! # Data Flow
//!
//! ```text
//! .py source --parser--> ClassDescriptor --emit--> EmittedArtifact --output--> files
//! ```
//!
//! Descriptors are immutable once constructed and are passed by reference
//! down the pipeline; no stage communicates through shared state.

use std::fmt;
use std::path::PathBuf;

// =============================================================================
// Field kinds
// =============================================================================

/// The field kinds the generator supports, as a closed variant.
///
/// The source dialect only admits integer and floating-point literals as
/// field initializers; everything else is skipped with a diagnostic before a
/// descriptor is built, so this enum never needs an escape hatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Integer attribute, emitted as a 32-bit signed `int`.
    Int,
    /// Floating-point attribute, emitted as a single-precision `float`.
    Float,
}

impl FieldKind {
    /// The C++ type a field of this kind is declared as.
    pub fn cpp_type(self) -> &'static str {
        match self {
            FieldKind::Int => "int",
            FieldKind::Float => "float",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cpp_type())
    }
}

// =============================================================================
// Descriptors
// =============================================================================

/// A retained class attribute: name plus supported kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Attribute name, unique within its class.
    pub name: String,
    /// Supported kind classified from the attribute's initializer literal.
    pub kind: FieldKind,
}

/// Why an attribute was excluded from emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The attribute is a method definition; methods are never emitted.
    Method,
    /// The initializer is not an integer or floating-point literal. Carries
    /// the name of the kind that was found (`"str"`, `"list"`, ...).
    Unsupported(&'static str),
}

/// An attribute excluded from emission, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedAttr {
    /// Attribute name as it appeared in the source.
    pub name: String,
    /// Why it was excluded.
    pub reason: SkipReason,
}

/// One class parsed from an input file.
///
/// Field order is source order, which is also the order of the generated
/// constructor parameters, member declarations, and property registrations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDescriptor {
    /// Class name, unique across the generation run.
    pub name: String,
    /// Path of the file the class was parsed from.
    pub source: PathBuf,
    /// Retained fields in source order.
    pub fields: Vec<Field>,
    /// Attributes excluded from emission, in source order.
    pub skipped: Vec<SkippedAttr>,
}

// =============================================================================
// Artifacts
// =============================================================================

/// The text emitted for one class: a C++ declaration and a pybind11 binding
/// snippet. Derived functionally from a [`ClassDescriptor`]; carries no state
/// of its own beyond the class name used for file naming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedArtifact {
    /// Name of the originating class, used to name its header file.
    pub class_name: String,
    /// C++ class declaration text.
    pub declaration: String,
    /// pybind11 registration snippet text.
    pub binding: String,
}
