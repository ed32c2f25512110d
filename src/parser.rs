//! Static parser for the constrained Python class-definition dialect.
//!
//! Input files are never evaluated as code. Instead this module parses a
//! declarative subset of Python that is just large enough to describe the
//! data classes the generator maps to C++: class blocks whose bodies contain
//! literal-initialized attributes and method definitions. Everything the
//! emitter needs is captured in a [`ClassDescriptor`] and handed down the
//! pipeline as a value.
//!
//! # Accepted Statements
//!
//! At the top level of a file:
//!
//! - blank lines and `#` comments
//! - module docstrings
//! - `import x` / `from x import y` (ignored)
//! - module-level assignments and `def` functions (ignored, with their bodies)
//! - `class Name:` / `class Name(Base):` blocks
//!
//! Inside a class body, at a single consistent indentation:
//!
//! - `name = <literal>` attributes, with an optional type annotation; the
//!   initializer decides the attribute's kind (integer literal, float
//!   literal, or an unsupported kind that is skipped with a diagnostic)
//! - `def name(...):` method definitions; the method and its body are
//!   skipped, and the skip is recorded for diagnostics
//! - decorators, docstrings, `pass` and `...` (ignored)
//!
//! Initializers must fit on one line. Anything outside this subset is a
//! [`GenError::Parse`] naming the file and line, which aborts the run before
//! any output is written.
//!
//! # Name Filtering
//!
//! Dunder names (leading `__`) are invisible to the generator: dunder classes
//! are skipped wholesale and dunder attributes (including `__init__` and
//! friends) are dropped silently, without a diagnostic. Single-underscore
//! names are ordinary names and are retained.
//!
//! # Example
//!
//! ```
//! use py2cpp::parser::parse_source;
//! use py2cpp::FieldKind;
//! use std::path::Path;
//!
//! let classes = parse_source(
//!     "class Hit:\n    a = 0\n    b = 1.5\n",
//!     Path::new("hit.py"),
//! ).unwrap();
//! assert_eq!(classes[0].fields[0].kind, FieldKind::Int);
//! assert_eq!(classes[0].fields[1].kind, FieldKind::Float);
//! ```

use crate::core::{ClassDescriptor, Field, FieldKind, SkipReason, SkippedAttr};
use crate::error::{GenError, GenResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

static CLASS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^class\s+([A-Za-z_][A-Za-z0-9_]*)\s*(?:\([^)]*\))?\s*:\s*(?:#.*)?$")
        .expect("valid class pattern")
});

static DEF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^def\s+([A-Za-z_][A-Za-z0-9_]*)\s*\(").expect("valid def pattern"));

static ASSIGN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\s*(?::[^=]+?)?\s*=\s*([^=].*)$")
        .expect("valid assignment pattern")
});

static INT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:0[xX][0-9A-Fa-f][0-9A-Fa-f_]*|0[oO][0-7][0-7_]*|0[bB][01][01_]*|[0-9][0-9_]*)$")
        .expect("valid integer pattern")
});

static FLOAT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[+-]?(?:[0-9][0-9_]*\.[0-9_]*(?:[eE][+-]?[0-9]+)?|\.[0-9][0-9_]*(?:[eE][+-]?[0-9]+)?|[0-9][0-9_]*[eE][+-]?[0-9]+)$",
    )
    .expect("valid float pattern")
});

/// Parses one input file into descriptors, in source order.
pub fn parse_file(path: &Path) -> GenResult<Vec<ClassDescriptor>> {
    let text = fs::read_to_string(path)?;
    parse_source(&text, path)
}

/// Parses class definitions from already-loaded source text. `source` is only
/// used to label descriptors and parse errors.
pub fn parse_source(text: &str, source: &Path) -> GenResult<Vec<ClassDescriptor>> {
    let mut parser = SourceParser::new(source);
    for (idx, line) in text.lines().enumerate() {
        parser.feed(idx + 1, line)?;
    }
    Ok(parser.finish())
}

enum Attr {
    Field(FieldKind),
    Skipped(SkipReason),
}

struct RawClass {
    name: String,
    attrs: Vec<(String, Attr)>,
}

struct SourceParser<'a> {
    source: &'a Path,
    classes: Vec<ClassDescriptor>,
    current: Option<RawClass>,
    /// Indentation of the current class body, fixed by its first statement.
    body_indent: Option<usize>,
    /// While set, lines indented deeper than this are consumed without
    /// inspection (method bodies, top-level function bodies, dunder classes).
    skip_indent: Option<usize>,
    /// Closing delimiter of an open multi-line docstring.
    doc_delim: Option<&'static str>,
}

impl<'a> SourceParser<'a> {
    fn new(source: &'a Path) -> Self {
        Self {
            source,
            classes: Vec::new(),
            current: None,
            body_indent: None,
            skip_indent: None,
            doc_delim: None,
        }
    }

    fn feed(&mut self, line_no: usize, raw: &str) -> GenResult<()> {
        if let Some(delim) = self.doc_delim {
            if raw.contains(delim) {
                self.doc_delim = None;
            }
            return Ok(());
        }
        let stmt = raw.trim();
        if stmt.is_empty() || stmt.starts_with('#') {
            return Ok(());
        }
        let indent = indent_width(raw);
        if let Some(limit) = self.skip_indent {
            if indent > limit {
                return Ok(());
            }
            self.skip_indent = None;
        }
        if indent == 0 {
            self.flush_class();
            self.top_level(line_no, stmt)
        } else {
            self.class_body(line_no, indent, stmt)
        }
    }

    fn finish(mut self) -> Vec<ClassDescriptor> {
        self.flush_class();
        self.classes
    }

    fn top_level(&mut self, line_no: usize, stmt: &str) -> GenResult<()> {
        if let Some(caps) = CLASS_RE.captures(stmt) {
            let name = caps[1].to_string();
            if name.starts_with("__") {
                self.skip_indent = Some(0);
            } else {
                self.current = Some(RawClass {
                    name,
                    attrs: Vec::new(),
                });
                self.body_indent = None;
            }
            return Ok(());
        }
        if self.open_docstring(stmt) {
            return Ok(());
        }
        if stmt.starts_with("import ") || stmt.starts_with("from ") || stmt.starts_with('@') || stmt == "pass" {
            return Ok(());
        }
        if DEF_RE.is_match(stmt) {
            self.skip_indent = Some(0);
            return Ok(());
        }
        if ASSIGN_RE.is_match(stmt) {
            // Module-level constants are not classes.
            return Ok(());
        }
        Err(self.err(line_no, format!("unsupported top-level statement `{stmt}`")))
    }

    fn class_body(&mut self, line_no: usize, indent: usize, stmt: &str) -> GenResult<()> {
        if self.current.is_none() {
            return Err(self.err(line_no, "indented statement outside of a class body".to_string()));
        }
        let body_indent = *self.body_indent.get_or_insert(indent);
        if indent > body_indent {
            return Err(self.err(
                line_no,
                "unexpected indent (initializers must fit on one line)".to_string(),
            ));
        }
        if indent < body_indent {
            return Err(self.err(line_no, "unindent does not match the class body".to_string()));
        }
        if self.open_docstring(stmt) {
            return Ok(());
        }
        if stmt.starts_with('@') || stmt == "pass" || stmt == "..." {
            return Ok(());
        }
        if let Some(caps) = DEF_RE.captures(stmt) {
            let name = caps[1].to_string();
            if !name.starts_with("__") {
                self.record(name, Attr::Skipped(SkipReason::Method));
            }
            self.skip_indent = Some(body_indent);
            return Ok(());
        }
        if let Some(caps) = CLASS_RE.captures(stmt) {
            let name = caps[1].to_string();
            if !name.starts_with("__") {
                self.record(name, Attr::Skipped(SkipReason::Unsupported("class")));
            }
            self.skip_indent = Some(body_indent);
            return Ok(());
        }
        if let Some(caps) = ASSIGN_RE.captures(stmt) {
            let name = caps[1].to_string();
            if name.starts_with("__") {
                return Ok(());
            }
            let attr = match classify_literal(&caps[2]) {
                Literal::Int => Attr::Field(FieldKind::Int),
                Literal::Float => Attr::Field(FieldKind::Float),
                Literal::Other(kind) => Attr::Skipped(SkipReason::Unsupported(kind)),
            };
            self.record(name, attr);
            return Ok(());
        }
        Err(self.err(line_no, format!("statement not supported in a class body: `{stmt}`")))
    }

    /// Returns true if `stmt` opens a docstring; parser state is updated for
    /// multi-line docstrings.
    fn open_docstring(&mut self, stmt: &str) -> bool {
        let delim = if stmt.starts_with("\"\"\"") {
            "\"\"\""
        } else if stmt.starts_with("'''") {
            "'''"
        } else {
            return false;
        };
        if !stmt[delim.len()..].contains(delim) {
            self.doc_delim = Some(delim);
        }
        true
    }

    fn record(&mut self, name: String, attr: Attr) {
        if let Some(current) = self.current.as_mut() {
            if let Some(existing) = current.attrs.iter_mut().find(|(n, _)| *n == name) {
                // Last assignment wins; the attribute keeps its first position.
                existing.1 = attr;
            } else {
                current.attrs.push((name, attr));
            }
        }
    }

    fn flush_class(&mut self) {
        if let Some(raw) = self.current.take() {
            let mut fields = Vec::new();
            let mut skipped = Vec::new();
            for (name, attr) in raw.attrs {
                match attr {
                    Attr::Field(kind) => fields.push(Field { name, kind }),
                    Attr::Skipped(reason) => skipped.push(SkippedAttr { name, reason }),
                }
            }
            self.classes.push(ClassDescriptor {
                name: raw.name,
                source: self.source.to_path_buf(),
                fields,
                skipped,
            });
        }
        self.body_indent = None;
    }

    fn err(&self, line: usize, message: String) -> GenError {
        GenError::Parse {
            file: self.source.to_path_buf(),
            line,
            message,
        }
    }
}

/// Width of a line's leading whitespace, with tabs advancing to the next
/// multiple of 8 as in the source language.
fn indent_width(line: &str) -> usize {
    let mut width = 0;
    for ch in line.chars() {
        match ch {
            ' ' => width += 1,
            '\t' => width += 8 - width % 8,
            _ => break,
        }
    }
    width
}

enum Literal {
    Int,
    Float,
    Other(&'static str),
}

/// Classifies a single-line initializer. The kind names mirror the source
/// language's type names so diagnostics read naturally.
fn classify_literal(raw: &str) -> Literal {
    let trimmed = raw.trim();
    if is_string_literal(trimmed) {
        return Literal::Other("str");
    }
    let value = match trimmed.find('#') {
        Some(pos) => trimmed[..pos].trim_end(),
        None => trimmed,
    };
    if INT_RE.is_match(value) {
        Literal::Int
    } else if FLOAT_RE.is_match(value) {
        Literal::Float
    } else if value == "True" || value == "False" {
        Literal::Other("bool")
    } else if value == "None" {
        Literal::Other("NoneType")
    } else {
        match value.chars().next() {
            Some('[') => Literal::Other("list"),
            Some('(') => Literal::Other("tuple"),
            Some('{') => Literal::Other("dict"),
            _ => Literal::Other("expression"),
        }
    }
}

fn is_string_literal(value: &str) -> bool {
    let rest =
        value.trim_start_matches(|c: char| matches!(c, 'r' | 'R' | 'b' | 'B' | 'u' | 'U' | 'f' | 'F'));
    rest.starts_with('"') || rest.starts_with('\'')
}
