//! Maps class descriptors to C++ declaration and pybind11 binding text.
//!
//! Emission is a pure function of the [`ClassDescriptor`]: the same
//! descriptor always produces the same [`EmittedArtifact`]. Banners,
//! includes, and file layout are the concern of the `output` module; this
//! one produces only the class-level text the binding layer consumes.

use crate::core::{ClassDescriptor, EmittedArtifact};

/// Base class every generated data object derives from.
const BASE_CLASS: &str = "JObject";

/// Emits the declaration and binding text for one class.
///
/// The declaration carries a default constructor and, when the class retains
/// any fields, a field-initializing constructor whose parameters follow the
/// descriptor's field order. The binding registers the class under its own
/// name with the object-argument constructor the binding layer expects and
/// one read-only property per retained field.
pub fn emit_class(descriptor: &ClassDescriptor) -> EmittedArtifact {
    EmittedArtifact {
        class_name: descriptor.name.clone(),
        declaration: render_declaration(descriptor),
        binding: render_binding(descriptor),
    }
}

fn render_declaration(descriptor: &ClassDescriptor) -> String {
    let name = &descriptor.name;
    let mut decl = String::new();
    decl.push_str(&format!("class {name} : public {BASE_CLASS}\n"));
    decl.push_str("{\n");
    decl.push_str("    public:\n");
    decl.push_str("        // Constructors\n");
    decl.push_str(&format!("        {name}() {{}}\n"));
    if !descriptor.fields.is_empty() {
        let params: Vec<String> = descriptor
            .fields
            .iter()
            .map(|f| format!("{} {}", f.kind.cpp_type(), f.name))
            .collect();
        let inits: Vec<String> = descriptor
            .fields
            .iter()
            .map(|f| format!("{0}({0})", f.name))
            .collect();
        decl.push_str(&format!(
            "        {name}({}) : {} {{}}\n",
            params.join(", "),
            inits.join(", ")
        ));
        decl.push('\n');
        decl.push_str("        // Members\n");
        for field in &descriptor.fields {
            decl.push_str(&format!(
                "        {} {};\n",
                field.kind.cpp_type(),
                field.name
            ));
        }
    }
    decl.push_str("};\n");
    decl
}

fn render_binding(descriptor: &ClassDescriptor) -> String {
    let name = &descriptor.name;
    let mut binding = String::new();
    binding.push_str(&format!("// {name}\n"));
    binding.push_str(&format!("py::class_<{name}>(m, \"{name}\")\n"));
    binding.push_str("    .def(py::init<py::object&>())");
    for field in &descriptor.fields {
        binding.push_str(&format!(
            "\n    .def_readonly(\"{0}\", &{name}::{0})",
            field.name
        ));
    }
    binding.push_str(";\n");
    binding
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Field, FieldKind, SkipReason, SkippedAttr};
    use std::path::PathBuf;

    fn hit() -> ClassDescriptor {
        ClassDescriptor {
            name: "Hit".to_string(),
            source: PathBuf::from("hit.py"),
            fields: vec![
                Field {
                    name: "a".to_string(),
                    kind: FieldKind::Int,
                },
                Field {
                    name: "b".to_string(),
                    kind: FieldKind::Float,
                },
            ],
            skipped: vec![SkippedAttr {
                name: "compute".to_string(),
                reason: SkipReason::Method,
            }],
        }
    }

    #[test]
    fn test_declaration_constructors_and_members() {
        let artifact = emit_class(&hit());
        assert!(artifact.declaration.contains("class Hit : public JObject"));
        assert!(artifact.declaration.contains("Hit() {}"));
        assert!(artifact
            .declaration
            .contains("Hit(int a, float b) : a(a), b(b) {}"));
        assert!(artifact.declaration.contains("int a;"));
        assert!(artifact.declaration.contains("float b;"));
    }

    #[test]
    fn test_constructor_parameters_follow_field_order() {
        let mut descriptor = hit();
        descriptor.fields.reverse();
        let artifact = emit_class(&descriptor);
        assert!(artifact
            .declaration
            .contains("Hit(float b, int a) : b(b), a(a) {}"));
    }

    #[test]
    fn test_skipped_method_never_becomes_a_field() {
        let artifact = emit_class(&hit());
        assert!(!artifact.declaration.contains("compute"));
        assert!(!artifact.binding.contains("compute"));
    }

    #[test]
    fn test_binding_registers_one_property_per_field() {
        let artifact = emit_class(&hit());
        assert!(artifact.binding.contains("py::class_<Hit>(m, \"Hit\")"));
        assert!(artifact.binding.contains(".def(py::init<py::object&>())"));
        assert_eq!(artifact.binding.matches(".def_readonly(").count(), 2);
        assert!(artifact.binding.contains(".def_readonly(\"a\", &Hit::a)"));
        assert!(artifact.binding.contains(".def_readonly(\"b\", &Hit::b)"));
    }

    #[test]
    fn test_empty_class_emits_default_constructor_only() {
        let descriptor = ClassDescriptor {
            name: "Empty".to_string(),
            source: PathBuf::from("empty.py"),
            fields: Vec::new(),
            skipped: Vec::new(),
        };
        let artifact = emit_class(&descriptor);
        assert!(artifact.declaration.contains("Empty() {}"));
        assert!(!artifact.declaration.contains("// Members"));
        assert_eq!(artifact.binding.matches(".def_readonly(").count(), 0);
    }
}
