//! End-to-end tests driving the full generation pipeline: fixture sources in
//! a scratch directory, through parse, emit, and persist, to file contents.

use chrono::{DateTime, TimeZone, Utc};
use py2cpp::{generate, GenError, GenerateRequest};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_test::traced_test;

const HIT_SOURCE: &str =
    "class Hit:\n    a = 0\n    b = 1.5\n\n    def compute(self):\n        return self.a + self.b\n";

fn stamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn request(output_dir: &Path, inputs: Vec<PathBuf>) -> GenerateRequest {
    GenerateRequest {
        inputs,
        module: "detector".to_string(),
        output_dir: output_dir.to_path_buf(),
        emit_headers: true,
        generated_at: stamp(),
    }
}

#[test]
fn test_hit_end_to_end() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("hit.py");
    fs::write(&input, HIT_SOURCE).expect("write fixture");
    let out = dir.path().join("generated");

    let report = generate(&request(&out, vec![input])).expect("generation should succeed");
    assert_eq!(report.class_count, 1);
    assert_eq!(report.written.len(), 2);

    let header = fs::read_to_string(out.join("Hit.h")).expect("header should exist");
    assert!(header.contains("class Hit : public JObject"));
    assert!(header.contains("Hit(int a, float b) : a(a), b(b) {}"));
    assert!(header.contains("int a;"));
    assert!(header.contains("float b;"));
    assert!(!header.contains("compute"));

    let module = fs::read_to_string(out.join("detector.cc")).expect("module file should exist");
    assert!(module.contains("#include \"Hit.h\""));
    assert!(module.contains("PYBIND11_MODULE(detector, m) {"));
    assert!(module.contains(".def(py::init<py::object&>())"));
    assert_eq!(module.matches(".def_readonly(").count(), 2);
    assert!(module.contains(".def_readonly(\"a\", &Hit::a)"));
    assert!(module.contains(".def_readonly(\"b\", &Hit::b)"));
}

#[traced_test]
#[test]
fn test_skipped_method_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("hit.py");
    fs::write(&input, HIT_SOURCE).expect("write fixture");
    let out = dir.path().join("generated");

    generate(&request(&out, vec![input])).expect("generation should succeed");
    assert!(logs_contain("compute"));
}

#[traced_test]
#[test]
fn test_unsupported_kind_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("tagged.py");
    fs::write(&input, "class Tagged:\n    a = 1\n    label = 'x'\n").expect("write fixture");
    let out = dir.path().join("generated");

    generate(&request(&out, vec![input])).expect("generation should succeed");
    assert!(logs_contain("label"));
    assert!(logs_contain("str"));

    let header = fs::read_to_string(out.join("Tagged.h")).expect("header should exist");
    assert!(!header.contains("label"));
}

#[test]
fn test_no_headers_mode_inlines_declarations() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("hit.py");
    fs::write(&input, HIT_SOURCE).expect("write fixture");
    let out = dir.path().join("generated");

    let mut req = request(&out, vec![input]);
    req.emit_headers = false;
    let report = generate(&req).expect("generation should succeed");
    assert_eq!(report.written.len(), 1);
    assert!(!out.join("Hit.h").exists());

    let module = fs::read_to_string(out.join("detector.cc")).expect("module file should exist");
    assert!(module.contains("class Hit : public JObject"));
    assert!(module.contains("#include <JANA/JObject.h>"));
    assert!(!module.contains("#include \"Hit.h\""));
}

#[test]
fn test_parse_failure_writes_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let good = dir.path().join("good.py");
    fs::write(&good, HIT_SOURCE).expect("write fixture");
    let bad = dir.path().join("bad.py");
    fs::write(&bad, "class Broken:\n    a = 1\nwhile True:\n    pass\n").expect("write fixture");
    let out = dir.path().join("generated");

    let err = generate(&request(&out, vec![good, bad])).expect_err("generation should fail");
    assert!(matches!(err, GenError::Parse { .. }));
    assert!(!out.exists());
}

#[test]
fn test_rerun_with_fixed_timestamp_is_byte_identical() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("hit.py");
    fs::write(&input, HIT_SOURCE).expect("write fixture");
    let out = dir.path().join("generated");

    let req = request(&out, vec![input]);
    generate(&req).expect("first run should succeed");
    let header_first = fs::read_to_string(out.join("Hit.h")).expect("header");
    let module_first = fs::read_to_string(out.join("detector.cc")).expect("module");

    generate(&req).expect("second run should succeed");
    let header_second = fs::read_to_string(out.join("Hit.h")).expect("header");
    let module_second = fs::read_to_string(out.join("detector.cc")).expect("module");

    assert_eq!(header_first, header_second);
    assert_eq!(module_first, module_second);
}

#[test]
fn test_zero_attribute_class_boundary() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("empty.py");
    fs::write(&input, "class Empty:\n    pass\n").expect("write fixture");
    let out = dir.path().join("generated");

    generate(&request(&out, vec![input])).expect("generation should succeed");

    let header = fs::read_to_string(out.join("Empty.h")).expect("header should exist");
    assert!(header.contains("Empty() {}"));
    assert!(!header.contains("// Members"));

    let module = fs::read_to_string(out.join("detector.cc")).expect("module file should exist");
    assert!(module.contains("py::class_<Empty>(m, \"Empty\")"));
    assert_eq!(module.matches(".def_readonly(").count(), 0);
}

#[test]
fn test_non_py_inputs_are_ignored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let notes = dir.path().join("notes.txt");
    fs::write(&notes, "not python").expect("write fixture");
    let input = dir.path().join("hit.py");
    fs::write(&input, HIT_SOURCE).expect("write fixture");
    let out = dir.path().join("generated");

    let report =
        generate(&request(&out, vec![notes, input])).expect("generation should succeed");
    assert_eq!(report.class_count, 1);
}

#[test]
fn test_duplicate_class_across_inputs_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let first = dir.path().join("a.py");
    fs::write(&first, "class Hit:\n    a = 1\n").expect("write fixture");
    let second = dir.path().join("b.py");
    fs::write(&second, "class Hit:\n    b = 2\n").expect("write fixture");
    let out = dir.path().join("generated");

    let err = generate(&request(&out, vec![first, second])).expect_err("generation should fail");
    assert!(matches!(err, GenError::DuplicateClass { .. }));
    assert!(!out.exists());
}

#[test]
fn test_multiple_files_share_one_registration_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let hits = dir.path().join("hit.py");
    fs::write(&hits, HIT_SOURCE).expect("write fixture");
    let clusters = dir.path().join("cluster.py");
    fs::write(&clusters, "class Cluster:\n    size = 0\n    energy = 0.0\n").expect("write fixture");
    let out = dir.path().join("generated");

    let report =
        generate(&request(&out, vec![hits, clusters])).expect("generation should succeed");
    assert_eq!(report.class_count, 2);
    assert!(out.join("Hit.h").is_file());
    assert!(out.join("Cluster.h").is_file());

    let module = fs::read_to_string(out.join("detector.cc")).expect("module file should exist");
    assert!(module.contains("#include \"Hit.h\""));
    assert!(module.contains("#include \"Cluster.h\""));
    assert!(module.contains("py::class_<Hit>(m, \"Hit\")"));
    assert!(module.contains("py::class_<Cluster>(m, \"Cluster\")"));
}
