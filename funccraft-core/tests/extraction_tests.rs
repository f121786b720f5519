//! Integration tests for single-file extraction over Python fixtures

use funccraft_core::canonical::body_without_comments;
use funccraft_core::{extract_function_info, Extraction, FunctionRecord};
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("tests")
        .join("fixtures")
        .join("python")
        .join(name)
}

fn extract_fixture(name: &str) -> Extraction {
    let source = std::fs::read_to_string(fixture_path(name)).unwrap();
    extract_function_info(&source).unwrap()
}

const PYTHON_FIXTURES: &[&str] = &[
    "documented.py",
    "nested.py",
    "class_method.py",
    "decorated_async.py",
    "no_function.py",
    "hash_in_string.py",
];

#[test]
fn test_documented_function() {
    let record = extract_fixture("documented.py").into_record();
    assert_eq!(record.name, "add");
    assert!(record.body_with_comments.starts_with("\"\"\"Add two numbers.\"\"\""));
    assert!(record.body_with_comments.contains("# plain sum"));
    assert_eq!(record.body_no_comments, "return a + b");
}

#[test]
fn test_outer_function_wins_over_nested() {
    let record = extract_fixture("nested.py").into_record();
    assert_eq!(record.name, "outer");
    assert!(
        record.body_no_comments.starts_with("def inner(x):"),
        "outer body should still contain the nested definition"
    );
    assert!(record.body_no_comments.ends_with("return [inner(i) for i in items]"));
}

#[test]
fn test_class_method_before_later_function() {
    let record = extract_fixture("class_method.py").into_record();
    assert_eq!(record.name, "get", "method appears before helper in pre-order");
    assert_eq!(record.body_no_comments, "return self.store.get(key)");
}

#[test]
fn test_decorated_async_function() {
    let record = extract_fixture("decorated_async.py").into_record();
    assert_eq!(record.name, "fetch");
    assert!(record.body_with_comments.starts_with("'''Fetch a URL.'''"));
    assert_eq!(record.body_no_comments, "return await client.get(url)");
}

#[test]
fn test_module_without_function() {
    let extraction = extract_fixture("no_function.py");
    assert_eq!(extraction, Extraction::NotFound);
    assert!(!extraction.is_found());
    assert_eq!(extraction.into_record(), FunctionRecord::default());
}

#[test]
fn test_hash_inside_string_literal_is_cut() {
    // Comment stripping is purely textual: the `#` in the literal starts a "comment"
    let record = extract_fixture("hash_in_string.py").into_record();
    assert_eq!(record.name, "color");
    assert_eq!(record.body_no_comments, "return \"");
}

#[test]
fn test_stripped_body_never_longer() {
    for name in PYTHON_FIXTURES {
        let record = extract_fixture(name).into_record();
        assert!(
            record.body_no_comments.len() <= record.body_with_comments.len(),
            "{}: stripped body grew",
            name
        );
        assert_eq!(
            record.body_no_comments,
            body_without_comments(&record.body_with_comments),
            "{}: stripped body is not derived from the raw body",
            name
        );
    }
}

#[test]
fn test_extraction_is_deterministic() {
    for name in PYTHON_FIXTURES {
        assert_eq!(extract_fixture(name), extract_fixture(name), "{}", name);
    }
}
