//! Cross-check the tree builder against serde_yaml on documents that stay
//! inside the supported subset.

mod common;

use std::fs;

use libyamlify::{parse, Node};
use serde_yaml::Value;

use common::test_root;

/// Convert a serde_yaml value into a tree of uninterpreted scalars.
fn to_node(value: &Value) -> Node {
    match value {
        Value::Null => Node::Scalar(String::new()),
        Value::Bool(b) => Node::Scalar(b.to_string()),
        Value::Number(n) => Node::Scalar(n.to_string()),
        Value::String(s) => Node::Scalar(s.clone()),
        Value::Sequence(items) => Node::Sequence(items.iter().map(to_node).collect()),
        Value::Mapping(map) => Node::Mapping(
            map.iter()
                .map(|(k, v)| (k.as_str().unwrap().to_string(), to_node(v)))
                .collect(),
        ),
        Value::Tagged(tagged) => to_node(&tagged.value),
    }
}

fn assert_same_tree(source: &str) {
    let expected: Value = serde_yaml::from_str(source).unwrap();
    assert_eq!(parse(source).unwrap(), to_node(&expected), "source:\n{}", source);
}

/// Get all .yaml fixture files.
fn get_fixture_files() -> Vec<String> {
    let mut files = Vec::new();
    for subdir in ["documents", "students"] {
        let pattern = test_root().join(subdir).join("*.yaml");
        for path in glob::glob(&pattern.to_string_lossy()).unwrap().flatten() {
            files.push(path.to_string_lossy().to_string());
        }
    }
    files.sort();
    files
}

#[test]
fn fixtures_match_reference() {
    let files = get_fixture_files();
    assert!(files.len() >= 5);
    for file in files {
        assert_same_tree(&fs::read_to_string(&file).unwrap());
    }
}

#[test]
fn inline_documents_match_reference() {
    for source in [
        "- 1\n- 2\n- 3",
        "a: 1\nb:\n  c: 2\n  d:\n    - x\n    - y\ne: 3",
        "- - a\n  - b\n- - c",
        "- name: A\n  tags:\n  - x\n  - y\n- name: B",
        "key: some text with spaces\nother: x",
    ] {
        assert_same_tree(source);
    }
}
