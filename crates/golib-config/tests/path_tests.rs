//! Tests for dot-separated key path resolution.

mod common;

use common::*;
use golib_config::{mapping, resolve, ConfigError, Value};

fn sample() -> Value {
    Value::Mapping(expected_raw_integers())
}

#[test]
fn empty_path_is_whole_tree() {
    let root = sample();
    assert!(std::ptr::eq(resolve(&root, "").unwrap(), &root));
}

#[test]
fn lone_dot_is_whole_tree() {
    let root = sample();
    assert_eq!(resolve(&root, ".").unwrap(), &root);
    assert_eq!(resolve(&root, "..").unwrap(), &root);
}

#[test]
fn top_level_key() {
    let root = sample();
    assert_eq!(resolve(&root, "name").unwrap(), &Value::from("Peter"));
}

#[test]
fn nested_key() {
    let root = sample();
    assert_eq!(resolve(&root, "profile.age").unwrap(), &Value::Integer(32));
}

#[test]
fn leading_dot_is_ignored() {
    let root = sample();
    assert_eq!(
        resolve(&root, ".profile.children").unwrap(),
        resolve(&root, "profile.children").unwrap()
    );
}

#[test]
fn interior_empty_segment_stays_put() {
    let root = sample();
    assert_eq!(
        resolve(&root, "profile..married").unwrap(),
        &Value::Bool(true)
    );
}

#[test]
fn trailing_dot_returns_the_mapping_it_ends_on() {
    let root = sample();
    assert_eq!(
        resolve(&root, "profile.").unwrap(),
        resolve(&root, "profile").unwrap()
    );
}

#[test]
fn trailing_dot_after_leaf_is_missing() {
    let root = sample();
    assert!(matches!(resolve(&root, "name."), Err(ConfigError::NoSuchKey)));
}

#[test]
fn final_segment_may_be_composite() {
    let root = sample();
    let children = resolve(&root, "profile.children").unwrap();
    assert_eq!(children.as_sequence().map(<[Value]>::len), Some(2));
}

#[test]
fn result_borrows_from_tree() {
    let root = sample();
    let profile = root.as_mapping().unwrap()["profile"].as_mapping().unwrap();
    assert!(std::ptr::eq(
        resolve(&root, "profile.sex").unwrap(),
        &profile["sex"]
    ));
}

// ============================================================================
// Missing keys
// ============================================================================

#[test]
fn unknown_top_level_key() {
    let root = sample();
    assert!(matches!(resolve(&root, "unknown"), Err(ConfigError::NoSuchKey)));
}

#[test]
fn unknown_nested_key() {
    let root = sample();
    assert!(matches!(
        resolve(&root, "profile.unknown"),
        Err(ConfigError::NoSuchKey)
    ));
}

#[test]
fn walking_through_a_sequence_is_missing() {
    let root = sample();
    assert!(matches!(
        resolve(&root, "profile.children.unknown"),
        Err(ConfigError::NoSuchKey)
    ));
}

#[test]
fn walking_through_a_leaf_is_missing() {
    let root = Value::from(mapping! { "a" => 1 });
    assert!(resolve(&root, "a.b").unwrap_err().is_no_such_key());
}

#[test]
fn missing_parent_is_missing() {
    let root = Value::from(mapping! { "x" => 1 });
    assert!(resolve(&root, "a.b").unwrap_err().is_no_such_key());
}

#[test]
fn non_mapping_root_only_resolves_empty_path() {
    let root = Value::from("scalar");
    assert_eq!(resolve(&root, "").unwrap(), &root);
    assert!(resolve(&root, "a").unwrap_err().is_no_such_key());
}
