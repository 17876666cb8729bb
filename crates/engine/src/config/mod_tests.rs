// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for config navigation, coercion and layering.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::error::Error;

const SAMPLE: &str = r#"
style:
  active: true
  MaxLineLength:
    maxLineLength: 120
    active: 'true'
    excludes: ['**/test/**']
  ForbiddenCall:
    methods:
      - 'System.gc'
      - value: 'Runtime.exit'
        reason: 'Use the exit handler.'
"#;

fn sample() -> Config {
    Config::from_yaml_str(SAMPLE).unwrap()
}

#[test]
fn sub_config_navigation_is_total() {
    let config = sample();
    let value: Option<i64> = config
        .sub_config("nope")
        .sub_config("also-nope")
        .value_or_null("missing")
        .unwrap();
    assert_eq!(value, None);
}

#[test]
fn value_lookup_descends_into_sub_configs() {
    let config = sample();
    let max: i64 = config
        .sub_config("style")
        .sub_config("MaxLineLength")
        .value_or_default("maxLineLength", 80)
        .unwrap();
    assert_eq!(max, 120);
}

#[test]
fn absent_value_falls_back_to_default() {
    let config = sample();
    let max: i64 = config
        .sub_config("style")
        .sub_config("MaxLineLength")
        .value_or_default("maxCommentLength", 80)
        .unwrap();
    assert_eq!(max, 80);
}

#[test]
fn quoted_booleans_are_accepted() {
    let config = sample().sub_config("style").sub_config("MaxLineLength");
    assert!(config.value_or_default("active", false).unwrap());
}

#[test]
fn string_list_values() {
    let config = sample().sub_config("style").sub_config("MaxLineLength");
    let excludes: Vec<String> = config.value_or_default("excludes", Vec::new()).unwrap();
    assert_eq!(excludes, ["**/test/**"]);
}

#[test]
fn type_mismatch_names_the_full_key_path() {
    let config = sample();
    let result: Result<Option<i64>> = config
        .sub_config("style")
        .sub_config("MaxLineLength")
        .value_or_null("excludes");
    let err = result.unwrap_err();
    match err {
        Error::InvalidConfiguration { key, .. } => {
            assert_eq!(key, "style.MaxLineLength.excludes");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn parent_links_point_upward() {
    let config = sample();
    let rule = config.sub_config("style").sub_config("MaxLineLength");
    assert_eq!(rule.parent_path(), Some("style.MaxLineLength"));

    let parent = rule.parent().unwrap();
    assert_eq!(parent.parent_path(), Some("style"));
    assert!(parent.value_or_default("active", false).unwrap());
    assert!(parent.parent().unwrap().parent().is_none());
}

#[test]
fn sub_config_keys_lists_nested_mappings_only() {
    let config = sample().sub_config("style");
    let keys: Vec<String> = config.sub_config_keys().into_iter().collect();
    assert_eq!(keys, ["ForbiddenCall", "MaxLineLength"]);
}

#[test]
fn values_with_reason_mixes_bare_strings_and_maps() {
    let config = sample().sub_config("style").sub_config("ForbiddenCall");
    let methods: ValuesWithReason = config
        .value_or_default("methods", ValuesWithReason::default())
        .unwrap();
    let entries: Vec<_> = methods.iter().collect();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].value, "System.gc");
    assert_eq!(entries[0].reason, None);
    assert_eq!(entries[1].value, "Runtime.exit");
    assert_eq!(entries[1].reason.as_deref(), Some("Use the exit handler."));
}

#[test]
fn values_with_reason_rejects_maps_without_value_key() {
    let config = Config::from_yaml_str(
        r#"
methods:
  - reason: 'no value here'
"#,
    )
    .unwrap();
    let result: Result<Option<ValuesWithReason>> = config.value_or_null("methods");
    assert!(matches!(
        result,
        Err(Error::InvalidConfiguration { key, .. }) if key == "methods"
    ));
}

#[test]
fn values_with_reason_rejects_non_string_non_map_entries() {
    let config = Config::from_yaml_str("methods: [3]").unwrap();
    let result: Result<Option<ValuesWithReason>> = config.value_or_null("methods");
    assert!(result.is_err());
}

#[test]
fn empty_document_is_an_empty_config() {
    let config = Config::from_yaml_str("").unwrap();
    assert!(config.keys().is_empty());
    assert!(!config.has_key("anything"));
}

#[test]
fn top_level_list_is_rejected() {
    assert!(Config::from_yaml_str("- a\n- b").is_err());
}

#[test]
fn loading_from_a_file_works_and_errors_carry_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("smolder.yml");
    std::fs::write(&path, "style:\n  MaxLineLength:\n    maxLineLength: 90\n").unwrap();

    let config = Config::from_yaml_file(&path).unwrap();
    let max: i64 = config
        .sub_config("style")
        .sub_config("MaxLineLength")
        .value_or_default("maxLineLength", 0)
        .unwrap();
    assert_eq!(max, 90);

    let missing = dir.path().join("nope.yml");
    match Config::from_yaml_file(&missing) {
        Err(Error::Config { path: Some(p), .. }) => assert_eq!(p, missing),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn layered_config_prefers_the_overriding_layer() {
    let defaults = yaml(r"
style:
  MaxLineLength:
    maxLineLength: 120
    active: true
");
    let user = yaml(r"
style:
  MaxLineLength:
    maxLineLength: 100
");
    let config = Config::layered(user, defaults);
    let rule = config.sub_config("style").sub_config("MaxLineLength");
    assert_eq!(rule.value_or_default("maxLineLength", 0i64).unwrap(), 100);
    // Not overridden: falls through to the defaults layer.
    assert!(rule.value_or_default("active", false).unwrap());
}

#[test]
fn layered_config_merges_keys_from_both_layers() {
    let defaults = yaml("style:\n  A:\n    x: 1\n");
    let user = yaml("style:\n  B:\n    y: 2\n");
    let config = Config::layered(user, defaults);
    let keys: Vec<String> = config
        .sub_config("style")
        .sub_config_keys()
        .into_iter()
        .collect();
    assert_eq!(keys, ["A", "B"]);
}

fn yaml(content: &str) -> Config {
    Config::from_yaml_str(content).unwrap()
}
