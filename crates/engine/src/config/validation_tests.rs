// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for config validation against a baseline.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::issue::NotificationLevel;
use crate::test_utils::yaml_config;

fn baseline() -> Config {
    yaml_config(
        r"
style:
  MaxLineLength:
    maxLineLength: 120
    customList: ['a']
  nested:
    deeper:
      value: 1
",
    )
}

#[test]
fn identical_config_validates_cleanly() {
    let notifications = validate_config(&baseline(), &baseline()).unwrap();
    assert!(notifications.is_empty());
}

#[test]
fn unknown_property_is_reported_with_its_path() {
    let config = yaml_config("style:\n  MaxLineLength:\n    maxLineLenght: 100\n");
    let notifications = validate_config(&config, &baseline()).unwrap();
    assert_eq!(notifications.len(), 1);
    assert!(
        notifications[0]
            .message
            .contains("'style>MaxLineLength>maxLineLenght' is misspelled")
    );
}

#[test]
fn rule_toggles_are_legal_without_baseline_entries() {
    let config = yaml_config(
        r"
style:
  active: true
  excludes: ['**/gen/**']
  MaxLineLength:
    active: false
    autoCorrect: true
    severity: 'warning'
    aliases: ['LineLength']
    ignoreAnnotated: ['Generated']
    ignoreFunction: ['main']
",
    );
    let notifications = validate_config(&config, &baseline()).unwrap();
    assert!(notifications.is_empty(), "{notifications:?}");
}

#[test]
fn scalar_where_baseline_nests_is_reported() {
    let config = yaml_config("style:\n  nested: 3\n");
    let notifications = validate_config(&config, &baseline()).unwrap();
    assert!(
        notifications
            .iter()
            .any(|n| n.message.contains("nested config expected for 'style>nested'"))
    );
}

#[test]
fn mapping_where_baseline_has_scalar_is_reported() {
    let config = yaml_config("style:\n  MaxLineLength:\n    maxLineLength:\n      nested: 1\n");
    let notifications = validate_config(&config, &baseline()).unwrap();
    assert!(notifications.iter().any(|n| {
        n.message
            .contains("unexpected nested config for 'style>MaxLineLength>maxLineLength'")
    }));
}

#[test]
fn comma_separated_string_for_a_list_is_reported_as_warning() {
    let config = yaml_config("style:\n  MaxLineLength:\n    customList: 'a,b'\n");
    let notifications = validate_config(&config, &baseline()).unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].level, NotificationLevel::Warning);
    assert!(notifications[0].message.contains("should be a YAML array"));
}

#[test]
fn warnings_as_errors_raises_the_level() {
    let config = yaml_config(
        "config:\n  warningsAsErrors: true\nstyle:\n  MaxLineLength:\n    customList: 'a,b'\n",
    );
    let notifications = validate_config(&config, &baseline()).unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].level, NotificationLevel::Error);
}

#[test]
fn user_exclude_patterns_silence_reports() {
    let config = yaml_config(
        "config:\n  excludes: ['style>Experimental.*']\nstyle:\n  ExperimentalRule:\n    x: 1\n",
    );
    let notifications = validate_config(&config, &baseline()).unwrap();
    assert!(notifications.is_empty(), "{notifications:?}");
}

#[test]
fn empty_baseline_is_rejected() {
    let config = yaml_config("style:\n  x: 1\n");
    assert!(validate_config(&config, &Config::empty()).is_err());
}

#[test]
fn default_validator_reports_through_the_extension_trait() {
    let validator = DefaultConfigValidator::new(baseline());
    let config = yaml_config("style:\n  Unknown:\n    x: 1\n");
    let notifications = validator.validate(&config);
    assert!(!notifications.is_empty());
}
