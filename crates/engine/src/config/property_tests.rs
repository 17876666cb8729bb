// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for memoized config property bindings.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::error::Error;
use crate::test_utils::yaml_config;

#[test]
fn resolves_the_configured_value() {
    let config = yaml_config("maxLineLength: 100");
    let property = ConfigProperty::new(&config, "maxLineLength", 120_i64);
    assert_eq!(*property.get().unwrap(), 100);
}

#[test]
fn resolves_the_default_when_absent() {
    let config = yaml_config("other: 1");
    let property = ConfigProperty::new(&config, "maxLineLength", 120_i64);
    assert_eq!(*property.get().unwrap(), 120);
    assert!(!property.is_configured());
}

#[test]
fn transform_applies_to_configured_value_and_default() {
    let config = yaml_config("pattern: 'abc'");
    let configured =
        ConfigProperty::transformed(&config, "pattern", "x".to_string(), |s| Ok(s.len()));
    let defaulted =
        ConfigProperty::transformed(&config, "missing", "xy".to_string(), |s| Ok(s.len()));
    assert_eq!(*configured.get().unwrap(), 3);
    assert_eq!(*defaulted.get().unwrap(), 2);
}

#[test]
fn value_is_computed_exactly_once() {
    let config = yaml_config("threshold: 10");
    let evaluations = Arc::new(AtomicUsize::new(0));
    let counter = evaluations.clone();
    let property = ConfigProperty::transformed(&config, "threshold", 0_i64, move |v| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(v * 2)
    });

    assert_eq!(evaluations.load(Ordering::SeqCst), 0);
    assert_eq!(*property.get().unwrap(), 20);
    assert_eq!(*property.get().unwrap(), 20);
    assert_eq!(*property.get().unwrap(), 20);
    assert_eq!(evaluations.load(Ordering::SeqCst), 1);
}

#[test]
fn transform_error_names_the_offending_key() {
    let config = yaml_config("style:\n  Rule:\n    pattern: '['");
    let rule_config = config.sub_config("style").sub_config("Rule");
    let property =
        ConfigProperty::transformed(&rule_config, "pattern", String::new(), |raw| {
            regex::Regex::new(&raw).map(|_| ()).map_err(|e| e.to_string())
        });
    match property.get() {
        Err(Error::InvalidConfiguration { key, .. }) => {
            assert_eq!(key, "style.Rule.pattern");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

// Fallback precedence: primary wins, then fallback, then default.

fn fallback_pair(
    config: &Config,
) -> (Arc<ConfigProperty<String>>, ConfigProperty<String>) {
    let legacy = Arc::new(ConfigProperty::transformed(
        config,
        "legacyName",
        "legacy-default".to_string(),
        |s| Ok(format!("legacy:{s}")),
    ));
    let primary = ConfigProperty::with_fallback(
        config,
        "newName",
        legacy.clone(),
        "new-default".to_string(),
        |s| Ok(format!("new:{s}")),
    );
    (legacy, primary)
}

#[test]
fn primary_key_wins_over_fallback() {
    let config = yaml_config("newName: 'a'\nlegacyName: 'b'");
    let (_, primary) = fallback_pair(&config);
    assert_eq!(primary.get().unwrap(), "new:a");
}

#[test]
fn fallback_value_is_used_untransformed_a_second_time() {
    let config = yaml_config("legacyName: 'b'");
    let (_, primary) = fallback_pair(&config);
    // The fallback's own transform applied, the primary's did not.
    assert_eq!(primary.get().unwrap(), "legacy:b");
}

#[test]
fn default_applies_when_neither_key_is_configured() {
    let config = yaml_config("other: 1");
    let (_, primary) = fallback_pair(&config);
    assert_eq!(primary.get().unwrap(), "new:new-default");
}

#[test]
fn fallback_resolution_is_shared_with_the_fallback_property() {
    let config = yaml_config("legacyName: 'b'");
    let (legacy, primary) = fallback_pair(&config);
    assert_eq!(primary.get().unwrap(), "legacy:b");
    assert_eq!(legacy.get().unwrap(), "legacy:b");
}
