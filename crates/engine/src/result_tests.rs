// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the result aggregate.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::path::PathBuf;

use serde_json::json;

use super::*;
use crate::ast::{SourceLocation, TextRange};
use crate::issue::{Entity, Issue, Location, ProjectMetric, RuleInstance, Severity};
use crate::rule::RuleSetId;

fn issue(path: &str, line: u32, column: u32, message: &str) -> Issue {
    let location = Location {
        source: SourceLocation::new(line, column),
        end_source: SourceLocation::new(line, column),
        text: TextRange::default(),
        path: PathBuf::from(path),
    };
    Issue {
        rule_instance: RuleInstance {
            id: "TestRule".to_string(),
            rule_set_id: RuleSetId::new("test").unwrap(),
            description: "test".to_string(),
            severity: Severity::Error,
            active: true,
            url: None,
        },
        entity: Entity {
            signature: format!("{path}$x"),
            location,
            node: None,
        },
        references: Vec::new(),
        message: message.to_string(),
        severity: Severity::Error,
        suppress_reasons: Vec::new(),
    }
}

#[test]
fn issues_sort_by_path_then_position() {
    let result = AnalysisResult::new(
        vec![
            issue("b.kt", 1, 1, "third"),
            issue("a.kt", 9, 1, "second"),
            issue("a.kt", 2, 5, "first"),
        ],
        Vec::new(),
        Vec::new(),
    );
    let messages: Vec<&str> = result.issues().iter().map(|i| i.message.as_str()).collect();
    assert_eq!(messages, ["first", "second", "third"]);
}

#[test]
fn equal_locations_keep_production_order() {
    let result = AnalysisResult::new(
        vec![
            issue("a.kt", 1, 1, "produced-first"),
            issue("a.kt", 1, 1, "produced-second"),
        ],
        Vec::new(),
        Vec::new(),
    );
    let messages: Vec<&str> = result.issues().iter().map(|i| i.message.as_str()).collect();
    assert_eq!(messages, ["produced-first", "produced-second"]);
}

#[test]
fn metrics_append_in_order() {
    let mut result = AnalysisResult::default();
    result.add_metric(ProjectMetric::new("files", 10));
    result.add_metric(ProjectMetric::new("issues", 2));
    assert_eq!(result.metrics().len(), 2);
    assert_eq!(result.metrics()[0].kind, "files");
}

#[test]
fn user_data_round_trips() {
    let mut result = AnalysisResult::default();
    assert!(result.user_data("missing").is_none());
    result.set_user_data("computed", json!({"count": 3}));
    assert_eq!(result.user_data("computed"), Some(&json!({"count": 3})));
}

#[test]
fn reading_issues_is_idempotent() {
    let result = AnalysisResult::new(vec![issue("a.kt", 1, 1, "only")], Vec::new(), Vec::new());
    assert_eq!(result.issues().len(), 1);
    assert_eq!(result.issues().len(), 1);
}
