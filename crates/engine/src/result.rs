// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The per-run result aggregate.

use std::collections::HashMap;

use serde_json::Value as JsonValue;

use crate::issue::{Issue, Notification, ProjectMetric, RuleInstance};

/// Everything one analysis run produced.
///
/// Built once after the parallel phase has joined; all mutation happens on
/// the single aggregation thread. The issue list is sorted by
/// `(path, start location)` with production order breaking ties.
#[derive(Debug, Default)]
pub struct AnalysisResult {
    issues: Vec<Issue>,
    rules: Vec<RuleInstance>,
    metrics: Vec<ProjectMetric>,
    notifications: Vec<Notification>,
    /// Open side channel for extensions to pass computed data down the
    /// pipeline without widening this type.
    user_data: HashMap<String, JsonValue>,
}

impl AnalysisResult {
    pub fn new(
        mut issues: Vec<Issue>,
        rules: Vec<RuleInstance>,
        notifications: Vec<Notification>,
    ) -> Self {
        // Stable: equal locations keep their production order.
        issues.sort_by(|a, b| a.location().cmp(b.location()));
        Self {
            issues,
            rules,
            metrics: Vec::new(),
            notifications,
            user_data: HashMap::new(),
        }
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Snapshot of every candidate rule of the run, active or not.
    pub fn rules(&self) -> &[RuleInstance] {
        &self.rules
    }

    pub fn metrics(&self) -> &[ProjectMetric] {
        &self.metrics
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn add_metric(&mut self, metric: ProjectMetric) {
        self.metrics.push(metric);
    }

    pub fn add_notification(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub fn user_data(&self, key: &str) -> Option<&JsonValue> {
        self.user_data.get(key)
    }

    pub fn set_user_data(&mut self, key: impl Into<String>, value: JsonValue) {
        self.user_data.insert(key.into(), value);
    }

    /// Swap the issue list, used by the reporting extension chain. The
    /// replacement is taken as-is; extensions own the order they produce.
    pub(crate) fn replace_issues(&mut self, issues: Vec<Issue>) {
        self.issues = issues;
    }

    pub(crate) fn take_issues(&mut self) -> Vec<Issue> {
        std::mem::take(&mut self.issues)
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
