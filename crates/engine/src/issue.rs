// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Finding and issue data model.
//!
//! A [`Finding`] is what a rule produces while traversing one file. The
//! analyzer promotes surviving findings to [`Issue`]s by attaching the
//! [`RuleInstance`] snapshot, so results stay valid after the rule objects
//! are gone.

use std::cmp::Ordering;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::ast::{Ast, NodeId, SourceLocation, TextRange};
use crate::error::{Error, Result};
use crate::rule::RuleSetId;

/// Position of a reported element, ordered by `(path, source)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub source: SourceLocation,
    pub end_source: SourceLocation,
    pub text: TextRange,
    pub path: PathBuf,
}

impl Location {
    pub fn from_node(ast: &Ast, id: NodeId) -> Self {
        let span = ast.node(id).span;
        Self {
            source: span.start,
            end_source: span.end,
            text: span.text,
            path: ast.path().to_path_buf(),
        }
    }
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path
            .cmp(&other.path)
            .then_with(|| self.source.cmp(&other.source))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path.display(), self.source)
    }
}

/// The reported element: a stable signature plus its location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    pub signature: String,
    pub location: Location,
    /// Arena index of the reported node, kept for suppression resolution.
    /// Not meaningful outside the producing file's [`Ast`].
    #[serde(skip)]
    pub node: Option<NodeId>,
}

impl Entity {
    pub fn from_node(ast: &Ast, id: NodeId) -> Self {
        Self {
            signature: ast.signature(id),
            location: Location::from_node(ast, id),
            node: Some(id),
        }
    }
}

/// One raw rule violation inside a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub entity: Entity,
    pub message: String,
    pub references: Vec<Entity>,
    pub suppress_reasons: Vec<String>,
}

impl Finding {
    /// A blank message is a construction error, not a reportable finding.
    pub fn new(entity: Entity, message: impl Into<String>) -> Result<Self> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(Error::BlankMessage {
                signature: entity.signature,
            });
        }
        Ok(Self {
            entity,
            message,
            references: Vec::new(),
            suppress_reasons: Vec::new(),
        })
    }

    /// Attach secondary locations.
    pub fn with_references(mut self, references: Vec<Entity>) -> Self {
        self.references = references;
        self
    }

    /// Derived: a finding with at least one suppress reason is suppressed.
    pub fn suppressed(&self) -> bool {
        !self.suppress_reasons.is_empty()
    }
}

/// Issue severity, configurable per rule or rule set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Parse a config value; `None` for anything unrecognized.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warning" => Some(Self::Warning),
            "info" => Some(Self::Info),
            _ => None,
        }
    }
}

/// Value snapshot of one candidate rule, recorded whether or not the rule
/// was active for the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleInstance {
    pub id: String,
    pub rule_set_id: RuleSetId,
    pub description: String,
    pub severity: Severity,
    pub active: bool,
    pub url: Option<String>,
}

/// A finding bound to the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub rule_instance: RuleInstance,
    pub entity: Entity,
    pub references: Vec<Entity>,
    pub message: String,
    pub severity: Severity,
    pub suppress_reasons: Vec<String>,
}

impl Issue {
    pub fn location(&self) -> &Location {
        &self.entity.location
    }
}

/// Diagnostic produced outside the finding stream: config validation,
/// degraded files, failed rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Info,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Warning,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Error,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// A whole-project measurement contributed during aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectMetric {
    pub kind: String,
    pub value: i64,
}

impl ProjectMetric {
    pub fn new(kind: impl Into<String>, value: i64) -> Self {
        Self {
            kind: kind.into(),
            value,
        }
    }
}

impl fmt::Display for ProjectMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.value)
    }
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;
