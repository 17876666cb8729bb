// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The contract every analysis rule implements.
//!
//! A rule is a tree visitor: it overrides the per-kind hooks it cares about
//! and reports findings through the [`RuleContext`]. Findings accumulate in
//! the context, which is created fresh for every [`run_rule`] call, so two
//! traversals with the same rule instance can never leak findings into each
//! other.

use std::fmt;

use serde::Serialize;

use crate::ast::{Ast, NodeId, NodeKind};
use crate::error::{Error, Result};
use crate::issue::{Entity, Finding};
use crate::source::SemanticBinding;

/// Validated rule identifier: a letter followed by letters, digits or `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RuleName(String);

/// Validated rule set identifier, same grammar as [`RuleName`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RuleSetId(String);

fn validate_id(value: &str) -> Result<()> {
    let mut chars = value.chars();
    let valid = match chars.next() {
        Some(first) => {
            first.is_ascii_alphabetic() && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidId(value.to_string()))
    }
}

impl RuleName {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        validate_id(&value)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl RuleSetId {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        validate_id(&value)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for RuleSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RuleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RuleSetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Traversal state handed to every rule hook.
///
/// Owns the finding accumulator for one traversal. Dropped and rebuilt for
/// each file, never reused.
pub struct RuleContext<'a> {
    ast: &'a Ast,
    binding: Option<&'a dyn SemanticBinding>,
    findings: Vec<Finding>,
}

impl<'a> RuleContext<'a> {
    pub(crate) fn new(ast: &'a Ast, binding: Option<&'a dyn SemanticBinding>) -> Self {
        Self {
            ast,
            binding,
            findings: Vec::new(),
        }
    }

    pub fn ast(&self) -> &'a Ast {
        self.ast
    }

    pub fn binding(&self) -> Option<&'a dyn SemanticBinding> {
        self.binding
    }

    pub fn report(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    /// Report a finding located at `node`.
    pub fn report_node(&mut self, node: NodeId, message: impl Into<String>) -> Result<()> {
        let finding = Finding::new(Entity::from_node(self.ast, node), message)?;
        self.report(finding);
        Ok(())
    }

    fn into_findings(self) -> Vec<Finding> {
        self.findings
    }
}

/// One independent check.
///
/// Hooks default to no-ops; a rule overrides only the node kinds it cares
/// about. Hook errors abort the traversal of the current file and are
/// reported at the (file, rule) boundary by the analyzer.
pub trait Rule: Send {
    fn description(&self) -> &str;

    /// Whether this rule needs the [`SemanticBinding`] capability. Rules
    /// returning `true` are skipped entirely in light analysis mode.
    fn requires_semantic_binding(&self) -> bool {
        false
    }

    /// Called once before any node of a file is visited.
    fn pre_visit(&mut self, _ctx: &mut RuleContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Called once after the whole file has been visited.
    fn post_visit(&mut self, _ctx: &mut RuleContext<'_>) -> Result<()> {
        Ok(())
    }

    fn visit_file(&mut self, _ctx: &mut RuleContext<'_>, _node: NodeId) -> Result<()> {
        Ok(())
    }

    fn visit_import(&mut self, _ctx: &mut RuleContext<'_>, _node: NodeId) -> Result<()> {
        Ok(())
    }

    fn visit_class(&mut self, _ctx: &mut RuleContext<'_>, _node: NodeId) -> Result<()> {
        Ok(())
    }

    fn visit_function(&mut self, _ctx: &mut RuleContext<'_>, _node: NodeId) -> Result<()> {
        Ok(())
    }

    fn visit_property(&mut self, _ctx: &mut RuleContext<'_>, _node: NodeId) -> Result<()> {
        Ok(())
    }

    fn visit_parameter(&mut self, _ctx: &mut RuleContext<'_>, _node: NodeId) -> Result<()> {
        Ok(())
    }

    fn visit_call(&mut self, _ctx: &mut RuleContext<'_>, _node: NodeId) -> Result<()> {
        Ok(())
    }

    fn visit_reference(&mut self, _ctx: &mut RuleContext<'_>, _node: NodeId) -> Result<()> {
        Ok(())
    }

    fn visit_literal(&mut self, _ctx: &mut RuleContext<'_>, _node: NodeId) -> Result<()> {
        Ok(())
    }
}

/// Run one rule over one file and return its findings.
///
/// Dispatches every node in document order to the matching hook. The
/// finding accumulator lives in a context local to this call.
pub fn run_rule(
    rule: &mut dyn Rule,
    ast: &Ast,
    binding: Option<&dyn SemanticBinding>,
) -> Result<Vec<Finding>> {
    let mut ctx = RuleContext::new(ast, binding);
    rule.pre_visit(&mut ctx)?;
    for id in ast.dfs() {
        match &ast.node(id).kind {
            NodeKind::File => rule.visit_file(&mut ctx, id)?,
            NodeKind::Import { .. } => rule.visit_import(&mut ctx, id)?,
            NodeKind::Class { .. } => rule.visit_class(&mut ctx, id)?,
            NodeKind::Function { .. } => rule.visit_function(&mut ctx, id)?,
            NodeKind::Property { .. } => rule.visit_property(&mut ctx, id)?,
            NodeKind::Parameter { .. } => rule.visit_parameter(&mut ctx, id)?,
            NodeKind::Call { .. } => rule.visit_call(&mut ctx, id)?,
            NodeKind::Reference { .. } => rule.visit_reference(&mut ctx, id)?,
            NodeKind::Literal { .. } => rule.visit_literal(&mut ctx, id)?,
        }
    }
    rule.post_visit(&mut ctx)?;
    Ok(ctx.into_findings())
}

#[cfg(test)]
#[path = "rule_tests.rs"]
mod tests;
