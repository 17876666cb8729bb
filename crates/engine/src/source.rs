// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Boundary to the external language front end.
//!
//! The engine never reads or parses source text on its own. A driver hands
//! it [`SourceCode`] values and a [`Parser`]; semantic name resolution is an
//! optional capability ([`SemanticBinding`]) that rules may require.

use std::path::PathBuf;

use crate::ast::{Annotation, Ast, NodeId};
use crate::error::Result;

/// One source file as handed in by the driver.
#[derive(Debug, Clone)]
pub struct SourceCode {
    pub path: PathBuf,
    pub text: String,
}

impl SourceCode {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

/// External parser producing one [`Ast`] per file.
///
/// Failures must be reported as [`crate::Error::Parse`]; the engine converts
/// them into notifications and keeps going (§ parse errors are local to the
/// file that caused them).
pub trait Parser: Send + Sync {
    fn parse(&self, source: &SourceCode) -> Result<Ast>;
}

/// How much semantic information the current run has available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisMode {
    /// Semantic binding is available; all rules may run.
    Full,
    /// Syntax only. Rules that require binding are skipped, and suppression
    /// matching degrades to textual resolution.
    #[default]
    Light,
}

/// Optional name/type resolution capability supplied by the front end.
///
/// All methods default to "unknown" so an implementation only overrides what
/// its compiler actually exposes.
pub trait SemanticBinding: Send + Sync {
    /// Fully qualified name of the declaration a reference points at.
    fn resolve_reference_target(&self, _ast: &Ast, _node: NodeId) -> Option<String> {
        None
    }

    /// Type descriptor of an expression node.
    fn resolve_type(&self, _ast: &Ast, _node: NodeId) -> Option<String> {
        None
    }

    /// Fully qualified name of an annotation attached to `node`.
    fn resolve_annotation(
        &self,
        _ast: &Ast,
        _node: NodeId,
        _annotation: &Annotation,
    ) -> Option<String> {
        None
    }
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
