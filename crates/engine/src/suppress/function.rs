// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Function-name pluggable suppressor.
//!
//! `ignoreFunction` lists declared names, compared exactly (no globs). A
//! finding is suppressed when its element is, or is nested inside, a
//! function with one of those names; parameters of such functions count.

use crate::ast::{Ast, NodeKind};
use crate::config::Config;
use crate::error::Result;
use crate::issue::Finding;

use super::Suppressor;

const IGNORE_FUNCTION: &str = "ignoreFunction";

pub(super) fn function_suppressor(config: &Config) -> Result<Option<Box<dyn Suppressor>>> {
    let names: Vec<String> = config.value_or_default(IGNORE_FUNCTION, Vec::new())?;
    if names.is_empty() {
        return Ok(None);
    }
    Ok(Some(Box::new(FunctionSuppressor { names })))
}

struct FunctionSuppressor {
    names: Vec<String>,
}

impl Suppressor for FunctionSuppressor {
    fn should_suppress(&self, finding: &Finding, ast: &Ast) -> bool {
        let Some(node) = finding.entity.node else {
            return false;
        };
        ast.self_and_ancestors(node).any(|id| {
            matches!(
                &ast.node(id).kind,
                NodeKind::Function { name } if self.names.iter().any(|n| n == name)
            )
        })
    }
}

#[cfg(test)]
#[path = "function_tests.rs"]
mod tests;
