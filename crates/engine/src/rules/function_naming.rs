// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Enforces a naming pattern on function declarations.

use regex::Regex;

use crate::ast::{NodeId, NodeKind};
use crate::config::{Config, ConfigProperty};
use crate::error::Result;
use crate::rule::{Rule, RuleContext};

const DEFAULT_PATTERN: &str = "[a-z][A-Za-z0-9]*";

/// Reports functions whose declared name does not match `pattern`.
pub struct FunctionNaming {
    pattern: ConfigProperty<Regex>,
}

impl FunctionNaming {
    pub fn new(config: &Config) -> Result<Self> {
        let pattern = ConfigProperty::transformed(
            config,
            "pattern",
            DEFAULT_PATTERN.to_string(),
            |raw| Regex::new(&format!("^{raw}$")).map_err(|e| e.to_string()),
        );
        // An unparseable pattern is a config error, not a per-file one.
        pattern.get()?;
        Ok(Self { pattern })
    }
}

impl Rule for FunctionNaming {
    fn description(&self) -> &str {
        "Function names should follow the configured naming pattern."
    }

    fn visit_function(&mut self, ctx: &mut RuleContext<'_>, node: NodeId) -> Result<()> {
        let NodeKind::Function { name } = &ctx.ast().node(node).kind else {
            return Ok(());
        };
        let pattern = self.pattern.get()?;
        if !pattern.is_match(name) {
            ctx.report_node(
                node,
                format!("Function name '{name}' does not match the pattern {pattern}"),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "function_naming_tests.rs"]
mod tests;
