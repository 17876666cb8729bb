// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Flags calls to methods the configuration forbids.

use crate::ast::{NodeId, NodeKind};
use crate::config::{Config, ValuesWithReason};
use crate::error::Result;
use crate::rule::{Rule, RuleContext};

/// One forbidden call signature, e.g. `System.gc` or a bare `exit`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ForbiddenMethod {
    receiver: Option<String>,
    name: String,
    reason: Option<String>,
}

impl ForbiddenMethod {
    /// Split on the last `.`, so chained receivers like
    /// `Runtime.getRuntime().gc` stay intact.
    fn parse(value: &str, reason: Option<&str>) -> Self {
        match value.rsplit_once('.') {
            Some((receiver, name)) => Self {
                receiver: Some(receiver.to_string()),
                name: name.to_string(),
                reason: reason.map(String::from),
            },
            None => Self {
                receiver: None,
                name: value.to_string(),
                reason: reason.map(String::from),
            },
        }
    }

    fn display(&self) -> String {
        match &self.receiver {
            Some(receiver) => format!("{receiver}.{}", self.name),
            None => self.name.clone(),
        }
    }
}

/// Reports calls matching the configured `methods` list.
pub struct ForbiddenCall {
    methods: Vec<ForbiddenMethod>,
}

impl ForbiddenCall {
    pub fn new(config: &Config) -> Result<Self> {
        let configured: ValuesWithReason = config.value_or_default("methods", ValuesWithReason::default())?;
        let methods = configured
            .iter()
            .map(|entry| ForbiddenMethod::parse(&entry.value, entry.reason.as_deref()))
            .collect();
        Ok(Self { methods })
    }
}

impl Rule for ForbiddenCall {
    fn description(&self) -> &str {
        "Reports calls to methods that the configuration forbids."
    }

    fn visit_call(&mut self, ctx: &mut RuleContext<'_>, node: NodeId) -> Result<()> {
        let NodeKind::Call { callee, receiver } = &ctx.ast().node(node).kind else {
            return Ok(());
        };
        let forbidden = self.methods.iter().find(|method| {
            method.name == *callee && method.receiver.as_deref() == receiver.as_deref()
        });
        if let Some(method) = forbidden {
            let message = match &method.reason {
                Some(reason) => {
                    format!("The call {} is forbidden: {reason}", method.display())
                }
                None => format!("The call {} is forbidden.", method.display()),
            };
            ctx.report_node(node, message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "forbidden_call_tests.rs"]
mod tests;
