// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Built-in `style` rule set.
//!
//! A deliberately small catalog: enough to exercise the hosting contract
//! (config binding, values-with-reason lists, activation defaults) without
//! growing into a rule library. External rule sets register through the
//! same [`crate::ruleset::RuleSetProvider`] seam.

pub mod forbidden_call;
pub mod function_naming;

use crate::error::Result;
use crate::rule::RuleSetId;
use crate::ruleset::{RuleEntry, RuleSet, RuleSetProvider};

use forbidden_call::ForbiddenCall;
use function_naming::FunctionNaming;

/// Id of the built-in rule set.
pub const STYLE_RULE_SET: &str = "style";

/// Provider for the built-in rules.
pub struct StyleRuleSetProvider;

impl RuleSetProvider for StyleRuleSetProvider {
    fn instance(&self) -> Result<RuleSet> {
        RuleSet::new(
            RuleSetId::new(STYLE_RULE_SET)?,
            vec![
                RuleEntry::new("ForbiddenCall", |config| {
                    Ok(Box::new(ForbiddenCall::new(config)?))
                })?,
                RuleEntry::new("FunctionNaming", |config| {
                    Ok(Box::new(FunctionNaming::new(config)?))
                })?
                .active_by_default(true)
                .url("https://alfredjeanlab.github.io/smolder/rules/style#functionnaming"),
            ],
        )
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
