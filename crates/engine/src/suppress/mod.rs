// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Suppression resolution.
//!
//! Suppression is decided per finding, after traversal, so rules stay
//! unaware of it and independent mechanisms compose. Two mechanisms exist:
//!
//! - scope suppression: `@Suppress`/`@SuppressWarnings` annotation arguments
//!   on the reported element or any enclosing scope,
//! - pluggable suppressors built from a rule's own config
//!   (`ignoreAnnotated`, `onlyAnnotated`, `ignoreFunction`), composed with
//!   short-circuit OR.

mod annotation;
mod function;

pub use annotation::AnnotationExcluder;

use crate::ast::{Ast, NodeId};
use crate::config::Config;
use crate::error::Result;
use crate::issue::Finding;
use crate::rule::{RuleName, RuleSetId};
use crate::source::SemanticBinding;

/// Annotation names recognized for scope suppression, treated as synonyms.
const SUPPRESS_ANNOTATIONS: &[&str] = &["Suppress", "SuppressWarnings"];

/// Tool namespace accepted (case-insensitively) in front of any suppression
/// argument: `smolder.RuleName` and `smolder:RuleName` both work.
const NAMESPACE: &str = "smolder";

/// Argument that suppresses every rule, compared case-insensitively.
const ALL: &str = "all";

/// One pluggable suppression mechanism for a single (file, rule) pairing.
pub trait Suppressor {
    fn should_suppress(&self, finding: &Finding, ast: &Ast) -> bool;
}

/// Build the suppressors a rule's config asks for.
///
/// The returned length is meaningful: an unconfigured mechanism contributes
/// nothing rather than a suppressor that never fires.
pub fn build_suppressors<'a>(
    config: &Config,
    ast: &'a Ast,
    binding: Option<&'a dyn SemanticBinding>,
) -> Result<Vec<Box<dyn Suppressor + 'a>>> {
    let mut suppressors: Vec<Box<dyn Suppressor + 'a>> = Vec::new();
    suppressors.extend(annotation::annotation_suppressors(config, ast, binding)?);
    if let Some(function) = function::function_suppressor(config)? {
        suppressors.push(function);
    }
    Ok(suppressors)
}

/// Reasons the enclosing scopes of `node` give for suppressing `rule`.
///
/// Walks the full ancestor chain up to and including the file; a match at
/// any level suppresses, there is no un-suppress. The returned values are
/// the annotation arguments as written.
pub fn scope_suppress_reasons(
    ast: &Ast,
    node: NodeId,
    rule: &RuleName,
    aliases: &[String],
    rule_set: &RuleSetId,
) -> Vec<String> {
    let mut accepted = vec![
        rule.as_str().to_string(),
        rule_set.as_str().to_string(),
        format!("{rule_set}.{rule}"),
        format!("{rule_set}:{rule}"),
    ];
    accepted.extend(aliases.iter().cloned());

    let mut reasons = Vec::new();
    for scope in ast.self_and_ancestors(node) {
        for annotation in &ast.node(scope).annotations {
            if !SUPPRESS_ANNOTATIONS.contains(&annotation.simple_name()) {
                continue;
            }
            for argument in &annotation.arguments {
                if argument_matches(argument, &accepted) && !reasons.contains(argument) {
                    reasons.push(argument.clone());
                }
            }
        }
    }
    reasons
}

/// Whether any enclosing scope of `node` suppresses `rule`.
pub fn is_suppressed_by(
    ast: &Ast,
    node: NodeId,
    rule: &RuleName,
    aliases: &[String],
    rule_set: &RuleSetId,
) -> bool {
    !scope_suppress_reasons(ast, node, rule, aliases, rule_set).is_empty()
}

/// Match one annotation argument against the accepted comparands.
///
/// The comparison is case-sensitive except for the `all` token and the
/// optional namespace prefix, and is attempted both with and without that
/// prefix.
fn argument_matches(argument: &str, accepted: &[String]) -> bool {
    let candidates = [Some(argument), strip_namespace(argument)];
    candidates.into_iter().flatten().any(|candidate| {
        candidate.eq_ignore_ascii_case(ALL) || accepted.iter().any(|a| a == candidate)
    })
}

/// Strip a leading `smolder.` or `smolder:` (any letter case) if present.
fn strip_namespace(argument: &str) -> Option<&str> {
    let (prefix, rest) = argument.split_at_checked(NAMESPACE.len())?;
    if !prefix.eq_ignore_ascii_case(NAMESPACE) {
        return None;
    }
    rest.strip_prefix(['.', ':'])
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
