// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rule execution scheduler.
//!
//! Fans out over files, sequentially or on the rayon pool. Within one file
//! rules run in registration order (auto-correcting rules first), each on a
//! fresh instance from its factory, so no rule state crosses file
//! boundaries. A failing rule is contained at the (file, rule) boundary and
//! becomes a notification; sibling rules and other files keep running.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Instant;

use rayon::prelude::*;

use crate::ast::Ast;
use crate::extensions::FileProcessListener;
use crate::issue::{Finding, Issue, Notification};
use crate::profiling::RuleTimingCollector;
use crate::rule::run_rule;
use crate::ruleset::RuleDescriptor;
use crate::source::SemanticBinding;
use crate::suppress::{build_suppressors, is_suppressed_by, scope_suppress_reasons};

/// One file's contribution to the run.
type FileOutcome = (Vec<Issue>, Vec<Notification>);

pub struct Analyzer<'a> {
    descriptors: &'a [RuleDescriptor],
    binding: Option<&'a dyn SemanticBinding>,
    listeners: &'a [Box<dyn FileProcessListener>],
    profiler: Option<&'a RuleTimingCollector>,
    parallel: bool,
}

impl<'a> Analyzer<'a> {
    pub fn new(descriptors: &'a [RuleDescriptor]) -> Self {
        Self {
            descriptors,
            binding: None,
            listeners: &[],
            profiler: None,
            parallel: false,
        }
    }

    pub fn with_binding(mut self, binding: Option<&'a dyn SemanticBinding>) -> Self {
        self.binding = binding;
        self
    }

    pub fn with_listeners(mut self, listeners: &'a [Box<dyn FileProcessListener>]) -> Self {
        self.listeners = listeners;
        self
    }

    pub fn with_profiler(mut self, profiler: Option<&'a RuleTimingCollector>) -> Self {
        self.profiler = profiler;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Run all descriptors over all files.
    ///
    /// The returned issues are in file order, unsorted within the run;
    /// aggregation establishes the final order. Sequential and parallel
    /// schedules produce the same set.
    pub fn run(&self, files: &[Ast]) -> (Vec<Issue>, Vec<Notification>) {
        let outcomes: Vec<FileOutcome> = if self.parallel {
            files.par_iter().map(|file| self.analyze_file(file)).collect()
        } else {
            files.iter().map(|file| self.analyze_file(file)).collect()
        };

        let mut issues = Vec::new();
        let mut notifications = Vec::new();
        for (file_issues, file_notifications) in outcomes {
            issues.extend(file_issues);
            notifications.extend(file_notifications);
        }
        (issues, notifications)
    }

    fn analyze_file(&self, ast: &Ast) -> FileOutcome {
        for listener in self.listeners {
            listener.on_process(ast);
        }

        let mut issues = Vec::new();
        let mut notifications = Vec::new();

        // Rules whose whole file is filtered or suppressed never construct.
        let applicable = self.descriptors.iter().filter(|descriptor| {
            descriptor.should_analyze(ast.path())
                && !is_suppressed_by(
                    ast,
                    ast.root(),
                    &descriptor.name,
                    &descriptor.aliases,
                    &descriptor.instance.rule_set_id,
                )
        });
        let (correctable, other): (Vec<_>, Vec<_>) =
            applicable.partition(|descriptor| descriptor.auto_correct);

        for descriptor in correctable.into_iter().chain(other) {
            match self.run_one(descriptor, ast) {
                Ok(rule_issues) => issues.extend(rule_issues),
                Err(notification) => notifications.push(notification),
            }
        }

        for listener in self.listeners {
            listener.on_process_complete(ast, &issues);
        }
        (issues, notifications)
    }

    /// One (file, rule) execution: the error isolation boundary.
    fn run_one(
        &self,
        descriptor: &RuleDescriptor,
        ast: &Ast,
    ) -> std::result::Result<Vec<Issue>, Notification> {
        let mut rule = descriptor
            .new_rule()
            .map_err(|e| rule_failure(descriptor, ast, &e.to_string()))?;

        let started = Instant::now();
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            run_rule(rule.as_mut(), ast, self.binding)
        }));
        let duration = started.elapsed();

        let findings = match outcome {
            Ok(Ok(findings)) => findings,
            Ok(Err(e)) => return Err(rule_failure(descriptor, ast, &e.to_string())),
            Err(payload) => {
                return Err(rule_failure(descriptor, ast, &panic_message(&payload)));
            }
        };

        if let Some(profiler) = self.profiler {
            profiler.record(
                descriptor.instance.rule_set_id.as_str(),
                descriptor.name.as_str(),
                ast.path(),
                duration,
                findings.len(),
            );
        }

        let suppressors = build_suppressors(&descriptor.config, ast, self.binding)
            .map_err(|e| rule_failure(descriptor, ast, &e.to_string()))?;

        let issues = findings
            .into_iter()
            .map(|finding| self.resolve_scope_suppression(descriptor, ast, finding))
            .filter(|finding| !finding.suppressed())
            .filter(|finding| {
                !suppressors
                    .iter()
                    .any(|suppressor| suppressor.should_suppress(finding, ast))
            })
            .map(|finding| to_issue(descriptor, finding))
            .collect();
        Ok(issues)
    }

    fn resolve_scope_suppression(
        &self,
        descriptor: &RuleDescriptor,
        ast: &Ast,
        mut finding: Finding,
    ) -> Finding {
        if let Some(node) = finding.entity.node {
            finding.suppress_reasons = scope_suppress_reasons(
                ast,
                node,
                &descriptor.name,
                &descriptor.aliases,
                &descriptor.instance.rule_set_id,
            );
        }
        finding
    }
}

fn to_issue(descriptor: &RuleDescriptor, finding: Finding) -> Issue {
    Issue {
        rule_instance: descriptor.instance.clone(),
        severity: descriptor.instance.severity,
        entity: finding.entity,
        references: finding.references,
        message: finding.message,
        suppress_reasons: finding.suppress_reasons,
    }
}

fn rule_failure(descriptor: &RuleDescriptor, ast: &Ast, message: &str) -> Notification {
    tracing::warn!(
        "rule '{}' failed on {}: {}",
        descriptor.name,
        ast.path().display(),
        message
    );
    Notification::error(format!(
        "rule '{}' failed on {}: {}",
        descriptor.name,
        ast.path().display(),
        message
    ))
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "rule panicked".to_string()
    }
}

#[cfg(test)]
#[path = "analyzer_tests.rs"]
mod tests;
