// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Extension seams around the analysis core.
//!
//! Config validators run before analysis, file process listeners ride along
//! with it, and reporting extensions post-process the aggregate. None of
//! them are known to the analyzer by name; baseline filtering, issue
//! deduplication and the like all plug in here.

use crate::ast::Ast;
use crate::config::Config;
use crate::issue::{Issue, Notification};
use crate::result::AnalysisResult;

/// Inspects the resolved config before analysis starts.
///
/// Findings are advisory: notifications never block the run by themselves.
pub trait ConfigValidator: Send + Sync {
    fn id(&self) -> &str;
    fn validate(&self, config: &Config) -> Vec<Notification>;
}

/// Observes and transforms the aggregate after analysis.
///
/// Extensions run in descending [`Self::priority`] order, registration
/// order breaking ties. Each `transform_issues` output feeds the next
/// extension in the chain.
pub trait ReportingExtension: Send + Sync {
    fn id(&self) -> &str;

    fn priority(&self) -> i32 {
        0
    }

    /// Sees the aggregate before any transformation.
    fn on_raw_result(&self, _result: &AnalysisResult) {}

    /// May filter or rewrite the issue list.
    fn transform_issues(&self, issues: Vec<Issue>) -> Vec<Issue> {
        issues
    }

    /// Sees the aggregate after the whole chain has run.
    fn on_final_result(&self, _result: &AnalysisResult) {}
}

/// Renders a result for the console. `None` means nothing to print.
pub trait ConsoleReport: Send + Sync {
    fn id(&self) -> &str;
    fn render(&self, result: &AnalysisResult) -> Option<String>;
}

/// Renders a result for a file target. `None` means nothing to write.
pub trait OutputReport: Send + Sync {
    fn id(&self) -> &str;
    fn render(&self, result: &AnalysisResult) -> Option<String>;
}

/// Lifecycle hooks around file processing.
///
/// `on_process`/`on_process_complete` may be called from worker threads and
/// must only touch internal synchronized state; `on_start` and `on_finish`
/// run single-threaded, and `on_finish` is the one place extensions may
/// write [`AnalysisResult::set_user_data`].
pub trait FileProcessListener: Send + Sync {
    fn id(&self) -> &str;

    fn on_start(&self, _files: &[Ast]) {}

    fn on_process(&self, _file: &Ast) {}

    fn on_process_complete(&self, _file: &Ast, _issues: &[Issue]) {}

    fn on_finish(&self, _files: &[Ast], _result: &mut AnalysisResult) {}
}

/// Run the reporting chain over a result.
pub fn run_reporting_pipeline(
    extensions: &[Box<dyn ReportingExtension>],
    result: &mut AnalysisResult,
) {
    let mut order: Vec<usize> = (0..extensions.len()).collect();
    // Stable: equal priorities keep registration order.
    order.sort_by_key(|&i| std::cmp::Reverse(extensions[i].priority()));

    for &i in &order {
        extensions[i].on_raw_result(result);
    }

    let mut issues = result.take_issues();
    for &i in &order {
        issues = extensions[i].transform_issues(issues);
    }
    result.replace_issues(issues);

    for &i in &order {
        extensions[i].on_final_result(result);
    }
}

#[cfg(test)]
#[path = "extensions_tests.rs"]
mod tests;
