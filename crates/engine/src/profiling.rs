// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Optional per-rule timing instrumentation.
//!
//! The analyzer records one sample per (rule set, rule, file) execution.
//! Samples land in a concurrent map, but meaningful numbers require the
//! sequential schedule; the engine forces that whenever profiling is on.

use std::path::{Path, PathBuf};
use std::time::Duration;

use dashmap::DashMap;
use serde::Serialize;
use serde_json::json;

use crate::ast::Ast;
use crate::extensions::FileProcessListener;
use crate::issue::ProjectMetric;
use crate::result::AnalysisResult;

/// Key under which aggregated timings land in the result's user data.
pub const RULE_TIMINGS_KEY: &str = "ruleTimings";

type SampleKey = (String, String, PathBuf);

/// One recorded rule execution.
#[derive(Debug, Clone, Copy)]
struct Sample {
    duration: Duration,
    findings: usize,
}

/// Aggregate for one rule across all files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RuleTiming {
    pub files: usize,
    pub findings: usize,
    pub total_micros: u64,
}

/// Collects timing samples from the analyzer.
#[derive(Debug, Default)]
pub struct RuleTimingCollector {
    samples: DashMap<SampleKey, Sample>,
}

impl RuleTimingCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &self,
        rule_set: &str,
        rule: &str,
        path: &Path,
        duration: Duration,
        findings: usize,
    ) {
        self.samples.insert(
            (rule_set.to_string(), rule.to_string(), path.to_path_buf()),
            Sample { duration, findings },
        );
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Aggregate per rule, keyed by `(rule set, rule)` in sorted order.
    pub fn aggregate(&self) -> std::collections::BTreeMap<(String, String), RuleTiming> {
        let mut totals = std::collections::BTreeMap::<(String, String), RuleTiming>::new();
        for entry in self.samples.iter() {
            let (rule_set, rule, _) = entry.key();
            let timing = totals.entry((rule_set.clone(), rule.clone())).or_default();
            timing.files += 1;
            timing.findings += entry.value().findings;
            timing.total_micros += u64::try_from(entry.value().duration.as_micros()).unwrap_or(u64::MAX);
        }
        totals
    }
}

/// Publishes collected timings into the result during `on_finish`.
pub struct ProfilingListener {
    collector: std::sync::Arc<RuleTimingCollector>,
}

impl ProfilingListener {
    pub fn new(collector: std::sync::Arc<RuleTimingCollector>) -> Self {
        Self { collector }
    }
}

impl FileProcessListener for ProfilingListener {
    fn id(&self) -> &str {
        "profiling"
    }

    fn on_finish(&self, _files: &[Ast], result: &mut AnalysisResult) {
        if self.collector.is_empty() {
            return;
        }
        let aggregate = self.collector.aggregate();
        let total_micros: u64 = aggregate.values().map(|t| t.total_micros).sum();

        let timings: Vec<_> = aggregate
            .iter()
            .map(|((rule_set, rule), timing)| {
                json!({
                    "ruleSet": rule_set,
                    "rule": rule,
                    "files": timing.files,
                    "findings": timing.findings,
                    "totalMicros": timing.total_micros,
                })
            })
            .collect();
        result.set_user_data(RULE_TIMINGS_KEY, json!(timings));

        result.add_metric(ProjectMetric::new("profiled rules", aggregate.len() as i64));
        result.add_metric(ProjectMetric::new(
            "rule execution time (ms)",
            i64::try_from(total_micros / 1000).unwrap_or(i64::MAX),
        ));
    }
}

#[cfg(test)]
#[path = "profiling_tests.rs"]
mod tests;
