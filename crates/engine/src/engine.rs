// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The single synchronous entry point drivers call.
//!
//! Wires registry, parser, suppression, aggregation and the extension
//! pipeline together: validate, resolve, parse, schedule, aggregate,
//! post-process.

use std::sync::Arc;

use crate::analyzer::Analyzer;
use crate::ast::Ast;
use crate::config::Config;
use crate::error::Result;
use crate::extensions::{
    ConfigValidator, FileProcessListener, ReportingExtension, run_reporting_pipeline,
};
use crate::issue::{Notification, ProjectMetric};
use crate::profiling::{ProfilingListener, RuleTimingCollector};
use crate::result::AnalysisResult;
use crate::ruleset::RuleSetRegistry;
use crate::source::{AnalysisMode, Parser, SemanticBinding, SourceCode};

/// Run-level switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineOptions {
    pub mode: AnalysisMode,
    /// Fan files out over the rayon pool. Ignored while profiling.
    pub parallel: bool,
    /// Collect per-rule timings. Forces the sequential schedule.
    pub profile: bool,
}

pub struct Engine {
    registry: RuleSetRegistry,
    config: Config,
    parser: Box<dyn Parser>,
    binding: Option<Box<dyn SemanticBinding>>,
    validators: Vec<Box<dyn ConfigValidator>>,
    extensions: Vec<Box<dyn ReportingExtension>>,
    listeners: Vec<Box<dyn FileProcessListener>>,
    options: EngineOptions,
}

impl Engine {
    pub fn new(registry: RuleSetRegistry, config: Config, parser: Box<dyn Parser>) -> Self {
        Self {
            registry,
            config,
            parser,
            binding: None,
            validators: Vec::new(),
            extensions: Vec::new(),
            listeners: Vec::new(),
            options: EngineOptions::default(),
        }
    }

    pub fn with_binding(mut self, binding: Box<dyn SemanticBinding>) -> Self {
        self.binding = Some(binding);
        self
    }

    pub fn with_validator(mut self, validator: Box<dyn ConfigValidator>) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn with_extension(mut self, extension: Box<dyn ReportingExtension>) -> Self {
        self.extensions.push(extension);
        self
    }

    pub fn with_listener(mut self, listener: Box<dyn FileProcessListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Run every registered config validator.
    pub fn validate_config(&self) -> Vec<Notification> {
        self.validators
            .iter()
            .flat_map(|validator| validator.validate(&self.config))
            .collect()
    }

    /// Analyze `sources` and return the fully post-processed result.
    ///
    /// Only structural configuration errors abort the run; parse failures
    /// and rule failures degrade to notifications on a best-effort result.
    pub fn run(&self, sources: &[SourceCode]) -> Result<AnalysisResult> {
        let mut notifications = self.validate_config();

        let resolution = self.registry.resolve(&self.config, self.options.mode)?;

        let mut files: Vec<Ast> = Vec::with_capacity(sources.len());
        for source in sources {
            match self.parser.parse(source) {
                Ok(ast) => files.push(ast),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", source.path.display(), e);
                    notifications.push(Notification::error(e.to_string()));
                }
            }
        }

        let profiling_overrode_parallel = self.options.profile && self.options.parallel;
        if profiling_overrode_parallel {
            notifications.push(Notification::info(
                "profiling forces sequential execution; parallel mode overridden",
            ));
        }
        let parallel = self.options.parallel && !self.options.profile;
        let collector = self
            .options
            .profile
            .then(|| Arc::new(RuleTimingCollector::new()));

        for listener in &self.listeners {
            listener.on_start(&files);
        }

        let binding = self.binding.as_deref();
        let (issues, run_notifications) = Analyzer::new(&resolution.descriptors)
            .with_binding(binding)
            .with_listeners(&self.listeners)
            .with_profiler(collector.as_deref())
            .parallel(parallel)
            .run(&files);
        notifications.extend(run_notifications);

        let mut result = AnalysisResult::new(issues, resolution.instances, notifications);
        if profiling_overrode_parallel {
            result.add_metric(ProjectMetric::new("parallel overridden for profiling", 1));
        }

        for listener in &self.listeners {
            listener.on_finish(&files, &mut result);
        }
        if let Some(collector) = collector {
            ProfilingListener::new(collector).on_finish(&files, &mut result);
        }

        run_reporting_pipeline(&self.extensions, &mut result);
        Ok(result)
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
