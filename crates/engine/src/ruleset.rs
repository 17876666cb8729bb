// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rule set registration and active-rule resolution.
//!
//! Providers are registered explicitly at engine construction; there is no
//! classpath or filesystem discovery. Resolution turns the registry plus
//! the global config into the list of rules that will actually run, while
//! recording a [`RuleInstance`] snapshot for every candidate rule so
//! reports can show inactive rules too.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use crate::config::{
    ACTIVE_KEY, ALIASES_KEY, AUTO_CORRECT_KEY, Config, EXCLUDES_KEY, INCLUDES_KEY, SEVERITY_KEY,
};
use crate::error::{Error, Result};
use crate::issue::{RuleInstance, Severity};
use crate::pattern::PathFilters;
use crate::rule::{Rule, RuleName, RuleSetId};
use crate::source::AnalysisMode;

/// Constructs a fresh rule instance from its scoped config.
///
/// Called once per (file, worker) pairing, so rules never share mutable
/// state across concurrent file tasks.
pub type RuleFactory = Arc<dyn Fn(&Config) -> Result<Box<dyn Rule>> + Send + Sync>;

/// One registered rule: identity, defaults, and its factory.
pub struct RuleEntry {
    pub name: RuleName,
    pub active_by_default: bool,
    pub url: Option<String>,
    factory: RuleFactory,
}

impl RuleEntry {
    pub fn new<F>(name: &str, factory: F) -> Result<Self>
    where
        F: Fn(&Config) -> Result<Box<dyn Rule>> + Send + Sync + 'static,
    {
        Ok(Self {
            name: RuleName::new(name)?,
            active_by_default: false,
            url: None,
            factory: Arc::new(factory),
        })
    }

    pub fn active_by_default(mut self, active: bool) -> Self {
        self.active_by_default = active;
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// A named, ordered group of rules, uniquely keyed by rule name.
pub struct RuleSet {
    id: RuleSetId,
    rules: Vec<RuleEntry>,
}

impl RuleSet {
    pub fn new(id: RuleSetId, rules: Vec<RuleEntry>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for rule in &rules {
            if !seen.insert(rule.name.clone()) {
                return Err(Error::DuplicateRule {
                    rule_set: id.as_str().to_string(),
                    rule: rule.name.as_str().to_string(),
                });
            }
        }
        Ok(Self { id, rules })
    }

    pub fn id(&self) -> &RuleSetId {
        &self.id
    }

    pub fn rules(&self) -> &[RuleEntry] {
        &self.rules
    }
}

/// Produces a [`RuleSet`] for registration. The set carries its own id.
pub trait RuleSetProvider: Send + Sync {
    fn instance(&self) -> Result<RuleSet>;
}

/// Explicit registration table mapping rule set ids to providers.
#[derive(Default)]
pub struct RuleSetRegistry {
    providers: Vec<Box<dyn RuleSetProvider>>,
}

impl RuleSetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, provider: Box<dyn RuleSetProvider>) -> &mut Self {
        self.providers.push(provider);
        self
    }

    pub fn with_provider(mut self, provider: Box<dyn RuleSetProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Resolve which rules run for this config and analysis mode.
    ///
    /// Structural problems (duplicate ids, invalid severity, a factory
    /// rejecting its config) fail the whole run here, before any file is
    /// touched.
    pub fn resolve(&self, config: &Config, mode: AnalysisMode) -> Result<Resolution> {
        let mut seen_sets = BTreeSet::new();
        let mut descriptors = Vec::new();
        let mut instances = Vec::new();

        for provider in &self.providers {
            let rule_set = provider.instance()?;
            if !seen_sets.insert(rule_set.id.clone()) {
                return Err(Error::Config {
                    message: format!("rule set '{}' is registered twice", rule_set.id),
                    path: None,
                });
            }

            let set_config = config.sub_config(rule_set.id.as_str());
            let set_active = set_config.value_or_default(ACTIVE_KEY, true)?;
            let set_auto_correct = set_config.value_or_default(AUTO_CORRECT_KEY, true)?;
            let set_severity = severity_of(&set_config, Severity::default())?;
            let set_filters = path_filters(&set_config)?;
            let set_filters = set_filters.map(Arc::new);

            for entry in rule_set.rules {
                let rule_config = set_config.sub_config(entry.name.as_str());
                let active = set_active
                    && rule_config.value_or_default(ACTIVE_KEY, entry.active_by_default)?;
                let auto_correct =
                    rule_config.value_or_default(AUTO_CORRECT_KEY, false)? && set_auto_correct;
                let severity = severity_of(&rule_config, set_severity)?;
                let aliases: Vec<String> =
                    rule_config.value_or_default(ALIASES_KEY, Vec::new())?;
                let filters = path_filters(&rule_config)?;

                // Probe construction: snapshots the description and surfaces
                // config errors before any file is analyzed.
                let probe = (entry.factory)(&rule_config)?;
                let requires_binding = probe.requires_semantic_binding();

                let instance = RuleInstance {
                    id: entry.name.as_str().to_string(),
                    rule_set_id: rule_set.id.clone(),
                    description: probe.description().to_string(),
                    severity,
                    active,
                    url: entry.url.clone(),
                };
                instances.push(instance.clone());

                if !active {
                    continue;
                }
                if requires_binding && mode != AnalysisMode::Full {
                    tracing::debug!(
                        "skipping rule '{}': requires semantic binding, mode is light",
                        entry.name
                    );
                    continue;
                }

                descriptors.push(RuleDescriptor {
                    instance,
                    name: entry.name.clone(),
                    config: rule_config,
                    aliases,
                    auto_correct,
                    filters,
                    set_filters: set_filters.clone(),
                    factory: entry.factory.clone(),
                });
            }
        }

        Ok(Resolution {
            descriptors,
            instances,
        })
    }
}

/// A resolved, runnable rule with everything the analyzer needs.
pub struct RuleDescriptor {
    pub instance: RuleInstance,
    pub name: RuleName,
    pub config: Config,
    pub aliases: Vec<String>,
    pub auto_correct: bool,
    filters: Option<PathFilters>,
    set_filters: Option<Arc<PathFilters>>,
    factory: RuleFactory,
}

impl RuleDescriptor {
    /// Fresh rule instance for one file task.
    pub fn new_rule(&self) -> Result<Box<dyn Rule>> {
        (self.factory)(&self.config)
    }

    /// Path filtering: the rule set's `includes`/`excludes` apply first,
    /// then the rule's own.
    pub fn should_analyze(&self, path: &Path) -> bool {
        if self.set_filters.as_ref().is_some_and(|f| f.is_ignored(path)) {
            return false;
        }
        !self.filters.as_ref().is_some_and(|f| f.is_ignored(path))
    }
}

/// Output of [`RuleSetRegistry::resolve`].
pub struct Resolution {
    /// Rules that will run, in registration order.
    pub descriptors: Vec<RuleDescriptor>,
    /// Snapshot of every candidate rule, active or not.
    pub instances: Vec<RuleInstance>,
}

fn severity_of(config: &Config, fallback: Severity) -> Result<Severity> {
    match config.value_or_null::<String>(SEVERITY_KEY)? {
        Some(value) => Severity::parse(&value).ok_or_else(|| Error::InvalidConfiguration {
            key: config.key_path(SEVERITY_KEY),
            message: format!("unknown severity '{value}'"),
        }),
        None => Ok(fallback),
    }
}

fn path_filters(config: &Config) -> Result<Option<PathFilters>> {
    let includes: Vec<String> = config.value_or_default(INCLUDES_KEY, Vec::new())?;
    let excludes: Vec<String> = config.value_or_default(EXCLUDES_KEY, Vec::new())?;
    Ok(PathFilters::of(&includes, &excludes)?)
}

#[cfg(test)]
#[path = "ruleset_tests.rs"]
mod tests;
