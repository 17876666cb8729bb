// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Structural validation of a user config against a baseline.
//!
//! The baseline is the default configuration shipped with the rule sets; a
//! user key that has no counterpart there is most likely a typo. Validation
//! never blocks analysis on its own, it only emits notifications.

use regex::Regex;
use serde_yaml::Value;

use super::Config;
use crate::error::{Error, Result};
use crate::extensions::ConfigValidator;
use crate::issue::Notification;

/// Property paths that are legal on any rule or rule set without being
/// spelled out in the baseline config.
const DEFAULT_PROPERTY_EXCLUDES: &[&str] = &[
    "config",
    "config>.*",
    ".*>excludes",
    ".*>includes",
    ".*>active",
    ".*>severity",
    ".*>.*>excludes",
    ".*>.*>includes",
    ".*>.*>active",
    ".*>.*>autoCorrect",
    ".*>.*>severity",
    ".*>.*>aliases",
    ".*>.*>ignoreAnnotated",
    ".*>.*>onlyAnnotated",
    ".*>.*>ignoreFunction",
];

/// Validation tuning, read from the `config` block of the user config.
#[derive(Debug)]
pub struct ValidationSettings {
    pub warnings_as_errors: bool,
    pub exclude_patterns: Vec<Regex>,
}

impl ValidationSettings {
    fn from_config(config: &Config) -> Result<Self> {
        let warnings_as_errors = config
            .sub_config("config")
            .value_or_default("warningsAsErrors", false)?;
        let mut exclude_patterns = default_excludes()?;
        for pattern in config
            .sub_config("config")
            .value_or_default::<Vec<String>>("excludes", Vec::new())?
        {
            exclude_patterns.push(compile_exclude(&pattern)?);
        }
        Ok(Self {
            warnings_as_errors,
            exclude_patterns,
        })
    }
}

fn default_excludes() -> Result<Vec<Regex>> {
    DEFAULT_PROPERTY_EXCLUDES
        .iter()
        .map(|pattern| compile_exclude(pattern))
        .collect()
}

fn compile_exclude(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("^{pattern}$")).map_err(|e| Error::Config {
        message: format!("invalid validation exclude pattern '{pattern}': {e}"),
        path: None,
    })
}

/// Compare `config` against `baseline`, reporting unknown keys and value
/// shape mismatches.
pub fn validate_config(config: &Config, baseline: &Config) -> Result<Vec<Notification>> {
    if baseline.keys().is_empty() {
        return Err(Error::Config {
            message: "cannot validate configuration against an empty baseline".to_string(),
            path: None,
        });
    }

    let settings = ValidationSettings::from_config(config)?;
    let mut notifications = Vec::new();
    test_keys(config, baseline, None, &settings, &mut notifications);
    Ok(notifications)
}

fn test_keys(
    current: &Config,
    base: &Config,
    parent_path: Option<&str>,
    settings: &ValidationSettings,
    notifications: &mut Vec<Notification>,
) {
    for key in current.keys() {
        let property_path = match parent_path {
            Some(parent) => format!("{parent}>{key}"),
            None => key.clone(),
        };

        if settings
            .exclude_patterns
            .iter()
            .any(|p| p.is_match(&property_path))
        {
            continue;
        }

        let current_value = current.raw(&key);
        let base_value = base.raw(&key);

        match &base_value {
            None => {
                notifications.push(Notification::warning(format!(
                    "property '{property_path}' is misspelled or does not exist"
                )));
            }
            Some(Value::Sequence(_)) if matches!(current_value, Some(Value::String(_))) => {
                notifications.push(level_adjusted(
                    format!(
                        "property '{property_path}' should be a YAML array instead of a comma-separated string"
                    ),
                    settings.warnings_as_errors,
                ));
            }
            _ => {}
        }

        let next = matches!(current_value, Some(Value::Mapping(_)));
        let next_base = matches!(base_value, Some(Value::Mapping(_)));
        match (next, next_base) {
            (false, true) => notifications.push(Notification::warning(format!(
                "nested config expected for '{property_path}'"
            ))),
            (true, false) if base_value.is_some() => {
                notifications.push(Notification::warning(format!(
                    "unexpected nested config for '{property_path}'"
                )));
            }
            (true, true) => test_keys(
                &current.sub_config(&key),
                &base.sub_config(&key),
                Some(&property_path),
                settings,
                notifications,
            ),
            _ => {}
        }
    }
}

fn level_adjusted(message: String, as_error: bool) -> Notification {
    if as_error {
        Notification::error(message)
    } else {
        Notification::warning(message)
    }
}

/// The stock [`ConfigValidator`] wired into the engine when a baseline
/// config is available.
pub struct DefaultConfigValidator {
    baseline: Config,
}

impl DefaultConfigValidator {
    pub fn new(baseline: Config) -> Self {
        Self { baseline }
    }
}

impl ConfigValidator for DefaultConfigValidator {
    fn id(&self) -> &str {
        "default-config-validator"
    }

    fn validate(&self, config: &Config) -> Vec<Notification> {
        match validate_config(config, &self.baseline) {
            Ok(notifications) => notifications,
            Err(e) => vec![Notification::error(e.to_string())],
        }
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
