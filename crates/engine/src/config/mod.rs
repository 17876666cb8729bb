// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Hierarchical, read-only configuration tree.
//!
//! Backed by a parsed YAML mapping. Navigation via [`Config::sub_config`] is
//! total: descending through an absent key yields an empty config whose
//! lookups all fall through to defaults, so callers never null-check on the
//! way down. Absence only becomes visible at leaf value lookup.

mod property;
mod validation;

pub use property::ConfigProperty;
pub use validation::{DefaultConfigValidator, validate_config};

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use serde_yaml::Value;

use crate::error::{Error, Result};

/// Config key holding a rule's extra suppression aliases.
pub const ALIASES_KEY: &str = "aliases";
/// Config key switching a rule or rule set on and off.
pub const ACTIVE_KEY: &str = "active";
/// Config key for the auto-correction opt-in.
pub const AUTO_CORRECT_KEY: &str = "autoCorrect";
/// Config key overriding issue severity.
pub const SEVERITY_KEY: &str = "severity";
/// Config keys for path filtering.
pub const EXCLUDES_KEY: &str = "excludes";
pub const INCLUDES_KEY: &str = "includes";

/// A node in the configuration tree. Cheap to clone and safe to share
/// across threads; nothing is mutable after construction.
#[derive(Debug, Clone)]
pub struct Config {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    /// Dotted key path from the root, `None` at the root itself.
    parent_path: Option<String>,
    /// Back-reference to the enclosing config.
    parent: Option<Config>,
    source: Source,
}

#[derive(Debug)]
enum Source {
    Yaml(serde_yaml::Mapping),
    /// Two layers, lookups try `overriding` first. Composition is by
    /// construction; neither layer is mutated.
    Layered { overriding: Config, defaults: Config },
    Empty,
}

impl Config {
    /// The config every absent key resolves to.
    pub fn empty() -> Self {
        Self::root(Source::Empty)
    }

    /// Parse a YAML document. An empty document yields an empty config.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(content).map_err(|e| Error::Config {
            message: e.to_string(),
            path: None,
        })?;
        match value {
            Value::Mapping(mapping) => Ok(Self::root(Source::Yaml(mapping))),
            Value::Null => Ok(Self::empty()),
            other => Err(Error::Config {
                message: format!(
                    "expected a mapping at the top level, got {}",
                    value_kind(&other)
                ),
                path: None,
            }),
        }
    }

    /// Load and parse a YAML config file.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: e.to_string(),
            path: Some(path.to_path_buf()),
        })?;
        Self::from_yaml_str(&content).map_err(|e| match e {
            Error::Config { message, .. } => Error::Config {
                message,
                path: Some(path.to_path_buf()),
            },
            other => other,
        })
    }

    /// Layer `overriding` over `defaults`: present keys win, absent keys
    /// fall through.
    pub fn layered(overriding: Config, defaults: Config) -> Self {
        Self::root(Source::Layered {
            overriding,
            defaults,
        })
    }

    fn root(source: Source) -> Self {
        Self {
            inner: Arc::new(Inner {
                parent_path: None,
                parent: None,
                source,
            }),
        }
    }

    /// Dotted key path of this config, `None` at the root.
    pub fn parent_path(&self) -> Option<&str> {
        self.inner.parent_path.as_deref()
    }

    /// The enclosing config, `None` at the root.
    pub fn parent(&self) -> Option<&Config> {
        self.inner.parent.as_ref()
    }

    /// Descend into `key`. Total: an absent or non-mapping key yields an
    /// empty sub-config.
    pub fn sub_config(&self, key: &str) -> Config {
        let source = match &self.inner.source {
            Source::Yaml(mapping) => match mapping.get(key) {
                Some(Value::Mapping(child)) => Source::Yaml(child.clone()),
                _ => Source::Empty,
            },
            Source::Layered {
                overriding,
                defaults,
            } => Source::Layered {
                overriding: overriding.sub_config(key),
                defaults: defaults.sub_config(key),
            },
            Source::Empty => Source::Empty,
        };
        Config {
            inner: Arc::new(Inner {
                parent_path: Some(self.key_path(key)),
                parent: Some(self.clone()),
                source,
            }),
        }
    }

    /// Keys that have mapping values, i.e. valid [`Self::sub_config`]
    /// targets with content.
    pub fn sub_config_keys(&self) -> BTreeSet<String> {
        match &self.inner.source {
            Source::Yaml(mapping) => mapping
                .iter()
                .filter_map(|(k, v)| match (k, v) {
                    (Value::String(key), Value::Mapping(_)) => Some(key.clone()),
                    _ => None,
                })
                .collect(),
            Source::Layered {
                overriding,
                defaults,
            } => {
                let mut keys = overriding.sub_config_keys();
                keys.extend(defaults.sub_config_keys());
                keys
            }
            Source::Empty => BTreeSet::new(),
        }
    }

    /// All keys present at this level, regardless of value shape.
    pub fn keys(&self) -> BTreeSet<String> {
        match &self.inner.source {
            Source::Yaml(mapping) => mapping
                .iter()
                .filter_map(|(k, _)| k.as_str().map(String::from))
                .collect(),
            Source::Layered {
                overriding,
                defaults,
            } => {
                let mut keys = overriding.keys();
                keys.extend(defaults.keys());
                keys
            }
            Source::Empty => BTreeSet::new(),
        }
    }

    /// Whether `key` is configured at this level, with any value shape.
    pub fn has_key(&self, key: &str) -> bool {
        self.raw(key).is_some()
    }

    /// Typed lookup. `Ok(None)` when the key is absent; an error when the
    /// stored value cannot be coerced to `T`.
    pub fn value_or_null<T: FromConfigValue>(&self, key: &str) -> Result<Option<T>> {
        match self.raw(key) {
            Some(value) => T::from_value(&value, &self.key_path(key)).map(Some),
            None => Ok(None),
        }
    }

    /// Typed lookup falling back to `default` when the key is absent.
    pub fn value_or_default<T: FromConfigValue>(&self, key: &str, default: T) -> Result<T> {
        Ok(self.value_or_null(key)?.unwrap_or(default))
    }

    fn raw(&self, key: &str) -> Option<Value> {
        match &self.inner.source {
            Source::Yaml(mapping) => mapping.get(key).cloned(),
            Source::Layered {
                overriding,
                defaults,
            } => overriding.raw(key).or_else(|| defaults.raw(key)),
            Source::Empty => None,
        }
    }

    pub(crate) fn key_path(&self, key: &str) -> String {
        match &self.inner.parent_path {
            Some(parent) => format!("{parent}.{key}"),
            None => key.to_string(),
        }
    }
}

/// A list where each element is a value with an optional human reason.
///
/// In YAML either a bare string or a `{value, reason}` mapping:
///
/// ```yaml
/// methods:
///   - 'System.gc'
///   - value: 'Runtime.getRuntime().gc'
///     reason: 'Forces a stop-the-world pause.'
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValuesWithReason {
    values: Vec<ValueWithReason>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueWithReason {
    pub value: String,
    pub reason: Option<String>,
}

impl ValueWithReason {
    pub fn new(value: impl Into<String>, reason: Option<&str>) -> Self {
        Self {
            value: value.into(),
            reason: reason.map(String::from),
        }
    }
}

impl ValuesWithReason {
    pub fn new(values: Vec<ValueWithReason>) -> Self {
        Self { values }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValueWithReason> {
        self.values.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<'a> IntoIterator for &'a ValuesWithReason {
    type Item = &'a ValueWithReason;
    type IntoIter = std::slice::Iter<'a, ValueWithReason>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Coercion from a stored YAML value into a supported config type.
///
/// The supported set is closed: strings, integers, booleans, string lists
/// and [`ValuesWithReason`]. Anything else is unrepresentable at compile
/// time, so "unsupported property type" cannot occur at runtime.
pub trait FromConfigValue: Sized {
    fn from_value(value: &Value, key: &str) -> Result<Self>;
}

impl FromConfigValue for String {
    fn from_value(value: &Value, key: &str) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(mismatch(key, "a string", other)),
        }
    }
}

impl FromConfigValue for bool {
    fn from_value(value: &Value, key: &str) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(*b),
            // Quoted booleans show up in hand-written YAML.
            Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(true),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(false),
            other => Err(mismatch(key, "a boolean", other)),
        }
    }
}

impl FromConfigValue for i64 {
    fn from_value(value: &Value, key: &str) -> Result<Self> {
        match value {
            Value::Number(n) => n.as_i64().ok_or_else(|| mismatch(key, "an integer", value)),
            Value::String(s) => s.parse().map_err(|_| mismatch(key, "an integer", value)),
            other => Err(mismatch(key, "an integer", other)),
        }
    }
}

impl FromConfigValue for usize {
    fn from_value(value: &Value, key: &str) -> Result<Self> {
        let n: i64 = FromConfigValue::from_value(value, key)?;
        usize::try_from(n).map_err(|_| mismatch(key, "a non-negative integer", value))
    }
}

impl FromConfigValue for Vec<String> {
    fn from_value(value: &Value, key: &str) -> Result<Self> {
        match value {
            Value::Sequence(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(mismatch(key, "a list of strings", other)),
                })
                .collect(),
            other => Err(mismatch(key, "a list of strings", other)),
        }
    }
}

impl FromConfigValue for ValuesWithReason {
    fn from_value(value: &Value, key: &str) -> Result<Self> {
        let Value::Sequence(items) = value else {
            return Err(mismatch(key, "a list of values with reasons", value));
        };
        let values = items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(ValueWithReason {
                    value: s.clone(),
                    reason: None,
                }),
                Value::Mapping(map) => {
                    let value = map
                        .get("value")
                        .and_then(Value::as_str)
                        .ok_or_else(|| Error::InvalidConfiguration {
                            key: key.to_string(),
                            message: "map entries need a string 'value' key".to_string(),
                        })?;
                    let reason = match map.get("reason") {
                        None | Some(Value::Null) => None,
                        Some(Value::String(s)) => Some(s.clone()),
                        Some(other) => {
                            return Err(Error::InvalidConfiguration {
                                key: key.to_string(),
                                message: format!(
                                    "'reason' must be a string, got {}",
                                    value_kind(other)
                                ),
                            });
                        }
                    };
                    Ok(ValueWithReason {
                        value: value.to_string(),
                        reason,
                    })
                }
                other => Err(Error::InvalidConfiguration {
                    key: key.to_string(),
                    message: format!(
                        "list entries must be strings or maps with a 'value' key, got {}",
                        value_kind(other)
                    ),
                }),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(ValuesWithReason { values })
    }
}

fn mismatch(key: &str, expected: &str, got: &Value) -> Error {
    Error::InvalidConfiguration {
        key: key.to_string(),
        message: format!("expected {expected}, got {}", value_kind(got)),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
