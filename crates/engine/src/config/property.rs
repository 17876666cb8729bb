// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative per-rule config bindings.
//!
//! A [`ConfigProperty`] ties one rule field to one config key. The value is
//! resolved on first access and memoized for the lifetime of the rule
//! instance; transforms (like regex compilation) therefore run at most once.
//! Resolution errors surface on first access, which for a well-behaved rule
//! is during construction.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use super::{Config, FromConfigValue};
use crate::error::{Error, Result};

type Resolver<T> = Box<dyn Fn() -> Result<T> + Send + Sync>;

pub struct ConfigProperty<T> {
    config: Config,
    key: String,
    cell: OnceCell<T>,
    resolver: Resolver<T>,
}

impl<T> std::fmt::Debug for ConfigProperty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigProperty")
            .field("key", &self.key)
            .field("resolved", &self.cell.get().is_some())
            .finish()
    }
}

impl<T: Clone + Send + Sync + 'static> ConfigProperty<T> {
    /// Bind `key`, using `default` when absent.
    pub fn new(config: &Config, key: &str, default: T) -> Self
    where
        T: FromConfigValue,
    {
        Self::transformed(config, key, default, Ok)
    }

    /// Bind `key` with a transform applied to the configured value or the
    /// default, whichever is chosen. The transform's error message is
    /// attached to the offending key.
    pub fn transformed<D, F>(config: &Config, key: &str, default: D, transform: F) -> Self
    where
        D: FromConfigValue + Clone + Send + Sync + 'static,
        F: Fn(D) -> std::result::Result<T, String> + Send + Sync + 'static,
    {
        let resolve_config = config.clone();
        let resolve_key = key.to_string();
        let resolver: Resolver<T> = Box::new(move || {
            let raw = resolve_config.value_or_default(&resolve_key, default.clone())?;
            transform(raw).map_err(|message| Error::InvalidConfiguration {
                key: resolve_config.key_path(&resolve_key),
                message,
            })
        });
        Self {
            config: config.clone(),
            key: key.to_string(),
            cell: OnceCell::new(),
            resolver,
        }
    }

    /// Bind `key` with a legacy fallback binding.
    ///
    /// Precedence: if `key` is configured its value wins (transformed);
    /// otherwise, if the fallback's own key is configured, the fallback's
    /// resolved value is used as-is (it was already transformed by its own
    /// binding); otherwise the transformed `default` applies.
    pub fn with_fallback<D, F>(
        config: &Config,
        key: &str,
        fallback: Arc<ConfigProperty<T>>,
        default: D,
        transform: F,
    ) -> Self
    where
        D: FromConfigValue + Clone + Send + Sync + 'static,
        F: Fn(D) -> std::result::Result<T, String> + Send + Sync + 'static,
    {
        let resolve_config = config.clone();
        let resolve_key = key.to_string();
        let resolver: Resolver<T> = Box::new(move || {
            if !resolve_config.has_key(&resolve_key) && fallback.is_configured() {
                return fallback.get().map(T::clone);
            }
            let raw = resolve_config.value_or_default(&resolve_key, default.clone())?;
            transform(raw).map_err(|message| Error::InvalidConfiguration {
                key: resolve_config.key_path(&resolve_key),
                message,
            })
        });
        Self {
            config: config.clone(),
            key: key.to_string(),
            cell: OnceCell::new(),
            resolver,
        }
    }

    /// Resolve the value, computing it on the first call only.
    pub fn get(&self) -> Result<&T> {
        self.cell.get_or_try_init(|| (self.resolver)())
    }

    /// Whether the bound key is present in the config.
    pub fn is_configured(&self) -> bool {
        self.config.has_key(&self.key)
    }

    /// The bound key.
    pub fn key(&self) -> &str {
        &self.key
    }
}

#[cfg(test)]
#[path = "property_tests.rs"]
mod tests;
