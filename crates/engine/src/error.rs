// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

/// Smolder error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration is structurally unusable (bad YAML, bad identifier).
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// A config value exists but cannot be coerced to the requested type.
    #[error("invalid configuration: property '{key}': {message}")]
    InvalidConfiguration { key: String, message: String },

    /// A rule or rule set identifier failed validation.
    #[error("invalid identifier: '{0}' (expected a letter followed by letters, digits or '-')")]
    InvalidId(String),

    /// Two rules with the same name inside one rule set.
    #[error("duplicate rule '{rule}' in rule set '{rule_set}'")]
    DuplicateRule { rule_set: String, rule: String },

    /// A finding was constructed with a blank message.
    #[error("finding for '{signature}' has a blank message")]
    BlankMessage { signature: String },

    /// Pattern compilation error.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// Source file could not be parsed.
    #[error("parse error: {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// A rule failed while traversing a file.
    #[error("rule '{rule}' failed on {path}: {message}")]
    RuleExecution {
        rule: String,
        path: PathBuf,
        message: String,
    },
}

/// Error during pattern compilation.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid path glob '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },
}

/// Result type using smolder Error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
