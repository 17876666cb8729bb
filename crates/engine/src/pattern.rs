// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Wildcard pattern matching used by config and suppression.
//!
//! Two flavors exist because they match different things:
//! - [`simple_pattern_to_regex`] matches dotted names (rule ids, qualified
//!   names). `*` stops at `.`, `**` crosses it.
//! - [`SimpleGlob`] matches annotation names. `*` crosses everything,
//!   including `.`.
//!
//! Path include/exclude filtering on file paths uses [`PathFilters`], which
//! delegates to shell-style globs from the `globset` crate.

use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use regex::Regex;

use crate::error::PatternError;

/// Characters escaped before handing a pattern to the regex engine.
///
/// Square brackets are intentionally absent: an unbalanced class like `a[b`
/// must surface as an invalid pattern instead of silently matching a literal.
const ESCAPED: &[char] = &['\\', '.', '+', '$', '(', ')', '{', '}', '|', '^'];

/// Convert a simple name pattern into an anchored [`Regex`].
///
/// `*` matches zero or more characters except `.`, `**` matches zero or more
/// of any character, and `?` matches exactly one character. A pattern that is
/// just `*` matches any non-empty string. All other regex metacharacters are
/// taken literally.
pub fn simple_pattern_to_regex(pattern: &str) -> Result<Regex, PatternError> {
    if pattern == "*" {
        return compile(pattern, "^.+$".to_string());
    }

    let mut out = String::with_capacity(pattern.len() * 2 + 2);
    out.push('^');
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => {
                if chars.peek() == Some(&'*') {
                    chars.next();
                    out.push_str(".*");
                } else {
                    out.push_str("[^.]*");
                }
            }
            '?' => out.push('.'),
            c if ESCAPED.contains(&c) => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push('$');
    compile(pattern, out)
}

/// A compiled annotation-name glob.
///
/// Unlike [`simple_pattern_to_regex`], `*` here matches any character
/// sequence including `.`, so `*Composable` matches both a simple name and a
/// fully qualified one.
#[derive(Debug, Clone)]
pub struct SimpleGlob {
    regex: Regex,
}

impl SimpleGlob {
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let mut out = String::with_capacity(pattern.len() * 2 + 2);
        out.push('^');
        for c in pattern.chars() {
            match c {
                '*' => out.push_str(".*"),
                '?' => out.push('.'),
                c if ESCAPED.contains(&c) => {
                    out.push('\\');
                    out.push(c);
                }
                c => out.push(c),
            }
        }
        out.push('$');
        Ok(Self {
            regex: compile(pattern, out)?,
        })
    }

    pub fn matches(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }
}

fn compile(pattern: &str, regex: String) -> Result<Regex, PatternError> {
    Regex::new(&regex).map_err(|source| PatternError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Compiled `includes`/`excludes` path globs from a config scope.
#[derive(Debug)]
pub struct PathFilters {
    includes: Option<GlobSet>,
    excludes: Option<GlobSet>,
}

impl PathFilters {
    /// Build filters from raw glob lists. Empty lists mean "no filter".
    pub fn of(includes: &[String], excludes: &[String]) -> Result<Option<Self>, PatternError> {
        if includes.is_empty() && excludes.is_empty() {
            return Ok(None);
        }
        Ok(Some(Self {
            includes: build_glob_set(includes)?,
            excludes: build_glob_set(excludes)?,
        }))
    }

    /// Whether the file at `path` is filtered out of analysis.
    ///
    /// An `includes` match rescues a path from `excludes`; with only
    /// `includes` configured everything else is ignored.
    pub fn is_ignored(&self, path: &Path) -> bool {
        match (&self.includes, &self.excludes) {
            (None, None) => false,
            (Some(inc), None) => !inc.is_match(path),
            (None, Some(exc)) => exc.is_match(path),
            (Some(inc), Some(exc)) => exc.is_match(path) && !inc.is_match(path),
        }
    }
}

fn build_glob_set(patterns: &[String]) -> Result<Option<GlobSet>, PatternError> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| PatternError::InvalidGlob {
            pattern: pattern.clone(),
            message: e.to_string(),
        })?;
        builder.add(glob);
    }
    let set = builder.build().map_err(|e| PatternError::InvalidGlob {
        pattern: patterns.join(", "),
        message: e.to_string(),
    })?;
    Ok(Some(set))
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
