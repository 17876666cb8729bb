// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared unit test utilities.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::HashMap;
use std::path::PathBuf;

use crate::ast::{Ast, Span};
use crate::config::Config;
use crate::error::Error;
use crate::source::{Parser, SourceCode};

/// Parse an inline YAML document into a config.
pub fn yaml_config(content: &str) -> Config {
    Config::from_yaml_str(content).unwrap()
}

/// A one-line span for synthetic nodes.
pub fn span(line: u32) -> Span {
    Span::at(line, 1)
}

/// Parser handing out pre-built trees by path.
pub struct MapParser {
    asts: HashMap<PathBuf, Ast>,
}

impl MapParser {
    pub fn new(asts: impl IntoIterator<Item = Ast>) -> Self {
        Self {
            asts: asts
                .into_iter()
                .map(|ast| (ast.path().to_path_buf(), ast))
                .collect(),
        }
    }
}

impl Parser for MapParser {
    fn parse(&self, source: &SourceCode) -> crate::error::Result<Ast> {
        self.asts
            .get(&source.path)
            .cloned()
            .ok_or_else(|| Error::Parse {
                path: source.path.clone(),
                message: "unexpected token".to_string(),
            })
    }
}

/// Source stubs matching [`MapParser`] entries; the text is irrelevant.
pub fn sources_for(paths: &[&str]) -> Vec<SourceCode> {
    paths
        .iter()
        .map(|path| SourceCode::new(*path, ""))
        .collect()
}
