// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Language-agnostic syntax tree consumed by rules.
//!
//! The engine does not parse source text itself; an external front end (see
//! [`crate::source::Parser`]) produces one [`Ast`] per file. Nodes live in an
//! arena indexed by [`NodeId`], which keeps the tree cheap to share across
//! rule executions and makes upward scope walks trivial.

use std::fmt;
use std::path::{Path, PathBuf};

/// Index of a node inside its [`Ast`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A (line, column) position, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Byte offsets of a node in the original source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Source extent of one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Span {
    pub start: SourceLocation,
    pub end: SourceLocation,
    pub text: TextRange,
}

impl Span {
    pub fn new(start: SourceLocation, end: SourceLocation, text: TextRange) -> Self {
        Self { start, end, text }
    }

    /// Zero-width span at a single position. Mostly useful in tests and for
    /// synthetic nodes.
    pub fn at(line: u32, column: u32) -> Self {
        let loc = SourceLocation::new(line, column);
        Self {
            start: loc,
            end: loc,
            text: TextRange::default(),
        }
    }
}

/// An annotation as written in source, e.g. `@Suppress("RuleName")`.
///
/// `name` is the textual form, which may be simple (`Composable`) or
/// qualified (`androidx.compose.runtime.Composable`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub name: String,
    pub arguments: Vec<String>,
}

impl Annotation {
    pub fn new<N, A, S>(name: N, arguments: A) -> Self
    where
        N: Into<String>,
        A: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            arguments: arguments.into_iter().map(Into::into).collect(),
        }
    }

    /// Last `.`-separated segment of the written name.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

/// Closed set of node kinds the engine understands.
///
/// Rules dispatch on these via the per-kind hooks on [`crate::rule::Rule`];
/// a front end that distinguishes more constructs than this maps them onto
/// the closest kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Root of a file. Carries file-level annotations.
    File,
    Import {
        path: String,
        alias: Option<String>,
    },
    Class {
        name: String,
    },
    Function {
        name: String,
    },
    Property {
        name: String,
    },
    Parameter {
        name: String,
    },
    Call {
        callee: String,
        receiver: Option<String>,
    },
    Reference {
        name: String,
    },
    Literal {
        value: String,
    },
}

impl NodeKind {
    pub fn class(name: impl Into<String>) -> Self {
        Self::Class { name: name.into() }
    }

    pub fn function(name: impl Into<String>) -> Self {
        Self::Function { name: name.into() }
    }

    pub fn property(name: impl Into<String>) -> Self {
        Self::Property { name: name.into() }
    }

    pub fn parameter(name: impl Into<String>) -> Self {
        Self::Parameter { name: name.into() }
    }

    pub fn call(callee: impl Into<String>, receiver: Option<&str>) -> Self {
        Self::Call {
            callee: callee.into(),
            receiver: receiver.map(String::from),
        }
    }

    pub fn import(path: impl Into<String>, alias: Option<&str>) -> Self {
        Self::Import {
            path: path.into(),
            alias: alias.map(String::from),
        }
    }

    /// Declared name, for the kinds that have one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Class { name }
            | Self::Function { name }
            | Self::Property { name }
            | Self::Parameter { name }
            | Self::Reference { name } => Some(name),
            _ => None,
        }
    }

    /// Lowercase label used in signatures and diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Import { .. } => "import",
            Self::Class { .. } => "class",
            Self::Function { .. } => "function",
            Self::Property { .. } => "property",
            Self::Parameter { .. } => "parameter",
            Self::Call { .. } => "call",
            Self::Reference { .. } => "reference",
            Self::Literal { .. } => "literal",
        }
    }
}

/// One node in the arena.
#[derive(Debug, Clone)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub kind: NodeKind,
    pub span: Span,
    pub annotations: Vec<Annotation>,
    children: Vec<NodeId>,
}

/// A parsed file: arena of nodes with node 0 as the [`NodeKind::File`] root.
#[derive(Debug, Clone)]
pub struct Ast {
    path: PathBuf,
    nodes: Vec<Node>,
}

impl Ast {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Parent chain starting at the parent of `id`, ending at the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut current = self.node(id).parent;
        std::iter::from_fn(move || {
            let next = current?;
            current = self.node(next).parent;
            Some(next)
        })
    }

    /// Like [`Self::ancestors`] but including `id` itself.
    pub fn self_and_ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::once(id).chain(self.ancestors(id))
    }

    /// Pre-order (document order) traversal of all nodes.
    pub fn dfs(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack = vec![self.root()];
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            stack.extend(self.children(id).iter().rev());
            Some(id)
        })
    }

    /// All import nodes as `(path, alias)` pairs.
    pub fn imports(&self) -> impl Iterator<Item = (&str, Option<&str>)> + '_ {
        self.nodes.iter().filter_map(|node| match &node.kind {
            NodeKind::Import { path, alias } => Some((path.as_str(), alias.as_deref())),
            _ => None,
        })
    }

    /// Hierarchical signature for diagnostics, e.g. `Foo.kt$Outer$bar`.
    pub fn signature(&self, id: NodeId) -> String {
        let file = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string());

        let mut parts: Vec<String> = self
            .self_and_ancestors(id)
            .filter_map(|ancestor| {
                let node = self.node(ancestor);
                node.kind.name().map(String::from)
            })
            .collect();
        parts.reverse();

        if parts.is_empty() {
            let node = self.node(id);
            format!("{}${}@{}", file, node.kind.label(), node.span.start)
        } else {
            format!("{}${}", file, parts.join("$"))
        }
    }
}

/// Incremental [`Ast`] construction for front ends and tests.
///
/// `open` pushes a container node that subsequent nodes become children of;
/// `close` pops it. `leaf` adds a childless node at the current level.
pub struct AstBuilder {
    path: PathBuf,
    nodes: Vec<Node>,
    stack: Vec<NodeId>,
}

impl AstBuilder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let root = Node {
            parent: None,
            kind: NodeKind::File,
            span: Span::at(1, 1),
            annotations: Vec::new(),
            children: Vec::new(),
        };
        Self {
            path: path.into(),
            nodes: vec![root],
            stack: vec![NodeId(0)],
        }
    }

    /// Attach a file-level annotation to the root.
    pub fn annotate_file(&mut self, annotation: Annotation) -> &mut Self {
        self.nodes[0].annotations.push(annotation);
        self
    }

    pub fn open(&mut self, kind: NodeKind, span: Span) -> NodeId {
        self.open_annotated(kind, span, Vec::new())
    }

    pub fn open_annotated(
        &mut self,
        kind: NodeKind,
        span: Span,
        annotations: Vec<Annotation>,
    ) -> NodeId {
        let id = self.push(kind, span, annotations);
        self.stack.push(id);
        id
    }

    /// Close the most recently opened node. Closing past the file root is a
    /// no-op.
    pub fn close(&mut self) -> &mut Self {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
        self
    }

    pub fn leaf(&mut self, kind: NodeKind, span: Span) -> NodeId {
        self.push(kind, span, Vec::new())
    }

    pub fn leaf_annotated(
        &mut self,
        kind: NodeKind,
        span: Span,
        annotations: Vec<Annotation>,
    ) -> NodeId {
        self.push(kind, span, annotations)
    }

    pub fn build(self) -> Ast {
        Ast {
            path: self.path,
            nodes: self.nodes,
        }
    }

    fn push(&mut self, kind: NodeKind, span: Span, annotations: Vec<Annotation>) -> NodeId {
        let parent = *self.stack.last().unwrap_or(&NodeId(0));
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            parent: Some(parent),
            kind,
            span,
            annotations,
            children: Vec::new(),
        });
        self.nodes[parent.index()].children.push(id);
        id
    }
}

#[cfg(test)]
#[path = "ast_tests.rs"]
mod tests;
