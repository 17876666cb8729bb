// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Annotation-driven pluggable suppressors.
//!
//! `ignoreAnnotated` drops findings on elements annotated with any matching
//! annotation; `onlyAnnotated` inverts that and drops findings on elements
//! *not* annotated. Patterns are [`SimpleGlob`]s evaluated against every
//! name the annotation could resolve to.

use crate::ast::{Annotation, Ast, NodeId};
use crate::config::Config;
use crate::error::Result;
use crate::issue::Finding;
use crate::pattern::SimpleGlob;
use crate::source::SemanticBinding;

use super::Suppressor;

const IGNORE_ANNOTATED: &str = "ignoreAnnotated";
const ONLY_ANNOTATED: &str = "onlyAnnotated";

/// Build the zero, one or two annotation suppressors a config asks for.
pub(super) fn annotation_suppressors<'a>(
    config: &Config,
    ast: &'a Ast,
    binding: Option<&'a dyn SemanticBinding>,
) -> Result<Vec<Box<dyn Suppressor + 'a>>> {
    let mut suppressors: Vec<Box<dyn Suppressor + 'a>> = Vec::new();

    let ignored: Vec<String> = config.value_or_default(IGNORE_ANNOTATED, Vec::new())?;
    if !ignored.is_empty() {
        suppressors.push(Box::new(AnnotationSuppressor {
            excluder: AnnotationExcluder::new(ast, &ignored, binding)?,
            invert: false,
        }));
    }

    let required: Vec<String> = config.value_or_default(ONLY_ANNOTATED, Vec::new())?;
    if !required.is_empty() {
        suppressors.push(Box::new(AnnotationSuppressor {
            excluder: AnnotationExcluder::new(ast, &required, binding)?,
            invert: true,
        }));
    }

    Ok(suppressors)
}

struct AnnotationSuppressor<'a> {
    excluder: AnnotationExcluder<'a>,
    /// `false`: suppress when annotated. `true`: suppress unless annotated.
    invert: bool,
}

impl Suppressor for AnnotationSuppressor<'_> {
    fn should_suppress(&self, finding: &Finding, ast: &Ast) -> bool {
        let Some(node) = finding.entity.node else {
            // No tree element to inspect. Fail open toward reporting.
            return false;
        };
        let annotated = ast
            .self_and_ancestors(node)
            .any(|scope| self.excluder.should_exclude(ast.node(scope).annotations.as_slice(), scope));
        annotated != self.invert
    }
}

/// Matches annotations against a set of name patterns.
///
/// A pattern may be a bare simple name, a fully qualified name, or a glob.
/// Every candidate name the annotation could refer to is tried: the simple
/// name, the name as written, an import-resolved qualified name, and the
/// semantically resolved name when binding is available. Names that cannot
/// be resolved contribute no candidates, so an ambiguous annotation is
/// never silently matched.
pub struct AnnotationExcluder<'a> {
    ast: &'a Ast,
    binding: Option<&'a dyn SemanticBinding>,
    globs: Vec<SimpleGlob>,
}

impl<'a> AnnotationExcluder<'a> {
    pub fn new(
        ast: &'a Ast,
        patterns: &[String],
        binding: Option<&'a dyn SemanticBinding>,
    ) -> Result<Self> {
        let globs = patterns
            .iter()
            .map(|p| SimpleGlob::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self {
            ast,
            binding,
            globs,
        })
    }

    /// Whether any of `annotations` (attached to `owner`) matches a pattern.
    pub fn should_exclude(&self, annotations: &[Annotation], owner: NodeId) -> bool {
        annotations
            .iter()
            .any(|annotation| self.matches(annotation, owner))
    }

    fn matches(&self, annotation: &Annotation, owner: NodeId) -> bool {
        let candidates = self.candidate_names(annotation, owner);
        self.globs.iter().any(|glob| {
            candidates.iter().any(|candidate| {
                glob.matches(candidate)
                    || candidate
                        .rsplit('.')
                        .next()
                        .is_some_and(|simple| glob.matches(simple))
            })
        })
    }

    /// All names `annotation` could stand for, best effort.
    fn candidate_names(&self, annotation: &Annotation, owner: NodeId) -> Vec<String> {
        let written = annotation.name.as_str();
        let simple = annotation.simple_name();

        let mut candidates = vec![simple.to_string()];
        if written != simple {
            candidates.push(written.to_string());
        }

        if let Some(binding) = self.binding {
            if let Some(resolved) = binding.resolve_annotation(self.ast, owner, annotation) {
                push_unique(&mut candidates, resolved);
                return candidates;
            }
        }

        // Light mode: resolve through the file's imports textually.
        for (path, alias) in self.ast.imports() {
            match alias {
                Some(alias) if alias == written => {
                    push_unique(&mut candidates, path.to_string());
                }
                None if path.ends_with(&format!(".{simple}")) && written == simple => {
                    push_unique(&mut candidates, path.to_string());
                }
                _ => {}
            }
        }
        candidates
    }
}

fn push_unique(candidates: &mut Vec<String>, candidate: String) {
    if !candidates.contains(&candidate) {
        candidates.push(candidate);
    }
}

#[cfg(test)]
#[path = "annotation_tests.rs"]
mod tests;
