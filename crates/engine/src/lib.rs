pub mod analyzer;
pub mod ast;
pub mod config;
pub mod engine;
pub mod error;
pub mod extensions;
pub mod issue;
pub mod pattern;
pub mod profiling;
pub mod result;
pub mod rule;
pub mod rules;
pub mod ruleset;
pub mod source;
pub mod suppress;

pub use analyzer::Analyzer;
pub use ast::{Annotation, Ast, AstBuilder, NodeId, NodeKind, SourceLocation, Span, TextRange};
pub use config::{Config, ConfigProperty, ValueWithReason, ValuesWithReason};
pub use engine::{Engine, EngineOptions};
pub use error::{Error, Result};
pub use extensions::{
    ConfigValidator, ConsoleReport, FileProcessListener, OutputReport, ReportingExtension,
};
pub use issue::{
    Entity, Finding, Issue, Location, Notification, NotificationLevel, ProjectMetric,
    RuleInstance, Severity,
};
pub use result::AnalysisResult;
pub use rule::{Rule, RuleContext, RuleName, RuleSetId};
pub use ruleset::{RuleDescriptor, RuleEntry, RuleSet, RuleSetProvider, RuleSetRegistry};
pub use source::{AnalysisMode, Parser, SemanticBinding, SourceCode};

#[cfg(test)]
pub mod test_utils;
