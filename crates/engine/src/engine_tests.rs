// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end engine tests.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::path::PathBuf;

use super::*;
use crate::ast::{Annotation, AstBuilder, NodeId, NodeKind};
use crate::issue::{Issue, NotificationLevel};
use crate::rule::{Rule, RuleContext, RuleSetId};
use crate::rules::StyleRuleSetProvider;
use crate::ruleset::{RuleEntry, RuleSet, RuleSetProvider, RuleSetRegistry};
use crate::test_utils::{MapParser, sources_for, span, yaml_config};

/// Reports one finding per call node.
struct CallReporter;

impl Rule for CallReporter {
    fn description(&self) -> &str {
        "reports calls"
    }

    fn visit_call(&mut self, ctx: &mut RuleContext<'_>, node: NodeId) -> crate::error::Result<()> {
        ctx.report_node(node, "call reported")
    }
}

struct MyRuleProvider;

impl RuleSetProvider for MyRuleProvider {
    fn instance(&self) -> crate::error::Result<RuleSet> {
        RuleSet::new(
            RuleSetId::new("custom")?,
            vec![
                RuleEntry::new("MyRule", |_| Ok(Box::new(CallReporter)))?
                    .active_by_default(true),
            ],
        )
    }
}

fn engine_with_style(config: &str, files: Vec<Ast>) -> Engine {
    Engine::new(
        RuleSetRegistry::new().with_provider(Box::new(StyleRuleSetProvider)),
        yaml_config(config),
        Box::new(MapParser::new(files)),
    )
}

fn engine_with_my_rule(config: &str, files: Vec<Ast>) -> Engine {
    Engine::new(
        RuleSetRegistry::new().with_provider(Box::new(MyRuleProvider)),
        yaml_config(config),
        Box::new(MapParser::new(files)),
    )
}

#[test]
fn forbidden_receiver_calls_are_reported_with_their_locations() {
    // Two qualifying calls and one receiver-less `gc()` that must not match.
    let mut builder = AstBuilder::new("src/a.kt");
    builder.open(NodeKind::function("main"), span(1));
    builder.leaf(NodeKind::call("gc", Some("System")), span(3));
    builder.leaf(NodeKind::call("gc", Some("Runtime.getRuntime()")), span(4));
    builder.leaf(NodeKind::call("gc", None), span(5));
    builder.close();
    let ast = builder.build();

    let engine = engine_with_style(
        r"
style:
  ForbiddenCall:
    active: true
    methods:
      - 'System.gc'
      - value: 'Runtime.getRuntime().gc'
        reason: 'Forces a full collection.'
",
        vec![ast],
    );
    let result = engine.run(&sources_for(&["src/a.kt"])).unwrap();

    assert_eq!(result.issues().len(), 2);
    let lines: Vec<u32> = result
        .issues()
        .iter()
        .map(|i| i.location().source.line)
        .collect();
    assert_eq!(lines, [3, 4]);
    assert!(result.issues()[0].message.contains("System.gc"));
    assert!(
        result.issues()[1]
            .message
            .contains("Forces a full collection.")
    );
}

#[test]
fn file_level_suppress_annotation_removes_all_issues_of_the_rule() {
    let mut builder = AstBuilder::new("src/a.kt");
    builder.annotate_file(Annotation::new("Suppress", ["MyRule"]));
    builder.open(NodeKind::function("main"), span(2));
    builder.leaf(NodeKind::call("gc", Some("System")), span(3));
    builder.close();
    let ast = builder.build();

    let engine = engine_with_my_rule("{}", vec![ast]);
    let result = engine.run(&sources_for(&["src/a.kt"])).unwrap();

    assert!(result.issues().is_empty());
    // The rule was still a candidate and shows up in the snapshot.
    assert!(result.rules().iter().any(|r| r.id == "MyRule"));
}

#[test]
fn ignore_annotated_drops_only_the_annotated_sibling() {
    let mut builder = AstBuilder::new("src/a.kt");
    builder.open_annotated(
        NodeKind::function("draw"),
        span(1),
        vec![Annotation::new("Composable", Vec::<String>::new())],
    );
    builder.leaf(NodeKind::call("gc", Some("System")), span(2));
    builder.close();
    builder.open(NodeKind::function("render"), span(5));
    builder.leaf(NodeKind::call("gc", Some("System")), span(6));
    builder.close();
    let ast = builder.build();

    let engine = engine_with_my_rule(
        "custom:\n  MyRule:\n    ignoreAnnotated: ['Composable']\n",
        vec![ast],
    );
    let result = engine.run(&sources_for(&["src/a.kt"])).unwrap();

    assert_eq!(result.issues().len(), 1);
    assert_eq!(result.issues()[0].location().source.line, 6);
}

#[test]
fn parse_failures_degrade_to_notifications() {
    let good = {
        let mut builder = AstBuilder::new("src/good.kt");
        builder.open(NodeKind::function("main"), span(1));
        builder.leaf(NodeKind::call("gc", Some("System")), span(2));
        builder.close();
        builder.build()
    };

    let engine = engine_with_my_rule("{}", vec![good]);
    let result = engine
        .run(&sources_for(&["src/good.kt", "src/broken.kt"]))
        .unwrap();

    // The good file still contributes its issue.
    assert_eq!(result.issues().len(), 1);
    let errors: Vec<_> = result
        .notifications()
        .iter()
        .filter(|n| n.level == NotificationLevel::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("broken.kt"));
    assert!(result.rules().iter().any(|r| r.id == "MyRule"));
}

#[test]
fn issues_across_files_come_out_sorted_by_path_and_position() {
    let file = |path: &str, lines: &[u32]| {
        let mut builder = AstBuilder::new(path);
        builder.open(NodeKind::function("main"), span(1));
        for &line in lines {
            builder.leaf(NodeKind::call("gc", Some("System")), span(line));
        }
        builder.close();
        builder.build()
    };

    let engine = engine_with_my_rule(
        "{}",
        vec![file("src/b.kt", &[4, 2]), file("src/a.kt", &[9])],
    );
    // Source order deliberately differs from path order.
    let result = engine
        .run(&sources_for(&["src/b.kt", "src/a.kt"]))
        .unwrap();

    let positions: Vec<(PathBuf, u32)> = result
        .issues()
        .iter()
        .map(|i| (i.location().path.clone(), i.location().source.line))
        .collect();
    assert_eq!(
        positions,
        [
            (PathBuf::from("src/a.kt"), 9),
            (PathBuf::from("src/b.kt"), 2),
            (PathBuf::from("src/b.kt"), 4),
        ]
    );
}

#[test]
fn profiling_forces_sequential_and_publishes_timings() {
    let mut builder = AstBuilder::new("src/a.kt");
    builder.open(NodeKind::function("main"), span(1));
    builder.leaf(NodeKind::call("gc", Some("System")), span(2));
    builder.close();
    let ast = builder.build();

    let engine = engine_with_my_rule("{}", vec![ast]).with_options(EngineOptions {
        mode: AnalysisMode::Light,
        parallel: true,
        profile: true,
    });
    let result = engine.run(&sources_for(&["src/a.kt"])).unwrap();

    assert!(
        result
            .notifications()
            .iter()
            .any(|n| n.message.contains("profiling forces sequential execution"))
    );
    assert!(
        result
            .metrics()
            .iter()
            .any(|m| m.kind == "parallel overridden for profiling")
    );
    assert!(result.user_data(crate::profiling::RULE_TIMINGS_KEY).is_some());
}

#[test]
fn parallel_and_sequential_engine_runs_agree() {
    let file = |path: &str, calls: u32| {
        let mut builder = AstBuilder::new(path);
        builder.open(NodeKind::function("main"), span(1));
        for line in 0..calls {
            builder.leaf(NodeKind::call("gc", Some("System")), span(2 + line));
        }
        builder.close();
        builder.build()
    };
    let files: Vec<Ast> = (0..6)
        .map(|i| file(&format!("src/f{i}.kt"), i % 3))
        .collect();
    let paths: Vec<String> = (0..6).map(|i| format!("src/f{i}.kt")).collect();
    let path_refs: Vec<&str> = paths.iter().map(String::as_str).collect();

    let sequential = engine_with_my_rule("{}", files.clone())
        .run(&sources_for(&path_refs))
        .unwrap();
    let parallel = engine_with_my_rule("{}", files)
        .with_options(EngineOptions {
            mode: AnalysisMode::Light,
            parallel: true,
            profile: false,
        })
        .run(&sources_for(&path_refs))
        .unwrap();

    assert_eq!(sequential.issues(), parallel.issues());
}

#[test]
fn registered_validators_contribute_notifications() {
    struct AlwaysWarn;
    impl crate::extensions::ConfigValidator for AlwaysWarn {
        fn id(&self) -> &str {
            "always-warn"
        }
        fn validate(&self, _config: &Config) -> Vec<Notification> {
            vec![Notification::warning("suspicious config")]
        }
    }

    let engine = engine_with_my_rule("{}", Vec::new()).with_validator(Box::new(AlwaysWarn));
    assert_eq!(engine.validate_config().len(), 1);

    let result = engine.run(&[]).unwrap();
    assert!(
        result
            .notifications()
            .iter()
            .any(|n| n.message == "suspicious config")
    );
}

#[test]
fn reporting_extensions_transform_the_final_issue_list() {
    struct DropEverything;
    impl crate::extensions::ReportingExtension for DropEverything {
        fn id(&self) -> &str {
            "drop-everything"
        }
        fn transform_issues(&self, _issues: Vec<Issue>) -> Vec<Issue> {
            Vec::new()
        }
    }

    let mut builder = AstBuilder::new("src/a.kt");
    builder.open(NodeKind::function("main"), span(1));
    builder.leaf(NodeKind::call("gc", Some("System")), span(2));
    builder.close();
    let ast = builder.build();

    let engine =
        engine_with_my_rule("{}", vec![ast]).with_extension(Box::new(DropEverything));
    let result = engine.run(&sources_for(&["src/a.kt"])).unwrap();
    assert!(result.issues().is_empty());
}

#[test]
fn structural_config_errors_fail_the_run() {
    let engine = engine_with_my_rule("custom:\n  MyRule:\n    severity: 'fatal'\n", Vec::new());
    assert!(engine.run(&[]).is_err());
}
