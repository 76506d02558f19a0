// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::fixtures::*;
use color_eyre::eyre::{Result, ensure};
use indoc::indoc;
use junction_protocol::{FailedComparison, Notification, StatusKind};
use junction_runner::{
    config::BridgeConfig,
    engine::TestExecutionResult,
    errors::DisplayErrorChain,
    failure::ThrownError,
    id_map::TestIdMap,
    plan::PlanNode,
    reporter::EventRecorder,
    session::PlanSession,
};
use pretty_assertions::assert_eq;

#[test]
fn announce_calculator_tree() -> Result<()> {
    test_init();

    let engine = ScriptedEngine::new(calculator_plan());
    let config = BridgeConfig::default();
    let session = PlanSession::discover(&engine, (), &config)?;
    assert_eq!(session.count_test_cases(), 5);

    let mut ids = TestIdMap::new(config.first_test_id());
    let mut recorder = EventRecorder::new();
    let announced = session.send_tree(&mut ids, &mut recorder);
    ensure!(announced == 9, "announced {announced} entries");

    assert_eq!(
        summarize(&recorder),
        vec![
            "tree 2 com.example.CalculatorTest <- 1",
            "tree 3 add(com.example.CalculatorTest) <- 2",
            "tree 4 divide(com.example.CalculatorTest) <- 2",
            "tree 5 power(com.example.CalculatorTest):int <- 2",
            "tree 6 dynamicTests(com.example.CalculatorTest) <- 2",
            "tree 7 com.example.CalculatorTest$Edge <- 2",
            "tree 8 overflow(com.example.CalculatorTest$Edge) <- 7",
            "tree 9 com.example.BrokenSetupTest <- 1",
            "tree 10 never(com.example.BrokenSetupTest) <- 9",
        ]
    );

    let entries: Vec<_> = recorder
        .notifications()
        .iter()
        .filter_map(|notification| match notification {
            Notification::TreeEntry(entry) => Some(entry),
            _ => None,
        })
        .collect();
    let calculator = entries[0];
    assert_eq!(calculator.display_name, "CalculatorTest");
    assert_eq!(calculator.child_count, 5);
    assert!(calculator.is_container);

    let factory = entries[4];
    assert!(factory.is_dynamic_factory);
    assert_eq!(factory.child_count, 0);

    let power = entries[3];
    assert_eq!(power.display_name, "power(int)");
    assert_eq!(power.child_count, 1);
    assert!(!power.is_container);

    Ok(())
}

#[test]
fn run_calculator_plan() -> Result<()> {
    test_init();

    let pruned = calculator_id().append("nested-class", "Pruned");
    let stale = PlanNode::test(pruned.append("method", "gone()"), "gone()").with_parent(pruned);

    let engine = ScriptedEngine::new(calculator_plan())
        .start(&calculator_id())
        .run_test(&calculator_method("add()"), TestExecutionResult::successful())
        .run_test(
            &calculator_method("divide()"),
            TestExecutionResult::failed(Some(comparison_failure("5", "6"))),
        )
        .run_test(
            &calculator_method("power(int)"),
            TestExecutionResult::aborted(Some(ThrownError::new(
                "org.opentest4j.TestAbortedException",
                Some("Assumption failed: not on CI".to_owned()),
            ))),
        )
        .start(&factory_id())
        .register(dynamic_test(&factory_id(), 1, "one plus one"))
        .run_test(
            dynamic_test(&factory_id(), 1, "").unique_id(),
            TestExecutionResult::successful(),
        )
        .register(dynamic_test(&factory_id(), 2, "two divided by zero"))
        .run_test(
            dynamic_test(&factory_id(), 2, "").unique_id(),
            TestExecutionResult::failed(Some(ThrownError::new(
                "java.lang.ArithmeticException",
                Some("/ by zero".to_owned()),
            ))),
        )
        .finish(&factory_id(), TestExecutionResult::successful())
        .skip(&edge_id(), "Edge cases are disabled")
        .finish(&calculator_id(), TestExecutionResult::successful())
        .step(Step::Started(stale))
        .start(&broken_id())
        .finish(
            &broken_id(),
            TestExecutionResult::failed(Some(ThrownError::new(
                "java.lang.IllegalStateException",
                Some("setup failed".to_owned()),
            ))),
        );

    let config = BridgeConfig::default();
    let session = PlanSession::discover(&engine, (), &config)?;
    let mut ids = TestIdMap::new(config.first_test_id());
    let mut recorder = EventRecorder::new();
    session.send_tree(&mut ids, &mut recorder);
    recorder.clear();

    session.run(&mut ids, &mut recorder)?;
    assert_eq!(
        summarize(&recorder),
        vec![
            "started add(com.example.CalculatorTest)",
            "ended add(com.example.CalculatorTest)",
            "started divide(com.example.CalculatorTest)",
            "failed divide(com.example.CalculatorTest)",
            "ended divide(com.example.CalculatorTest)",
            "started power(com.example.CalculatorTest):int",
            "failed @AssumptionFailure: power(com.example.CalculatorTest):int",
            "ended power(com.example.CalculatorTest):int",
            "tree 11 one plus one <- 6",
            "started one plus one",
            "ended one plus one",
            "tree 12 two divided by zero <- 6",
            "started two divided by zero",
            "error two divided by zero",
            "ended two divided by zero",
            "started @Ignore: overflow(com.example.CalculatorTest$Edge)",
            "ended @Ignore: overflow(com.example.CalculatorTest$Edge)",
            "error com.example.BrokenSetupTest",
        ]
    );

    let failures: Vec<_> = recorder
        .notifications()
        .iter()
        .filter_map(|notification| match notification {
            Notification::TestFailed(failure) => Some(failure),
            _ => None,
        })
        .collect();
    assert_eq!(failures[0].comparison, Some(FailedComparison::new("5", "6")));
    assert_eq!(
        failures[0].trace,
        "AssertionFailedError: expected: <5> but was: <6>\n"
    );
    assert_eq!(failures[1].status, StatusKind::Failed);
    assert_eq!(failures[1].comparison, None);
    assert_eq!(
        failures[3].trace,
        "java.lang.IllegalStateException: setup failed\n"
    );

    Ok(())
}

#[test]
fn notifications_serialize_as_json_lines() -> Result<()> {
    test_init();

    let engine = ScriptedEngine::new(calculator_plan())
        .start(&calculator_id())
        .register(dynamic_test(&factory_id(), 1, "one plus one"))
        .run_test(
            &calculator_method("divide()"),
            TestExecutionResult::failed(Some(comparison_failure("5", "6"))),
        )
        .finish(&calculator_id(), TestExecutionResult::successful());

    let config = BridgeConfig::default();
    let session = PlanSession::discover(&engine, (), &config)?;
    let mut ids = TestIdMap::new(config.first_test_id());
    let mut recorder = EventRecorder::new();
    session.send_tree(&mut ids, &mut recorder);
    recorder.clear();
    session.run(&mut ids, &mut recorder)?;

    let mut lines = String::new();
    for notification in recorder.notifications() {
        lines.push_str(&serde_json::to_string(notification)?);
        lines.push('\n');
    }
    assert_eq!(
        lines,
        indoc! {r#"
            {"type":"tree-entry","id":11,"name":"one plus one","display-name":"one plus one","is-container":false,"child-count":1,"is-dynamic-factory":false,"is-dynamic":true,"parent-id":"6"}
            {"type":"test-started","name":"divide(com.example.CalculatorTest)"}
            {"type":"test-failed","name":"divide(com.example.CalculatorTest)","status":"failed","trace":"AssertionFailedError: expected: <5> but was: <6>\n","comparison":{"expected":"5","actual":"6"}}
            {"type":"test-ended","name":"divide(com.example.CalculatorTest)"}
        "#}
    );

    let parsed = lines
        .lines()
        .map(serde_json::from_str::<Notification>)
        .collect::<Result<Vec<_>, _>>()?;
    assert_eq!(parsed, recorder.notifications());

    Ok(())
}

#[test]
fn engine_crash_keeps_earlier_notifications() -> Result<()> {
    test_init();

    let engine = ScriptedEngine::new(calculator_plan())
        .start(&calculator_id())
        .run_test(&calculator_method("add()"), TestExecutionResult::successful())
        .start(&calculator_method("divide()"))
        .crash_with("engine crashed");

    let config = BridgeConfig::default();
    let session = PlanSession::discover(&engine, (), &config)?;
    let mut ids = TestIdMap::new(config.first_test_id());
    let mut recorder = EventRecorder::new();
    session.send_tree(&mut ids, &mut recorder);
    recorder.clear();

    let error = session.run(&mut ids, &mut recorder).expect_err("engine crashes");
    assert_eq!(
        DisplayErrorChain::new(&error).to_string(),
        "failed to execute test plan\n  caused by: engine crashed"
    );
    assert_eq!(
        summarize(&recorder),
        vec![
            "started add(com.example.CalculatorTest)",
            "ended add(com.example.CalculatorTest)",
            "started divide(com.example.CalculatorTest)",
        ]
    );

    Ok(())
}
