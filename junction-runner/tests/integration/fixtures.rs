// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use junction_protocol::Notification;
use junction_runner::{
    engine::{ExecutionListener, TestEngine, TestExecutionResult},
    errors::EngineError,
    failure::{ThrownError, ValueWrapper},
    plan::{PlanNode, TestPlan, TestSource, UniqueId},
    reporter::EventRecorder,
};
use std::sync::Once;

pub(crate) const CALCULATOR: &str = "com.example.CalculatorTest";
pub(crate) const BROKEN: &str = "com.example.BrokenSetupTest";

pub(crate) fn test_init() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = color_eyre::install();
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .try_init();
    });
}

pub(crate) fn engine_id() -> UniqueId {
    UniqueId::for_engine("junit-jupiter")
}

pub(crate) fn calculator_id() -> UniqueId {
    engine_id().append("class", CALCULATOR)
}

pub(crate) fn calculator_method(method: &str) -> UniqueId {
    calculator_id().append("method", method)
}

pub(crate) fn factory_id() -> UniqueId {
    calculator_id().append("test-factory", "dynamicTests()")
}

pub(crate) fn edge_id() -> UniqueId {
    calculator_id().append("nested-class", "Edge")
}

pub(crate) fn broken_id() -> UniqueId {
    engine_id().append("class", BROKEN)
}

fn method_node(parent: UniqueId, class_name: &str, method: &str, params: &str) -> PlanNode {
    let display_name = format!("{method}({params})");
    PlanNode::test(parent.append("method", &display_name), display_name.as_str())
        .with_parent(parent)
        .with_source(TestSource::method(class_name, method, params))
}

/// A plan shaped like a typical class-based discovery:
///
/// ```text
/// [engine:junit-jupiter]                          id 1
/// ├── CalculatorTest                              id 2
/// │   ├── add()                                   id 3
/// │   ├── divide()                                id 4
/// │   ├── power(int)                              id 5
/// │   ├── dynamicTests()   (test factory)         id 6
/// │   └── Edge                                    id 7
/// │       └── overflow()                          id 8
/// └── BrokenSetupTest                             id 9
///     └── never()                                 id 10
/// ```
pub(crate) fn calculator_plan() -> TestPlan {
    let edge_class = format!("{CALCULATOR}$Edge");
    TestPlan::from_nodes([
        PlanNode::container(engine_id(), "JUnit Jupiter"),
        PlanNode::container(calculator_id(), "CalculatorTest")
            .with_parent(engine_id())
            .with_source(TestSource::class(CALCULATOR)),
        method_node(calculator_id(), CALCULATOR, "add", ""),
        method_node(calculator_id(), CALCULATOR, "divide", ""),
        method_node(calculator_id(), CALCULATOR, "power", "int"),
        PlanNode::container(factory_id(), "dynamicTests()")
            .with_parent(calculator_id())
            .with_source(TestSource::method(CALCULATOR, "dynamicTests", "")),
        PlanNode::container(edge_id(), "Edge cases")
            .with_parent(calculator_id())
            .with_source(TestSource::class(edge_class.as_str())),
        method_node(edge_id(), &edge_class, "overflow", ""),
        PlanNode::container(broken_id(), "BrokenSetupTest")
            .with_parent(engine_id())
            .with_source(TestSource::class(BROKEN)),
        method_node(broken_id(), BROKEN, "never", ""),
    ])
    .expect("calculator plan is well-formed")
}

pub(crate) fn dynamic_test(parent: &UniqueId, index: usize, display_name: &str) -> PlanNode {
    PlanNode::test(parent.append("dynamic-test", &format!("#{index}")), display_name)
        .with_parent(parent.clone())
}

pub(crate) fn comparison_failure(expected: &str, actual: &str) -> ThrownError {
    ThrownError::assertion_failed(
        format!("expected: <{expected}> but was: <{actual}>"),
        Some(ValueWrapper::new(expected)),
        Some(ValueWrapper::new(actual)),
    )
}

/// One event replayed by a [`ScriptedEngine`].
#[derive(Clone, Debug)]
pub(crate) enum Step {
    Started(PlanNode),
    Finished(PlanNode, TestExecutionResult),
    Skipped(PlanNode, &'static str),
    Registered(PlanNode),
}

/// An engine that discovers a fixed plan and replays a fixed sequence of events.
#[derive(Clone, Debug)]
pub(crate) struct ScriptedEngine {
    plan: TestPlan,
    known: TestPlan,
    script: Vec<Step>,
    crash: Option<&'static str>,
}

impl ScriptedEngine {
    pub(crate) fn new(plan: TestPlan) -> Self {
        Self {
            known: plan.clone(),
            plan,
            script: Vec::new(),
            crash: None,
        }
    }

    fn node(&self, id: &UniqueId) -> PlanNode {
        self.known
            .get(id)
            .unwrap_or_else(|| panic!("node {id} is not part of the script"))
            .clone()
    }

    pub(crate) fn step(mut self, step: Step) -> Self {
        self.script.push(step);
        self
    }

    pub(crate) fn start(self, id: &UniqueId) -> Self {
        let node = self.node(id);
        self.step(Step::Started(node))
    }

    pub(crate) fn finish(self, id: &UniqueId, result: TestExecutionResult) -> Self {
        let node = self.node(id);
        self.step(Step::Finished(node, result))
    }

    pub(crate) fn run_test(self, id: &UniqueId, result: TestExecutionResult) -> Self {
        self.start(id).finish(id, result)
    }

    pub(crate) fn skip(self, id: &UniqueId, reason: &'static str) -> Self {
        let node = self.node(id);
        self.step(Step::Skipped(node, reason))
    }

    pub(crate) fn register(mut self, node: PlanNode) -> Self {
        self.known.add(node.clone()).expect("registered node is valid");
        self.step(Step::Registered(node))
    }

    /// Makes execution fail after the script, before plan execution is reported as finished.
    pub(crate) fn crash_with(mut self, message: &'static str) -> Self {
        self.crash = Some(message);
        self
    }
}

impl TestEngine for ScriptedEngine {
    type Request = ();

    fn discover(&self, _request: &()) -> Result<TestPlan, EngineError> {
        Ok(self.plan.clone())
    }

    fn execute(
        &self,
        _request: &(),
        listener: &mut dyn ExecutionListener,
    ) -> Result<(), EngineError> {
        listener.plan_execution_started(&self.plan);
        for step in &self.script {
            match step {
                Step::Started(node) => listener.execution_started(node),
                Step::Finished(node, result) => listener.execution_finished(node, result),
                Step::Skipped(node, reason) => listener.execution_skipped(node, reason),
                Step::Registered(node) => listener.dynamic_test_registered(node),
            }
        }

        if let Some(message) = self.crash {
            return Err(message.into());
        }
        listener.plan_execution_finished(&self.plan);
        Ok(())
    }
}

/// Summarizes recorded notifications as one line each.
pub(crate) fn summarize(recorder: &EventRecorder) -> Vec<String> {
    recorder
        .notifications()
        .iter()
        .map(|notification| match notification {
            Notification::TreeEntry(entry) => {
                format!("tree {} {} <- {}", entry.id, entry.name, entry.parent_id)
            }
            Notification::TestStarted { name } => format!("started {name}"),
            Notification::TestEnded { name } => format!("ended {name}"),
            Notification::TestFailed(failure) => {
                format!("{} {}", failure.status.as_str(), failure.name)
            }
        })
        .collect()
}
