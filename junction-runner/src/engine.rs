// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The interface to the test engine that discovers and executes test plans.
//!
//! The engine itself is a black box: junction only needs it to produce a [`TestPlan`] and to
//! drive an [`ExecutionListener`] while it runs.

use crate::{
    errors::EngineError,
    failure::ThrownError,
    plan::{PlanNode, TestPlan},
};

/// A test engine.
pub trait TestEngine {
    /// The request describing what to discover and run.
    type Request;

    /// Discovers the test plan for `request`.
    fn discover(&self, request: &Self::Request) -> Result<TestPlan, EngineError>;

    /// Executes `request`, reporting progress to `listener`.
    ///
    /// Implementations call [`ExecutionListener::plan_execution_started`] first and
    /// [`ExecutionListener::plan_execution_finished`] exactly once at the end. In between,
    /// every node that is reported as started is eventually reported as finished.
    fn execute(
        &self,
        request: &Self::Request,
        listener: &mut dyn ExecutionListener,
    ) -> Result<(), EngineError>;
}

/// Receives execution events from a [`TestEngine`].
///
/// All methods default to doing nothing.
pub trait ExecutionListener {
    /// Execution of `plan` is about to start.
    fn plan_execution_started(&mut self, plan: &TestPlan) {
        let _ = plan;
    }

    /// Execution of `plan` has finished.
    fn plan_execution_finished(&mut self, plan: &TestPlan) {
        let _ = plan;
    }

    /// A node was added to the plan while it was executing.
    fn dynamic_test_registered(&mut self, node: &PlanNode) {
        let _ = node;
    }

    /// A node was skipped without being executed.
    fn execution_skipped(&mut self, node: &PlanNode, reason: &str) {
        let _ = (node, reason);
    }

    /// A node started executing.
    fn execution_started(&mut self, node: &PlanNode) {
        let _ = node;
    }

    /// A node finished executing.
    fn execution_finished(&mut self, node: &PlanNode, result: &TestExecutionResult) {
        let _ = (node, result);
    }
}

/// The outcome of executing a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExecutionStatus {
    /// The node executed successfully.
    Successful,

    /// The node was aborted, typically because an assumption did not hold.
    Aborted,

    /// The node failed.
    Failed,
}

/// The result of executing a node: a status and, usually for failures, the error that was
/// thrown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestExecutionResult {
    status: ExecutionStatus,
    error: Option<ThrownError>,
}

impl TestExecutionResult {
    /// A successful result.
    pub fn successful() -> Self {
        Self {
            status: ExecutionStatus::Successful,
            error: None,
        }
    }

    /// An aborted result.
    pub fn aborted(error: Option<ThrownError>) -> Self {
        Self {
            status: ExecutionStatus::Aborted,
            error,
        }
    }

    /// A failed result.
    pub fn failed(error: Option<ThrownError>) -> Self {
        Self {
            status: ExecutionStatus::Failed,
            error,
        }
    }

    /// Returns the status of the result.
    #[inline]
    pub fn status(&self) -> ExecutionStatus {
        self.status
    }

    /// Returns true if the node executed successfully.
    #[inline]
    pub fn is_successful(&self) -> bool {
        self.status == ExecutionStatus::Successful
    }

    /// Returns the error that was thrown, if any.
    #[inline]
    pub fn error(&self) -> Option<&ThrownError> {
        self.error.as_ref()
    }
}
