// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Translation of execution events into legacy protocol notifications.

use crate::{
    announce::resolve_parent_id,
    config::BridgeConfig,
    engine::{ExecutionListener, ExecutionStatus, TestExecutionResult},
    failure::FailureDetails,
    id_map::TestIdMap,
    identifier::{DisplayMode, ProtocolIdentifier},
    plan::{PlanNode, TestPlan},
    reporter::{FailureRecord, TestRunListener, TreeEntry, TreeVisitor},
};
use debug_ignore::DebugIgnore;
use derive_where::derive_where;
use tracing::debug;

/// Whether a plan is currently executing.
#[derive(Clone, Debug, Default)]
enum TranslatorState {
    #[default]
    Inactive,
    Active {
        /// The plan as discovered, plus every node registered dynamically since.
        plan: TestPlan,
    },
}

/// Listens to a [`TestEngine`](crate::engine::TestEngine) and reports to the legacy protocol.
///
/// The translator is inactive until the engine reports that plan execution started, and goes
/// back to being inactive once it finishes. While active it keeps its own copy of the live
/// plan, which it needs to expand skipped containers and to resolve parents of dynamically
/// registered tests.
///
/// Events for nodes without a parent, or whose parent is not part of the live plan, are
/// dropped. Engines can report such nodes for plan fragments that were pruned while running.
#[derive_where(Debug)]
pub struct ExecutionEventTranslator<'a, S: ?Sized> {
    config: &'a BridgeConfig,
    ids: &'a mut TestIdMap,
    sink: DebugIgnore<&'a mut S>,
    state: TranslatorState,
}

impl<'a, S> ExecutionEventTranslator<'a, S>
where
    S: TestRunListener + TreeVisitor + ?Sized,
{
    /// Creates a new, inactive translator.
    ///
    /// `ids` must be the map the discovered tree was announced with.
    pub fn new(config: &'a BridgeConfig, ids: &'a mut TestIdMap, sink: &'a mut S) -> Self {
        Self {
            config,
            ids,
            sink: DebugIgnore(sink),
            state: TranslatorState::Inactive,
        }
    }

    /// Returns true if a plan is currently executing.
    pub fn is_active(&self) -> bool {
        matches!(self.state, TranslatorState::Active { .. })
    }

    /// Returns the live plan, if a plan is currently executing.
    pub fn live_plan(&self) -> Option<&TestPlan> {
        match &self.state {
            TranslatorState::Active { plan } => Some(plan),
            TranslatorState::Inactive => None,
        }
    }

    /// Returns true if events for `node` must not be reported.
    fn skip_notification(&self, node: &PlanNode, event: &'static str) -> bool {
        let resolvable = match (node.parent_id(), self.live_plan()) {
            (Some(parent_id), Some(plan)) => plan.contains(parent_id),
            _ => false,
        };
        if !resolvable {
            debug!(
                unique_id = %node.unique_id(),
                event,
                active = self.is_active(),
                "suppressing event for node whose parent is not in the live plan"
            );
        }
        !resolvable
    }

    fn notify_skipped(sink: &mut S, node: &PlanNode) {
        // Listeners tracking running tests would otherwise never see these end.
        let identifier = ProtocolIdentifier::with_mode(node, DisplayMode::Ignored);
        sink.notify_test_started(&identifier);
        sink.notify_test_ended(&identifier);
    }
}

impl<S> ExecutionListener for ExecutionEventTranslator<'_, S>
where
    S: TestRunListener + TreeVisitor + ?Sized,
{
    fn plan_execution_started(&mut self, plan: &TestPlan) {
        debug!(
            nodes = plan.len(),
            tests = plan.count_tests(),
            replacing = self.is_active(),
            "plan execution started"
        );
        self.state = TranslatorState::Active { plan: plan.clone() };
    }

    fn plan_execution_finished(&mut self, plan: &TestPlan) {
        debug!(
            nodes = plan.len(),
            registered_ids = self.ids.len(),
            "plan execution finished"
        );
        self.state = TranslatorState::Inactive;
    }

    fn dynamic_test_registered(&mut self, node: &PlanNode) {
        if self.skip_notification(node, "dynamic-test-registered") {
            return;
        }
        let TranslatorState::Active { plan } = &mut self.state else {
            return;
        };

        // Dynamic containers are tracked too, so that their own children pass the parent check.
        if let Err(error) = plan.add(node.clone()) {
            debug!(%error, "dynamically registered node was already known");
        }
        if !node.is_test() {
            return;
        }

        let parent_id = resolve_parent_id(plan, node, self.ids);
        let identifier = ProtocolIdentifier::new(node);
        let id = self.ids.register(&identifier);
        debug!(unique_id = %node.unique_id(), %id, %parent_id, "announcing dynamic test");

        self.sink.visit_tree_entry(&TreeEntry {
            id,
            identifier,
            is_container: false,
            child_count: 1,
            is_dynamic_factory: false,
            is_dynamic: true,
            parent_id,
        });
    }

    fn execution_skipped(&mut self, node: &PlanNode, reason: &str) {
        if self.skip_notification(node, "execution-skipped") {
            return;
        }
        debug!(unique_id = %node.unique_id(), reason, "node skipped");

        if node.is_container() {
            let TranslatorState::Active { plan } = &self.state else {
                return;
            };
            let Some(live) = plan.get(node.unique_id()) else {
                return;
            };
            for descendant in plan.descendants(live) {
                if descendant.is_test() {
                    Self::notify_skipped(&mut self.sink, descendant);
                }
            }
        } else {
            Self::notify_skipped(&mut self.sink, node);
        }
    }

    fn execution_started(&mut self, node: &PlanNode) {
        if self.skip_notification(node, "execution-started") {
            return;
        }
        if node.is_test() {
            self.sink.notify_test_started(&ProtocolIdentifier::new(node));
        }
    }

    fn execution_finished(&mut self, node: &PlanNode, result: &TestExecutionResult) {
        if self.skip_notification(node, "execution-finished") {
            return;
        }

        if node.is_test() {
            if !result.is_successful() {
                let details = FailureDetails::for_test(result, self.config.comparison_delimiter());
                let mode = if result.status() == ExecutionStatus::Aborted {
                    DisplayMode::AssumptionFailed
                } else {
                    DisplayMode::Normal
                };
                self.sink.notify_test_failed(&FailureRecord {
                    identifier: ProtocolIdentifier::with_mode(node, mode),
                    status: details.status,
                    trace: details.trace,
                    comparison: details.comparison,
                });
            }
            self.sink.notify_test_ended(&ProtocolIdentifier::new(node));
        } else if !result.is_successful() {
            let details = FailureDetails::for_container(result);
            self.sink.notify_test_failed(&FailureRecord {
                identifier: ProtocolIdentifier::new(node),
                status: details.status,
                trace: details.trace,
                comparison: None,
            });
        }
    }
}
