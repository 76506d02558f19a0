// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A single discovery and execution cycle against a [`TestEngine`].

use crate::{
    announce::TreeAnnouncer,
    config::BridgeConfig,
    engine::TestEngine,
    errors::{DiscoverError, ExecuteError},
    id_map::TestIdMap,
    identifier::ProtocolIdentifier,
    plan::TestPlan,
    reporter::{TestRunListener, TreeVisitor},
    translator::ExecutionEventTranslator,
};
use derive_where::derive_where;
use tracing::debug;

/// A discovered test plan, ready to be announced and executed.
///
/// A session is created once per request. The usual sequence is:
///
/// 1. [`PlanSession::discover`];
/// 2. [`PlanSession::send_tree`] to announce the plan;
/// 3. [`PlanSession::run`] with the same [`TestIdMap`], so that execution events resolve to the
///    ids that were announced.
#[derive_where(Debug; E, E::Request)]
pub struct PlanSession<'e, E: TestEngine> {
    engine: &'e E,
    request: E::Request,
    config: &'e BridgeConfig,
    plan: TestPlan,
}

impl<'e, E: TestEngine> PlanSession<'e, E> {
    /// Asks `engine` to discover the plan for `request`.
    pub fn discover(
        engine: &'e E,
        request: E::Request,
        config: &'e BridgeConfig,
    ) -> Result<Self, DiscoverError> {
        let plan = engine.discover(&request).map_err(DiscoverError::new)?;
        debug!(
            nodes = plan.len(),
            tests = plan.count_tests(),
            "discovered test plan"
        );

        Ok(Self {
            engine,
            request,
            config,
            plan,
        })
    }

    /// Returns the discovered plan.
    #[inline]
    pub fn plan(&self) -> &TestPlan {
        &self.plan
    }

    /// Returns the request this session was created for.
    #[inline]
    pub fn request(&self) -> &E::Request {
        &self.request
    }

    /// Returns the number of test-kind nodes in the discovered plan.
    pub fn count_test_cases(&self) -> usize {
        self.plan.count_tests()
    }

    /// Returns the identifier of the first root of the plan, if there is one.
    pub fn root_identifier(&self) -> Option<ProtocolIdentifier<'_>> {
        self.plan.roots().next().map(ProtocolIdentifier::new)
    }

    /// Announces the discovered plan to `visitor`.
    ///
    /// Returns the number of entries announced.
    pub fn send_tree<V>(&self, ids: &mut TestIdMap, visitor: &mut V) -> usize
    where
        V: TreeVisitor + ?Sized,
    {
        TreeAnnouncer::new(self.config).announce(&self.plan, ids, visitor)
    }

    /// Executes the request, translating engine events into notifications for `sink`.
    ///
    /// `ids` should be the map the tree was announced with.
    pub fn run<S>(&self, ids: &mut TestIdMap, sink: &mut S) -> Result<(), ExecuteError>
    where
        S: TestRunListener + TreeVisitor + ?Sized,
    {
        let mut translator = ExecutionEventTranslator::new(self.config, ids, sink);
        self.engine
            .execute(&self.request, &mut translator)
            .map_err(ExecuteError::new)?;

        if translator.is_active() {
            debug!("engine returned without reporting that plan execution finished");
        }
        Ok(())
    }
}
