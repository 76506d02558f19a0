// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The up-front announcement of the discovered test tree.

use crate::{
    config::BridgeConfig,
    id_map::TestIdMap,
    identifier::ProtocolIdentifier,
    plan::{PlanNode, TestPlan},
    reporter::{TreeEntry, TreeVisitor},
};
use junction_protocol::ParentId;
use tracing::{trace, warn};

/// Walks a discovered [`TestPlan`] once and announces every node below the roots.
///
/// Nodes are visited in pre-order, children in the order the engine reported them, so a
/// parent's id is always registered before any of its children are announced.
#[derive(Clone, Copy, Debug)]
pub struct TreeAnnouncer<'cfg> {
    config: &'cfg BridgeConfig,
}

impl<'cfg> TreeAnnouncer<'cfg> {
    /// Creates a new announcer.
    pub fn new(config: &'cfg BridgeConfig) -> Self {
        Self { config }
    }

    /// Announces every node of `plan` to `visitor`, registering ids in `ids` along the way.
    ///
    /// Roots are synthetic and are not announced. Returns the number of entries announced.
    pub fn announce<V>(&self, plan: &TestPlan, ids: &mut TestIdMap, visitor: &mut V) -> usize
    where
        V: TreeVisitor + ?Sized,
    {
        let mut announced = 0;
        for root in plan.roots() {
            let mut stack: Vec<&PlanNode> = plan.children(root).collect();
            stack.reverse();

            while let Some(node) = stack.pop() {
                self.announce_node(plan, node, ids, visitor);
                announced += 1;

                // Tests are announced as leaves, even if the engine gave them children.
                if !node.is_test() {
                    let len = stack.len();
                    stack.extend(plan.children(node));
                    stack[len..].reverse();
                }
            }
        }
        announced
    }

    fn announce_node<V>(
        &self,
        plan: &TestPlan,
        node: &PlanNode,
        ids: &mut TestIdMap,
        visitor: &mut V,
    ) where
        V: TreeVisitor + ?Sized,
    {
        let parent_id = resolve_parent_id(plan, node, ids);
        let identifier = ProtocolIdentifier::new(node);
        let id = ids.register(&identifier);

        let entry = if node.is_test() {
            TreeEntry {
                id,
                identifier,
                is_container: false,
                child_count: 1,
                is_dynamic_factory: false,
                is_dynamic: false,
                parent_id,
            }
        } else {
            TreeEntry {
                id,
                identifier,
                is_container: true,
                child_count: plan.child_count(node),
                is_dynamic_factory: self.is_dynamic_factory(node),
                is_dynamic: false,
                parent_id,
            }
        };

        trace!(
            unique_id = %node.unique_id(),
            %id,
            %parent_id,
            is_container = entry.is_container,
            child_count = entry.child_count,
            "announcing tree entry"
        );
        visitor.visit_tree_entry(&entry);
    }

    /// Returns true if `node` is a container that produces its tests at runtime.
    ///
    /// The engine's own attribute wins when it reports one. Otherwise the last segment of the
    /// unique id is checked against the configured factory marker.
    pub fn is_dynamic_factory(&self, node: &PlanNode) -> bool {
        if let Some(dynamic_factory) = node.dynamic_factory() {
            return dynamic_factory;
        }
        node.unique_id()
            .last_segment()
            .is_some_and(|segment| segment.starts_with(self.config.factory_marker()))
    }
}

/// Returns the protocol id of `node`'s parent, registering the parent if needed.
///
/// A node without a parent in `plan` gets [`ParentId::Missing`].
pub(crate) fn resolve_parent_id(
    plan: &TestPlan,
    node: &PlanNode,
    ids: &mut TestIdMap,
) -> ParentId {
    match plan.parent(node) {
        Some(parent) => ParentId::Known(ids.register(&ProtocolIdentifier::new(parent))),
        None => {
            warn!(
                unique_id = %node.unique_id(),
                "node has no parent in the test plan, announcing it with a missing parent id"
            );
            ParentId::Missing
        }
    }
}
