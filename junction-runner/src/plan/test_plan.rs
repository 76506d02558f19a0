// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{TestSource, UniqueId};
use crate::errors::PlanBuildError;
use indexmap::IndexMap;
use smol_str::SmolStr;
use std::collections::HashMap;

/// Whether a plan node is executed as a test, groups other nodes, or both.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The node groups other nodes and is never executed as a test itself.
    Container,

    /// The node is an executable test.
    Test,

    /// The node is executed as a test and may also have children.
    ContainerAndTest,
}

impl NodeKind {
    /// Returns true if nodes of this kind are executed as tests.
    #[inline]
    pub fn is_test(self) -> bool {
        matches!(self, Self::Test | Self::ContainerAndTest)
    }

    /// Returns true if nodes of this kind can have children.
    #[inline]
    pub fn is_container(self) -> bool {
        matches!(self, Self::Container | Self::ContainerAndTest)
    }
}

/// A node in a [`TestPlan`].
#[derive(Clone, Debug)]
pub struct PlanNode {
    unique_id: UniqueId,
    parent_id: Option<UniqueId>,
    display_name: SmolStr,
    kind: NodeKind,
    source: Option<TestSource>,
    dynamic_factory: Option<bool>,
}

impl PlanNode {
    /// Creates a new root node, without a parent or a source.
    pub fn new(unique_id: UniqueId, kind: NodeKind, display_name: impl Into<SmolStr>) -> Self {
        Self {
            unique_id,
            parent_id: None,
            display_name: display_name.into(),
            kind,
            source: None,
            dynamic_factory: None,
        }
    }

    /// Creates a new container node.
    pub fn container(unique_id: UniqueId, display_name: impl Into<SmolStr>) -> Self {
        Self::new(unique_id, NodeKind::Container, display_name)
    }

    /// Creates a new test node.
    pub fn test(unique_id: UniqueId, display_name: impl Into<SmolStr>) -> Self {
        Self::new(unique_id, NodeKind::Test, display_name)
    }

    /// Sets the parent of this node.
    pub fn with_parent(mut self, parent_id: UniqueId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Sets the source of this node.
    pub fn with_source(mut self, source: TestSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Records whether this node is a dynamic test factory, for engines that report it.
    pub fn with_dynamic_factory(mut self, dynamic_factory: bool) -> Self {
        self.dynamic_factory = Some(dynamic_factory);
        self
    }

    /// Returns the unique id of this node.
    #[inline]
    pub fn unique_id(&self) -> &UniqueId {
        &self.unique_id
    }

    /// Returns the unique id of this node's parent, if it has one.
    #[inline]
    pub fn parent_id(&self) -> Option<&UniqueId> {
        self.parent_id.as_ref()
    }

    /// Returns the human-readable name of this node.
    #[inline]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the kind of this node.
    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Returns true if this node is executed as a test.
    #[inline]
    pub fn is_test(&self) -> bool {
        self.kind.is_test()
    }

    /// Returns true if this node can have children.
    #[inline]
    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    /// Returns the source of this node, if the engine reported one.
    #[inline]
    pub fn source(&self) -> Option<&TestSource> {
        self.source.as_ref()
    }

    /// Returns whether this node is a dynamic test factory, if the engine reported it.
    #[inline]
    pub fn dynamic_factory(&self) -> Option<bool> {
        self.dynamic_factory
    }
}

/// The discovered tree of containers and tests for one execution request.
///
/// Nodes are kept in the order the engine reported them, and children are always added after
/// their parents.
#[derive(Clone, Debug, Default)]
pub struct TestPlan {
    nodes: IndexMap<UniqueId, PlanNode>,
    roots: Vec<UniqueId>,
    children: HashMap<UniqueId, Vec<UniqueId>>,
}

impl TestPlan {
    /// Creates an empty test plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a test plan out of nodes in engine order.
    pub fn from_nodes(nodes: impl IntoIterator<Item = PlanNode>) -> Result<Self, PlanBuildError> {
        let mut plan = Self::new();
        for node in nodes {
            plan.add(node)?;
        }
        Ok(plan)
    }

    /// Adds a node to the plan.
    ///
    /// The node's parent, if any, must already be part of the plan.
    pub fn add(&mut self, node: PlanNode) -> Result<(), PlanBuildError> {
        if self.nodes.contains_key(node.unique_id()) {
            return Err(PlanBuildError::DuplicateId {
                id: node.unique_id().clone(),
            });
        }

        match node.parent_id() {
            Some(parent_id) => {
                if !self.nodes.contains_key(parent_id) {
                    return Err(PlanBuildError::UnknownParent {
                        id: node.unique_id().clone(),
                        parent_id: parent_id.clone(),
                    });
                }
                self.children
                    .entry(parent_id.clone())
                    .or_default()
                    .push(node.unique_id().clone());
            }
            None => self.roots.push(node.unique_id().clone()),
        }

        self.nodes.insert(node.unique_id().clone(), node);
        Ok(())
    }

    /// Returns the node with the given id.
    pub fn get(&self, id: &UniqueId) -> Option<&PlanNode> {
        self.nodes.get(id)
    }

    /// Returns true if the plan contains a node with the given id.
    pub fn contains(&self, id: &UniqueId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Iterates over the roots of the plan.
    pub fn roots(&self) -> impl Iterator<Item = &PlanNode> + '_ {
        self.resolve(&self.roots)
    }

    /// Iterates over the direct children of `node`, in engine order.
    pub fn children<'a>(&'a self, node: &PlanNode) -> impl Iterator<Item = &'a PlanNode> + 'a {
        let ids = self
            .children
            .get(node.unique_id())
            .map_or(&[][..], |ids| ids.as_slice());
        self.resolve(ids)
    }

    /// Returns the number of direct children of `node`.
    pub fn child_count(&self, node: &PlanNode) -> usize {
        self.children.get(node.unique_id()).map_or(0, Vec::len)
    }

    /// Returns the parent of `node`, if it has one and the parent is part of the plan.
    pub fn parent(&self, node: &PlanNode) -> Option<&PlanNode> {
        node.parent_id().and_then(|id| self.nodes.get(id))
    }

    /// Returns every node below `node`, in pre-order.
    pub fn descendants(&self, node: &PlanNode) -> Vec<&PlanNode> {
        let mut out = Vec::new();
        let mut stack: Vec<&PlanNode> = self.children(node).collect();
        stack.reverse();

        while let Some(next) = stack.pop() {
            out.push(next);
            let len = stack.len();
            stack.extend(self.children(next));
            stack[len..].reverse();
        }

        out
    }

    /// Counts the nodes that match `predicate`.
    pub fn count_matching(&self, predicate: impl Fn(&PlanNode) -> bool) -> usize {
        self.nodes.values().filter(|node| predicate(*node)).count()
    }

    /// Counts the nodes that are executed as tests.
    pub fn count_tests(&self) -> usize {
        self.count_matching(PlanNode::is_test)
    }

    /// Iterates over all nodes in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &PlanNode> + '_ {
        self.nodes.values()
    }

    /// Returns the number of nodes in the plan, roots included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the plan has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn resolve<'a>(&'a self, ids: &'a [UniqueId]) -> impl Iterator<Item = &'a PlanNode> + 'a {
        ids.iter().filter_map(|id| self.nodes.get(id))
    }
}
