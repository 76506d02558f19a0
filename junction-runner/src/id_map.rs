// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The registry of protocol ids handed out during a run.

use crate::{identifier::ProtocolIdentifier, plan::UniqueId};
use indexmap::IndexSet;
use junction_protocol::TestId;

/// Maps protocol identifiers to the [`TestId`]s the legacy side knows them by.
///
/// Ids are handed out in registration order, starting at the configured first id, and are
/// never removed. Create one map per discovery and execution cycle, and share it between the
/// [`TreeAnnouncer`](crate::announce::TreeAnnouncer) and the
/// [`ExecutionEventTranslator`](crate::translator::ExecutionEventTranslator).
#[derive(Clone, Debug)]
pub struct TestIdMap {
    first_id: u32,
    ids: IndexSet<UniqueId>,
}

impl TestIdMap {
    /// Creates an empty map whose first id is `first_id`.
    ///
    /// [`BridgeConfig`](crate::config::BridgeConfig) bounds the configured first id so that at
    /// least 2^31 ids can be registered.
    pub fn new(first_id: u32) -> Self {
        Self {
            first_id,
            ids: IndexSet::new(),
        }
    }

    /// Returns the id of `identifier`, registering it first if it is new.
    pub fn register(&mut self, identifier: &ProtocolIdentifier<'_>) -> TestId {
        let (index, _) = self.ids.insert_full(identifier.node().unique_id().clone());
        self.id_at(index)
    }

    /// Returns the id of `identifier` if it was registered.
    pub fn get(&self, identifier: &ProtocolIdentifier<'_>) -> Option<TestId> {
        self.get_by_unique_id(identifier.node().unique_id())
    }

    /// Returns the id registered for the node with this unique id.
    pub fn get_by_unique_id(&self, unique_id: &UniqueId) -> Option<TestId> {
        self.ids.get_index_of(unique_id).map(|index| self.id_at(index))
    }

    /// Iterates over registered nodes and their ids, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&UniqueId, TestId)> + '_ {
        self.ids
            .iter()
            .enumerate()
            .map(|(index, unique_id)| (unique_id, self.id_at(index)))
    }

    /// Returns the number of registered nodes.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if nothing has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn id_at(&self, index: usize) -> TestId {
        let id = u32::try_from(index)
            .ok()
            .and_then(|offset| self.first_id.checked_add(offset))
            .expect("protocol id space exhausted");
        TestId::new(id)
    }
}

impl Default for TestIdMap {
    fn default() -> Self {
        Self::new(1)
    }
}
