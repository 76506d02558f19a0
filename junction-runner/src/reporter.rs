// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The outbound side: what junction tells the legacy protocol.
//!
//! A transport implements [`TreeVisitor`] to receive tree announcements and [`TestRunListener`]
//! to receive notifications while the plan executes. [`EventRecorder`] implements both and keeps
//! everything in memory.

mod recorder;

use crate::identifier::ProtocolIdentifier;
use junction_protocol::{
    FailedComparison, FailureSummary, ParentId, StatusKind, TestId, TreeEntrySummary,
};
pub use recorder::EventRecorder;

/// One entry of the flattened test tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeEntry<'a> {
    /// The id registered for this entry.
    pub id: TestId,

    /// The entry itself.
    pub identifier: ProtocolIdentifier<'a>,

    /// True if the entry groups other entries.
    pub is_container: bool,

    /// The number of statically discovered children; always 1 for tests.
    pub child_count: usize,

    /// True if the entry is a container that produces tests at runtime.
    pub is_dynamic_factory: bool,

    /// True if the entry was registered while the plan was already executing.
    pub is_dynamic: bool,

    /// The id of the entry's parent.
    pub parent_id: ParentId,
}

impl TreeEntry<'_> {
    /// Returns a serializable summary of this entry.
    pub fn to_summary(&self) -> TreeEntrySummary {
        TreeEntrySummary {
            id: self.id,
            name: self.identifier.name().into(),
            display_name: self.identifier.display_name().into(),
            is_container: self.is_container,
            child_count: self.child_count,
            is_dynamic_factory: self.is_dynamic_factory,
            is_dynamic: self.is_dynamic,
            parent_id: self.parent_id,
        }
    }
}

/// A failed test or container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailureRecord<'a> {
    /// The failing test or container. Its display mode tells assumption failures apart.
    pub identifier: ProtocolIdentifier<'a>,

    /// Whether this is a failure or an error.
    pub status: StatusKind,

    /// The printable stack trace, or the empty string.
    pub trace: String,

    /// The expected/actual pair, if one could be derived.
    pub comparison: Option<FailedComparison>,
}

impl FailureRecord<'_> {
    /// Returns a serializable summary of this failure.
    pub fn to_summary(&self) -> FailureSummary {
        FailureSummary {
            name: self.identifier.name().into(),
            status: self.status,
            trace: self.trace.clone(),
            comparison: self.comparison.clone(),
        }
    }
}

/// Receives the flattened test tree.
pub trait TreeVisitor {
    /// Called once per announced entry, parents before children.
    fn visit_tree_entry(&mut self, entry: &TreeEntry<'_>);
}

/// Receives notifications about tests while a plan executes.
pub trait TestRunListener {
    /// A test started.
    fn notify_test_started(&mut self, identifier: &ProtocolIdentifier<'_>);

    /// A test ended, whatever its outcome.
    fn notify_test_ended(&mut self, identifier: &ProtocolIdentifier<'_>);

    /// A test or container failed.
    fn notify_test_failed(&mut self, failure: &FailureRecord<'_>);
}

impl<T: TreeVisitor + ?Sized> TreeVisitor for &mut T {
    fn visit_tree_entry(&mut self, entry: &TreeEntry<'_>) {
        (**self).visit_tree_entry(entry)
    }
}

impl<T: TestRunListener + ?Sized> TestRunListener for &mut T {
    fn notify_test_started(&mut self, identifier: &ProtocolIdentifier<'_>) {
        (**self).notify_test_started(identifier)
    }

    fn notify_test_ended(&mut self, identifier: &ProtocolIdentifier<'_>) {
        (**self).notify_test_ended(identifier)
    }

    fn notify_test_failed(&mut self, failure: &FailureRecord<'_>) {
        (**self).notify_test_failed(failure)
    }
}
