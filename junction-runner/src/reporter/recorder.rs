// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{FailureRecord, TestRunListener, TreeEntry, TreeVisitor};
use crate::identifier::ProtocolIdentifier;
use junction_protocol::Notification;

/// Records every notification it receives, in order.
///
/// Useful for transports that serialize notifications after the fact, and for tests.
#[derive(Clone, Debug, Default)]
pub struct EventRecorder {
    notifications: Vec<Notification>,
}

impl EventRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the notifications recorded so far.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Consumes the recorder, returning its notifications.
    pub fn into_notifications(self) -> Vec<Notification> {
        self.notifications
    }

    /// Forgets everything recorded so far.
    pub fn clear(&mut self) {
        self.notifications.clear();
    }
}

impl TreeVisitor for EventRecorder {
    fn visit_tree_entry(&mut self, entry: &TreeEntry<'_>) {
        self.notifications.push(Notification::TreeEntry(entry.to_summary()));
    }
}

impl TestRunListener for EventRecorder {
    fn notify_test_started(&mut self, identifier: &ProtocolIdentifier<'_>) {
        self.notifications.push(Notification::TestStarted {
            name: identifier.name().into(),
        });
    }

    fn notify_test_ended(&mut self, identifier: &ProtocolIdentifier<'_>) {
        self.notifications.push(Notification::TestEnded {
            name: identifier.name().into(),
        });
    }

    fn notify_test_failed(&mut self, failure: &FailureRecord<'_>) {
        self.notifications.push(Notification::TestFailed(failure.to_summary()));
    }
}
