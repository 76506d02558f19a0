// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{FailedComparison, ParentId, StatusKind, TestId};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// A serializable record of one tree entry announced to the legacy side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TreeEntrySummary {
    /// The id assigned to this entry.
    pub id: TestId,

    /// The stable protocol name of the entry.
    pub name: SmolStr,

    /// The human-readable name of the entry.
    pub display_name: SmolStr,

    /// True if the entry groups other entries.
    pub is_container: bool,

    /// The number of children announced for this entry. Always 1 for tests.
    pub child_count: usize,

    /// True if the entry is a container that produces its children at runtime.
    pub is_dynamic_factory: bool,

    /// True if the entry was registered while the run was already underway.
    pub is_dynamic: bool,

    /// The id of the entry's parent.
    pub parent_id: ParentId,
}

/// A serializable record of one failure reported to the legacy side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FailureSummary {
    /// The name of the failing test or container, including any status prefix.
    pub name: SmolStr,

    /// Whether this is a failure or an error.
    pub status: StatusKind,

    /// The printable stack trace, or the empty string if none was available.
    pub trace: String,

    /// The expected/actual pair, if one could be derived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<FailedComparison>,
}

/// A single notification sent to the legacy side, in the order it was sent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Notification {
    /// A tree entry was announced.
    TreeEntry(TreeEntrySummary),

    /// A test started.
    TestStarted {
        /// The name the test was reported under.
        name: SmolStr,
    },

    /// A test ended.
    TestEnded {
        /// The name the test was reported under.
        name: SmolStr,
    },

    /// A test or container failed.
    TestFailed(FailureSummary),
}

impl Notification {
    /// Returns the name of the test this notification refers to.
    pub fn name(&self) -> &str {
        match self {
            Self::TreeEntry(entry) => &entry.name,
            Self::TestStarted { name } | Self::TestEnded { name } => name,
            Self::TestFailed(failure) => &failure.name,
        }
    }
}
