// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix added to the name of a test that was skipped without running.
pub const IGNORED_TEST_PREFIX: &str = "@Ignore: ";

/// Prefix added to the name of a test whose assumptions did not hold.
pub const ASSUMPTION_FAILED_TEST_PREFIX: &str = "@AssumptionFailure: ";

/// How a failure is classified by the legacy protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusKind {
    /// An expectation was violated: an assertion failed, or an assumption did not hold.
    Failed,

    /// Anything else went wrong while running the test or container.
    Error,
}

impl StatusKind {
    /// Returns the message tag the legacy protocol uses for this status.
    pub fn message_tag(self) -> &'static str {
        match self {
            Self::Failed => "%FAILED ",
            Self::Error => "%ERROR  ",
        }
    }

    /// Returns a short, human-readable name for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Failed => "failed",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An expected/actual pair attached to a failure, for the consumer to render as a diff.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FailedComparison {
    /// The string representation of the expected value.
    pub expected: String,

    /// The string representation of the actual value.
    pub actual: String,
}

impl FailedComparison {
    /// Creates a new comparison.
    pub fn new(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}
