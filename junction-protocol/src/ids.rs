// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, num::ParseIntError, str::FromStr};

/// A protocol id: the small integer the legacy side uses to address a tree entry.
///
/// Ids are handed out sequentially in registration order and are never reused within a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestId(u32);

impl TestId {
    /// Creates a new protocol id.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw value of this id.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TestId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// The parent reference carried by a tree entry.
///
/// On the wire this is a string: either the parent's [`TestId`], or the sentinel `-1` when the
/// node has no parent at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParentId {
    /// The parent was registered under this id.
    Known(TestId),

    /// The node has no parent.
    Missing,
}

impl ParentId {
    /// The wire representation of [`ParentId::Missing`].
    pub const MISSING_SENTINEL: &'static str = "-1";

    /// Returns the parent's id, if there is one.
    pub fn test_id(self) -> Option<TestId> {
        match self {
            Self::Known(id) => Some(id),
            Self::Missing => None,
        }
    }
}

impl fmt::Display for ParentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(id) => write!(f, "{id}"),
            Self::Missing => f.write_str(Self::MISSING_SENTINEL),
        }
    }
}

impl FromStr for ParentId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::MISSING_SENTINEL {
            Ok(Self::Missing)
        } else {
            s.parse().map(Self::Known)
        }
    }
}

impl Serialize for ParentId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ParentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
