// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::InvalidUniqueId;
use smol_str::SmolStr;
use std::fmt;

/// The globally unique, hierarchical id of a node in a test plan.
///
/// Engines typically build these out of `[type:value]` segments joined by `/`, for example
/// `[engine:junit-jupiter]/[class:com.example.FooTest]/[method:bar()]`. The id is opaque to
/// junction except for [`last_segment`](Self::last_segment), which is used to recognize
/// dynamic test factories when the engine does not say so directly.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UniqueId(SmolStr);

impl UniqueId {
    const SEGMENT_START: &'static str = "/[";

    /// Creates a new unique id, rejecting the empty string.
    pub fn new(id: impl Into<SmolStr>) -> Result<Self, InvalidUniqueId> {
        let id = id.into();
        if id.is_empty() {
            return Err(InvalidUniqueId);
        }
        Ok(Self(id))
    }

    /// Returns the id of an engine root, `[engine:<name>]`.
    pub fn for_engine(engine: &str) -> Self {
        Self(format!("[engine:{engine}]").into())
    }

    /// Returns a new id with a `[segment_type:value]` segment appended.
    pub fn append(&self, segment_type: &str, value: &str) -> Self {
        Self(format!("{}/[{segment_type}:{value}]", self.0).into())
    }

    /// Returns the text following the last `/[` in the id, if there is one.
    ///
    /// For `[engine:e]/[class:C]/[test-factory:f()]` this is `test-factory:f()]`.
    pub fn last_segment(&self) -> Option<&str> {
        self.0
            .rfind(Self::SEGMENT_START)
            .map(|index| &self.0[index + Self::SEGMENT_START.len()..])
    }

    /// Returns the id as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
