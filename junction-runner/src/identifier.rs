// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The legacy protocol's view of a plan node.

use crate::plan::{PlanNode, TestSource};
use junction_protocol::{ASSUMPTION_FAILED_TEST_PREFIX, IGNORED_TEST_PREFIX};
use std::hash::{Hash, Hasher};

/// How a [`ProtocolIdentifier`] presents its name for one notification.
///
/// The mode is chosen per notification and never stored anywhere.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DisplayMode {
    /// The plain protocol name.
    #[default]
    Normal,

    /// The test was skipped: the name is prefixed with [`IGNORED_TEST_PREFIX`].
    Ignored,

    /// An assumption of the test did not hold: the name is prefixed with
    /// [`ASSUMPTION_FAILED_TEST_PREFIX`].
    AssumptionFailed,
}

impl DisplayMode {
    /// Returns the prefix this mode adds to names.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Normal => "",
            Self::Ignored => IGNORED_TEST_PREFIX,
            Self::AssumptionFailed => ASSUMPTION_FAILED_TEST_PREFIX,
        }
    }
}

/// A plan node as seen by the legacy protocol.
///
/// Equality and hashing only look at the wrapped node's unique id, so identifiers over the same
/// node are interchangeable whatever their [`DisplayMode`].
#[derive(Clone, Copy, Debug)]
pub struct ProtocolIdentifier<'a> {
    node: &'a PlanNode,
    mode: DisplayMode,
}

impl<'a> ProtocolIdentifier<'a> {
    /// Creates an identifier with [`DisplayMode::Normal`].
    pub fn new(node: &'a PlanNode) -> Self {
        Self::with_mode(node, DisplayMode::Normal)
    }

    /// Creates an identifier with the given display mode.
    pub fn with_mode(node: &'a PlanNode, mode: DisplayMode) -> Self {
        Self { node, mode }
    }

    /// Returns the wrapped node.
    #[inline]
    pub fn node(&self) -> &'a PlanNode {
        self.node
    }

    /// Returns the display mode.
    #[inline]
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Returns the stable protocol name of the node.
    ///
    /// * class sources: the fully qualified class name;
    /// * method sources: `method(class)`, followed by `:parameterTypes` if the method has
    ///   parameters;
    /// * otherwise, the display name.
    ///
    /// The name is prefixed according to the [`DisplayMode`].
    pub fn name(&self) -> String {
        let prefix = self.mode.prefix();
        match self.node.source() {
            Some(TestSource::Class { class_name }) => format!("{prefix}{class_name}"),
            Some(TestSource::Method {
                class_name,
                method_name,
                parameter_types,
            }) => {
                if parameter_types.is_empty() {
                    format!("{prefix}{method_name}({class_name})")
                } else {
                    format!("{prefix}{method_name}({class_name}):{parameter_types}")
                }
            }
            None => format!("{prefix}{}", self.node.display_name()),
        }
    }

    /// Returns the human-readable name of the node.
    #[inline]
    pub fn display_name(&self) -> &'a str {
        self.node.display_name()
    }
}

impl PartialEq for ProtocolIdentifier<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.node.unique_id() == other.node.unique_id()
    }
}

impl Eq for ProtocolIdentifier<'_> {}

impl Hash for ProtocolIdentifier<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node.unique_id().hash(state);
    }
}
