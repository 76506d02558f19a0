// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use smol_str::SmolStr;

/// Where a plan node's tests are defined, as reported by the engine.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TestSource {
    /// The node corresponds to a class.
    Class {
        /// The fully qualified class name.
        class_name: SmolStr,
    },

    /// The node corresponds to a method on a class.
    Method {
        /// The fully qualified name of the declaring class.
        class_name: SmolStr,

        /// The method name.
        method_name: SmolStr,

        /// The comma-separated parameter types of the method, or the empty string for methods
        /// without parameters.
        parameter_types: SmolStr,
    },
}

impl TestSource {
    /// Creates a class source.
    pub fn class(class_name: impl Into<SmolStr>) -> Self {
        Self::Class {
            class_name: class_name.into(),
        }
    }

    /// Creates a method source.
    pub fn method(
        class_name: impl Into<SmolStr>,
        method_name: impl Into<SmolStr>,
        parameter_types: impl Into<SmolStr>,
    ) -> Self {
        Self::Method {
            class_name: class_name.into(),
            method_name: method_name.into(),
            parameter_types: parameter_types.into(),
        }
    }
}
