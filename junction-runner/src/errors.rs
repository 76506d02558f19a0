// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by junction-runner.
//!
//! Translating execution events never fails: malformed input is reported in a degraded form
//! instead. The errors here come from building test plans, loading configuration, and talking
//! to the test engine.

use crate::plan::UniqueId;
use camino::{Utf8Path, Utf8PathBuf};
use config::ConfigError;
use std::{error::Error, fmt};
use thiserror::Error;

/// A boxed error produced by a [`TestEngine`](crate::engine::TestEngine) implementation.
pub type EngineError = Box<dyn Error + Send + Sync + 'static>;

/// An error that occurred while adding a node to a [`TestPlan`](crate::plan::TestPlan).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlanBuildError {
    /// A node with this unique id is already part of the plan.
    #[error("node `{id}` is already present in the test plan")]
    DuplicateId {
        /// The duplicated id.
        id: UniqueId,
    },

    /// The node names a parent that is not part of the plan.
    #[error("parent `{parent_id}` of node `{id}` is not present in the test plan")]
    UnknownParent {
        /// The id of the node being added.
        id: UniqueId,

        /// The id of the missing parent.
        parent_id: UniqueId,
    },
}

/// An error returned while creating a [`UniqueId`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unique id must not be empty")]
#[non_exhaustive]
pub struct InvalidUniqueId;

/// An error that occurred while parsing the config.
#[derive(Debug, Error)]
#[error("failed to parse junction config at `{config_file}`")]
#[non_exhaustive]
pub struct ConfigParseError {
    config_file: Utf8PathBuf,
    #[source]
    kind: ConfigParseErrorKind,
}

impl ConfigParseError {
    pub(crate) fn new(config_file: impl Into<Utf8PathBuf>, kind: ConfigParseErrorKind) -> Self {
        Self {
            config_file: config_file.into(),
            kind,
        }
    }

    /// Returns the config file for this error.
    pub fn config_file(&self) -> &Utf8Path {
        &self.config_file
    }

    /// Returns the kind of error this is.
    pub fn kind(&self) -> &ConfigParseErrorKind {
        &self.kind
    }
}

/// The kind of error that occurred while parsing a config.
///
/// Returned by [`ConfigParseError::kind`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigParseErrorKind {
    /// An error occurred while building the config.
    #[error(transparent)]
    BuildError(Box<ConfigError>),

    /// An error occurred while deserializing the config.
    #[error(transparent)]
    DeserializeError(Box<serde_path_to_error::Error<ConfigError>>),

    /// The first test id was out of range.
    #[error("`tree.first-test-id` must be between 1 and {max} (found {value})")]
    InvalidFirstTestId {
        /// The value that was configured.
        value: u32,

        /// The largest accepted value.
        max: u32,
    },
}

/// An error that occurred while discovering a test plan.
#[derive(Debug, Error)]
#[error("failed to discover test plan")]
pub struct DiscoverError {
    #[source]
    err: EngineError,
}

impl DiscoverError {
    pub(crate) fn new(err: EngineError) -> Self {
        Self { err }
    }
}

/// An error that occurred while executing a test plan.
#[derive(Debug, Error)]
#[error("failed to execute test plan")]
pub struct ExecuteError {
    #[source]
    err: EngineError,
}

impl ExecuteError {
    pub(crate) fn new(err: EngineError) -> Self {
        Self { err }
    }
}

/// Displays an error along with its chain of sources, one per line.
#[derive(Debug)]
pub struct DisplayErrorChain<E> {
    error: E,
}

impl<E: Error> DisplayErrorChain<E> {
    /// Creates a new `DisplayErrorChain` wrapping `error`.
    pub fn new(error: E) -> Self {
        Self { error }
    }
}

impl<E: Error> fmt::Display for DisplayErrorChain<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        let mut source = self.error.source();
        while let Some(err) = source {
            write!(f, "\n  caused by: {err}")?;
            source = err.source();
        }

        Ok(())
    }
}
