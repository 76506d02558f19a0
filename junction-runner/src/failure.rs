// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors thrown by tests, and how they are reduced into legacy failure records.
//!
//! The engine hands over whatever a test or container threw. The legacy protocol only wants a
//! [`StatusKind`], a printable trace and, where one can be recovered, an expected/actual
//! [`FailedComparison`]. Missing information degrades the record (empty trace, no comparison)
//! rather than producing an error.

use crate::engine::{ExecutionStatus, TestExecutionResult};
use junction_protocol::{FailedComparison, StatusKind};
use smol_str::SmolStr;
use std::{borrow::Cow, fmt};
use swrite::{SWrite, swrite};

/// The string form of a value taking part in a failed assertion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueWrapper {
    string_representation: String,
}

impl ValueWrapper {
    /// Wraps the string representation of a value.
    pub fn new(string_representation: impl Into<String>) -> Self {
        Self {
            string_representation: string_representation.into(),
        }
    }

    /// Returns the string representation of the value, as the assertion library produced it.
    pub fn string_representation(&self) -> &str {
        &self.string_representation
    }
}

/// What kind of error a [`ThrownError`] is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ThrownErrorKind {
    /// A structured assertion failure, optionally carrying the values that were compared.
    AssertionFailed {
        /// The expected value.
        expected: Option<ValueWrapper>,
        /// The actual value.
        actual: Option<ValueWrapper>,
    },

    /// Several assertion failures collected into one error.
    MultipleFailures {
        /// The collected failures, in the order they happened.
        failures: Vec<ThrownError>,
    },

    /// An assertion error without structured values.
    Assertion,

    /// Any other error.
    Other,
}

/// An error thrown by a test or container, as reported by the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThrownError {
    type_name: SmolStr,
    message: Option<String>,
    kind: ThrownErrorKind,
    frames: Vec<String>,
    cause: Option<Box<ThrownError>>,
}

impl ThrownError {
    const MULTIPLE_FAILURES_HEADING: &'static str = "Multiple Failures";

    /// Creates an error that is not assertion-related.
    pub fn new(type_name: impl Into<SmolStr>, message: Option<String>) -> Self {
        Self::with_kind(type_name, message, ThrownErrorKind::Other)
    }

    /// Creates an assertion error without structured values.
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::with_kind(
            "AssertionError",
            Some(message.into()),
            ThrownErrorKind::Assertion,
        )
    }

    /// Creates a structured assertion failure.
    pub fn assertion_failed(
        message: impl Into<String>,
        expected: Option<ValueWrapper>,
        actual: Option<ValueWrapper>,
    ) -> Self {
        Self::with_kind(
            "AssertionFailedError",
            Some(message.into()),
            ThrownErrorKind::AssertionFailed { expected, actual },
        )
    }

    /// Creates an aggregate of several failures.
    ///
    /// Without a message, the message lists the failures, one per line.
    pub fn multiple_failures(message: Option<String>, failures: Vec<ThrownError>) -> Self {
        Self::with_kind(
            "MultipleFailuresError",
            message,
            ThrownErrorKind::MultipleFailures { failures },
        )
    }

    /// Creates an error of the given kind.
    pub fn with_kind(
        type_name: impl Into<SmolStr>,
        message: Option<String>,
        kind: ThrownErrorKind,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            message,
            kind,
            frames: Vec::new(),
            cause: None,
        }
    }

    /// Overrides the type name of the error.
    pub fn with_type_name(mut self, type_name: impl Into<SmolStr>) -> Self {
        self.type_name = type_name.into();
        self
    }

    /// Sets the stack frames of the error, innermost first.
    pub fn with_frames<I>(mut self, frames: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.frames = frames.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the error that caused this one.
    pub fn with_cause(mut self, cause: ThrownError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Returns the type name of the error.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the kind of the error.
    pub fn kind(&self) -> &ThrownErrorKind {
        &self.kind
    }

    /// Returns the stack frames of the error.
    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    /// Returns the error that caused this one.
    pub fn cause(&self) -> Option<&ThrownError> {
        self.cause.as_deref()
    }

    /// Returns true if this is an assertion-style error.
    pub fn is_assertion(&self) -> bool {
        !matches!(self.kind, ThrownErrorKind::Other)
    }

    /// Returns the message of this error.
    ///
    /// For an aggregate without an explicit message this is a summary of its failures.
    pub fn message(&self) -> Option<Cow<'_, str>> {
        if let Some(message) = &self.message {
            return Some(Cow::Borrowed(message));
        }

        match &self.kind {
            ThrownErrorKind::MultipleFailures { failures } => {
                Some(Cow::Owned(Self::multiple_failures_message(failures)))
            }
            _ => None,
        }
    }

    fn multiple_failures_message(failures: &[ThrownError]) -> String {
        let mut out = String::from(Self::MULTIPLE_FAILURES_HEADING);
        if failures.is_empty() {
            return out;
        }

        let noun = if failures.len() == 1 {
            "failure"
        } else {
            "failures"
        };
        swrite!(out, " ({} {noun})", failures.len());
        for failure in failures {
            match failure.message() {
                Some(message) if !message.trim().is_empty() => swrite!(out, "\n\t{message}"),
                _ => swrite!(out, "\n\t<no message> in {}", failure.type_name),
            }
        }
        out
    }

    /// Returns the full printable stack trace of this error, causes included.
    pub fn printable_trace(&self) -> String {
        self.to_string()
    }

    fn fmt_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(message) => write!(f, "{}: {message}", self.type_name),
            None => f.write_str(&self.type_name),
        }
    }
}

impl fmt::Display for ThrownError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut current = Some(self);
        let mut first = true;
        while let Some(error) = current {
            if !first {
                f.write_str("Caused by: ")?;
            }
            first = false;

            error.fmt_header(f)?;
            writeln!(f)?;
            for frame in &error.frames {
                writeln!(f, "\tat {frame}")?;
            }
            current = error.cause();
        }
        Ok(())
    }
}

/// Derives the expected/actual pair for a thrown error, if it carries one.
///
/// Aggregates contribute every failure's pair, each value followed by `delimiter`. One
/// failure without structured values makes the whole aggregate unusable.
pub fn failed_comparison(error: &ThrownError, delimiter: &str) -> Option<FailedComparison> {
    match &error.kind {
        ThrownErrorKind::AssertionFailed { expected, actual } => {
            let (expected, actual) = (expected.as_ref()?, actual.as_ref()?);
            Some(FailedComparison::new(
                expected.string_representation(),
                actual.string_representation(),
            ))
        }
        ThrownErrorKind::MultipleFailures { failures } => {
            let mut expected_out = String::new();
            let mut actual_out = String::new();
            for failure in failures {
                let ThrownErrorKind::AssertionFailed {
                    expected: Some(expected),
                    actual: Some(actual),
                } = &failure.kind
                else {
                    return None;
                };
                expected_out.push_str(expected.string_representation());
                expected_out.push_str(delimiter);
                actual_out.push_str(actual.string_representation());
                actual_out.push_str(delimiter);
            }
            Some(FailedComparison::new(expected_out, actual_out))
        }
        ThrownErrorKind::Assertion | ThrownErrorKind::Other => None,
    }
}

/// The parts of a failure record derived from an execution result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FailureDetails {
    pub(crate) status: StatusKind,
    pub(crate) trace: String,
    pub(crate) comparison: Option<FailedComparison>,
}

impl FailureDetails {
    /// Reduces the result of a test that did not succeed.
    pub(crate) fn for_test(result: &TestExecutionResult, delimiter: &str) -> Self {
        let assumption_failed = result.status() == ExecutionStatus::Aborted;
        match result.error() {
            Some(error) => Self {
                status: if assumption_failed || error.is_assertion() {
                    StatusKind::Failed
                } else {
                    StatusKind::Error
                },
                trace: error.printable_trace(),
                comparison: failed_comparison(error, delimiter),
            },
            None => Self {
                status: StatusKind::Failed,
                trace: String::new(),
                comparison: None,
            },
        }
    }

    /// Reduces the result of a container that did not succeed.
    pub(crate) fn for_container(result: &TestExecutionResult) -> Self {
        Self {
            status: StatusKind::Error,
            trace: result
                .error()
                .map(ThrownError::printable_trace)
                .unwrap_or_default(),
            comparison: None,
        }
    }
}
