// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Vocabulary of the flat, id-based legacy test runner protocol.
//!
//! The legacy protocol knows nothing about hierarchical test plans. It receives a flattened
//! tree up front, where every entry is addressed by a small sequential [`TestId`], and then a
//! stream of started/ended/failed notifications keyed by a stable test name.
//!
//! This crate holds the pieces of that protocol that are shared between the translation layer
//! in `junction-runner` and whatever transport ends up serializing notifications to the
//! consuming process. The [`Notification`] summaries are serializable with serde.

mod ids;
mod notification;
mod status;

pub use ids::*;
pub use notification::*;
pub use status::*;
