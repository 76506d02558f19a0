// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Bridges a hierarchical test engine to the flat, id-based legacy runner protocol.
//!
//! The engine discovers a [`TestPlan`](plan::TestPlan) (a forest of containers and tests) and
//! then reports lifecycle events while it executes it. The legacy protocol instead expects:
//!
//! * the whole tree up front, flattened into entries addressed by sequential
//!   [`TestId`](junction_protocol::TestId)s. This is done by the
//!   [`TreeAnnouncer`](announce::TreeAnnouncer).
//! * a stream of started/ended/failed notifications keyed by stable test names. This is done by
//!   the [`ExecutionEventTranslator`](translator::ExecutionEventTranslator), which also
//!   announces tests registered dynamically during the run.
//!
//! Both share a [`TestIdMap`](id_map::TestIdMap), and both see plan nodes through a
//! [`ProtocolIdentifier`](identifier::ProtocolIdentifier). [`PlanSession`](session::PlanSession)
//! ties the pieces together for one discovery and execution cycle.

pub mod announce;
pub mod config;
pub mod engine;
pub mod errors;
pub mod failure;
pub mod id_map;
pub mod identifier;
pub mod plan;
pub mod reporter;
pub mod session;
pub mod translator;
