// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test plans discovered by the test engine.
//!
//! A [`TestPlan`] is a forest of [`PlanNode`]s. Roots are synthetic (typically one per engine)
//! and are never announced to the legacy side; everything below them is.

mod source;
mod test_plan;
mod unique_id;

pub use source::*;
pub use test_plan::*;
pub use unique_id::*;
