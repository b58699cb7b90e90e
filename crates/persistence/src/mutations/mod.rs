// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! - `agents`: agent creation, target and status changes
//! - `businesses`: business registration

pub mod agents;
pub mod businesses;

pub use agents::{insert_agent, update_agent_status, update_weekly_target};
pub use businesses::insert_business;
