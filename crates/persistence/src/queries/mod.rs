// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `agents`: agent lookup and listing
//! - `businesses`: registration counts and listings

pub mod agents;
pub mod businesses;

pub use agents::{get_agent, list_agents};
pub use businesses::{count_businesses_in_range, list_businesses_for_agent};
