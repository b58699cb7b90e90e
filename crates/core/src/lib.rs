// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod progress;
mod repository;
mod tracker;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use error::{FetchError, QuotaError};
pub use progress::{AgentProgress, ProgressSettings};
pub use repository::RecordsRepository;
pub use tracker::{DEFAULT_HISTORY_WEEKS, QuotaTracker};
