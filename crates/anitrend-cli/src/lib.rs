//! # Anitrend CLI
//!
//! The fetch and aggregate pipelines behind the `anitrend-fetch` and
//! `anitrend-aggregate` binaries.
//!
//! `anitrend-fetch` pulls the current trending page from AniList, writes the
//! run's snapshot files and plots the run. `anitrend-aggregate` tallies every
//! snapshot written so far and plots the totals.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod pipeline;

pub use error::*;
pub use pipeline::*;
