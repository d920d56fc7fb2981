//! # Anitrend Common
//!
//! Shared types, utilities, and common functionality for anitrend.
//!
//! This crate provides the foundational pieces used by every other crate in the
//! workspace: the error type, logging bootstrap, the injectable clock, the
//! AniList GraphQL client, payload processing and the run snapshot writer.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod anilist;
pub mod clock;
pub mod error;
pub mod logging;
pub mod processor;
pub mod snapshot;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

// Re-export commonly used types
pub use anilist::{
    AniListClient, AniListConfig, Media, MediaTitle, Page, TrendingData, TrendingResponse,
    TrendingSource, DEFAULT_ANILIST_ENDPOINT, DEFAULT_PER_PAGE, TRENDING_QUERY,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{AnitrendError, Result};
pub use logging::{init_default_logging, init_logging, LoggingConfig};
pub use processor::{process_payload, AnimeRecord, ProcessedRun, ScoredAnime};
pub use snapshot::{write_lines, SnapshotFormat, SnapshotPaths, SnapshotWriter, WrittenSnapshot};
pub use utils::*;
