//! Turns a raw trending payload into the per-run anime and genre sequences.

use crate::anilist::{Media, TrendingResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::{debug, info, warn};

/// One anime as returned by the trending query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimeRecord {
    /// Romaji title
    pub title: String,
    /// Genres in API order
    pub genres: Vec<String>,
    /// Average score in `0..=100`, absent when AniList has not scored it yet
    pub average_score: Option<u32>,
    /// Popularity as reported by AniList
    pub popularity: Option<u32>,
}

impl From<Media> for AnimeRecord {
    fn from(media: Media) -> Self {
        Self {
            title: media.title.romaji.unwrap_or_default(),
            genres: media.genres,
            average_score: media.average_score,
            popularity: media.popularity,
        }
    }
}

/// A scored anime kept for output. This is also the JSON-lines snapshot record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredAnime {
    /// Romaji title
    pub title: String,
    /// Average score
    pub score: u32,
    /// Genres in API order
    pub genres: Vec<String>,
}

impl ScoredAnime {
    /// Chart label: `"<title> (<genre>, <genre>)"`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.title, self.genres.join(", "))
    }
}

/// Legacy text snapshot line: `"<label> <score>"`.
impl fmt::Display for ScoredAnime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.label(), self.score)
    }
}

/// Output of processing one trending payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessedRun {
    /// Scored entries in trending order
    pub animes: Vec<ScoredAnime>,
    /// Genres of the scored entries, flattened and repeated per entry
    pub genres: Vec<String>,
}

impl ProcessedRun {
    /// True when there is nothing to write or plot.
    pub fn is_empty(&self) -> bool {
        self.animes.is_empty() && self.genres.is_empty()
    }

    /// The `(label, score)` pairs in trending order.
    pub fn labelled_scores(&self) -> Vec<(String, u32)> {
        self.animes.iter().map(|a| (a.label(), a.score)).collect()
    }
}

/// Extracts the scored entries and their genres from a raw payload.
///
/// Entries without a score are dropped together with their genres. A missing
/// or malformed payload produces an empty run and a log line; this never fails.
pub fn process_payload(payload: Option<&Value>) -> ProcessedRun {
    let Some(payload) = payload else {
        info!("No data to process.");
        return ProcessedRun::default();
    };

    let response = match TrendingResponse::deserialize(payload) {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "Trending payload has an unexpected shape; nothing to process");
            return ProcessedRun::default();
        }
    };

    let mut run = ProcessedRun::default();
    let mut skipped = 0usize;

    for record in response.data.page.media.into_iter().map(AnimeRecord::from) {
        let Some(score) = record.average_score else {
            debug!(title = %record.title, "Skipping entry without a score");
            skipped += 1;
            continue;
        };

        run.genres.extend(record.genres.iter().cloned());
        run.animes.push(ScoredAnime {
            title: record.title,
            score,
            genres: record.genres,
        });
    }

    info!(
        animes = run.animes.len(),
        genres = run.genres.len(),
        skipped,
        "Processed trending payload"
    );
    run
}
