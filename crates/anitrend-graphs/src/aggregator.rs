//! Cross-run aggregation of snapshot files.
//!
//! Every file in the raw data directory whose name contains `animes` is read as
//! an anime snapshot and every file whose name contains `genre` as a genre
//! snapshot. Titles and genres are tallied into [`FrequencyTable`]s. Files are
//! visited in file-name order so repeated runs over the same directory produce
//! identical tables.

use crate::frequency::FrequencyTable;
use anitrend_common::{Result, ScoredAnime};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Kind of snapshot file, derived from its name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotKind {
    /// One scored anime per line
    Animes,
    /// One genre per line
    Genres,
}

impl SnapshotKind {
    /// Classify a file name. `animes` wins over `genre`; anything else is ignored.
    pub fn classify(file_name: &str) -> Option<Self> {
        if file_name.contains("animes") {
            Some(Self::Animes)
        } else if file_name.contains("genre") {
            Some(Self::Genres)
        } else {
            None
        }
    }
}

/// Title and score recovered from one anime snapshot line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAnimeLine {
    /// Anime title without the genre group
    pub title: String,
    /// Average score recorded for the run
    pub score: u32,
}

/// Parse one anime snapshot line.
///
/// JSON-lines records are decoded directly. Legacy text lines have the shape
/// `"<title> (<genres>) <score>"`: the last whitespace-separated token is the
/// score and the final parenthesised group is dropped from the title, so
/// `"Anime (Season 2) (Action) 70"` yields `"Anime (Season 2)"`.
///
/// Returns `None` for blank or unrecognisable lines and for records whose
/// title is empty, in either format.
pub fn parse_anime_line(line: &str) -> Option<ParsedAnimeLine> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (title, score) = if line.starts_with('{') {
        let record: ScoredAnime = serde_json::from_str(line).ok()?;
        (record.title.trim().to_string(), record.score)
    } else {
        let (label, score) = line.rsplit_once(char::is_whitespace)?;
        let score = score.parse().ok()?;
        (strip_genre_group(label.trim_end()).to_string(), score)
    };

    if title.is_empty() {
        return None;
    }

    Some(ParsedAnimeLine { title, score })
}

/// Drop a trailing `(...)` group that starts the label or follows whitespace.
fn strip_genre_group(label: &str) -> &str {
    if !label.ends_with(')') {
        return label;
    }
    label
        .match_indices('(')
        .rev()
        .find(|&(start, _)| start == 0 || label[..start].ends_with(char::is_whitespace))
        .map_or(label, |(start, _)| label[..start].trim_end())
}

/// Counts gathered across all snapshots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateCounts {
    /// Runs in which each title appeared
    pub anime_counts: FrequencyTable,
    /// Occurrences of each genre across runs
    pub genre_counts: FrequencyTable,
    /// Every distinct title seen
    pub titles: BTreeSet<String>,
    /// Snapshot files read successfully
    pub files_read: usize,
    /// Lines that could not be parsed
    pub lines_skipped: usize,
}

impl AggregateCounts {
    /// Whether neither table has any entry
    pub fn is_empty(&self) -> bool {
        self.anime_counts.is_empty() && self.genre_counts.is_empty()
    }

    fn add_anime_snapshot(&mut self, path: &Path, content: &str) {
        for (number, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_anime_line(line) {
                Some(parsed) => {
                    self.titles.insert(parsed.title.clone());
                    self.anime_counts.record(parsed.title);
                }
                None => {
                    self.lines_skipped += 1;
                    warn!(
                        path = %path.display(),
                        line = number + 1,
                        "Skipping unrecognised anime snapshot line"
                    );
                }
            }
        }
    }

    fn add_genre_snapshot(&mut self, content: &str) {
        self.genre_counts.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|genre| !genre.is_empty()),
        );
    }
}

/// Reads every snapshot in a raw data directory
#[derive(Debug, Clone)]
pub struct SnapshotAggregator {
    dir: PathBuf,
}

impl SnapshotAggregator {
    /// Aggregator over `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Snapshot files in `dir`, sorted by file name
    fn snapshot_files(&self) -> Result<Vec<(PathBuf, SnapshotKind)>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                debug!(path = %path.display(), "Skipping file with non UTF-8 name");
                continue;
            };
            match SnapshotKind::classify(name) {
                Some(kind) => files.push((path, kind)),
                None => debug!(path = %path.display(), "Ignoring non-snapshot file"),
            }
        }
        files.sort_by(|a, b| a.0.file_name().cmp(&b.0.file_name()));
        Ok(files)
    }

    /// Tally every snapshot in the directory.
    ///
    /// A missing directory yields empty counts. A file that cannot be read is
    /// skipped with a warning.
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    pub fn aggregate(&self) -> Result<AggregateCounts> {
        let mut counts = AggregateCounts::default();

        if !self.dir.is_dir() {
            warn!("Raw data directory does not exist, nothing to aggregate");
            return Ok(counts);
        }

        for (path, kind) in self.snapshot_files()? {
            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable snapshot");
                    continue;
                }
            };

            match kind {
                SnapshotKind::Animes => counts.add_anime_snapshot(&path, &content),
                SnapshotKind::Genres => counts.add_genre_snapshot(&content),
            }
            counts.files_read += 1;
            debug!(path = %path.display(), ?kind, "Read snapshot");
        }

        info!(
            files = counts.files_read,
            titles = counts.titles.len(),
            genres = counts.genre_counts.len(),
            "Aggregated snapshots"
        );
        Ok(counts)
    }
}
