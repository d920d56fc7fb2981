//! Run snapshot files.
//!
//! Every fetch run leaves two immutable files in the raw data directory: one
//! line per scored anime and one line per genre occurrence. The anime file is
//! JSON lines by default; the legacy `"Title (Genre, Genre) score"` text form is
//! still available for compatibility with older snapshot directories.

use crate::error::{AnitrendError, Result};
use crate::processor::ProcessedRun;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Encoding of the anime snapshot file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotFormat {
    /// One JSON object per line: `{"title":…,"score":…,"genres":[…]}`
    #[default]
    #[serde(rename = "jsonl")]
    JsonLines,
    /// One `"<title> (<genres>) <score>"` line per anime
    Text,
}

impl SnapshotFormat {
    /// File extension used for the anime snapshot.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::JsonLines => "jsonl",
            Self::Text => "txt",
        }
    }
}

impl std::str::FromStr for SnapshotFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jsonl" | "json" | "json-lines" => Ok(Self::JsonLines),
            "text" | "txt" => Ok(Self::Text),
            other => Err(format!("unknown snapshot format '{other}'")),
        }
    }
}

/// File names of one run's snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotPaths {
    /// `animes-<timestamp>.<ext>`
    pub animes: PathBuf,
    /// `genre-<timestamp>.txt`
    pub genres: PathBuf,
}

impl SnapshotPaths {
    /// Paths for the run stamped `timestamp` inside `dir`.
    pub fn for_run(dir: &Path, timestamp: &str, format: SnapshotFormat) -> Self {
        Self {
            animes: dir.join(format!("animes-{timestamp}.{}", format.extension())),
            genres: dir.join(format!("genre-{timestamp}.txt")),
        }
    }
}

/// Files actually written for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrittenSnapshot {
    /// Anime snapshot, if there were scored entries
    pub animes: Option<PathBuf>,
    /// Genre snapshot, if there were genres
    pub genres: Option<PathBuf>,
}

/// Writes `items` to `path`, one per line.
///
/// Parent directories are created as needed and an existing file is replaced.
/// Returns the number of lines written.
pub fn write_lines<P, I, T>(path: P, items: I) -> Result<usize>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = T>,
    T: Display,
{
    let path = path.as_ref();
    let count = write_lines_inner(path, items)
        .map_err(|e| AnitrendError::snapshot_at("Cannot write snapshot", path, e))?;

    debug!(path = %path.display(), lines = count, "Wrote snapshot file");
    Ok(count)
}

fn write_lines_inner<I, T>(path: &Path, items: I) -> std::io::Result<usize>
where
    I: IntoIterator<Item = T>,
    T: Display,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    let mut count = 0;
    for item in items {
        writeln!(writer, "{item}")?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

/// Persists processed runs into a raw data directory.
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    dir: PathBuf,
    format: SnapshotFormat,
}

impl SnapshotWriter {
    /// Create a writer targeting `dir`.
    pub fn new(dir: impl Into<PathBuf>, format: SnapshotFormat) -> Self {
        Self {
            dir: dir.into(),
            format,
        }
    }

    /// Write both snapshot files for `run`. Empty sequences produce no file.
    pub fn write_run(&self, run: &ProcessedRun, timestamp: &str) -> Result<WrittenSnapshot> {
        let paths = SnapshotPaths::for_run(&self.dir, timestamp, self.format);
        let mut written = WrittenSnapshot::default();

        if !run.animes.is_empty() {
            let lines = match self.format {
                SnapshotFormat::JsonLines => run
                    .animes
                    .iter()
                    .map(serde_json::to_string)
                    .collect::<std::result::Result<Vec<_>, _>>()?,
                SnapshotFormat::Text => run.animes.iter().map(ToString::to_string).collect(),
            };
            write_lines(&paths.animes, lines)?;
            info!(path = %paths.animes.display(), count = run.animes.len(), "Saved anime snapshot");
            written.animes = Some(paths.animes);
        }

        if !run.genres.is_empty() {
            write_lines(&paths.genres, &run.genres)?;
            info!(path = %paths.genres.display(), count = run.genres.len(), "Saved genre snapshot");
            written.genres = Some(paths.genres);
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::ScoredAnime;
    use tempfile::tempdir;

    fn sample_run() -> ProcessedRun {
        ProcessedRun {
            animes: vec![
                ScoredAnime {
                    title: "Naruto".to_string(),
                    score: 85,
                    genres: vec!["Action".to_string(), "Adventure".to_string()],
                },
                ScoredAnime {
                    title: "Mushishi".to_string(),
                    score: 87,
                    genres: vec!["Mystery".to_string()],
                },
            ],
            genres: vec![
                "Action".to_string(),
                "Adventure".to_string(),
                "Mystery".to_string(),
            ],
        }
    }

    #[test]
    fn test_write_lines_creates_parents_and_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("out.txt");

        assert_eq!(write_lines(&path, ["a", "b", "c"]).unwrap(), 3);
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb\nc\n");

        assert_eq!(write_lines(&path, [1, 2]).unwrap(), 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), "1\n2\n");
    }

    #[test]
    fn test_write_lines_reports_failing_path() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("raw-data");
        fs::write(&blocker, "not a directory").unwrap();
        let target = blocker.join("genre-ts.txt");

        let err = write_lines(&target, ["Action"]).unwrap_err();
        match err {
            AnitrendError::Snapshot { path, .. } => assert_eq!(path, target),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_paths_follow_naming_scheme() {
        let paths = SnapshotPaths::for_run(
            Path::new("raw-data"),
            "02-01-2025T03h04m05s",
            SnapshotFormat::Text,
        );
        assert_eq!(paths.animes, Path::new("raw-data/animes-02-01-2025T03h04m05s.txt"));
        assert_eq!(paths.genres, Path::new("raw-data/genre-02-01-2025T03h04m05s.txt"));

        let jsonl = SnapshotPaths::for_run(Path::new("raw-data"), "ts", SnapshotFormat::JsonLines);
        assert_eq!(jsonl.animes, Path::new("raw-data/animes-ts.jsonl"));
    }

    #[test]
    fn test_write_run_line_counts_match_run() {
        let dir = tempdir().unwrap();
        let run = sample_run();

        for format in [SnapshotFormat::JsonLines, SnapshotFormat::Text] {
            let writer = SnapshotWriter::new(dir.path(), format);
            let written = writer.write_run(&run, "ts").unwrap();

            let animes = fs::read_to_string(written.animes.unwrap()).unwrap();
            let genres = fs::read_to_string(written.genres.unwrap()).unwrap();
            assert_eq!(animes.lines().count(), run.animes.len());
            assert_eq!(genres.lines().count(), run.genres.len());
        }
    }

    #[test]
    fn test_jsonl_lines_decode_back_to_records() {
        let dir = tempdir().unwrap();
        let run = sample_run();
        let written = SnapshotWriter::new(dir.path(), SnapshotFormat::JsonLines)
            .write_run(&run, "ts")
            .unwrap();

        let content = fs::read_to_string(written.animes.unwrap()).unwrap();
        let decoded: Vec<ScoredAnime> = content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(decoded, run.animes);
    }

    #[test]
    fn test_text_format_writes_legacy_lines() {
        let dir = tempdir().unwrap();
        let written = SnapshotWriter::new(dir.path(), SnapshotFormat::Text)
            .write_run(&sample_run(), "ts")
            .unwrap();

        let content = fs::read_to_string(written.animes.unwrap()).unwrap();
        assert_eq!(
            content,
            "Naruto (Action, Adventure) 85\nMushishi (Mystery) 87\n"
        );
    }

    #[test]
    fn test_empty_run_writes_nothing() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("raw-data");
        let written = SnapshotWriter::new(&target, SnapshotFormat::JsonLines)
            .write_run(&ProcessedRun::default(), "ts")
            .unwrap();

        assert_eq!(written, WrittenSnapshot::default());
        assert!(!target.exists());
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("jsonl".parse::<SnapshotFormat>(), Ok(SnapshotFormat::JsonLines));
        assert_eq!("TEXT".parse::<SnapshotFormat>(), Ok(SnapshotFormat::Text));
        assert!("csv".parse::<SnapshotFormat>().is_err());
    }
}
