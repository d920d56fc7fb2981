//! Integration tests for anitrend-common.
//!
//! These exercise the payload → processed run → snapshot files path the fetch
//! stage is built on.

use anitrend_common::{
    format_run_timestamp, process_payload, Clock, FixedClock, SnapshotFormat, SnapshotWriter,
};
use chrono::NaiveDate;
use serde_json::json;
use std::fs;

fn payload() -> serde_json::Value {
    json!({
        "data": {
            "Page": {
                "media": [
                    {"title": {"romaji": "Sousou no Frieren"}, "averageScore": 91, "popularity": 400000,
                     "genres": ["Adventure", "Drama", "Fantasy"]},
                    {"title": {"romaji": "Unscored Premiere"}, "averageScore": null, "popularity": 12,
                     "genres": ["Comedy", "Slice of Life"]},
                    {"title": {"romaji": "Dandadan"}, "averageScore": 84, "popularity": 300000,
                     "genres": ["Action", "Comedy"]}
                ]
            }
        }
    })
}

#[test]
fn test_payload_to_snapshot_files() {
    let dir = tempfile::tempdir().unwrap();
    let clock = FixedClock(
        NaiveDate::from_ymd_opt(2024, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 58)
            .unwrap(),
    );
    let timestamp = format_run_timestamp(clock.now());
    assert_eq!(timestamp, "31-12-2024T23h59m58s");

    let payload = payload();
    let run = process_payload(Some(&payload));
    assert_eq!(run.animes.len(), 2);
    assert_eq!(run.genres.len(), 5);

    let writer = SnapshotWriter::new(dir.path().join("raw-data"), SnapshotFormat::Text);
    let written = writer.write_run(&run, &timestamp).unwrap();

    let anime_path = written.animes.unwrap();
    assert!(anime_path.ends_with("animes-31-12-2024T23h59m58s.txt"));
    let anime_lines = fs::read_to_string(&anime_path).unwrap();
    assert_eq!(
        anime_lines.lines().collect::<Vec<_>>(),
        vec![
            "Sousou no Frieren (Adventure, Drama, Fantasy) 91",
            "Dandadan (Action, Comedy) 84",
        ]
    );

    let genre_lines = fs::read_to_string(written.genres.unwrap()).unwrap();
    assert_eq!(
        genre_lines.lines().collect::<Vec<_>>(),
        vec!["Adventure", "Drama", "Fantasy", "Action", "Comedy"]
    );
}

#[test]
fn test_empty_payload_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let payload = json!({"data": {"Page": {"media": []}}});

    let run = process_payload(Some(&payload));
    let written = SnapshotWriter::new(dir.path(), SnapshotFormat::JsonLines)
        .write_run(&run, "ts")
        .unwrap();

    assert!(written.animes.is_none());
    assert!(written.genres.is_none());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}
