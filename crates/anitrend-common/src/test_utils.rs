//! Test utilities and shared test helpers for anitrend.
//!
//! Available to unit tests in this crate and, through the `testing` feature, to
//! the other crates' test suites.

use crate::clock::FixedClock;
use chrono::NaiveDate;
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize logging for tests. Safe to call from every test.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// A clock pinned to 2025-01-02 03:04:05, i.e. run timestamp `02-01-2025T03h04m05s`.
pub fn fixed_clock() -> FixedClock {
    FixedClock(
        NaiveDate::from_ymd_opt(2025, 1, 2)
            .and_then(|d| d.and_hms_opt(3, 4, 5))
            .expect("valid fixture date"),
    )
}

/// Create a temporary directory for tests that automatically cleans up.
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Trending payload fixtures.
pub mod payload_fixtures {
    use serde_json::{json, Value};

    /// One media entry in AniList response shape.
    pub fn media(title: &str, score: Option<u32>, genres: &[&str]) -> Value {
        json!({
            "title": { "romaji": title },
            "averageScore": score,
            "popularity": 1000,
            "genres": genres,
        })
    }

    /// Wraps media entries into a full trending response.
    pub fn payload(media: Vec<Value>) -> Value {
        json!({ "data": { "Page": { "media": media } } })
    }

    /// `A` scored 80 with `Action`, `B` unscored with `Drama`.
    pub fn scenario_payload() -> Value {
        payload(vec![
            media("A", Some(80), &["Action"]),
            media("B", None, &["Drama"]),
        ])
    }

    /// A realistic full page of ten entries, one of them unscored.
    pub fn trending_page() -> Value {
        payload(vec![
            media("Sousou no Frieren", Some(91), &["Adventure", "Drama", "Fantasy"]),
            media("Kusuriya no Hitorigoto", Some(88), &["Drama", "Mystery"]),
            media("Dandadan", Some(84), &["Action", "Comedy", "Drama", "Romance", "Sci-Fi", "Supernatural"]),
            media("Ore dake Level Up na Ken", Some(82), &["Action", "Adventure", "Fantasy"]),
            media("Ao no Hako", Some(81), &["Romance", "Slice of Life", "Sports"]),
            media("Boku no Hero Academia FINAL SEASON", None, &["Action", "Adventure", "Comedy"]),
            media("Chainsaw Man", Some(85), &["Action", "Drama", "Horror", "Supernatural"]),
            media("Kaijuu 8-gou", Some(80), &["Action", "Sci-Fi"]),
            media("Re:Zero kara Hajimeru Isekai Seikatsu 3rd Season", Some(87), &["Action", "Drama", "Fantasy", "Psychological", "Thriller"]),
            media("One Piece", Some(88), &["Action", "Adventure", "Comedy", "Drama", "Fantasy"]),
        ])
    }
}

/// Minimal HTTP fixtures built on tokio sockets.
pub mod http {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serves exactly one HTTP response with `status` and `body`.
    ///
    /// Returns the base URL and a handle resolving to the raw request text.
    pub async fn serve_once(status: u16, body: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("listener address");

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept connection");
            let request = read_request(&mut socket).await;

            let reason = if status < 400 { "OK" } else { "Error" };
            let response = format!(
                "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket
                .write_all(response.as_bytes())
                .await
                .expect("write response");
            let _ = socket.shutdown().await;
            request
        });

        (format!("http://{addr}"), handle)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        loop {
            let n = socket.read(&mut chunk).await.expect("read request");
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }

        String::from_utf8_lossy(&buf).into_owned()
    }
}
