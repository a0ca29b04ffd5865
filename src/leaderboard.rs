use reqwest::header::USER_AGENT;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::endpoints::leaderboard_url;
use crate::error::FetchError;
use crate::http_client::http_client;

/// Total fetch attempts when the body keeps arriving in an unsupported
/// shape. Transport errors and empty bodies abort on the first attempt.
const MAX_DECODE_ATTEMPTS: u32 = 3;

/// One row of the elite leaderboard. A `Vec` of these is the snapshot and
/// replaces any previous one wholesale; `rank` is the 1-based ordering key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub name: String,
    #[serde(default)]
    pub tag: Option<String>,
    pub rating: i64,
}

/// The caller's own standing in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelfRank {
    pub rating: i64,
    /// 1-based position in fetch order, 0 when the nickname is absent.
    pub position: usize,
}

pub fn fetch_leaderboard() -> Result<Vec<LeaderboardEntry>, FetchError> {
    fetch_leaderboard_with(fetch_leaderboard_body)
}

/// Decode policy over any body source: strict decode, lenient fallback, then
/// a bounded number of full re-fetches before giving up. Split out from the
/// HTTP layer so the retry behavior is testable without a server.
pub fn fetch_leaderboard_with<F>(mut fetch_body: F) -> Result<Vec<LeaderboardEntry>, FetchError>
where
    F: FnMut() -> Result<String, FetchError>,
{
    for attempt in 1..=MAX_DECODE_ATTEMPTS {
        let body = fetch_body()?;
        match parse_leaderboard_json(&body) {
            Ok(entries) => {
                debug!(rows = entries.len(), "leaderboard snapshot decoded");
                return Ok(entries);
            }
            Err(FetchError::DecodingFailed) => {
                warn!(attempt, "leaderboard body matched no supported shape");
            }
            Err(err) => return Err(err),
        }
    }
    Err(FetchError::DecodingFailed)
}

fn fetch_leaderboard_body() -> Result<String, FetchError> {
    let client = http_client()?;
    let resp = client
        .get(leaderboard_url())
        .header(USER_AGENT, "Mozilla/5.0")
        .send()?
        .error_for_status()?;
    let body = resp.text()?;
    if body.trim().is_empty() {
        return Err(FetchError::NoData);
    }
    Ok(body)
}

/// Strict typed decode first; on mismatch, a lenient pass over generic values
/// that tolerates numeric strings and null tags. Anything else is an
/// unsupported shape.
pub fn parse_leaderboard_json(raw: &str) -> Result<Vec<LeaderboardEntry>, FetchError> {
    if let Ok(entries) = serde_json::from_str::<Vec<LeaderboardEntry>>(raw) {
        return Ok(entries);
    }

    let Ok(value) = serde_json::from_str::<Value>(raw) else {
        return Err(FetchError::DecodingFailed);
    };
    let Some(rows) = value.as_array() else {
        return Err(FetchError::DecodingFailed);
    };

    let mut entries = Vec::with_capacity(rows.len());
    for row in rows {
        let Some(entry) = entry_from_value(row) else {
            return Err(FetchError::DecodingFailed);
        };
        entries.push(entry);
    }
    Ok(entries)
}

fn entry_from_value(row: &Value) -> Option<LeaderboardEntry> {
    let name = pick_string(row, "name")?;
    let rank = pick_u64(row, "rank")? as u32;
    let rating = pick_i64(row, "rating")?;
    let tag = pick_string(row, "tag");
    Some(LeaderboardEntry {
        rank,
        name,
        tag,
        rating,
    })
}

/// Rating and 1-based position for `nickname`, `(0, 0)` when absent. The
/// match is exact and case-sensitive, like the upstream list.
pub fn self_lookup(entries: &[LeaderboardEntry], nickname: &str) -> SelfRank {
    match entries.iter().position(|entry| entry.name == nickname) {
        Some(idx) => SelfRank {
            rating: entries[idx].rating,
            position: idx + 1,
        },
        None => SelfRank {
            rating: 0,
            position: 0,
        },
    }
}

/// Case-insensitive substring filter over entry names, sorted by ascending
/// rank. An empty search returns the snapshot untouched; a search that
/// matches nothing synthesizes a single zeroed row carrying the search text
/// so the caller always has something to show.
pub fn filter_entries(entries: &[LeaderboardEntry], search: &str) -> Vec<LeaderboardEntry> {
    if search.is_empty() {
        return entries.to_vec();
    }

    let needle = search.to_lowercase();
    let mut matches: Vec<LeaderboardEntry> = entries
        .iter()
        .filter(|entry| entry.name.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    if matches.is_empty() {
        return vec![LeaderboardEntry {
            rank: 0,
            name: search.to_string(),
            tag: None,
            rating: 0,
        }];
    }

    matches.sort_by_key(|entry| entry.rank);
    matches
}

fn pick_string(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.to_string()),
        _ => None,
    }
}

fn pick_u64(value: &Value, key: &str) -> Option<u64> {
    match value.get(key)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn pick_i64(value: &Value, key: &str) -> Option<i64> {
    match value.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
