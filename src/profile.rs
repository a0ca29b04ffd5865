use reqwest::header::USER_AGENT;
use tracing::debug;

use crate::endpoints::profile_base_url;
use crate::error::FetchError;
use crate::http_client::http_client;

/// Snapshot of one player as reported by the profile endpoint. Rebuilt in
/// full on every fetch; `user_id` is the only identity.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerProfile {
    pub user_id: u64,
    pub level: u32,
    pub current_xp: u64,
    pub next_level_xp: u64,
    pub highest_rank: u32,
    pub rating: f64,
    pub rank: u32,
    pub clan_tag: String,
    pub clan_name: String,
}

impl PlayerProfile {
    /// Level progress in [0, 1]. The endpoint does not guarantee
    /// `current_xp <= next_level_xp`, so the ratio clamps.
    pub fn xp_progress(&self) -> f64 {
        if self.next_level_xp == 0 {
            return 0.0;
        }
        (self.current_xp as f64 / self.next_level_xp as f64).clamp(0.0, 1.0)
    }
}

pub fn fetch_profile(name: &str) -> Result<PlayerProfile, FetchError> {
    let client = http_client()?;
    let url = format!("{}?usernames={}", profile_base_url(), encode_username(name));
    debug!(%url, "fetching profile");

    let resp = client
        .get(&url)
        .header(USER_AGENT, "Mozilla/5.0")
        .send()?
        .error_for_status()?;
    let body = resp.text()?;
    if body.trim().is_empty() {
        return Err(FetchError::NoData);
    }
    parse_profile_document(&body)
}

/// The profile endpoint expects spaces as %20; everything else passes through
/// verbatim, including an empty name.
pub fn encode_username(name: &str) -> String {
    name.replace(' ', "%20")
}

/// Extracts the nine required fields from a profile document.
///
/// The body is PHP-array-literal-like text, not JSON. Every `'key' => value,`
/// pair is scanned in document order and the fields are resolved against that
/// pair list. Extraction is all-or-nothing: any missing field fails the whole
/// document and the error carries the full set of absent fields.
pub fn parse_profile_document(body: &str) -> Result<PlayerProfile, FetchError> {
    let pairs = scan_pairs(body);
    let mut missing = Vec::new();

    let user_id = int_field(&pairs, "userID", &mut missing);
    let level = int_field(&pairs, "level", &mut missing);
    let current_xp = int_field(&pairs, "current_xp", &mut missing);
    let next_level_xp = int_field(&pairs, "next_level_xp", &mut missing);
    let highest_rank = int_field(&pairs, "highest_rank", &mut missing);
    let rating = float_field(&pairs, "rating", &mut missing);
    let rank = int_field(&pairs, "rank", &mut missing);
    let clan_tag = quoted_field(&pairs, "tag", 1, &mut missing);
    // The first `name` pair is the player's own name; the clan block appears
    // later in the document and supplies the second.
    let clan_name = quoted_field(&pairs, "name", 2, &mut missing);

    if !missing.is_empty() {
        return Err(FetchError::ExtractionFailed { missing });
    }

    Ok(PlayerProfile {
        user_id: user_id.unwrap_or_default(),
        level: level.unwrap_or_default() as u32,
        current_xp: current_xp.unwrap_or_default(),
        next_level_xp: next_level_xp.unwrap_or_default(),
        highest_rank: highest_rank.unwrap_or_default() as u32,
        rating: rating.unwrap_or_default(),
        rank: rank.unwrap_or_default() as u32,
        clan_tag: clan_tag.unwrap_or_default(),
        clan_name: clan_name.unwrap_or_default(),
    })
}

#[derive(Debug, Clone, PartialEq)]
enum PairValue {
    Int(u64),
    Float(f64),
    Quoted(String),
}

/// Scans every `'key' => value,` pair in document order, where value is a
/// bare integer, a bare decimal, or a single-quoted string ending at the next
/// quote. Text that does not fit the grammar is skipped, never an error.
fn scan_pairs(doc: &str) -> Vec<(String, PairValue)> {
    let mut pairs = Vec::new();
    let mut rest = doc;

    while let Some(open) = rest.find('\'') {
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find('\'') else {
            break;
        };
        let key = &after_open[..close];
        let tail = &after_open[close + 1..];

        match scan_value(tail) {
            Some((value, consumed)) => {
                pairs.push((key.to_string(), value));
                rest = &tail[consumed..];
            }
            // Not a pair; the quote we took as a key opener may close mid-text
            // (apostrophes), so resume right after it.
            None => rest = after_open,
        }
    }

    pairs
}

/// Parses ` => value,` and returns the value plus the bytes consumed. The
/// trailing comma is part of the grammar; a pair without one does not count.
fn scan_value(input: &str) -> Option<(PairValue, usize)> {
    let trimmed = input.trim_start();
    let mut offset = input.len() - trimmed.len();
    let trimmed = trimmed.strip_prefix("=>")?;
    offset += 2;
    let body = trimmed.trim_start();
    offset += trimmed.len() - body.len();

    if let Some(quoted) = body.strip_prefix('\'') {
        let end = quoted.find('\'')?;
        let after = &quoted[end + 1..];
        after.strip_prefix(',')?;
        let value = PairValue::Quoted(quoted[..end].to_string());
        return Some((value, offset + end + 3));
    }

    let end = body.find(',')?;
    let token = &body[..end];
    let consumed = offset + end + 1;

    if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
        return Some((PairValue::Int(token.parse().ok()?), consumed));
    }

    let (int_part, frac_part) = token.split_once('.')?;
    if !int_part.is_empty()
        && !frac_part.is_empty()
        && int_part.bytes().all(|b| b.is_ascii_digit())
        && frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Some((PairValue::Float(token.parse().ok()?), consumed));
    }

    None
}

fn int_field(
    pairs: &[(String, PairValue)],
    key: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<u64> {
    let found = pairs.iter().find_map(|(k, v)| match v {
        PairValue::Int(n) if k == key => Some(*n),
        _ => None,
    });
    if found.is_none() {
        missing.push(key);
    }
    found
}

fn float_field(
    pairs: &[(String, PairValue)],
    key: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<f64> {
    let found = pairs.iter().find_map(|(k, v)| match v {
        PairValue::Float(n) if k == key => Some(*n),
        _ => None,
    });
    if found.is_none() {
        missing.push(key);
    }
    found
}

fn quoted_field(
    pairs: &[(String, PairValue)],
    key: &'static str,
    occurrence: usize,
    missing: &mut Vec<&'static str>,
) -> Option<String> {
    let found = pairs
        .iter()
        .filter_map(|(k, v)| match v {
            PairValue::Quoted(s) if k == key => Some(s.clone()),
            _ => None,
        })
        .nth(occurrence - 1);
    if found.is_none() {
        missing.push(key);
    }
    found
}
