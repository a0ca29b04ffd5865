use std::fs;
use std::path::PathBuf;

use cops_info::error::FetchError;
use cops_info::profile::{PlayerProfile, parse_profile_document};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

const FULL_PAIRS: [(&str, &str); 10] = [
    ("userID", "8421337"),
    ("name", "'Shadow Strike'"),
    ("level", "87"),
    ("current_xp", "15200"),
    ("next_level_xp", "20000"),
    ("highest_rank", "9"),
    ("rating", "1764.5"),
    ("rank", "8"),
    ("tag", "'NVA'"),
    ("name", "'Nova Legion'"),
];

fn render_document(pairs: &[(&str, &str)]) -> String {
    let mut doc = String::from("array (\n  0 =>\n  array (\n");
    for (key, value) in pairs {
        doc.push_str(&format!("    '{key}' => {value},\n"));
    }
    doc.push_str("  ),\n)\n");
    doc
}

#[test]
fn parses_profile_fixture() {
    let raw = read_fixture("profile_document.txt");
    let profile = parse_profile_document(&raw).expect("fixture should parse");
    assert_eq!(profile.user_id, 8421337);
    assert_eq!(profile.level, 87);
    assert_eq!(profile.current_xp, 15200);
    assert_eq!(profile.next_level_xp, 20000);
    assert_eq!(profile.highest_rank, 9);
    assert_eq!(profile.rating, 1764.5);
    assert_eq!(profile.rank, 8);
    assert_eq!(profile.clan_tag, "NVA");
    assert_eq!(profile.clan_name, "Nova Legion");
}

#[test]
fn round_trips_inserted_values() {
    let doc = render_document(&FULL_PAIRS);
    let profile = parse_profile_document(&doc).expect("rendered document should parse");
    assert_eq!(
        profile,
        PlayerProfile {
            user_id: 8421337,
            level: 87,
            current_xp: 15200,
            next_level_xp: 20000,
            highest_rank: 9,
            rating: 1764.5,
            rank: 8,
            clan_tag: "NVA".to_string(),
            clan_name: "Nova Legion".to_string(),
        }
    );
}

#[test]
fn missing_any_pair_fails_whole_extraction() {
    for dropped in 0..FULL_PAIRS.len() {
        let pairs: Vec<(&str, &str)> = FULL_PAIRS
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != dropped)
            .map(|(_, pair)| *pair)
            .collect();
        let doc = render_document(&pairs);
        let err = parse_profile_document(&doc).expect_err("a dropped pair must fail extraction");
        let FetchError::ExtractionFailed { missing } = err else {
            panic!("expected ExtractionFailed, got {err:?}");
        };
        assert!(
            missing.contains(&FULL_PAIRS[dropped].0),
            "dropping {:?} should report it missing, got {missing:?}",
            FULL_PAIRS[dropped].0
        );
    }
}

#[test]
fn empty_document_reports_every_field() {
    let err = parse_profile_document("array ( )").expect_err("empty array must fail");
    let FetchError::ExtractionFailed { missing } = err else {
        panic!("expected ExtractionFailed, got {err:?}");
    };
    assert_eq!(missing.len(), 9);
    assert!(missing.contains(&"userID"));
    assert!(missing.contains(&"rating"));
    assert!(missing.contains(&"tag"));
    assert!(missing.contains(&"name"));
}

#[test]
fn integer_shaped_rating_is_missing() {
    let mut pairs = FULL_PAIRS;
    pairs[6] = ("rating", "1764");
    let err = parse_profile_document(&render_document(&pairs)).expect_err("rating needs a decimal");
    let FetchError::ExtractionFailed { missing } = err else {
        panic!("expected ExtractionFailed, got {err:?}");
    };
    assert_eq!(missing, vec!["rating"]);
}

#[test]
fn single_name_pair_leaves_clan_name_missing() {
    let pairs: Vec<(&str, &str)> = FULL_PAIRS[..9].to_vec();
    let err = parse_profile_document(&render_document(&pairs)).expect_err("clan name is required");
    let FetchError::ExtractionFailed { missing } = err else {
        panic!("expected ExtractionFailed, got {err:?}");
    };
    assert_eq!(missing, vec!["name"]);
}

#[test]
fn empty_clan_strings_are_allowed() {
    let mut pairs = FULL_PAIRS;
    pairs[8] = ("tag", "''");
    pairs[9] = ("name", "''");
    let profile = parse_profile_document(&render_document(&pairs)).expect("empty clan is valid");
    assert_eq!(profile.clan_tag, "");
    assert_eq!(profile.clan_name, "");
}

#[test]
fn xp_progress_clamps() {
    let mut profile = parse_profile_document(&render_document(&FULL_PAIRS)).expect("parse");
    assert!((profile.xp_progress() - 0.76).abs() < 1e-9);

    profile.current_xp = 30000;
    assert_eq!(profile.xp_progress(), 1.0);

    profile.next_level_xp = 0;
    assert_eq!(profile.xp_progress(), 0.0);
}
