use std::fs;
use std::path::PathBuf;

use cops_info::settings::{Settings, load_settings_from, save_settings_to};

fn temp_dir(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("cops_info_test_{}_{}", std::process::id(), name));
    path
}

#[test]
fn settings_round_trip() {
    let dir = temp_dir("round_trip");
    let path = dir.join("settings.json");
    let settings = Settings {
        nickname: "Shadow Strike".to_string(),
        elo: "1764".to_string(),
    };

    save_settings_to(&path, &settings).expect("save settings");
    assert_eq!(load_settings_from(&path), settings);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_file_loads_defaults() {
    let path = temp_dir("missing").join("settings.json");
    assert_eq!(load_settings_from(&path), Settings::default());
}

#[test]
fn unreadable_json_loads_defaults() {
    let dir = temp_dir("garbage");
    fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join("settings.json");
    fs::write(&path, "not json").expect("write garbage");

    assert_eq!(load_settings_from(&path), Settings::default());

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn partial_settings_fill_defaults() {
    let dir = temp_dir("partial");
    fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join("settings.json");
    fs::write(&path, r#"{"nickname":"Ace"}"#).expect("write partial settings");

    let loaded = load_settings_from(&path);
    assert_eq!(loaded.nickname, "Ace");
    assert_eq!(loaded.elo, "");

    fs::remove_dir_all(&dir).ok();
}
