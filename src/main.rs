use std::env;
use std::sync::mpsc::Receiver;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};

use cops_info::leaderboard::{self, LeaderboardEntry};
use cops_info::poller::{PollUpdate, spawn_poller};
use cops_info::profile::{self, PlayerProfile};
use cops_info::rank::rank_label;
use cops_info::settings::{self, Settings};

const TICK: Duration = Duration::from_millis(250);
const TOP_ROWS: usize = 10;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    tracing_subscriber::fmt::init();

    let mut settings = settings::load_settings();
    if let Some(nickname) = opt_env("COPS_NICKNAME") {
        if nickname != settings.nickname {
            settings.nickname = nickname;
            if let Err(err) = settings::save_settings(&settings) {
                warn!("failed to persist nickname: {err:#}");
            }
        }
    }
    if settings.nickname.is_empty() {
        info!("no nickname set; profile fetches will query an empty name (set COPS_NICKNAME)");
    }

    let profile_interval = poll_secs("PROFILE_POLL_SECS", 60);
    let leaderboard_interval = poll_secs("LEADERBOARD_POLL_SECS", 60);

    let nickname = settings.nickname.clone();
    let (_profile_handle, profile_rx) =
        spawn_poller(profile_interval, move || profile::fetch_profile(&nickname));
    let (_leaderboard_handle, leaderboard_rx) =
        spawn_poller(leaderboard_interval, leaderboard::fetch_leaderboard);

    run_watch(&mut settings, profile_rx, leaderboard_rx)
}

fn run_watch(
    settings: &mut Settings,
    profile_rx: Receiver<PollUpdate<PlayerProfile>>,
    leaderboard_rx: Receiver<PollUpdate<Vec<LeaderboardEntry>>>,
) -> Result<()> {
    let mut profile_generation = 0u64;
    let mut leaderboard_generation = 0u64;

    loop {
        while let Ok(update) = profile_rx.try_recv() {
            if update.generation <= profile_generation {
                continue;
            }
            profile_generation = update.generation;
            match update.result {
                Ok(profile) => print_profile(&settings.nickname, &profile),
                // Keep showing the last-known-good profile.
                Err(err) => warn!("profile fetch failed: {err}"),
            }
        }

        while let Ok(update) = leaderboard_rx.try_recv() {
            if update.generation <= leaderboard_generation {
                continue;
            }
            leaderboard_generation = update.generation;
            match update.result {
                Ok(entries) => {
                    print_leaderboard(&settings.nickname, &entries);
                    remember_elo(settings, &entries);
                }
                Err(err) => warn!("leaderboard fetch failed: {err}"),
            }
        }

        thread::sleep(TICK);
    }
}

fn print_profile(nickname: &str, profile: &PlayerProfile) {
    let shown = if nickname.is_empty() {
        "<no nickname>"
    } else {
        nickname
    };
    println!("== {} (user {}) ==", shown, profile.user_id);
    println!(
        "level {} | {}/{} xp ({:.0}%)",
        profile.level,
        profile.current_xp,
        profile.next_level_xp,
        profile.xp_progress() * 100.0
    );
    println!(
        "rating {:.0} | rank {} | highest {}",
        profile.rating,
        rank_label(profile.rank),
        rank_label(profile.highest_rank)
    );
    if !profile.clan_tag.is_empty() || !profile.clan_name.is_empty() {
        println!("clan [{}] {}", profile.clan_tag, profile.clan_name);
    }
}

fn print_leaderboard(nickname: &str, entries: &[LeaderboardEntry]) {
    println!("== elite leaderboard ==");
    for entry in entries.iter().take(TOP_ROWS) {
        let tag = entry.tag.as_deref().unwrap_or("");
        println!("{:>4}  {:<20} {:>6}  {}", entry.rank, entry.name, entry.rating, tag);
    }

    let standing = leaderboard::self_lookup(entries, nickname);
    if standing.position != 0 {
        println!("you: #{} at {} elo", standing.position, standing.rating);
    } else if !nickname.is_empty() {
        println!("you: not on the board");
    }
}

fn remember_elo(settings: &mut Settings, entries: &[LeaderboardEntry]) {
    let standing = leaderboard::self_lookup(entries, &settings.nickname);
    let elo = standing.rating.to_string();
    if elo != settings.elo {
        settings.elo = elo;
        if let Err(err) = settings::save_settings(settings) {
            warn!("failed to persist elo: {err:#}");
        }
    }
}

fn poll_secs(key: &str, default_secs: u64) -> Duration {
    Duration::from_secs(
        env::var(key)
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(default_secs)
            .max(10),
    )
}

fn opt_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .and_then(|val| if val.trim().is_empty() { None } else { Some(val) })
}
