use std::env;

const PROFILE_BASE_URL: &str = "https://api-cops.criticalforce.fi/api/public/profile";
const LEADERBOARD_URL: &str = "https://default.prod.copsapi.criticalforce.fi/api/leaderboard/elite";

pub fn profile_base_url() -> String {
    opt_env("COPS_PROFILE_URL").unwrap_or_else(|| PROFILE_BASE_URL.to_string())
}

pub fn leaderboard_url() -> String {
    opt_env("COPS_LEADERBOARD_URL").unwrap_or_else(|| LEADERBOARD_URL.to_string())
}

fn opt_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .and_then(|val| if val.trim().is_empty() { None } else { Some(val) })
}
