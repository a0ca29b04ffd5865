pub mod endpoints;
pub mod error;
pub mod http_client;
pub mod leaderboard;
pub mod poller;
pub mod profile;
pub mod rank;
pub mod settings;
