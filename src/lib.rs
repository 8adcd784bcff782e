pub mod catalog;
pub mod config;
pub mod contact;
pub mod github;
pub mod stats;
pub mod svg;

pub use config::Config;
pub use github::GithubClient;
pub use stats::{FetchPhase, ProfileStats, StatsLoader, StatsState};
