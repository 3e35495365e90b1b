pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::jikan::{JikanClient, JikanOptions};
pub use adapters::random::{ScriptedRandom, StdRandom};
pub use config::AppConfig;
pub use crate::core::{recent_cache::RecentSelectionCache, selector::MatchupSelector, tally::VoteTally};
pub use domain::model::{AnimeInfo, CacheStatus, Character, Matchup};
pub use domain::ports::{CharacterSource, RandomSource};
pub use utils::error::{Result, VsError};
