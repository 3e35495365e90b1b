pub mod picker;
pub mod recent_cache;
pub mod selector;
pub mod tally;

pub use crate::domain::model::{AnimeInfo, CacheStatus, Character, Matchup};
pub use crate::domain::ports::{CharacterSource, RandomSource};
pub use crate::utils::error::Result;
