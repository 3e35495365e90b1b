use crate::core::picker::{lock, pick_random_character};
use crate::core::recent_cache::RecentSelectionCache;
use crate::domain::model::{AnimeInfo, CacheStatus, Character, Matchup};
use crate::domain::ports::{shuffle, CharacterSource, RandomSource};
use crate::utils::error::{Result, VsError};
use std::sync::Mutex;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Produces matchups of two distinct characters drawn from two distinct
/// anime. Owns the recent-selection cache and the random source.
pub struct MatchupSelector<S, R> {
    source: S,
    catalog: Vec<AnimeInfo>,
    cache: Mutex<RecentSelectionCache>,
    rng: Mutex<R>,
    max_attempts: u32,
}

impl<S: CharacterSource, R: RandomSource> MatchupSelector<S, R> {
    pub fn new(
        source: S,
        catalog: Vec<AnimeInfo>,
        cache: RecentSelectionCache,
        rng: R,
    ) -> Result<Self> {
        if catalog.len() < 2 {
            return Err(VsError::ConfigError {
                message: format!(
                    "A matchup needs at least two anime, catalog has {}",
                    catalog.len()
                ),
            });
        }

        Ok(Self {
            source,
            catalog,
            cache: Mutex::new(cache),
            rng: Mutex::new(rng),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        })
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn catalog(&self) -> &[AnimeInfo] {
        &self.catalog
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Two different catalog entries, sampled without replacement.
    pub fn choose_anime_pair(&self) -> (AnimeInfo, AnimeInfo) {
        let mut shuffled: Vec<&AnimeInfo> = self.catalog.iter().collect();
        shuffle(&mut shuffled, &mut *lock(&self.rng));
        (shuffled[0].clone(), shuffled[1].clone())
    }

    pub async fn pick_random_character(&self, anime: &AnimeInfo) -> Result<Character> {
        pick_random_character(&self.source, anime, &self.cache, &self.rng).await
    }

    pub async fn get_random_matchup(&self) -> Result<Matchup> {
        for attempt in 1..=self.max_attempts {
            let (first, second) = self.choose_anime_pair();
            tracing::debug!(
                "Attempt {}/{}: {} vs {}",
                attempt,
                self.max_attempts,
                first.name,
                second.name
            );

            // 兩邊同時抓取，等兩個都完成才判斷結果
            let (left, right) = tokio::join!(
                self.pick_random_character(&first),
                self.pick_random_character(&second)
            );
            let outcome = left.and_then(|left| right.map(|right| (left, right)));

            match outcome {
                Ok((left, right)) if left.id() != right.id() => {
                    let matchup = Matchup { left, right };
                    tracing::info!(
                        "⚔️ {} ({}) vs {} ({})",
                        matchup.left.name(),
                        matchup.left.anime(),
                        matchup.right.name(),
                        matchup.right.anime()
                    );
                    return Ok(matchup);
                }
                Ok((left, _)) => {
                    tracing::warn!(
                        "Attempt {}/{}: both sides drew character {}, retrying",
                        attempt,
                        self.max_attempts,
                        left.id()
                    );
                }
                Err(e) if attempt == self.max_attempts => {
                    tracing::error!("❌ Final matchup attempt failed: {}", e);
                    return Err(e);
                }
                Err(e) => {
                    tracing::warn!(
                        "Attempt {}/{} failed: {}, retrying",
                        attempt,
                        self.max_attempts,
                        e
                    );
                }
            }
        }

        Err(VsError::MatchupExhaustedError {
            attempts: self.max_attempts,
        })
    }

    pub fn clear_cache(&self) {
        lock(&self.cache).clear();
        tracing::info!("🧹 Recent character cache cleared");
    }

    pub fn cache_status(&self) -> CacheStatus {
        lock(&self.cache).status()
    }
}
