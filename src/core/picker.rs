use crate::core::recent_cache::RecentSelectionCache;
use crate::domain::model::{AnimeInfo, Character};
use crate::domain::ports::{CharacterSource, RandomSource};
use crate::utils::error::{Result, VsError};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// The guarded values stay consistent even if a holder panicked, so a
/// poisoned lock is recovered instead of propagated.
pub(crate) fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Fetch the roster for `anime` and draw one character, preferring ones not
/// in the recent cache. The chosen id is registered with the cache.
pub async fn pick_random_character<S, R>(
    source: &S,
    anime: &AnimeInfo,
    cache: &Mutex<RecentSelectionCache>,
    rng: &Mutex<R>,
) -> Result<Character>
where
    S: CharacterSource + ?Sized,
    R: RandomSource + ?Sized,
{
    let characters = source.fetch_characters(anime).await?;
    if characters.is_empty() {
        return Err(VsError::EmptyResultError {
            anime: anime.name.clone(),
        });
    }

    let mut cache = lock(cache);
    let fresh: Vec<&Character> = characters.iter().filter(|c| !cache.has(c.id())).collect();

    // 全部都在快取裡時退回完整名單，避免小作品無角色可選
    let pool = if fresh.is_empty() {
        tracing::debug!(
            "All {} {} characters are recent, falling back to the full roster",
            characters.len(),
            anime.name
        );
        characters.iter().collect()
    } else {
        fresh
    };

    let index = lock(rng).next_index(pool.len());
    let chosen = pool[index].clone();
    cache.add(chosen.id());

    tracing::debug!(
        "Picked {} ({}) from {} candidates for {}",
        chosen.name(),
        chosen.id(),
        pool.len(),
        anime.name
    );
    Ok(chosen)
}
