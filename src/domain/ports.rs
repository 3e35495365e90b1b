use crate::domain::model::{AnimeInfo, Character};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Upstream roster lookup. Implementations return validated characters in
/// upstream order, already capped, or a typed error.
#[async_trait]
pub trait CharacterSource: Send + Sync {
    async fn fetch_characters(&self, anime: &AnimeInfo) -> Result<Vec<Character>>;
}

pub trait RandomSource: Send {
    /// Uniform index in `0..upper`. Callers never pass `upper == 0`.
    fn next_index(&mut self, upper: usize) -> usize;
}

/// Fisher-Yates shuffle driven by a `RandomSource`, so deterministic sources
/// give deterministic orderings.
pub fn shuffle<T, R: RandomSource + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.next_index(i + 1);
        items.swap(i, j);
    }
}
