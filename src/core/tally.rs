use crate::domain::model::{Character, Matchup};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TallyEntry {
    pub character: Character,
    pub wins: u32,
}

/// Session-scoped win counts. Entries are never removed or decremented.
#[derive(Debug, Default)]
pub struct VoteTally {
    entries: HashMap<u64, TallyEntry>,
}

impl VoteTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// 角色第一次出場時以 0 勝登錄
    pub fn register_matchup(&mut self, matchup: &Matchup) {
        self.register(&matchup.left);
        self.register(&matchup.right);
    }

    fn register(&mut self, character: &Character) -> &mut TallyEntry {
        self.entries
            .entry(character.id())
            .or_insert_with(|| TallyEntry {
                character: character.clone(),
                wins: 0,
            })
    }

    /// Count one win for `winner`, returning its new total.
    pub fn record_vote(&mut self, winner: &Character) -> u32 {
        let entry = self.register(winner);
        entry.wins += 1;
        entry.wins
    }

    pub fn wins(&self, character_id: u64) -> u32 {
        self.entries
            .get(&character_id)
            .map(|entry| entry.wins)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most wins first; ties ordered by character id.
    pub fn standings(&self) -> Vec<&TallyEntry> {
        let mut standings: Vec<&TallyEntry> = self.entries.values().collect();
        standings.sort_by(|a, b| {
            b.wins
                .cmp(&a.wins)
                .then_with(|| a.character.id().cmp(&b.character.id()))
        });
        standings
    }
}
