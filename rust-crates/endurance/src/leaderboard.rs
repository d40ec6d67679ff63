use crate::champions::{
    ChampionInterval,
    EnduranceChampionResult,
};
use std::{
    cmp::Reverse,
    fmt,
};

/// Column a leaderboard is ranked by. Ranking is always descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    ChronoWarrior,
    ChampionTime,
}

/// Anything that can appear as a row on a champions leaderboard.
pub trait Standing {
    fn champion_time(&self) -> u64;
    fn chrono_warrior(&self) -> u64;
}

impl Standing for EnduranceChampionResult {
    fn champion_time(&self) -> u64 {
        self.champion_time
    }

    fn chrono_warrior(&self) -> u64 {
        self.chrono_warrior
    }
}

impl Standing for ChampionInterval {
    fn champion_time(&self) -> u64 {
        self.champion_time
    }

    fn chrono_warrior(&self) -> u64 {
        self.chrono_warrior
    }
}

impl SortKey {
    pub fn value(self, entry: &impl Standing) -> u64 {
        match self {
            SortKey::ChronoWarrior => entry.chrono_warrior(),
            SortKey::ChampionTime => entry.champion_time(),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::ChronoWarrior => "chrono-warrior",
            SortKey::ChampionTime => "champion-time",
        };
        write!(f, "{name}")
    }
}

/// Ranked copy of `entries`; equal values keep their crowning order.
pub fn sorted_by<T: Standing + Clone>(entries: &[T], key: SortKey) -> Vec<T> {
    let mut ranked = entries.to_vec();
    ranked.sort_by_key(|entry| Reverse(key.value(entry)));
    ranked
}

/// The reigning endurance champion is the last one crowned.
pub fn current_champion(
    results: &[EnduranceChampionResult],
) -> Option<&EnduranceChampionResult> {
    results.last()
}

pub fn chrono_warrior_leader(
    results: &[EnduranceChampionResult],
) -> Option<&EnduranceChampionResult> {
    results
        .iter()
        .fold(None, |leader: Option<&EnduranceChampionResult>, result| {
            match leader {
                Some(best) if best.chrono_warrior >= result.chrono_warrior => Some(best),
                _ => Some(result),
            }
        })
}
