use crate::{
    bids::BidRecord,
    clock::Clock,
};
use itertools::Itertools;
use serde::{
    Deserialize,
    Serialize,
};

#[cfg(test)]
mod tests;

/// A stretch of round history during which `address` held the record for the
/// longest wait between a bid and the one following it (or the round end).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampionInterval {
    pub address: String,
    pub champion_time: u64,
    pub start_time: u64,
    pub end_time: u64,
    pub chrono_warrior: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnduranceChampionResult {
    pub bidder: String,
    pub champion_time: u64,
    pub chrono_warrior: u64,
}

impl From<ChampionInterval> for EnduranceChampionResult {
    fn from(interval: ChampionInterval) -> Self {
        Self {
            bidder: interval.address,
            champion_time: interval.champion_time,
            chrono_warrior: interval.chrono_warrior,
        }
    }
}

/// Calculator bound to a clock, so call sites that track a live round don't
/// have to sample the time themselves.
#[derive(Debug, Clone)]
pub struct EnduranceChampionCalculator<C> {
    clock: C,
}

impl<C: Clock> EnduranceChampionCalculator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn effective_end(&self, round_end: Option<u64>) -> u64 {
        effective_end(round_end, &self.clock)
    }

    pub fn compute(
        &self,
        bids: &[BidRecord],
        round_end: Option<u64>,
    ) -> Vec<EnduranceChampionResult> {
        compute_endurance_champions(bids, round_end, &self.clock)
    }

    pub fn intervals(
        &self,
        bids: &[BidRecord],
        round_end: Option<u64>,
    ) -> Vec<ChampionInterval> {
        champion_intervals(bids, self.effective_end(round_end))
    }
}

/// A missing or zero round end means the round is still live.
pub fn effective_end(round_end: Option<u64>, clock: &impl Clock) -> u64 {
    match round_end {
        Some(end) if end > 0 => end,
        _ => clock.now(),
    }
}

pub fn compute_endurance_champions(
    bids: &[BidRecord],
    round_end: Option<u64>,
    clock: &impl Clock,
) -> Vec<EnduranceChampionResult> {
    compute_endurance_champions_at(bids, effective_end(round_end, clock))
}

/// Results come back in the order champions were crowned, not ranked.
pub fn compute_endurance_champions_at(
    bids: &[BidRecord],
    effective_end: u64,
) -> Vec<EnduranceChampionResult> {
    let results: Vec<EnduranceChampionResult> = champion_intervals(bids, effective_end)
        .into_iter()
        .map(Into::into)
        .collect();
    tracing::debug!(
        "computed {} endurance champions from {} bids (end {})",
        results.len(),
        bids.len(),
        effective_end
    );
    results
}

pub fn champion_intervals(
    bids: &[BidRecord],
    effective_end: u64,
) -> Vec<ChampionInterval> {
    let mut sorted: Vec<&BidRecord> = bids.iter().collect();
    // stable: equal timestamps keep their input order
    sorted.sort_by_key(|bid| bid.timestamp);

    let Some(last) = sorted.last().copied() else {
        return Vec::new();
    };

    if sorted.len() == 1 {
        return vec![ChampionInterval {
            address: last.bidder.clone(),
            champion_time: effective_end.saturating_sub(last.timestamp),
            start_time: last.timestamp,
            end_time: effective_end,
            chrono_warrior: 0,
        }];
    }

    let mut intervals = Vec::new();
    for (prev, cur) in sorted.iter().tuple_windows() {
        crown_if_longer(&mut intervals, prev, cur.timestamp);
    }
    crown_if_longer(&mut intervals, last, effective_end);
    assign_chrono_warrior(&mut intervals, effective_end);
    intervals
}

fn crown_if_longer(intervals: &mut Vec<ChampionInterval>, bid: &BidRecord, end_time: u64) {
    // a round end before the bid counts as a zero wait
    let champion_time = end_time.saturating_sub(bid.timestamp);
    let is_record = intervals
        .last()
        .is_none_or(|longest| champion_time > longest.champion_time);
    if is_record {
        intervals.push(ChampionInterval {
            address: bid.bidder.clone(),
            champion_time,
            start_time: bid.timestamp,
            end_time,
            chrono_warrior: 0,
        });
    }
}

fn assign_chrono_warrior(intervals: &mut [ChampionInterval], effective_end: u64) {
    let durations: Vec<u64> = (0..intervals.len())
        .map(|i| {
            let current = &intervals[i];
            let chrono_start = match i.checked_sub(1).map(|p| &intervals[p]) {
                Some(prev) => current.start_time.saturating_add(prev.champion_time),
                None => current.start_time,
            };
            let chrono_end = match intervals.get(i + 1) {
                Some(next) => next.start_time.saturating_add(current.champion_time),
                None => effective_end,
            };
            chrono_end.saturating_sub(chrono_start)
        })
        .collect();

    for (interval, chrono_warrior) in intervals.iter_mut().zip(durations) {
        interval.chrono_warrior = chrono_warrior;
    }
}
