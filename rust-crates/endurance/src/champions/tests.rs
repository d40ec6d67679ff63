#![allow(non_snake_case)]

use super::*;
use crate::clock::FixedClock;

fn bid(bidder: &str, timestamp: u64) -> BidRecord {
    BidRecord::new(bidder, timestamp)
}

fn result(bidder: &str, champion_time: u64, chrono_warrior: u64) -> EnduranceChampionResult {
    EnduranceChampionResult {
        bidder: bidder.to_string(),
        champion_time,
        chrono_warrior,
    }
}

#[test]
fn compute_endurance_champions_at__no_bids__is_empty() {
    let actual = compute_endurance_champions_at(&[], 1_000);
    assert!(actual.is_empty());
}

#[test]
fn compute_endurance_champions_at__single_bid__holds_until_round_end() {
    // given
    let bids = vec![bid("A", 1_000)];

    // when
    let actual = compute_endurance_champions_at(&bids, 1_500);

    // then
    assert_eq!(vec![result("A", 500, 0)], actual);
}

#[test]
fn compute_endurance_champions_at__tail_gap_longer__crowns_last_bidder() {
    // given
    let bids = vec![bid("B", 1_000), bid("A", 1_100)];

    // when
    let actual = champion_intervals(&bids, 1_300);

    // then
    let expected = vec![
        ChampionInterval {
            address: "B".to_string(),
            champion_time: 100,
            start_time: 1_000,
            end_time: 1_100,
            chrono_warrior: 200,
        },
        ChampionInterval {
            address: "A".to_string(),
            champion_time: 200,
            start_time: 1_100,
            end_time: 1_300,
            chrono_warrior: 100,
        },
    ];
    assert_eq!(expected, actual);
}

#[test]
fn compute_endurance_champions_at__shorter_gap__is_not_crowned() {
    // given
    let bids = vec![bid("A", 0), bid("B", 100), bid("C", 150)];

    // when
    let actual = compute_endurance_champions_at(&bids, 400);

    // then
    // B only waited 50s after A's 100s record
    let expected = vec![result("A", 100, 250), result("C", 250, 150)];
    assert_eq!(expected, actual);
}

#[test]
fn compute_endurance_champions_at__equal_gap__does_not_replace_record() {
    // given
    let bids = vec![bid("A", 0), bid("B", 100), bid("C", 200)];

    // when
    let actual = compute_endurance_champions_at(&bids, 250);

    // then
    assert_eq!(vec![result("A", 100, 250)], actual);
}

#[test]
fn compute_endurance_champions_at__unsorted_input__is_sorted_by_timestamp() {
    // given
    let bids = vec![bid("A", 1_100), bid("B", 1_000)];

    // when
    let actual = compute_endurance_champions_at(&bids, 1_300);

    // then
    let expected = vec![result("B", 100, 200), result("A", 200, 100)];
    assert_eq!(expected, actual);
}

#[test]
fn compute_endurance_champions_at__equal_timestamps__keep_input_order() {
    // given
    let a_first = vec![bid("A", 100), bid("B", 100), bid("C", 300)];
    let b_first = vec![bid("B", 100), bid("A", 100), bid("C", 300)];

    // when
    let a_first = compute_endurance_champions_at(&a_first, 300);
    let b_first = compute_endurance_champions_at(&b_first, 300);

    // then
    assert_eq!(vec![result("A", 0, 0), result("B", 200, 200)], a_first);
    assert_eq!(vec![result("B", 0, 0), result("A", 200, 200)], b_first);
}

#[test]
fn compute_endurance_champions_at__repeat_bidder__can_hold_several_intervals() {
    // given
    let bids = vec![bid("A", 0), bid("B", 10), bid("A", 40), bid("B", 140)];

    // when
    let actual = compute_endurance_champions_at(&bids, 150);

    // then
    let bidders: Vec<&str> = actual.iter().map(|r| r.bidder.as_str()).collect();
    assert_eq!(bidders, vec!["A", "B", "A"]);
    let times: Vec<u64> = actual.iter().map(|r| r.champion_time).collect();
    assert_eq!(times, vec![10, 30, 100]);
    // middle interval starts after A's 10s lead and ends 30s past A's rebid
    let chrono: Vec<u64> = actual.iter().map(|r| r.chrono_warrior).collect();
    assert_eq!(chrono, vec![20, 50, 80]);
}

#[test]
fn compute_endurance_champions_at__round_end_before_last_bid__clamps_tail() {
    // given
    let bids = vec![bid("A", 0), bid("B", 100)];

    // when
    let actual = champion_intervals(&bids, 50);

    // then
    assert_eq!(actual.len(), 1);
    assert_eq!(actual[0].address, "A");
    assert_eq!(actual[0].champion_time, 100);
    assert_eq!(actual[0].chrono_warrior, 50);
}

#[test]
fn compute_endurance_champions_at__single_bid_after_round_end__is_zero() {
    let actual = compute_endurance_champions_at(&[bid("A", 1_000)], 900);
    assert_eq!(vec![result("A", 0, 0)], actual);
}

#[test]
fn compute_endurance_champions__no_round_end__uses_clock() {
    // given
    let bids = vec![bid("A", 1_000)];
    let clock = FixedClock(1_750);

    // when
    let from_none = compute_endurance_champions(&bids, None, &clock);
    let from_zero = compute_endurance_champions(&bids, Some(0), &clock);

    // then
    assert_eq!(vec![result("A", 750, 0)], from_none);
    assert_eq!(from_none, from_zero);
}

#[test]
fn compute_endurance_champions__explicit_round_end__ignores_clock() {
    let bids = vec![bid("A", 1_000)];
    let actual = compute_endurance_champions(&bids, Some(1_200), &FixedClock(9_999));
    assert_eq!(vec![result("A", 200, 0)], actual);
}

#[test]
fn calculator__compute__matches_free_function() {
    // given
    let bids = vec![bid("A", 0), bid("B", 100), bid("C", 150)];
    let calculator = EnduranceChampionCalculator::new(FixedClock(400));

    // when
    let actual = calculator.compute(&bids, None);

    // then
    assert_eq!(compute_endurance_champions_at(&bids, 400), actual);
    assert_eq!(calculator.intervals(&bids, Some(400)).len(), actual.len());
}

#[test]
fn champion_intervals__input__is_not_mutated() {
    // given
    let bids = vec![bid("C", 300), bid("A", 100), bid("B", 200)];
    let before = bids.clone();

    // when
    let _ = champion_intervals(&bids, 1_000);

    // then
    assert_eq!(before, bids);
}
