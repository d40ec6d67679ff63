use anyhow::Context;
use chrono::DateTime;
use endurance::{
    ChampionInterval,
    EnduranceChampionResult,
    duration::format_duration,
    leaderboard::{
        chrono_warrior_leader,
        current_champion,
    },
};
use serde::Serialize;
use std::fmt::Write;

const ADDRESS_HEADER: &str = "User Address";
const CHAMPION_HEADER: &str = "Champion Time";
const CHRONO_HEADER: &str = "Chrono Warrior";

fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells.map(str::len).fold(header.len(), usize::max)
}

fn format_timestamp(secs: u64) -> String {
    i64::try_from(secs)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| secs.to_string())
}

pub fn results_table(rows: &[EnduranceChampionResult]) -> String {
    let cells: Vec<[String; 3]> = rows
        .iter()
        .map(|row| {
            [
                row.bidder.clone(),
                format_duration(row.champion_time),
                format_duration(row.chrono_warrior),
            ]
        })
        .collect();
    table(&[ADDRESS_HEADER, CHAMPION_HEADER, CHRONO_HEADER], &cells)
}

pub fn intervals_table(rows: &[ChampionInterval]) -> String {
    let cells: Vec<[String; 5]> = rows
        .iter()
        .map(|row| {
            [
                row.address.clone(),
                format_duration(row.champion_time),
                format_duration(row.chrono_warrior),
                format_timestamp(row.start_time),
                format_timestamp(row.end_time),
            ]
        })
        .collect();
    table(
        &[ADDRESS_HEADER, CHAMPION_HEADER, CHRONO_HEADER, "Start", "End"],
        &cells,
    )
}

fn table<const N: usize>(headers: &[&str; N], rows: &[[String; N]]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| column_width(header, rows.iter().map(|row| row[i].as_str())))
        .collect();

    let mut out = String::new();
    let mut push_row = |cells: &[&str]| {
        let line: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect();
        let _ = writeln!(out, "{}", line.join("  ").trim_end());
    };
    push_row(&headers[..]);
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    push_row(&rule.iter().map(String::as_str).collect::<Vec<_>>());
    if rows.is_empty() {
        push_row(&["(no bids)"][..]);
    }
    for row in rows {
        push_row(&row.iter().map(String::as_str).collect::<Vec<_>>());
    }
    out
}

/// Footer naming the reigning champion and the chrono warrior leader.
pub fn summary(results: &[EnduranceChampionResult]) -> String {
    let mut out = String::new();
    if let Some(champion) = current_champion(results) {
        let _ = writeln!(
            out,
            "\nEndurance champion: {} ({})",
            champion.bidder,
            format_duration(champion.champion_time)
        );
    }
    if let Some(leader) = chrono_warrior_leader(results) {
        let _ = writeln!(
            out,
            "Chrono warrior: {} ({})",
            leader.bidder,
            format_duration(leader.chrono_warrior)
        );
    }
    out
}

pub fn json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    serde_json::to_string_pretty(value).context("serializing standings")
}
