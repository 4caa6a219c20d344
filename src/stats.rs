//! Player lookup over a lineups document.
//!
//! The upstream feed is inconsistent about statistic names, so each output
//! field is resolved from an ordered list of aliases. The first alias holding
//! a usable number wins.

use serde_json::{Map, Value};
use unicode_normalization::UnicodeNormalization;

use crate::types::stats::PlayerStatsRecord;

const ROSTERS: [&str; 2] = ["home", "away"];

const MINUTES: &[&str] = &["minutesPlayed"];
const TACKLES: &[&str] = &["totalTackle", "tackles"];
const FOULS: &[&str] = &["fouls", "foulCommitted", "totalFoul"];
const FOULS_DRAWN: &[&str] = &["wasFouled", "foulDrawn", "foulsWon"];
const SHOTS_TOTAL: &[&str] = &["totalShots", "shotsTotal"];
const SHOTS_ON_TARGET: &[&str] = &["onTargetScoringAttempt", "shotsOnTarget"];
const YELLOW_CARDS: &[&str] = &["yellowCards", "yellowCard"];
const RED_CARDS: &[&str] = &["redCards", "redCard"];
const RATING: &[&str] = &["rating"];

/// Looks up `query` in the home roster, then the away roster, and returns the
/// first player whose name matches.
///
/// A name matches when either normalized form contains the other, so an empty
/// query matches the first home player.
pub fn find_player_stats(lineups: &Value, query: &str) -> Option<PlayerStatsRecord> {
    let wanted = normalize_name(query);
    ROSTERS
        .into_iter()
        .flat_map(|side| roster_entries(lineups, side))
        .find(|entry| {
            let name = normalize_name(roster_name(entry));
            name.contains(&wanted) || wanted.contains(&name)
        })
        .map(|entry| build_record(entry, query))
}

/// Decomposes accented characters, drops the combining marks, lower-cases and
/// trims.
pub fn normalize_name(name: &str) -> String {
    let stripped: String = name.nfd().filter(|ch| !is_combining_mark(*ch)).collect();
    stripped.to_lowercase().trim().to_string()
}

fn is_combining_mark(ch: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&ch)
}

fn roster_entries<'a>(lineups: &'a Value, side: &str) -> impl Iterator<Item = &'a Value> {
    lineups
        .get(side)
        .and_then(|team| team.get("players"))
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

fn player_info(entry: &Value) -> Option<&Map<String, Value>> {
    entry.get("player").and_then(Value::as_object)
}

fn roster_name(entry: &Value) -> &str {
    let player = player_info(entry);
    ["name", "shortName"]
        .iter()
        .filter_map(|key| player.and_then(|player| player.get(*key)))
        .filter_map(Value::as_str)
        .find(|name| !name.is_empty())
        .unwrap_or_default()
}

fn build_record(entry: &Value, query: &str) -> PlayerStatsRecord {
    let player = player_info(entry);
    let empty = Map::new();
    let stats = entry
        .get("statistics")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    let display_name = player
        .and_then(|player| player.get("name"))
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .unwrap_or(query)
        .to_string();

    PlayerStatsRecord {
        display_name,
        player_id: player.and_then(|player| player.get("id")).and_then(Value::as_u64),
        minutes: count(stats, MINUTES),
        tackles: count(stats, TACKLES),
        fouls: count(stats, FOULS),
        fouls_drawn: count(stats, FOULS_DRAWN),
        shots_total: count(stats, SHOTS_TOTAL),
        shots_on_target: count(stats, SHOTS_ON_TARGET),
        yellow_cards: count(stats, YELLOW_CARDS),
        red_cards: count(stats, RED_CARDS),
        rating: first_number(stats, RATING, Value::as_f64).unwrap_or(0.0),
    }
}

fn count(stats: &Map<String, Value>, aliases: &[&str]) -> u64 {
    first_number(stats, aliases, as_count).unwrap_or(0)
}

fn first_number<T>(
    stats: &Map<String, Value>,
    aliases: &[&str],
    read: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    aliases
        .iter()
        .filter_map(|alias| stats.get(*alias))
        .find_map(read)
}

fn as_count(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|number| number.is_finite() && *number >= 0.0)
            .map(|number| number as u64)
    })
}
