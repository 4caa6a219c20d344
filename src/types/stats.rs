use serde::Serialize;

/// Normalized per-match statistics for one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatsRecord {
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_id: Option<u64>,
    pub minutes: u64,
    pub tackles: u64,
    pub fouls: u64,
    pub fouls_drawn: u64,
    pub shots_total: u64,
    pub shots_on_target: u64,
    pub yellow_cards: u64,
    pub red_cards: u64,
    pub rating: f64,
}
