//! Shared builders for the unit tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use itertools::Itertools;

use crate::config::{AccumulationMode, CornerConfig, FilterMode, Scope, UserFilter};
use crate::model::{PlayerInfo, PlayerRoundRecord, RoundInfo, Score};

pub(crate) fn base_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap()
}

pub(crate) fn record(
    round_id: &str,
    venue_id: &str,
    player_id: &str,
    day_offset: i64,
    scores: &[(u8, u32, bool)],
) -> PlayerRoundRecord {
    PlayerRoundRecord::new(
        RoundInfo {
            id: round_id.to_string(),
            venue_id: venue_id.to_string(),
            date: base_date() + Duration::days(day_offset),
        },
        PlayerInfo {
            id: player_id.to_string(),
            name: format!("Player {player_id}"),
        },
        scores
            .iter()
            .map(|&(hole_number, value, complete)| Score {
                hole_number,
                value,
                complete,
            })
            .collect(),
    )
}

/// A fully played round: `holes` holes, every one complete with `value`.
pub(crate) fn full_round(
    round_id: &str,
    venue_id: &str,
    player_id: &str,
    day_offset: i64,
    holes: u8,
    value: u32,
) -> PlayerRoundRecord {
    let scores = (1..=holes).map(|hole| (hole, value, true)).collect_vec();
    record(round_id, venue_id, player_id, day_offset, &scores)
}

pub(crate) fn config(accumulation_mode: AccumulationMode, scope: Scope) -> CornerConfig {
    CornerConfig {
        score_user_filter: UserFilter::Everyone,
        round_user_filter: UserFilter::Everyone,
        user_filter_mode: FilterMode::Or,
        accumulation_mode,
        scope,
        round_selection: None,
        percentile: None,
        since_date: None,
        until_date: None,
    }
}
