use std::collections::{HashMap, HashSet};

use crate::config::{FilterMode, UserFilter};
use crate::engine::completeness;
use crate::model::PlayerRoundRecord;

/// Narrows the record set to rounds that are eligible under the configured
/// `round_user_filter`. A surviving round keeps all of its records; whose
/// scores are read from it is a separate question answered by the collector
/// against `score_user_filter`.
pub fn filter_rounds(
    records: Vec<PlayerRoundRecord>,
    filter: &UserFilter,
    mode: FilterMode,
    subject_player_id: &str,
    todays_player_ids: &[String],
    expected_hole_count: usize,
) -> Vec<PlayerRoundRecord> {
    match filter {
        UserFilter::Everyone => records,
        UserFilter::EachUser => records
            .into_iter()
            .filter(|record| record.player.id == subject_player_id)
            .collect(),
        UserFilter::TodaysPlayers => {
            filter_rounds_by_ids(records, todays_player_ids, mode, expected_hole_count)
        }
        UserFilter::ExplicitIds { ids } => {
            filter_rounds_by_ids(records, ids, mode, expected_hole_count)
        }
    }
}

/// Keeps rounds in which the listed players have complete records: all of
/// them under AND, any one under OR. Single-id lists are always
/// OR-equivalent.
fn filter_rounds_by_ids(
    records: Vec<PlayerRoundRecord>,
    ids: &[String],
    mode: FilterMode,
    expected_hole_count: usize,
) -> Vec<PlayerRoundRecord> {
    if ids.is_empty() {
        return Vec::new();
    }

    let mut completers_per_round: HashMap<String, HashSet<String>> = HashMap::new();
    for record in &records {
        if completeness::is_complete(record, expected_hole_count) {
            completers_per_round
                .entry(record.round.id.clone())
                .or_default()
                .insert(record.player.id.clone());
        }
    }

    let round_qualifies = |round_id: &str| {
        let Some(completers) = completers_per_round.get(round_id) else {
            return false;
        };
        if ids.len() <= 1 || mode == FilterMode::Or {
            ids.iter().any(|id| completers.contains(id))
        } else {
            ids.iter().all(|id| completers.contains(id))
        }
    };

    records
        .into_iter()
        .filter(|record| round_qualifies(&record.round.id))
        .collect()
}
