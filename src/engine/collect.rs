use std::collections::{HashMap, HashSet};

use itertools::Itertools;

use crate::config::{AccumulationMode, CornerConfig, FilterMode, Scope, UserFilter};
use crate::engine::completeness;
use crate::model::PlayerRoundRecord;

struct CollectedScore {
    round_id: String,
    player_id: String,
    value: f64,
}

/// Walks the selected records and extracts the scalar score implied by the
/// corner's scope and `score_user_filter`. The returned list keeps record
/// order (date-ordered for Latest/First accumulation); an empty list signals
/// "no data" upstream.
pub fn collect_scores(
    config: &CornerConfig,
    records: Vec<PlayerRoundRecord>,
    subject_player_id: &str,
    todays_player_ids: &[String],
    hole_number: Option<u8>,
    expected_hole_count: usize,
) -> Vec<f64> {
    let ordered = match config.accumulation_mode {
        AccumulationMode::Latest => records
            .into_iter()
            .sorted_by_key(|record| std::cmp::Reverse(record.round.date))
            .collect_vec(),
        AccumulationMode::First => records
            .into_iter()
            .sorted_by_key(|record| record.round.date)
            .collect_vec(),
        _ => records,
    };

    // Latest/First read at most one round per distinguishable player.
    let one_round_per_player = matches!(
        config.accumulation_mode,
        AccumulationMode::Latest | AccumulationMode::First
    );
    let mut seen_players: HashSet<String> = HashSet::new();
    let mut collected: Vec<CollectedScore> = Vec::new();

    for record in &ordered {
        if !score_filter_matches(
            &config.score_user_filter,
            &record.player.id,
            subject_player_id,
            todays_player_ids,
        ) {
            continue;
        }
        if !completeness::is_complete(record, expected_hole_count) {
            continue;
        }
        if one_round_per_player && !seen_players.insert(record.player.id.clone()) {
            continue;
        }
        let Some(value) = extract_scalar(record, config.scope, hole_number) else {
            continue;
        };
        collected.push(CollectedScore {
            round_id: record.round.id.clone(),
            player_id: record.player.id.clone(),
            value,
        });
    }

    // AND over several required players is all-or-nothing per round: unless
    // every listed id produced a valid scalar in a round, none of that
    // round's scalars count.
    let required = config.score_user_filter.id_list(todays_player_ids);
    if config.user_filter_mode == FilterMode::And && required.len() > 1 {
        let mut scorers_per_round: HashMap<String, HashSet<String>> = HashMap::new();
        for score in &collected {
            scorers_per_round
                .entry(score.round_id.clone())
                .or_default()
                .insert(score.player_id.clone());
        }
        collected.retain(|score| {
            scorers_per_round
                .get(&score.round_id)
                .is_some_and(|scorers| required.iter().all(|id| scorers.contains(id)))
        });
    }

    collected.into_iter().map(|score| score.value).collect()
}

fn score_filter_matches(
    filter: &UserFilter,
    player_id: &str,
    subject_player_id: &str,
    todays_player_ids: &[String],
) -> bool {
    match filter {
        UserFilter::Everyone => true,
        UserFilter::EachUser => player_id == subject_player_id,
        UserFilter::TodaysPlayers => todays_player_ids.iter().any(|id| id == player_id),
        UserFilter::ExplicitIds { ids } => ids.iter().any(|id| id == player_id),
    }
}

fn extract_scalar(
    record: &PlayerRoundRecord,
    scope: Scope,
    hole_number: Option<u8>,
) -> Option<f64> {
    let value = match scope {
        Scope::Hole => record.hole_value(hole_number?)?,
        Scope::Round => record.round_total(),
    };
    // An exact zero is indistinguishable from an unset cell in the source
    // system and counts as "no data".
    if value == 0 {
        return None;
    }
    Some(f64::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdata::{config, full_round, record};

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn hole_scope_reads_one_completed_hole() {
        let config = config(AccumulationMode::Best, Scope::Hole);
        let records = vec![full_round("r1", "v1", "p1", 0, 3, 4)];
        let scores = collect_scores(&config, records, "p1", &[], Some(2), 3);
        assert_eq!(scores, [4.0]);
    }

    #[test]
    fn round_scope_sums_completed_values() {
        let mut config = config(AccumulationMode::Best, Scope::Round);
        config.score_user_filter = UserFilter::EachUser;
        let records = vec![record(
            "r1",
            "v1",
            "p1",
            0,
            &[(1, 3, true), (2, 4, true), (3, 9, false)],
        )];
        let scores = collect_scores(&config, records, "p1", &[], None, 2);
        assert_eq!(scores, [7.0]);
    }

    #[test]
    fn incomplete_records_and_zero_values_are_skipped() {
        let config = config(AccumulationMode::Best, Scope::Hole);
        let records = vec![
            record("r1", "v1", "p1", 0, &[(1, 4, true)]),
            record("r2", "v1", "p1", 1, &[(1, 0, true), (2, 3, true), (3, 5, true)]),
        ];
        let scores = collect_scores(&config, records, "p1", &[], Some(1), 3);
        assert!(scores.is_empty());
    }

    #[test]
    fn latest_deduplicates_to_one_round_per_player() {
        let mut config = config(AccumulationMode::Latest, Scope::Hole);
        config.score_user_filter = UserFilter::EachUser;
        let records = vec![
            full_round("r1", "v1", "p1", 0, 3, 4),
            full_round("r2", "v1", "p1", 5, 3, 6),
            full_round("r3", "v1", "p1", 2, 3, 5),
        ];
        let scores = collect_scores(&config, records, "p1", &[], Some(1), 3);
        assert_eq!(scores, [6.0]);
    }

    #[test]
    fn and_mode_is_all_or_nothing_per_round() {
        let mut config = config(AccumulationMode::Average, Scope::Hole);
        config.score_user_filter = UserFilter::TodaysPlayers;
        let todays = ids(&["p1", "p2"]);
        // p1 finished the round; p2 never completed hole 3, so their record
        // fails the completeness check and yields no scalar.
        let records = vec![
            full_round("r1", "v1", "p1", 0, 3, 4),
            record("r1", "v1", "p2", 0, &[(1, 5, true), (2, 4, true), (3, 6, false)]),
        ];

        config.user_filter_mode = FilterMode::And;
        let and_scores =
            collect_scores(&config, records.clone(), "p1", &todays, Some(1), 3);
        assert!(and_scores.is_empty());

        config.user_filter_mode = FilterMode::Or;
        let or_scores = collect_scores(&config, records, "p1", &todays, Some(1), 3);
        assert_eq!(or_scores, [4.0]);
    }
}
