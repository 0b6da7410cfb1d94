use itertools::Itertools;

use crate::config::{AccumulationMode, RoundSelection};
use crate::engine::completeness;
use crate::model::PlayerRoundRecord;

/// Narrows eligible records to the subset a `RoundSelection` policy implies.
///
/// Latest/First accumulation bypasses the selection entirely: "latest" must
/// be evaluated per distinguishable player, which happens downstream in the
/// collector, so every surviving record passes through.
pub fn select_rounds(
    records: Vec<PlayerRoundRecord>,
    selection: Option<&RoundSelection>,
    accumulation_mode: AccumulationMode,
    subject_player_id: &str,
    expected_hole_count: usize,
) -> Vec<PlayerRoundRecord> {
    if matches!(
        accumulation_mode,
        AccumulationMode::Latest | AccumulationMode::First
    ) {
        return records;
    }
    let Some(selection) = selection else {
        return records;
    };
    match selection {
        RoundSelection::All => records,
        RoundSelection::Latest { count } => by_date(
            records,
            subject_player_id,
            expected_hole_count,
            DateOrder::NewestFirst,
            *count as usize,
        ),
        RoundSelection::First => by_date(
            records,
            subject_player_id,
            expected_hole_count,
            DateOrder::OldestFirst,
            1,
        ),
        RoundSelection::BestRound { rank } => {
            single_by_total(records, subject_player_id, expected_hole_count, TotalOrder::Best, *rank)
        }
        RoundSelection::WorstRound { rank } => {
            single_by_total(records, subject_player_id, expected_hole_count, TotalOrder::Worst, *rank)
        }
        RoundSelection::BestRounds { count } => {
            ranked_by_total(records, subject_player_id, expected_hole_count, TotalOrder::Best)
                .into_iter()
                .take(*count as usize)
                .collect()
        }
        RoundSelection::WorstRounds { count } => {
            ranked_by_total(records, subject_player_id, expected_hole_count, TotalOrder::Worst)
                .into_iter()
                .take(*count as usize)
                .collect()
        }
        // A user explicitly picking rounds is assumed to know what they
        // selected: no completeness or subject-player restriction.
        RoundSelection::Specific { round_ids } => records
            .into_iter()
            .filter(|record| round_ids.contains(&record.round.id))
            .collect(),
    }
}

#[derive(Clone, Copy)]
enum DateOrder {
    NewestFirst,
    OldestFirst,
}

#[derive(Clone, Copy)]
enum TotalOrder {
    Best,
    Worst,
}

fn subject_complete(
    records: Vec<PlayerRoundRecord>,
    subject_player_id: &str,
    expected_hole_count: usize,
) -> Vec<PlayerRoundRecord> {
    records
        .into_iter()
        .filter(|record| record.player.id == subject_player_id)
        .filter(|record| completeness::is_complete(record, expected_hole_count))
        .collect()
}

fn by_date(
    records: Vec<PlayerRoundRecord>,
    subject_player_id: &str,
    expected_hole_count: usize,
    order: DateOrder,
    count: usize,
) -> Vec<PlayerRoundRecord> {
    let own = subject_complete(records, subject_player_id, expected_hole_count);
    match order {
        DateOrder::NewestFirst => own
            .into_iter()
            .sorted_by_key(|record| std::cmp::Reverse(record.round.date))
            .take(count)
            .collect(),
        DateOrder::OldestFirst => own
            .into_iter()
            .sorted_by_key(|record| record.round.date)
            .take(count)
            .collect(),
    }
}

/// Subject's complete rounds ranked by total: ascending for best (lower
/// wins), descending for worst. The sort is stable; insertion order is the
/// only tiebreak.
fn ranked_by_total(
    records: Vec<PlayerRoundRecord>,
    subject_player_id: &str,
    expected_hole_count: usize,
    order: TotalOrder,
) -> Vec<PlayerRoundRecord> {
    let mut own = subject_complete(records, subject_player_id, expected_hole_count);
    match order {
        TotalOrder::Best => own.sort_by_key(PlayerRoundRecord::round_total),
        TotalOrder::Worst => {
            own.sort_by(|a, b| b.round_total().cmp(&a.round_total()));
        }
    }
    own
}

fn single_by_total(
    records: Vec<PlayerRoundRecord>,
    subject_player_id: &str,
    expected_hole_count: usize,
    order: TotalOrder,
    rank: u8,
) -> Vec<PlayerRoundRecord> {
    ranked_by_total(records, subject_player_id, expected_hole_count, order)
        .into_iter()
        .nth(rank.max(1) as usize - 1)
        .into_iter()
        .collect()
}
