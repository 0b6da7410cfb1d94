use crate::model::PlayerRoundRecord;

/// Expected hole count for a venue, derived once per computation: the
/// maximum number of distinct holes observed across the candidate records.
/// An authoritative per-venue count from the provider takes precedence over
/// this derivation (see the orchestrator).
pub fn expected_hole_count(records: &[PlayerRoundRecord]) -> usize {
    records
        .iter()
        .map(PlayerRoundRecord::observed_hole_count)
        .max()
        .unwrap_or(0)
}

/// A player-round counts as finished when every expected hole has a
/// flagged-complete score. Records with zero scores are never complete.
pub fn is_complete(record: &PlayerRoundRecord, expected_hole_count: usize) -> bool {
    if record.scores.is_empty() {
        return false;
    }
    record.completed_hole_count() >= expected_hole_count
}
