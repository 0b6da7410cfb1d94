use itertools::Itertools;

use crate::engine::accumulate::{inverted_percentile_interpolated, round_to_tenth};
use crate::engine::completeness;
use crate::model::PlayerRoundRecord;

/// Venue-wide per-hole statistics over every finished player-round, the
/// "global" counterpart of a corner computation. Uses the interpolating
/// percentile form.
#[derive(Debug, Clone)]
pub struct VenueStats {
    holes: Vec<HoleStats>,
}

#[derive(Debug, Clone)]
pub struct HoleStats {
    hole_number: u8,
    player_values: Vec<f64>,
}

impl VenueStats {
    pub fn new(records: &[PlayerRoundRecord]) -> Self {
        let expected = completeness::expected_hole_count(records);
        let finished = records
            .iter()
            .filter(|record| completeness::is_complete(record, expected))
            .collect_vec();

        let hole_numbers = finished
            .iter()
            .flat_map(|record| record.completed_hole_numbers())
            .unique()
            .sorted()
            .collect_vec();

        let holes = hole_numbers
            .into_iter()
            .map(|hole_number| {
                let player_values = finished
                    .iter()
                    .filter_map(|record| record.hole_value(hole_number))
                    .filter(|value| *value != 0)
                    .map(f64::from)
                    .collect_vec();
                HoleStats {
                    hole_number,
                    player_values,
                }
            })
            .collect_vec();

        Self { holes }
    }

    pub fn hole(&self, hole_number: u8) -> Option<&HoleStats> {
        self.holes
            .iter()
            .find(|stats| stats.hole_number == hole_number)
    }

    pub fn holes(&self) -> &[HoleStats] {
        &self.holes
    }
}

impl HoleStats {
    pub fn hole_number(&self) -> u8 {
        self.hole_number
    }

    pub fn average_score(&self) -> Option<f64> {
        if self.player_values.is_empty() {
            return None;
        }
        Some(round_to_tenth(
            self.player_values.iter().sum::<f64>() / self.player_values.len() as f64,
        ))
    }

    pub fn percentile(&self, percentile: u8) -> Option<f64> {
        inverted_percentile_interpolated(&self.player_values, percentile)
    }
}
