use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::{within_window, DatasetProvider};
use crate::error::Error;
use crate::model::PlayerRoundRecord;

/// In-memory dataset, used by the tests and by embedders that keep their
/// round history loaded. Applies the same date-window rules a persistent
/// provider would.
#[derive(Debug, Clone, Default)]
pub struct MemoryDataset {
    records: Vec<PlayerRoundRecord>,
    hole_counts: HashMap<String, usize>,
}

impl MemoryDataset {
    pub fn new(records: Vec<PlayerRoundRecord>) -> Self {
        Self {
            records,
            hole_counts: HashMap::new(),
        }
    }

    /// Registers an authoritative hole count for a venue, overriding the
    /// engine's derivation from observed records.
    pub fn with_hole_count(mut self, venue_id: &str, count: usize) -> Self {
        self.hole_counts.insert(venue_id.to_string(), count);
        self
    }

    pub fn push(&mut self, record: PlayerRoundRecord) {
        self.records.push(record);
    }
}

impl DatasetProvider for MemoryDataset {
    async fn fetch_player_rounds(
        &self,
        venue_id: &str,
        since: Option<DateTime<Utc>>,
        until: Option<DateTime<Utc>>,
        exclude_from: Option<DateTime<Utc>>,
    ) -> Result<Vec<PlayerRoundRecord>, Error> {
        Ok(self
            .records
            .iter()
            .filter(|record| record.round.venue_id == venue_id)
            .filter(|record| within_window(record.round.date, since, until, exclude_from))
            .cloned()
            .collect())
    }

    async fn expected_hole_count(&self, venue_id: &str) -> Result<Option<usize>, Error> {
        Ok(self.hole_counts.get(venue_id).copied())
    }
}
