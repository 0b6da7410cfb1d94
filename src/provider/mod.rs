mod memory;

use std::future::Future;

use chrono::{DateTime, Utc};

pub use memory::MemoryDataset;

use crate::error::Error;
use crate::model::PlayerRoundRecord;

/// The storage collaborator the engine reads from. How the data is sourced
/// (a relational store, an in-memory cache, a remote API) is the
/// implementor's business; the fetch is the engine's only suspension point.
pub trait DatasetProvider {
    /// Player-round records for a venue inside an optional date window.
    /// Both bounds are inclusive; `exclude_from` strictly excludes any
    /// round dated at or after it.
    fn fetch_player_rounds(
        &self,
        venue_id: &str,
        since: Option<DateTime<Utc>>,
        until: Option<DateTime<Utc>>,
        exclude_from: Option<DateTime<Utc>>,
    ) -> impl Future<Output = Result<Vec<PlayerRoundRecord>, Error>> + Send;

    /// Authoritative hole count for a venue, when one is known. `None`
    /// makes the engine derive it from the record set.
    fn expected_hole_count(
        &self,
        venue_id: &str,
    ) -> impl Future<Output = Result<Option<usize>, Error>> + Send;
}

/// Round-level date window check shared by providers and the engine's
/// re-check of fetched data.
pub fn within_window(
    date: DateTime<Utc>,
    since: Option<DateTime<Utc>>,
    until: Option<DateTime<Utc>>,
    exclude_from: Option<DateTime<Utc>>,
) -> bool {
    since.map_or(true, |bound| date >= bound)
        && until.map_or(true, |bound| date <= bound)
        && exclude_from.map_or(true, |bound| date < bound)
}
