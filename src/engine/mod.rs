pub mod accumulate;
pub mod collect;
pub mod completeness;
pub mod eligibility;
pub mod hole_stats;
pub mod selection;

use chrono::{DateTime, Utc};
use itertools::Itertools;
use log::warn;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{CellCornerConfigs, CornerConfig, Scope};
use crate::error::Error;
use crate::model::PlayerRoundRecord;
use crate::provider::{within_window, DatasetProvider};

/// Everything a corner computation needs besides its config: where and when
/// it is being rendered, and for whom.
#[derive(Debug, Clone)]
pub struct CornerContext<'a> {
    pub venue_id: Option<&'a str>,
    pub hole_number: Option<u8>,
    pub subject_player_id: &'a str,
    pub todays_player_ids: &'a [String],
    /// Rounds dated at or after this instant are strictly excluded, so a
    /// round preview never references itself or future rounds.
    pub exclude_from: Option<DateTime<Utc>>,
    pub now: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CornerValue {
    pub value: DisplayValue,
    pub visible: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum DisplayValue {
    Number(f64),
    Text(String),
}

impl CornerValue {
    pub fn hidden() -> Self {
        Self {
            value: DisplayValue::Text(String::new()),
            visible: false,
        }
    }

    fn shown(value: f64) -> Self {
        Self {
            value: DisplayValue::Number(value),
            visible: true,
        }
    }

    pub fn numeric(&self) -> Option<f64> {
        match &self.value {
            DisplayValue::Number(value) if self.visible => Some(*value),
            _ => None,
        }
    }
}

/// The four computed corners of one scorecard cell.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CellCornerValues {
    pub top_left: CornerValue,
    pub top_right: CornerValue,
    pub bottom_left: CornerValue,
    pub bottom_right: CornerValue,
}

/// Runs the full pipeline for one corner: fetch, date window, completeness,
/// round eligibility, round selection, score collection, accumulation.
///
/// Never fails: a missing config or venue, an empty stage, or a provider
/// error all come back as the hidden corner.
pub async fn compute_corner_value<P: DatasetProvider>(
    provider: &P,
    config: Option<&CornerConfig>,
    ctx: &CornerContext<'_>,
) -> CornerValue {
    let (Some(config), Some(venue_id)) = (config, ctx.venue_id) else {
        return CornerValue::hidden();
    };
    match corner_value_inner(provider, config, venue_id, ctx).await {
        Ok(Some(value)) => CornerValue::shown(value),
        Ok(None) => CornerValue::hidden(),
        Err(error) => {
            warn!("corner computation failed, hiding corner: {error}");
            CornerValue::hidden()
        }
    }
}

/// Computes all four corners of a cell concurrently; they are independent
/// read-only pipelines with no ordering requirement between them.
pub async fn compute_cell_corner_values<P: DatasetProvider>(
    provider: &P,
    cell: &CellCornerConfigs,
    ctx: &CornerContext<'_>,
) -> CellCornerValues {
    let (top_left, top_right, bottom_left, bottom_right) = tokio::join!(
        compute_corner_value(provider, cell.top_left.as_ref(), ctx),
        compute_corner_value(provider, cell.top_right.as_ref(), ctx),
        compute_corner_value(provider, cell.bottom_left.as_ref(), ctx),
        compute_corner_value(provider, cell.bottom_right.as_ref(), ctx),
    );
    CellCornerValues {
        top_left,
        top_right,
        bottom_left,
        bottom_right,
    }
}

/// Reruns each corner's pipeline once per hole the subject player has ever
/// completed at this venue and sums the visible results. A corner with zero
/// visible holes is itself hidden.
pub async fn compute_total_corner_values<P: DatasetProvider>(
    provider: &P,
    cell: &CellCornerConfigs,
    ctx: &CornerContext<'_>,
) -> CellCornerValues {
    let (top_left, top_right, bottom_left, bottom_right) = tokio::join!(
        compute_total_corner(provider, cell.top_left.as_ref(), ctx),
        compute_total_corner(provider, cell.top_right.as_ref(), ctx),
        compute_total_corner(provider, cell.bottom_left.as_ref(), ctx),
        compute_total_corner(provider, cell.bottom_right.as_ref(), ctx),
    );
    CellCornerValues {
        top_left,
        top_right,
        bottom_left,
        bottom_right,
    }
}

struct Snapshot {
    records: Vec<PlayerRoundRecord>,
    expected_hole_count: usize,
}

async fn fetch_snapshot<P: DatasetProvider>(
    provider: &P,
    config: &CornerConfig,
    venue_id: &str,
    ctx: &CornerContext<'_>,
) -> Result<Snapshot, Error> {
    let (since, until) = config.resolved_window(ctx.now);
    let fetched = provider
        .fetch_player_rounds(venue_id, since, until, ctx.exclude_from)
        .await?;
    // The provider is asked for the window, but its answer is re-checked.
    let records = fetched
        .into_iter()
        .filter(|record| within_window(record.round.date, since, until, ctx.exclude_from))
        .collect_vec();
    let expected_hole_count = match provider.expected_hole_count(venue_id).await? {
        Some(count) => count,
        None => completeness::expected_hole_count(&records),
    };
    Ok(Snapshot {
        records,
        expected_hole_count,
    })
}

async fn corner_value_inner<P: DatasetProvider>(
    provider: &P,
    config: &CornerConfig,
    venue_id: &str,
    ctx: &CornerContext<'_>,
) -> Result<Option<f64>, Error> {
    config.validate()?;
    let snapshot = fetch_snapshot(provider, config, venue_id, ctx).await?;
    if snapshot.records.is_empty() {
        return Ok(None);
    }
    let hole_number = match config.scope {
        Scope::Hole => Some(ctx.hole_number.ok_or(Error::MissingHoleNumber)?),
        Scope::Round => None,
    };
    Ok(corner_value_from_records(
        config,
        snapshot.records,
        hole_number,
        ctx,
        snapshot.expected_hole_count,
    ))
}

/// The pure part of the pipeline, shared between single-corner and totals
/// computation.
fn corner_value_from_records(
    config: &CornerConfig,
    records: Vec<PlayerRoundRecord>,
    hole_number: Option<u8>,
    ctx: &CornerContext<'_>,
    expected_hole_count: usize,
) -> Option<f64> {
    let eligible = eligibility::filter_rounds(
        records,
        &config.round_user_filter,
        config.user_filter_mode,
        ctx.subject_player_id,
        ctx.todays_player_ids,
        expected_hole_count,
    );
    let selected = selection::select_rounds(
        eligible,
        config.round_selection.as_ref(),
        config.accumulation_mode,
        ctx.subject_player_id,
        expected_hole_count,
    );
    let scores = collect::collect_scores(
        config,
        selected,
        ctx.subject_player_id,
        ctx.todays_player_ids,
        hole_number,
        expected_hole_count,
    );
    accumulate::accumulate(config.accumulation_mode, &scores, config.percentile)
}

async fn compute_total_corner<P: DatasetProvider>(
    provider: &P,
    config: Option<&CornerConfig>,
    ctx: &CornerContext<'_>,
) -> CornerValue {
    let (Some(config), Some(venue_id)) = (config, ctx.venue_id) else {
        return CornerValue::hidden();
    };
    match total_corner_inner(provider, config, venue_id, ctx).await {
        Ok(Some(value)) => CornerValue::shown(value),
        Ok(None) => CornerValue::hidden(),
        Err(error) => {
            warn!("total corner computation failed, hiding corner: {error}");
            CornerValue::hidden()
        }
    }
}

async fn total_corner_inner<P: DatasetProvider>(
    provider: &P,
    config: &CornerConfig,
    venue_id: &str,
    ctx: &CornerContext<'_>,
) -> Result<Option<f64>, Error> {
    config.validate()?;
    let snapshot = fetch_snapshot(provider, config, venue_id, ctx).await?;
    if snapshot.records.is_empty() {
        return Ok(None);
    }

    // Totals read hole by hole regardless of the configured scope.
    let per_hole_config = CornerConfig {
        scope: Scope::Hole,
        ..config.clone()
    };

    let holes = snapshot
        .records
        .iter()
        .filter(|record| record.player.id == ctx.subject_player_id)
        .flat_map(PlayerRoundRecord::completed_hole_numbers)
        .unique()
        .sorted()
        .collect_vec();

    let records = snapshot.records;
    let expected_hole_count = snapshot.expected_hole_count;
    let visible: Vec<f64> = holes
        .into_par_iter()
        .filter_map(|hole_number| {
            corner_value_from_records(
                &per_hole_config,
                records.clone(),
                Some(hole_number),
                ctx,
                expected_hole_count,
            )
        })
        .collect();

    if visible.is_empty() {
        return Ok(None);
    }
    let total = visible.iter().sum::<f64>();
    if total == 0.0 || total.is_nan() {
        return Ok(None);
    }
    Ok(Some(total))
}
