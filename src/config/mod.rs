mod dates;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use dates::{BoundEdge, DateBound};

use crate::error::Error;

/// Which players a filter refers to. Used in two distinct positions that
/// must never be conflated: `round_user_filter` decides which rounds are
/// eligible at all, `score_user_filter` decides whose scores are read from
/// the surviving rounds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum UserFilter {
    Everyone,
    EachUser,
    TodaysPlayers,
    ExplicitIds { ids: Vec<String> },
}

impl UserFilter {
    /// The concrete id list a filter stands for, given today's players.
    pub(crate) fn id_list<'a>(&'a self, todays_player_ids: &'a [String]) -> &'a [String] {
        match self {
            UserFilter::TodaysPlayers => todays_player_ids,
            UserFilter::ExplicitIds { ids } => ids,
            UserFilter::Everyone | UserFilter::EachUser => &[],
        }
    }
}

/// Disambiguates multi-id filters: must every listed player be present, or
/// any one of them.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum FilterMode {
    And,
    Or,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccumulationMode {
    Best,
    Worst,
    Average,
    Latest,
    First,
    Percentile,
    Relevant,
}

/// Whether a corner reads a single hole's score or a whole-round total.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Hole,
    Round,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RoundSelection {
    All,
    Latest {
        count: u8,
    },
    First,
    BestRound {
        rank: u8,
    },
    BestRounds {
        count: u8,
    },
    WorstRound {
        rank: u8,
    },
    WorstRounds {
        count: u8,
    },
    #[serde(rename_all = "camelCase")]
    Specific {
        round_ids: Vec<String>,
    },
}

impl RoundSelection {
    pub fn validate(&self) -> Result<(), Error> {
        let out_of_range = |count: u8, min: u8, max: u8| Error::SelectionCountOutOfRange {
            count,
            min,
            max,
        };
        match *self {
            RoundSelection::Latest { count } if !(1..=3).contains(&count) => {
                Err(out_of_range(count, 1, 3))
            }
            RoundSelection::BestRound { rank } | RoundSelection::WorstRound { rank }
                if !(1..=2).contains(&rank) =>
            {
                Err(out_of_range(rank, 1, 2))
            }
            RoundSelection::BestRounds { count } | RoundSelection::WorstRounds { count }
                if !(2..=3).contains(&count) =>
            {
                Err(out_of_range(count, 2, 3))
            }
            _ => Ok(()),
        }
    }
}

/// The declarative rule behind one scorecard corner.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CornerConfig {
    pub score_user_filter: UserFilter,
    pub round_user_filter: UserFilter,
    pub user_filter_mode: FilterMode,
    pub accumulation_mode: AccumulationMode,
    pub scope: Scope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_selection: Option<RoundSelection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentile: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since_date: Option<DateBound>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until_date: Option<DateBound>,
}

impl CornerConfig {
    pub fn validate(&self) -> Result<(), Error> {
        match (self.accumulation_mode, self.percentile) {
            (AccumulationMode::Percentile, None) => return Err(Error::MissingPercentile),
            (AccumulationMode::Percentile, Some(percentile)) if percentile > 99 => {
                return Err(Error::PercentileOutOfRange(percentile))
            }
            _ => {}
        }
        if let Some(selection) = &self.round_selection {
            selection.validate()?;
        }
        Ok(())
    }

    /// Resolved inclusive date window for the provider fetch.
    pub fn resolved_window(
        &self,
        now: DateTime<Utc>,
    ) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        (
            self.since_date
                .as_ref()
                .and_then(|bound| bound.resolve(BoundEdge::Since, now)),
            self.until_date
                .as_ref()
                .and_then(|bound| bound.resolve(BoundEdge::Until, now)),
        )
    }
}

/// The four corners of a scorecard cell. Absent corner = hidden corner.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CellCornerConfigs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_left: Option<CornerConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_right: Option<CornerConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom_left: Option<CornerConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom_right: Option<CornerConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> CornerConfig {
        CornerConfig {
            score_user_filter: UserFilter::EachUser,
            round_user_filter: UserFilter::Everyone,
            user_filter_mode: FilterMode::Or,
            accumulation_mode: AccumulationMode::Best,
            scope: Scope::Hole,
            round_selection: None,
            percentile: None,
            since_date: None,
            until_date: None,
        }
    }

    #[test]
    fn wire_format_uses_tagged_camel_case() {
        let config = CornerConfig {
            round_selection: Some(RoundSelection::Specific {
                round_ids: vec!["r-17".to_string()],
            }),
            score_user_filter: UserFilter::ExplicitIds {
                ids: vec!["p-1".to_string()],
            },
            ..base_config()
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["scoreUserFilter"]["type"], "explicitIds");
        assert_eq!(json["roundUserFilter"]["type"], "everyone");
        assert_eq!(json["userFilterMode"], "OR");
        assert_eq!(json["accumulationMode"], "best");
        assert_eq!(json["scope"], "hole");
        assert_eq!(json["roundSelection"]["type"], "specific");
        assert_eq!(json["roundSelection"]["roundIds"][0], "r-17");
        assert!(json.get("percentile").is_none());
    }

    #[test]
    fn cell_corners_are_individually_nullable() {
        let cell: CellCornerConfigs =
            serde_json::from_str(r#"{"topRight":{"scoreUserFilter":{"type":"eachUser"},"roundUserFilter":{"type":"everyone"},"userFilterMode":"AND","accumulationMode":"average","scope":"round"}}"#)
                .unwrap();
        assert!(cell.top_left.is_none());
        let top_right = cell.top_right.unwrap();
        assert_eq!(top_right.accumulation_mode, AccumulationMode::Average);
        assert_eq!(top_right.scope, Scope::Round);
        assert!(top_right.round_selection.is_none());
    }

    #[test]
    fn percentile_config_must_carry_a_percentile() {
        let mut config = base_config();
        config.accumulation_mode = AccumulationMode::Percentile;
        assert!(matches!(
            config.validate(),
            Err(Error::MissingPercentile)
        ));
        config.percentile = Some(120);
        assert!(matches!(
            config.validate(),
            Err(Error::PercentileOutOfRange(120))
        ));
        config.percentile = Some(25);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn selection_counts_are_range_checked() {
        let mut config = base_config();
        config.round_selection = Some(RoundSelection::Latest { count: 5 });
        assert!(config.validate().is_err());
        config.round_selection = Some(RoundSelection::BestRounds { count: 2 });
        assert!(config.validate().is_ok());
    }
}
