use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// One player's participation in one played round, carrying that player's
/// per-hole scores for it. Supplied by the dataset provider; never mutated
/// by the engine.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRoundRecord {
    pub round: RoundInfo,
    pub player: PlayerInfo,
    pub scores: Vec<Score>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoundInfo {
    pub id: String,
    pub venue_id: String,
    pub date: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInfo {
    pub id: String,
    pub name: String,
}

/// A single hole's recorded result. `complete` marks whether the hole was
/// actually played, independent of `value`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub hole_number: u8,
    pub value: u32,
    pub complete: bool,
}

impl PlayerRoundRecord {
    pub fn new(round: RoundInfo, player: PlayerInfo, mut scores: Vec<Score>) -> Self {
        scores.sort_by_key(|score| score.hole_number);
        Self {
            round,
            player,
            scores,
        }
    }

    /// Distinct hole numbers with any recorded score, played or not.
    pub fn observed_hole_count(&self) -> usize {
        self.scores
            .iter()
            .map(|score| score.hole_number)
            .unique()
            .count()
    }

    /// Distinct hole numbers with a flagged-complete score.
    pub fn completed_hole_count(&self) -> usize {
        self.scores
            .iter()
            .filter(|score| score.complete)
            .map(|score| score.hole_number)
            .unique()
            .count()
    }

    /// Sum of all completed-score values in this round.
    pub fn round_total(&self) -> u32 {
        self.scores
            .iter()
            .filter(|score| score.complete)
            .map(|score| score.value)
            .sum()
    }

    /// The completed value on a specific hole, if one was played.
    pub fn hole_value(&self, hole_number: u8) -> Option<u32> {
        self.scores
            .iter()
            .find(|score| score.hole_number == hole_number && score.complete)
            .map(|score| score.value)
    }

    /// Hole numbers the player has actually finished in this round.
    pub fn completed_hole_numbers(&self) -> Vec<u8> {
        self.scores
            .iter()
            .filter(|score| score.complete)
            .map(|score| score.hole_number)
            .unique()
            .collect_vec()
    }
}
