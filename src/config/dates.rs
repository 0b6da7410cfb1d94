use chrono::{DateTime, Local, LocalResult, Months, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One end of the round-date window. Symbolic presets resolve against a
/// caller-supplied `now`; explicit timestamps are stored already normalized
/// to local start-/end-of-day by the editor that produced them.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DateBound {
    Beginning,
    YearAgo,
    Today,
    #[serde(rename_all = "camelCase")]
    At { timestamp: DateTime<Utc> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundEdge {
    Since,
    Until,
}

impl DateBound {
    /// `None` means the edge is unbounded.
    pub fn resolve(&self, edge: BoundEdge, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            DateBound::Beginning => None,
            DateBound::YearAgo => {
                let anchor = now
                    .checked_sub_months(Months::new(12))
                    .unwrap_or(now);
                Some(local_day_edge(anchor, edge))
            }
            DateBound::Today => Some(local_day_edge(now, edge)),
            DateBound::At { timestamp } => Some(*timestamp),
        }
    }
}

fn local_day_edge(instant: DateTime<Utc>, edge: BoundEdge) -> DateTime<Utc> {
    let local = instant.with_timezone(&Local);
    let naive = match edge {
        BoundEdge::Since => local.date_naive().and_hms_opt(0, 0, 0),
        BoundEdge::Until => local.date_naive().and_hms_opt(23, 59, 59),
    };
    let Some(naive) = naive else {
        return instant;
    };
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(resolved) => resolved.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        // DST gap; the raw instant is close enough for a day boundary
        LocalResult::None => instant,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 30, 0).unwrap()
    }

    #[test]
    fn beginning_is_unbounded() {
        assert_eq!(DateBound::Beginning.resolve(BoundEdge::Since, now()), None);
        assert_eq!(DateBound::Beginning.resolve(BoundEdge::Until, now()), None);
    }

    #[test]
    fn today_covers_the_whole_local_day() {
        let since = DateBound::Today.resolve(BoundEdge::Since, now()).unwrap();
        let until = DateBound::Today.resolve(BoundEdge::Until, now()).unwrap();
        assert!(since <= now());
        assert!(until >= now());
        assert_eq!(until - since, chrono::Duration::seconds(86_399));
    }

    #[test]
    fn year_ago_lands_a_year_back() {
        let since = DateBound::YearAgo.resolve(BoundEdge::Since, now()).unwrap();
        assert!(since < now() - chrono::Duration::days(364));
        assert!(since > now() - chrono::Duration::days(367));
    }

    #[test]
    fn explicit_timestamp_is_used_verbatim() {
        let ts = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            DateBound::At { timestamp: ts }.resolve(BoundEdge::Since, now()),
            Some(ts)
        );
    }
}
