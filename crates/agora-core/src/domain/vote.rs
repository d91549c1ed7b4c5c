use std::collections::BTreeMap;

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// A single user's endorsement of a post. Presence only: there is no
/// direction or weight, and a vote is never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub id: Uuid,
    pub voter_id: Uuid,
    pub post_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Vote {
    pub fn new(voter_id: Uuid, post_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            voter_id,
            post_id,
            created_at: Utc::now(),
        }
    }
}

/// Inclusive calendar-date window (UTC) for vote analytics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoteRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl VoteRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Self, DomainError> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(DomainError::Validation(format!(
                    "date_from ({from}) is after date_to ({to})"
                )));
            }
        }
        Ok(Self { from, to })
    }

    /// Earliest instant included, if bounded below.
    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.from.map(|d| d.and_time(NaiveTime::MIN).and_utc())
    }

    /// First instant past the window, if bounded above.
    pub fn end_exclusive(&self) -> Option<DateTime<Utc>> {
        self.to
            .and_then(|d| d.checked_add_days(Days::new(1)))
            .map(|d| d.and_time(NaiveTime::MIN).and_utc())
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        let day = at.date_naive();
        self.from.is_none_or(|from| day >= from) && self.to.is_none_or(|to| day <= to)
    }
}

/// Number of votes cast on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyVotes {
    pub date: NaiveDate,
    pub votes: u64,
}

impl DailyVotes {
    pub fn new(date: NaiveDate, votes: u64) -> Self {
        Self { date, votes }
    }

    /// Group vote timestamps by UTC day, keeping those inside `range`.
    /// The result is sorted by ascending date.
    pub fn tally(
        timestamps: impl IntoIterator<Item = DateTime<Utc>>,
        range: &VoteRange,
    ) -> Vec<DailyVotes> {
        let mut days: BTreeMap<NaiveDate, u64> = BTreeMap::new();
        for at in timestamps.into_iter().filter(|at| range.contains(*at)) {
            *days.entry(at.date_naive()).or_default() += 1;
        }
        days.into_iter()
            .map(|(date, votes)| DailyVotes { date, votes })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn sample() -> Vec<DateTime<Utc>> {
        vec![
            at(2024, 1, 2, 9),
            at(2024, 1, 1, 8),
            at(2024, 1, 1, 12),
            at(2024, 1, 1, 23),
        ]
    }

    #[test]
    fn test_tally_groups_by_day_ascending() {
        let result = DailyVotes::tally(sample(), &VoteRange::default());
        assert_eq!(
            result,
            vec![
                DailyVotes::new(date(2024, 1, 1), 3),
                DailyVotes::new(date(2024, 1, 2), 1),
            ]
        );
    }

    #[test]
    fn test_tally_respects_lower_bound() {
        let range = VoteRange::new(Some(date(2024, 1, 2)), None).unwrap();
        assert_eq!(
            DailyVotes::tally(sample(), &range),
            vec![DailyVotes::new(date(2024, 1, 2), 1)]
        );
    }

    #[test]
    fn test_upper_bound_includes_whole_day() {
        let range = VoteRange::new(None, Some(date(2024, 1, 1))).unwrap();
        assert!(range.contains(at(2024, 1, 1, 23)));
        assert!(!range.contains(at(2024, 1, 2, 0)));
        assert_eq!(range.end_exclusive(), Some(at(2024, 1, 2, 0)));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let result = VoteRange::new(Some(date(2024, 2, 1)), Some(date(2024, 1, 1)));
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_range_start() {
        let range = VoteRange::new(Some(date(2024, 1, 2)), None).unwrap();
        assert_eq!(range.start(), Some(at(2024, 1, 2, 0)));
        assert_eq!(range.end_exclusive(), None);
    }
}
