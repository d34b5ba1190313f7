//! Common value types used throughout climaqual-rs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::traits::Id;

/// Opaque reference to a user from the external user directory.
///
/// The workflow core treats the assignee as an id plus display name pair;
/// it does not validate that the id refers to a real user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignee {
    pub id: Id,
    pub name: String,
}

impl Assignee {
    pub fn new(id: Id, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Date range (planned start to planned end)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            start_date: start,
            end_date: end,
        }
    }

    pub fn duration_days(&self) -> Option<i64> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some((end - start).num_days()),
            _ => None,
        }
    }
}

/// Elapsed whole days between two instants, rounded up.
///
/// A stage started and completed within the same day counts as 0 elapsed
/// days only when the instants coincide; any positive elapsed time rounds
/// up to the next whole day.
pub fn elapsed_days_ceil(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let secs = (end - start).num_seconds();
    if secs <= 0 {
        return 0;
    }
    (secs + 86_399) / 86_400
}
