//! Time primitives for feed instants.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Rendering used when an instant falls outside the representable calendar range.
pub const INVALID_DATE: &str = "Invalid Date";

// Matches the shape of a browser `Date` string, e.g. `Tue Nov 14 2023 22:13:20 GMT+0000`.
const CALENDAR_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";

/// Instant on the feed clock, in milliseconds since the Unix epoch.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventTime(pub i64);

impl EventTime {
    pub const fn from_epoch_millis(ms: i64) -> Self {
        Self(ms)
    }

    pub const fn epoch_millis(self) -> i64 {
        self.0
    }

    pub fn to_utc(self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.0).single()
    }

    pub fn in_zone<Tz: TimeZone>(self, tz: &Tz) -> Option<DateTime<Tz>> {
        self.to_utc().map(|t| t.with_timezone(tz))
    }

    /// Calendar representation in `tz`, or [`INVALID_DATE`] when out of range.
    pub fn calendar_string<Tz: TimeZone>(self, tz: &Tz) -> String
    where
        Tz::Offset: Display,
    {
        match self.in_zone(tz) {
            Some(t) => t.format(CALENDAR_FORMAT).to_string(),
            None => INVALID_DATE.to_string(),
        }
    }

    /// Calendar representation in the process-local time zone.
    pub fn local_calendar_string(self) -> String {
        self.calendar_string(&Local)
    }
}
