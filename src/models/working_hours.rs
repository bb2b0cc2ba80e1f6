//! Working hours model (per employee, per weekday)

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;

/// Day of the week, stored in Postgres as the `weekday` enum type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "weekday", rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Map a calendar date to its weekday. Pure, total.
    pub fn from_date(date: NaiveDate) -> Self {
        match date.weekday() {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "monday" => Ok(Weekday::Monday),
            "tuesday" => Ok(Weekday::Tuesday),
            "wednesday" => Ok(Weekday::Wednesday),
            "thursday" => Ok(Weekday::Thursday),
            "friday" => Ok(Weekday::Friday),
            "saturday" => Ok(Weekday::Saturday),
            "sunday" => Ok(Weekday::Sunday),
            other => Err(format!("Unknown weekday: {}", other)),
        }
    }
}

/// Configured working window for one employee on one weekday
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct WorkingHours {
    pub id: i32,
    pub employee_id: i32,
    pub weekday: Weekday,
    /// Start of the working day
    pub start_time: NaiveTime,
    /// End of the working day
    pub end_time: NaiveTime,
    /// Lunch break start, if a break is configured
    pub lunch_start: Option<NaiveTime>,
    /// Lunch break end, if a break is configured
    pub lunch_end: Option<NaiveTime>,
}

/// Upsert working hours request (times as HH:MM)
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpsertWorkingHours {
    pub weekday: Weekday,
    /// Working day start (HH:MM)
    pub start_time: String,
    /// Working day end (HH:MM)
    pub end_time: String,
    /// Lunch start (HH:MM), omit for no break
    pub lunch_start: Option<String>,
    /// Lunch end (HH:MM), omit for no break
    pub lunch_end: Option<String>,
}
