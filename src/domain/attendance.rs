use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::dates::{optional_date, optional_datetime};

/// Single biometric punch as returned by the punch search endpoints.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PunchRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub punch_id: Option<i64>,
    #[serde(default)]
    pub employee_id: Option<i64>,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default, deserialize_with = "optional_datetime")]
    pub log_date_time: Option<NaiveDateTime>,
}

/// Member row of the activity reports: who punched last and how long ago.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct InactiveMember {
    pub employee_id: i64,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default)]
    pub contact_no: Option<String>,
    #[serde(default, deserialize_with = "optional_date")]
    pub doj: Option<NaiveDate>,
    #[serde(default, deserialize_with = "optional_datetime")]
    pub last_punch_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub inactive_days_since_last_punch: Option<i64>,
}

/// Rows of `/report/active` share the inactive report shape.
pub type ActiveEmployee = InactiveMember;

/// Windows of the "not punched since" reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum InactivePeriod {
    Days7,
    Days15,
    Days30,
    Days60,
}

impl InactivePeriod {
    pub const ALL: [InactivePeriod; 4] = [
        InactivePeriod::Days7,
        InactivePeriod::Days15,
        InactivePeriod::Days30,
        InactivePeriod::Days60,
    ];

    pub const fn days(self) -> u32 {
        match self {
            InactivePeriod::Days7 => 7,
            InactivePeriod::Days15 => 15,
            InactivePeriod::Days30 => 30,
            InactivePeriod::Days60 => 60,
        }
    }
}

/// Windows of the consolidated `/report/active` endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ActivePeriod {
    Today,
    Last7Days,
    Last30Days,
    ThisMonth,
}

impl ActivePeriod {
    pub const ALL: [ActivePeriod; 4] = [
        ActivePeriod::Today,
        ActivePeriod::Last7Days,
        ActivePeriod::Last30Days,
        ActivePeriod::ThisMonth,
    ];

    /// Value of the `period` query parameter.
    pub const fn as_str(self) -> &'static str {
        match self {
            ActivePeriod::Today => "today",
            ActivePeriod::Last7Days => "last-7-days",
            ActivePeriod::Last30Days => "last-30-days",
            ActivePeriod::ThisMonth => "this-month",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ActivePeriod::Today => "Today",
            ActivePeriod::Last7Days => "Last 7 Days",
            ActivePeriod::Last30Days => "Last 30 Days",
            ActivePeriod::ThisMonth => "This Month",
        }
    }
}

/// Badge colour for the days-since-last-punch column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Recency {
    Fresh,
    Warning,
    Danger,
}

impl InactiveMember {
    pub fn days_idle(&self) -> i64 {
        self.inactive_days_since_last_punch.unwrap_or(0)
    }

    /// Over 30 idle days is danger, over 7 a warning.
    pub fn inactivity(&self) -> Recency {
        match self.days_idle() {
            d if d > 30 => Recency::Danger,
            d if d > 7 => Recency::Warning,
            _ => Recency::Fresh,
        }
    }

    /// Punched today is fresh, within 3 days a warning, anything older danger.
    pub fn activity(&self) -> Recency {
        match self.days_idle() {
            0 => Recency::Fresh,
            d if d <= 3 => Recency::Warning,
            _ => Recency::Danger,
        }
    }
}
