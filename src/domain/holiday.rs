use serde::{Deserialize, Serialize};

use crate::domain::dates::null_as_default;

use crate::domain::types::MonthYear;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    pub id: i64,
    #[serde(default)]
    pub holiday_month_year: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub number_of_holidays: u32,
}

impl Holiday {
    /// `November 2025` for `11-2025`, or the raw value when it does not parse.
    pub fn month_label(&self) -> String {
        match self.holiday_month_year.as_deref() {
            Some(raw) => raw
                .parse::<MonthYear>()
                .map(MonthYear::label)
                .unwrap_or_else(|_| raw.to_string()),
            None => "-".to_string(),
        }
    }
}

/// Payload accepted by `POST /holidays` and `PUT /holidays/{id}`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewHoliday {
    pub holiday_month_year: MonthYear,
    pub number_of_holidays: u32,
}

/// Totals shown under the holiday table.
#[derive(Clone, Debug, Serialize, PartialEq, Default)]
pub struct HolidayTotals {
    pub months: usize,
    pub days: u32,
    pub average_per_month: f64,
}

impl HolidayTotals {
    pub fn from_holidays(holidays: &[Holiday]) -> Self {
        let months = holidays.len();
        let days = holidays.iter().map(|h| h.number_of_holidays).sum::<u32>();
        let average_per_month = if months == 0 {
            0.0
        } else {
            (f64::from(days) / months as f64 * 10.0).round() / 10.0
        };
        Self {
            months,
            days,
            average_per_month,
        }
    }
}
