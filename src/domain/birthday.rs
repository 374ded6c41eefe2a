use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::domain::types::TypeConstraintError;

/// Birthday lists offered by the birthdays screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BirthdayWindow {
    #[default]
    Today,
    ThisWeek,
    ThisMonth,
}

impl BirthdayWindow {
    pub const ALL: [BirthdayWindow; 3] = [
        BirthdayWindow::Today,
        BirthdayWindow::ThisWeek,
        BirthdayWindow::ThisMonth,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            BirthdayWindow::Today => "today",
            BirthdayWindow::ThisWeek => "this-week",
            BirthdayWindow::ThisMonth => "this-month",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            BirthdayWindow::Today => "Today",
            BirthdayWindow::ThisWeek => "This Week",
            BirthdayWindow::ThisMonth => "This Month",
        }
    }
}

impl Display for BirthdayWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BirthdayWindow {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BirthdayWindow::ALL
            .into_iter()
            .find(|window| window.as_str() == s)
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("birthday window `{s}`")))
    }
}

/// Days until the next birthday, `0` when it is today.
///
/// Members born on 29 February celebrate on 1 March in common years.
pub fn days_until_birthday(dob: NaiveDate, today: NaiveDate) -> i64 {
    let next_in = |year: i32| {
        NaiveDate::from_ymd_opt(year, dob.month(), dob.day())
            .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
    };
    let this_year = next_in(today.year());
    let next = match this_year {
        Some(date) if date >= today => Some(date),
        _ => next_in(today.year() + 1),
    };
    next.map(|date| (date - today).num_days()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn counts_days_to_the_next_occurrence() {
        let today = date(2025, 11, 10);
        assert_eq!(days_until_birthday(date(1995, 11, 10), today), 0);
        assert_eq!(days_until_birthday(date(1995, 11, 12), today), 2);
        assert_eq!(days_until_birthday(date(1995, 11, 9), today), 364);
    }

    #[test]
    fn leap_day_birthdays_move_to_march_first() {
        assert_eq!(days_until_birthday(date(2000, 2, 29), date(2025, 2, 27)), 2);
    }

    #[test]
    fn window_parses_its_path_segment() {
        assert_eq!("this-week".parse(), Ok(BirthdayWindow::ThisWeek));
        assert!("next-year".parse::<BirthdayWindow>().is_err());
    }
}
