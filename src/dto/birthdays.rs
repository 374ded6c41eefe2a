use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::birthday::{BirthdayWindow, days_until_birthday};
use crate::domain::member::Member;
use crate::domain::types::display_contact;
use crate::dto::list::ListView;
use crate::listing::{ListDefaults, ListFilter, SortDirection};

impl ListFilter for BirthdayWindow {
    const ALL: &'static [Self] = &BirthdayWindow::ALL;

    fn as_str(self) -> &'static str {
        BirthdayWindow::as_str(self)
    }

    fn label(self) -> &'static str {
        BirthdayWindow::label(self)
    }
}

pub const BIRTHDAY_DEFAULTS: ListDefaults<BirthdayWindow> =
    ListDefaults::new(BirthdayWindow::Today, "upcoming", SortDirection::Asc).sortable(&["upcoming", "name"]);

#[derive(Clone, Debug, Serialize)]
pub struct BirthdayRow {
    #[serde(flatten)]
    pub member: Member,
    pub contact: String,
    /// `None` when the date of birth is unknown.
    pub days_until: Option<i64>,
    /// Age the member turns on the upcoming birthday.
    pub turning: Option<i32>,
    pub is_today: bool,
}

impl BirthdayRow {
    pub fn new(member: Member, today: NaiveDate) -> Self {
        let days_until = member.dob.map(|dob| days_until_birthday(dob, today));
        let turning = member.age(today).map(|age| if days_until == Some(0) { age } else { age + 1 });
        Self {
            contact: display_contact(member.contact_no.as_deref()),
            is_today: days_until == Some(0),
            days_until,
            turning,
            member,
        }
    }
}

/// Window tab with the number of birthdays it holds.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct WindowCount {
    pub window: &'static str,
    pub label: &'static str,
    /// `None` when that window failed to load.
    pub count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct BirthdaysPageData {
    pub list: ListView<BirthdayRow>,
    pub counts: Vec<WindowCount>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_counts_down_to_the_next_birthday() {
        let today = NaiveDate::from_ymd_opt(2025, 11, 10).unwrap();
        let member = Member {
            id: 1,
            dob: NaiveDate::from_ymd_opt(2000, 11, 12),
            ..Default::default()
        };
        let row = BirthdayRow::new(member, today);
        assert_eq!(row.days_until, Some(2));
        assert_eq!(row.turning, Some(25));
        assert!(!row.is_today);
        assert_eq!(BirthdayRow::new(Member::default(), today).days_until, None);
    }
}
