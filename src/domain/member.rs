use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::dates::{optional_date, optional_datetime};
use crate::domain::types::{Amount, ContactNumber, MemberId, MemberName};

/// Gym member as returned by the member and report endpoints.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(alias = "employeeId")]
    pub id: i64,
    #[serde(default, alias = "employeeName")]
    pub name: Option<String>,
    #[serde(default)]
    pub contact_no: Option<String>,
    #[serde(default, deserialize_with = "optional_date")]
    pub doj: Option<NaiveDate>,
    #[serde(default, deserialize_with = "optional_date")]
    pub dob: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub blood_group: Option<String>,
    #[serde(default)]
    pub is_admin: Option<bool>,
    #[serde(default, deserialize_with = "optional_date")]
    pub expiry_from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "optional_date")]
    pub expiry_to: Option<NaiveDate>,
    #[serde(default, deserialize_with = "optional_datetime")]
    pub last_punch_time: Option<NaiveDateTime>,
}

impl Member {
    /// Membership is active while the paid period has not run out.
    pub fn is_active(&self, today: NaiveDate) -> bool {
        self.expiry_to.is_some_and(|expiry| expiry >= today)
    }

    /// Age in full years on `today`.
    pub fn age(&self, today: NaiveDate) -> Option<i32> {
        let dob = self.dob?;
        let mut age = today.year() - dob.year();
        if (today.month(), today.day()) < (dob.month(), dob.day()) {
            age -= 1;
        }
        Some(age)
    }

    /// Status label shown in member tables.
    pub fn status(&self, today: NaiveDate) -> &'static str {
        match self.expiry_to {
            None => "Inactive",
            Some(_) if self.is_active(today) => "Active",
            Some(_) => "Expired",
        }
    }

    /// Case-insensitive match on name or id, used when a list is searched locally.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return true;
        }
        let needle = term.to_lowercase();
        self.name
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains(&needle))
            || self.id.to_string().contains(term)
    }
}

/// One month of punches for the member punch history screen.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPunchSummary {
    #[serde(default)]
    pub month_year: Option<String>,
    #[serde(default)]
    pub total_days: Option<u32>,
    #[serde(default)]
    pub punch_records: Vec<PunchDay>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PunchDay {
    #[serde(default, deserialize_with = "optional_date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub day_of_week: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

/// Payload accepted by `POST /members` and `PUT /members/{id}`.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewMember {
    pub id: MemberId,
    pub name: MemberName,
    pub contact_no: ContactNumber,
    pub doj: NaiveDate,
    pub dob: Option<NaiveDate>,
    pub gender: Option<String>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub blood_group: Option<String>,
    pub joining_fee: Amount,
    pub is_admin: bool,
    pub advance_in_months: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn decodes_member_and_report_spellings() {
        let member: Member = serde_json::from_str(
            r#"{"id": 7, "name": "Asha", "contactNo": "9876543210", "doj": "2024-03-01", "expiryTo": "2025-03-31T00:00:00"}"#,
        )
        .unwrap();
        assert_eq!(member.id, 7);
        assert_eq!(member.expiry_to, Some(date(2025, 3, 31)));

        let row: Member =
            serde_json::from_str(r#"{"employeeId": 9, "employeeName": "Vikram"}"#).unwrap();
        assert_eq!(row.id, 9);
        assert_eq!(row.name.as_deref(), Some("Vikram"));
    }

    #[test]
    fn activity_follows_expiry() {
        let member = Member {
            expiry_to: Some(date(2025, 5, 10)),
            ..Default::default()
        };
        assert!(member.is_active(date(2025, 5, 10)));
        assert!(!member.is_active(date(2025, 5, 11)));
        assert_eq!(member.status(date(2025, 6, 1)), "Expired");
        assert_eq!(Member::default().status(date(2025, 6, 1)), "Inactive");
    }

    #[test]
    fn age_counts_completed_years() {
        let member = Member {
            dob: Some(date(1990, 8, 15)),
            ..Default::default()
        };
        assert_eq!(member.age(date(2025, 8, 14)), Some(34));
        assert_eq!(member.age(date(2025, 8, 15)), Some(35));
    }

    #[test]
    fn local_search_matches_name_or_id() {
        let member = Member {
            id: 1204,
            name: Some("Meera Iyer".into()),
            ..Default::default()
        };
        assert!(member.matches("meera"));
        assert!(member.matches("120"));
        assert!(member.matches(""));
        assert!(!member.matches("rahul"));
    }
}
