use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::dates::{null_as_default, optional_date, optional_datetime};

/// Monthly attendance row from `/report/employee-attendance`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub employee_id: i64,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub working_days: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub present_days: u32,
}

impl AttendanceSummary {
    /// Present days over working days, rounded to one decimal.
    pub fn percentage(&self) -> f64 {
        if self.working_days == 0 {
            return 0.0;
        }
        let ratio = f64::from(self.present_days) / f64::from(self.working_days) * 100.0;
        (ratio * 10.0).round() / 10.0
    }
}

/// Row from `/report/employee-last-punch`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct LastPunch {
    pub employee_id: i64,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default, deserialize_with = "optional_date")]
    pub doj: Option<NaiveDate>,
    #[serde(default, deserialize_with = "optional_datetime")]
    pub last_punch_date: Option<NaiveDateTime>,
}

/// Member with overdue fees, from `/payments/reports/defaulters`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Defaulter {
    #[serde(alias = "employeeId", alias = "memberId")]
    pub id: i64,
    #[serde(default, alias = "employeeName", alias = "memberName")]
    pub name: Option<String>,
    #[serde(default)]
    pub contact_no: Option<String>,
    #[serde(default, deserialize_with = "optional_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, alias = "amount", alias = "pendingAmount")]
    pub due_amount: Option<f64>,
    #[serde(default)]
    pub months_overdue: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attendance_percentage_handles_zero_working_days() {
        let row = AttendanceSummary {
            employee_id: 1,
            working_days: 24,
            present_days: 19,
            ..Default::default()
        };
        assert_eq!(row.percentage(), 79.2);
        assert_eq!(AttendanceSummary::default().percentage(), 0.0);
    }
}
