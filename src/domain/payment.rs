use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::dates::{optional_date, optional_datetime};
use crate::domain::member::Member;
use crate::domain::types::{Amount, MemberId, TypeConstraintError};

/// Modes of payment accepted at the front desk.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum PaymentMode {
    #[default]
    Cash,
    #[serde(rename = "UPI")]
    Upi,
    Card,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    Cheque,
}

impl PaymentMode {
    pub const ALL: [PaymentMode; 5] = [
        PaymentMode::Cash,
        PaymentMode::Upi,
        PaymentMode::Card,
        PaymentMode::BankTransfer,
        PaymentMode::Cheque,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            PaymentMode::Cash => "Cash",
            PaymentMode::Upi => "UPI",
            PaymentMode::Card => "Card",
            PaymentMode::BankTransfer => "Bank Transfer",
            PaymentMode::Cheque => "Cheque",
        }
    }
}

impl Display for PaymentMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMode {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("payment mode `{s}`")))
    }
}

/// Member whose fee is due, from `GET /payments/pending`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PendingPayment {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub employee_detail: Option<Member>,
    #[serde(default, deserialize_with = "optional_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub paid: Option<bool>,
    #[serde(default, alias = "isAdmissionFee")]
    pub admission_fee: Option<bool>,
}

impl PendingPayment {
    pub fn kind(&self) -> &'static str {
        if self.admission_fee.unwrap_or(false) {
            "Admission"
        } else {
            "Monthly"
        }
    }
}

/// Recorded payment from a member's payment history.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "optional_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "optional_datetime")]
    pub paid_on: Option<NaiveDateTime>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub paid: Option<bool>,
    #[serde(default)]
    pub paid_amount: Option<f64>,
    #[serde(default)]
    pub payment_mode: Option<String>,
    #[serde(default)]
    pub advanced_amount: Option<f64>,
    #[serde(default)]
    pub admission_amount: Option<f64>,
    #[serde(default)]
    pub admission_fee: Option<bool>,
}

impl Payment {
    pub fn is_admission(&self) -> bool {
        self.admission_fee.unwrap_or(false)
    }

    pub fn status(&self) -> &'static str {
        if self.paid.unwrap_or(false) {
            "Paid"
        } else {
            "Pending"
        }
    }
}

/// Reference to the member a payment belongs to, as nested by the API.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct EmployeeRef {
    pub id: MemberId,
}

/// Payload accepted by `POST /payments`.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub employee_detail: EmployeeRef,
    pub due_date: NaiveDate,
    pub paid_amount: Amount,
    pub payment_mode: PaymentMode,
    pub advance_in_months: u32,
    pub is_admission_fee: bool,
    pub paid_on: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_modes_round_trip_labels() {
        assert_eq!("bank transfer".parse::<PaymentMode>(), Ok(PaymentMode::BankTransfer));
        assert_eq!(
            serde_json::to_string(&PaymentMode::Upi).unwrap(),
            "\"UPI\""
        );
        assert!("Bitcoin".parse::<PaymentMode>().is_err());
    }

    #[test]
    fn new_payment_nests_the_member_reference() {
        let payment = NewPayment {
            employee_detail: EmployeeRef {
                id: MemberId::new(12).unwrap(),
            },
            due_date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            paid_amount: Amount::new(1200.0).unwrap(),
            payment_mode: PaymentMode::Cash,
            advance_in_months: 0,
            is_admission_fee: false,
            paid_on: NaiveDate::from_ymd_opt(2025, 2, 3)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
        };
        let json = serde_json::to_value(&payment).unwrap();
        assert_eq!(json["employeeDetail"]["id"], 12);
        assert_eq!(json["paidAmount"], 1200.0);
        assert_eq!(json["paymentMode"], "Cash");
        assert_eq!(json["dueDate"], "2025-02-01");
    }
}
