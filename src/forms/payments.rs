use chrono::{Local, NaiveDateTime};
use serde::Deserialize;
use validator::Validate;

use crate::domain::payment::{EmployeeRef, NewPayment, PaymentMode};
use crate::domain::types::{Amount, MemberId};
use crate::forms::{FormError, optional_datetime, required_date};

#[derive(Debug, Deserialize, Validate)]
/// Form data of the record payment dialog.
pub struct RecordPaymentForm {
    #[validate(range(min = 1, message = "Member ID must be a positive number"))]
    pub employee_id: i64,
    pub due_date: String,
    #[validate(range(min = 0.0, message = "Amount cannot be negative"))]
    pub paid_amount: f64,
    pub payment_mode: String,
    #[serde(default)]
    pub advance_in_months: u32,
    #[serde(default)]
    pub is_admission_fee: bool,
    /// Defaults to the moment of submission.
    #[serde(default)]
    pub paid_on: String,
}

impl RecordPaymentForm {
    /// Builds the payload, stamping it with `now` when no payment time was entered.
    pub fn into_payload(self, now: NaiveDateTime) -> Result<NewPayment, FormError> {
        self.validate()?;

        Ok(NewPayment {
            employee_detail: EmployeeRef {
                id: MemberId::new(self.employee_id)?,
            },
            due_date: required_date(&self.due_date, "due_date")?,
            paid_amount: Amount::new(self.paid_amount)?,
            payment_mode: self.payment_mode.parse::<PaymentMode>()?,
            advance_in_months: self.advance_in_months,
            is_admission_fee: self.is_admission_fee,
            paid_on: optional_datetime(&self.paid_on, "paid_on")?.unwrap_or(now),
        })
    }
}

impl TryFrom<RecordPaymentForm> for NewPayment {
    type Error = FormError;

    fn try_from(form: RecordPaymentForm) -> Result<Self, Self::Error> {
        form.into_payload(Local::now().naive_local())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn blank_paid_on_uses_submission_time() {
        let now = NaiveDate::from_ymd_opt(2025, 4, 2)
            .unwrap()
            .and_hms_opt(18, 5, 0)
            .unwrap();
        let form = RecordPaymentForm {
            employee_id: 12,
            due_date: "2025-04-01".into(),
            paid_amount: 1200.0,
            payment_mode: "upi".into(),
            advance_in_months: 0,
            is_admission_fee: false,
            paid_on: String::new(),
        };

        let payment = form.into_payload(now).unwrap();

        assert_eq!(payment.paid_on, now);
        assert_eq!(payment.payment_mode, PaymentMode::Upi);
        assert_eq!(payment.employee_detail.id.get(), 12);
    }

    #[test]
    fn unknown_payment_mode_is_rejected() {
        let form = RecordPaymentForm {
            employee_id: 12,
            due_date: "2025-04-01".into(),
            paid_amount: 1200.0,
            payment_mode: "Barter".into(),
            advance_in_months: 0,
            is_admission_fee: false,
            paid_on: String::new(),
        };
        assert!(matches!(NewPayment::try_from(form), Err(FormError::Constraint(_))));
    }
}
