use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::payment::{PaymentMode, PendingPayment};
use crate::domain::types::{display_contact, format_currency};
use crate::dto::list::ListView;
use crate::listing::{ListDefaults, ListFilter, SortDirection};

/// The payments screen has a single list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentFilter {
    Pending,
}

impl ListFilter for PaymentFilter {
    const ALL: &'static [Self] = &[PaymentFilter::Pending];

    fn as_str(self) -> &'static str {
        "pending"
    }

    fn label(self) -> &'static str {
        "Pending Payments"
    }
}

pub const PAYMENT_DEFAULTS: ListDefaults<PaymentFilter> =
    ListDefaults::new(PaymentFilter::Pending, "dueDate", SortDirection::Asc);

#[derive(Clone, Debug, Serialize)]
pub struct PendingRow {
    #[serde(flatten)]
    pub payment: PendingPayment,
    pub member_id: Option<i64>,
    pub member_name: String,
    pub contact: String,
    pub kind: &'static str,
    pub amount_label: String,
}

impl From<PendingPayment> for PendingRow {
    fn from(payment: PendingPayment) -> Self {
        let member = payment.employee_detail.as_ref();
        Self {
            member_id: member.map(|m| m.id),
            member_name: member
                .and_then(|m| m.name.clone())
                .unwrap_or_else(|| "-".to_string()),
            contact: display_contact(member.and_then(|m| m.contact_no.as_deref())),
            kind: payment.kind(),
            amount_label: format_currency(payment.amount),
            payment,
        }
    }
}

impl PendingRow {
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.member_name.to_lowercase().contains(&needle)
            || self.member_id.is_some_and(|id| id.to_string().contains(term))
    }
}

#[derive(Debug, Serialize)]
pub struct PaymentsPageData {
    pub list: ListView<PendingRow>,
    pub date: NaiveDate,
    pub payment_modes: Vec<&'static str>,
}

impl PaymentsPageData {
    pub fn payment_modes() -> Vec<&'static str> {
        PaymentMode::ALL.iter().map(|mode| mode.as_str()).collect()
    }
}
