//! View models of the member screens.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::member::{Member, MonthlyPunchSummary};
use crate::domain::payment::{Payment, PaymentMode};
use crate::domain::types::display_contact;
use crate::dto::list::ListView;
use crate::listing::{ListDefaults, ListFilter, SortDirection};

/// Member list tabs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberFilter {
    All,
    Paid,
    Unpaid,
    Unattended,
    Active,
    Admins,
}

impl ListFilter for MemberFilter {
    const ALL: &'static [Self] = &[
        MemberFilter::All,
        MemberFilter::Paid,
        MemberFilter::Unpaid,
        MemberFilter::Unattended,
        MemberFilter::Active,
        MemberFilter::Admins,
    ];

    fn as_str(self) -> &'static str {
        match self {
            MemberFilter::All => "all",
            MemberFilter::Paid => "paid",
            MemberFilter::Unpaid => "unpaid",
            MemberFilter::Unattended => "unattended",
            MemberFilter::Active => "active",
            MemberFilter::Admins => "admins",
        }
    }

    fn label(self) -> &'static str {
        match self {
            MemberFilter::All => "All Members",
            MemberFilter::Paid => "Paid",
            MemberFilter::Unpaid => "Unpaid",
            MemberFilter::Unattended => "Unattended",
            MemberFilter::Active => "Active (7 days)",
            MemberFilter::Admins => "Admins",
        }
    }
}

impl MemberFilter {
    /// The unattended and recently-active endpoints take no search term.
    pub fn supports_search(self) -> bool {
        !matches!(self, MemberFilter::Unattended | MemberFilter::Active)
    }
}

pub const MEMBER_DEFAULTS: ListDefaults<MemberFilter> =
    ListDefaults::new(MemberFilter::All, "id", SortDirection::Asc).sortable(&["id", "name", "doj"]);

/// What the members screen shows besides the list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberMode {
    #[default]
    View,
    /// Create/update forms and spreadsheet uploads.
    Manage,
}

impl MemberMode {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("manage") => MemberMode::Manage,
            _ => MemberMode::View,
        }
    }
}

/// Member with the derived columns of the member tables.
#[derive(Clone, Debug, Serialize)]
pub struct MemberRow {
    #[serde(flatten)]
    pub member: Member,
    pub contact: String,
    pub status: &'static str,
    pub active: bool,
    pub age: Option<i32>,
}

impl MemberRow {
    pub fn new(member: Member, today: NaiveDate) -> Self {
        Self {
            contact: display_contact(member.contact_no.as_deref()),
            status: member.status(today),
            active: member.is_active(today),
            age: member.age(today),
            member,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MembersPageData {
    pub list: ListView<MemberRow>,
    pub mode: MemberMode,
    /// Whether the active tab honours the search box.
    pub searchable: bool,
    /// Endpoint the search box calls on every keystroke.
    pub live_href: String,
}

#[derive(Debug, Serialize)]
pub struct MemberDetailData {
    pub member: MemberRow,
    pub admission_payments: Vec<Payment>,
    pub monthly_payments: Vec<Payment>,
    pub payment_modes: Vec<&'static str>,
}

impl MemberDetailData {
    pub fn new(member: Member, payments: Vec<Payment>, today: NaiveDate) -> Self {
        let (admission_payments, monthly_payments): (Vec<Payment>, Vec<Payment>) =
            payments.into_iter().partition(Payment::is_admission);
        Self {
            member: MemberRow::new(member, today),
            admission_payments,
            monthly_payments,
            payment_modes: PaymentMode::ALL.iter().map(|mode| mode.as_str()).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PunchSummaryData {
    pub member_id: i64,
    pub months: Vec<MonthlyPunchSummary>,
    pub total_days: u32,
}

impl PunchSummaryData {
    pub fn new(member_id: i64, months: Vec<MonthlyPunchSummary>) -> Self {
        let total_days = months
            .iter()
            .map(|month| month.total_days.unwrap_or(month.punch_records.len() as u32))
            .sum();
        Self {
            member_id,
            months,
            total_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payments_split_by_kind() {
        let payments = vec![
            Payment {
                admission_fee: Some(true),
                ..Default::default()
            },
            Payment::default(),
            Payment::default(),
        ];
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let data = MemberDetailData::new(Member::default(), payments, today);
        assert_eq!(data.admission_payments.len(), 1);
        assert_eq!(data.monthly_payments.len(), 2);
        assert_eq!(data.payment_modes.len(), 5);
    }

    #[test]
    fn only_server_searchable_tabs_accept_a_term() {
        assert!(MemberFilter::Paid.supports_search());
        assert!(!MemberFilter::Unattended.supports_search());
        assert_eq!(MemberFilter::parse("admins"), Some(MemberFilter::Admins));
    }
}
