//! View models of the attendance screen.

use serde::Serialize;

use crate::domain::attendance::{ActivePeriod, InactiveMember, InactivePeriod, PunchRecord, Recency};
use crate::domain::types::display_contact;
use crate::dto::list::ListView;
use crate::listing::{ListDefaults, ListFilter, SortDirection};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceFilter {
    Search,
    Inactive,
    Active,
}

impl ListFilter for AttendanceFilter {
    const ALL: &'static [Self] = &[
        AttendanceFilter::Search,
        AttendanceFilter::Inactive,
        AttendanceFilter::Active,
    ];

    fn as_str(self) -> &'static str {
        match self {
            AttendanceFilter::Search => "search",
            AttendanceFilter::Inactive => "inactive",
            AttendanceFilter::Active => "active",
        }
    }

    fn label(self) -> &'static str {
        match self {
            AttendanceFilter::Search => "Punch Search",
            AttendanceFilter::Inactive => "Inactive Members",
            AttendanceFilter::Active => "Active Members",
        }
    }
}

/// Punches always come newest first.
pub const ATTENDANCE_DEFAULTS: ListDefaults<AttendanceFilter> =
    ListDefaults::new(AttendanceFilter::Search, "logDateTime", SortDirection::Desc)
        .sortable(&["logDateTime"]);

#[derive(Clone, Debug, Serialize)]
pub struct PunchRow {
    #[serde(flatten)]
    pub record: PunchRecord,
    pub punched_at: String,
}

impl From<PunchRecord> for PunchRow {
    fn from(record: PunchRecord) -> Self {
        Self {
            punched_at: record
                .log_date_time
                .map(|at| at.format("%d %b %Y %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string()),
            record,
        }
    }
}

/// Row of the inactive and active tabs.
#[derive(Clone, Debug, Serialize)]
pub struct IdleRow {
    #[serde(flatten)]
    pub member: InactiveMember,
    pub contact: String,
    pub last_punch: String,
    pub days_idle: i64,
    pub recency: Recency,
}

impl IdleRow {
    pub fn inactive(member: InactiveMember) -> Self {
        let recency = member.inactivity();
        Self::with_recency(member, recency)
    }

    pub fn active(member: InactiveMember) -> Self {
        let recency = member.activity();
        Self::with_recency(member, recency)
    }

    fn with_recency(member: InactiveMember, recency: Recency) -> Self {
        Self {
            contact: display_contact(member.contact_no.as_deref()),
            last_punch: member
                .last_punch_date
                .map(|at| at.format("%d %b %Y").to_string())
                .unwrap_or_else(|| "Never".to_string()),
            days_idle: member.days_idle(),
            recency,
            member,
        }
    }
}

/// Link of the period selector on the inactive and active tabs.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PeriodLink {
    pub label: String,
    pub href: String,
    pub active: bool,
}

/// Punch search inputs echoed back into the form.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct PunchSearchForm {
    pub employee_id: String,
    pub employee_name: String,
    pub date: String,
    pub month_year: String,
    pub year: String,
}

#[derive(Debug, Serialize)]
pub struct AttendancePageData {
    pub tab: AttendanceFilter,
    pub search: PunchSearchForm,
    /// Set when the search tab has no criterion to run.
    pub hint: Option<&'static str>,
    pub punches: Option<ListView<PunchRow>>,
    pub idle: Option<ListView<IdleRow>>,
    pub periods: Vec<PeriodLink>,
    pub inactive_period: InactivePeriod,
    pub active_period: ActivePeriod,
}
