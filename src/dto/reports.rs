//! View models of the reports screen.
//!
//! Every report renders as the same column/cell table so the page and the
//! CSV export share one shape.

use serde::Serialize;

use crate::domain::attendance::InactiveMember;
use crate::domain::member::Member;
use crate::domain::report::{AttendanceSummary, Defaulter, LastPunch};
use crate::domain::types::{display_contact, format_currency};
use crate::dto::list::ListView;
use crate::listing::{ListDefaults, ListFilter, SortDirection};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportFilter {
    Attendance,
    LastPunch,
    NoPunch,
    Inactive,
    Defaulters,
}

impl ListFilter for ReportFilter {
    const ALL: &'static [Self] = &[
        ReportFilter::Attendance,
        ReportFilter::LastPunch,
        ReportFilter::NoPunch,
        ReportFilter::Inactive,
        ReportFilter::Defaulters,
    ];

    fn as_str(self) -> &'static str {
        match self {
            ReportFilter::Attendance => "attendance",
            ReportFilter::LastPunch => "last-punch",
            ReportFilter::NoPunch => "no-punch",
            ReportFilter::Inactive => "inactive",
            ReportFilter::Defaulters => "defaulters",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ReportFilter::Attendance => "Employee Attendance",
            ReportFilter::LastPunch => "Last Punch Report",
            ReportFilter::NoPunch => "No Punch Report",
            ReportFilter::Inactive => "Inactive Members",
            ReportFilter::Defaulters => "Fee Defaulters",
        }
    }
}

impl ReportFilter {
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            ReportFilter::Attendance => &["ID", "Name", "Working Days", "Present Days", "Attendance %"],
            ReportFilter::LastPunch => &["ID", "Name", "Joined", "Last Punch"],
            ReportFilter::NoPunch => &["ID", "Name", "Contact", "Joined"],
            ReportFilter::Inactive => &["ID", "Name", "Contact", "Last Punch", "Inactive Days"],
            ReportFilter::Defaulters => &["ID", "Name", "Contact", "Due Date", "Amount", "Months Overdue"],
        }
    }

    /// Whether the report is paged by the API rather than fetched whole.
    pub fn server_paged(self) -> bool {
        self == ReportFilter::Defaulters
    }
}

pub const REPORT_DEFAULTS: ListDefaults<ReportFilter> =
    ListDefaults::new(ReportFilter::Attendance, "id", SortDirection::Asc).sortable(&["id"]);

/// Inactivity windows offered by the inactive report.
pub const INACTIVE_DAY_OPTIONS: [u32; 4] = [7, 15, 30, 60];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReportRow {
    pub id: i64,
    pub name: String,
    pub cells: Vec<String>,
}

impl ReportRow {
    pub fn matches(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(&term.to_lowercase()) || self.id.to_string().contains(term)
    }
}

fn name_or_dash(name: Option<&str>) -> String {
    name.filter(|name| !name.trim().is_empty())
        .unwrap_or("-")
        .to_string()
}

fn date_cell(date: Option<impl std::fmt::Display>) -> String {
    date.map(|date| date.to_string()).unwrap_or_else(|| "-".to_string())
}

impl From<AttendanceSummary> for ReportRow {
    fn from(row: AttendanceSummary) -> Self {
        let name = name_or_dash(row.employee_name.as_deref());
        Self {
            id: row.employee_id,
            cells: vec![
                row.employee_id.to_string(),
                name.clone(),
                row.working_days.to_string(),
                row.present_days.to_string(),
                format!("{:.1}%", row.percentage()),
            ],
            name,
        }
    }
}

impl From<LastPunch> for ReportRow {
    fn from(row: LastPunch) -> Self {
        let name = name_or_dash(row.employee_name.as_deref());
        Self {
            id: row.employee_id,
            cells: vec![
                row.employee_id.to_string(),
                name.clone(),
                date_cell(row.doj),
                date_cell(row.last_punch_date.map(|at| at.format("%Y-%m-%d %H:%M"))),
            ],
            name,
        }
    }
}

impl From<Member> for ReportRow {
    fn from(member: Member) -> Self {
        let name = name_or_dash(member.name.as_deref());
        Self {
            id: member.id,
            cells: vec![
                member.id.to_string(),
                name.clone(),
                display_contact(member.contact_no.as_deref()),
                date_cell(member.doj),
            ],
            name,
        }
    }
}

impl From<InactiveMember> for ReportRow {
    fn from(member: InactiveMember) -> Self {
        let name = name_or_dash(member.employee_name.as_deref());
        Self {
            id: member.employee_id,
            cells: vec![
                member.employee_id.to_string(),
                name.clone(),
                display_contact(member.contact_no.as_deref()),
                date_cell(member.last_punch_date.map(|at| at.format("%Y-%m-%d"))),
                member.days_idle().to_string(),
            ],
            name,
        }
    }
}

impl From<Defaulter> for ReportRow {
    fn from(row: Defaulter) -> Self {
        let name = name_or_dash(row.name.as_deref());
        Self {
            id: row.id,
            cells: vec![
                row.id.to_string(),
                name.clone(),
                display_contact(row.contact_no.as_deref()),
                date_cell(row.due_date),
                format_currency(row.due_amount),
                date_cell(row.months_overdue),
            ],
            name,
        }
    }
}

/// Inputs of the report parameter form.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ReportParams {
    /// `yyyy-MM`, the value of the month picker.
    pub month: String,
    pub month_label: String,
    pub from: String,
    pub to: String,
    pub days: u32,
}

#[derive(Debug, Serialize)]
pub struct ReportsPageData {
    pub report: ReportFilter,
    pub columns: &'static [&'static str],
    pub list: ListView<ReportRow>,
    pub params: ReportParams,
    pub day_options: [u32; 4],
    pub csv_href: String,
    pub excel_href: String,
    pub pdf_href: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attendance_rows_show_the_percentage() {
        let row = ReportRow::from(AttendanceSummary {
            employee_id: 8,
            employee_name: Some("Asha".into()),
            working_days: 24,
            present_days: 19,
        });
        assert_eq!(row.cells, vec!["8", "Asha", "24", "19", "79.2%"]);
        assert_eq!(row.cells.len(), ReportFilter::Attendance.columns().len());
    }

    #[test]
    fn missing_values_render_as_dashes() {
        let row = ReportRow::from(Defaulter {
            id: 2,
            ..Default::default()
        });
        assert_eq!(row.name, "-");
        assert_eq!(row.cells[3], "-");
        assert_eq!(row.cells.len(), ReportFilter::Defaulters.columns().len());
    }
}
