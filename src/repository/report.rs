use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::attendance::InactiveMember;
use crate::domain::birthday::BirthdayWindow;
use crate::domain::member::Member;
use crate::domain::report::{AttendanceSummary, LastPunch};
use crate::domain::types::MonthYear;
use crate::dto::page::Rows;
use crate::repository::api::Params;
use crate::repository::errors::RepositoryResult;
use crate::repository::{ApiRepository, Download, ExportFormat, ReportReader};

fn date_range(from: NaiveDate, to: NaiveDate) -> Params {
    vec![
        ("fromDate", from.format("%Y-%m-%d").to_string()),
        ("toDate", to.format("%Y-%m-%d").to_string()),
    ]
}

#[async_trait]
impl ReportReader for ApiRepository {
    async fn attendance_report(&self, month: MonthYear) -> RepositoryResult<Vec<AttendanceSummary>> {
        let params = vec![("dateMonthYear", month.slashed())];
        let rows: Rows<AttendanceSummary> = self
            .get_json("/report/employee-attendance", &params)
            .await?;
        Ok(rows.rows)
    }

    async fn last_punch_report(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> RepositoryResult<Vec<LastPunch>> {
        let rows: Rows<LastPunch> = self
            .get_json("/report/employee-last-punch", &date_range(from, to))
            .await?;
        Ok(rows.rows)
    }

    async fn members_without_punch(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> RepositoryResult<Vec<Member>> {
        let rows: Rows<Member> = self
            .get_json("/report/employees-without-punch", &date_range(from, to))
            .await?;
        Ok(rows.rows)
    }

    async fn inactive_report(&self, days: u32) -> RepositoryResult<Vec<InactiveMember>> {
        let params = vec![("inactiveDays", days.to_string())];
        let rows: Rows<InactiveMember> = self.get_json("/report/inactive", &params).await?;
        Ok(rows.rows)
    }

    async fn export_inactive_members(
        &self,
        days: u32,
        format: ExportFormat,
    ) -> RepositoryResult<Download> {
        let path = format!("/report/export/inactive-members/{}", format.as_str());
        self.download(&path, &vec![("days", days.to_string())])
            .await
    }

    async fn list_birthdays(&self, window: BirthdayWindow) -> RepositoryResult<Vec<Member>> {
        self.get_json(&format!("/birthday/{}", window.as_str()), &Params::new())
            .await
    }
}
