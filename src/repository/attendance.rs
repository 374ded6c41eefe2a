use async_trait::async_trait;

use crate::domain::attendance::{
    ActiveEmployee, ActivePeriod, InactiveMember, InactivePeriod, PunchRecord,
};
use crate::dto::page::{CountedPage, SpringPage};
use crate::pagination::{PageRequest, PageResult};
use crate::repository::api::page_params;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ApiRepository, AttendanceReader, AttendanceWriter, PunchCriteria, PunchSearchQuery,
    UploadFile,
};

/// Punch searches are always newest first.
const PUNCH_SORT: [(&str, &str); 2] = [("sortBy", "logDateTime"), ("sortDir", "desc")];

#[async_trait]
impl AttendanceReader for ApiRepository {
    async fn search_punches(
        &self,
        query: &PunchSearchQuery,
    ) -> RepositoryResult<PageResult<PunchRecord>> {
        let mut params = page_params(query.page);
        params.extend(PUNCH_SORT.map(|(key, value)| (key, value.to_string())));
        let path = match &query.criteria {
            PunchCriteria::MonthYear(month) => {
                params.push(("monthYear", month.to_string()));
                "/punch/details-by-month-year-paginated"
            }
            PunchCriteria::Year(year) => {
                params.push(("year", year.to_string()));
                "/punch/details-by-year-paginated"
            }
            PunchCriteria::Filters {
                employee_id,
                employee_name,
                date,
            } => {
                if let Some(id) = employee_id {
                    params.push(("employeeId", id.to_string()));
                }
                if let Some(name) = employee_name {
                    params.push(("employeeName", name.clone()));
                }
                if let Some(date) = date {
                    params.push(("date", date.format("%Y-%m-%d").to_string()));
                }
                "/punch/details-paginated"
            }
        };
        let page: SpringPage<PunchRecord> = self.get_json(path, &params).await?;
        Ok(page.into_page_result())
    }

    async fn list_inactive_members(
        &self,
        period: InactivePeriod,
        page: PageRequest,
    ) -> RepositoryResult<PageResult<InactiveMember>> {
        let path = format!("/report/inactive-last-{}-days-paginated", period.days());
        let counted: CountedPage<InactiveMember> = self.get_json(&path, &page_params(page)).await?;
        Ok(counted.into_page_result(page))
    }

    async fn list_active_members(
        &self,
        period: ActivePeriod,
        page: PageRequest,
    ) -> RepositoryResult<PageResult<ActiveEmployee>> {
        let mut params = page_params(page);
        params.push(("period", period.as_str().to_string()));
        params.push(("paginated", "true".to_string()));
        let counted: CountedPage<ActiveEmployee> = self.get_json("/report/active", &params).await?;
        Ok(counted.into_page_result(page))
    }
}

#[async_trait]
impl AttendanceWriter for ApiRepository {
    async fn upload_punches(&self, file: UploadFile) -> RepositoryResult<()> {
        self.upload("/punch/upload", file).await
    }
}
