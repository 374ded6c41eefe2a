use async_trait::async_trait;
use reqwest::Method;

use crate::domain::member::{Member, MonthlyPunchSummary, NewMember};
use crate::domain::types::MemberId;
use crate::dto::page::{ListTotal, SpringPage};
use crate::pagination::{PageRequest, PageResult};
use crate::repository::api::{Params, page_params};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ApiRepository, MemberListQuery, MemberReader, MemberWriter, SortRequest, UploadFile,
};

fn sort_params(params: &mut Params, sort: &SortRequest) {
    params.push(("sortBy", sort.sort_by.clone()));
    params.push(("sortDir", sort.sort_dir.as_str().to_string()));
}

#[async_trait]
impl MemberReader for ApiRepository {
    async fn list_members(&self, query: &MemberListQuery) -> RepositoryResult<PageResult<Member>> {
        let mut params = page_params(query.page);
        sort_params(&mut params, &query.sort);
        params.push(("isAdmin", query.is_admin.to_string()));
        if let Some(search) = &query.search {
            params.push(("search", search.clone()));
        }
        let page: SpringPage<Member> = self.get_json("/members", &params).await?;
        Ok(page.into_page_result())
    }

    async fn list_paid_members(&self) -> RepositoryResult<(u64, Vec<Member>)> {
        let list: ListTotal<Member> = self.get_json("/members/paid", &Params::new()).await?;
        Ok((list.total.max(list.list.len() as u64), list.list))
    }

    async fn list_unpaid_members(&self) -> RepositoryResult<(u64, Vec<Member>)> {
        let list: ListTotal<Member> = self.get_json("/members/unpaid", &Params::new()).await?;
        Ok((list.total.max(list.list.len() as u64), list.list))
    }

    async fn list_unattended_members(
        &self,
        page: PageRequest,
        sort: &SortRequest,
    ) -> RepositoryResult<PageResult<Member>> {
        let mut params = page_params(page);
        sort_params(&mut params, sort);
        let page: SpringPage<Member> = self
            .get_json("/members/unattended-members-paginated", &params)
            .await?;
        Ok(page.into_page_result())
    }

    async fn list_recently_active_members(
        &self,
        page: PageRequest,
    ) -> RepositoryResult<PageResult<Member>> {
        let page: SpringPage<Member> = self
            .get_json("/report/active-last-7-days-paginated", &page_params(page))
            .await?;
        Ok(page.into_page_result())
    }

    async fn get_member(&self, id: MemberId) -> RepositoryResult<Option<Member>> {
        self.get_optional(&format!("/members/{id}")).await
    }

    async fn get_punch_summary(&self, id: MemberId) -> RepositoryResult<Vec<MonthlyPunchSummary>> {
        let params = vec![("employeeId", id.to_string())];
        self.get_json("/punch/employee-monthly-summary", &params)
            .await
    }
}

#[async_trait]
impl MemberWriter for ApiRepository {
    async fn create_member(&self, member: &NewMember) -> RepositoryResult<()> {
        self.send_json(Method::POST, "/members", Some(member)).await
    }

    async fn update_member(&self, id: MemberId, member: &NewMember) -> RepositoryResult<()> {
        self.send_json(Method::PUT, &format!("/members/{id}"), Some(member))
            .await
    }

    async fn upload_members(&self, file: UploadFile) -> RepositoryResult<()> {
        self.upload("/members/upload", file).await
    }

    async fn upload_access_file(&self, file: UploadFile) -> RepositoryResult<()> {
        self.upload("/members/access-file/upload", file).await
    }
}
