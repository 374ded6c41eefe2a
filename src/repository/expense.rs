use async_trait::async_trait;
use reqwest::Method;

use crate::domain::expense::{Expense, NewExpense};
use crate::domain::types::ExpenseId;
use crate::dto::page::DataPage;
use crate::pagination::PageResult;
use crate::repository::api::page_params;
use crate::repository::errors::RepositoryResult;
use crate::repository::{ApiRepository, ExpenseListQuery, ExpenseReader, ExpenseWriter, UploadFile};

#[async_trait]
impl ExpenseReader for ApiRepository {
    async fn list_expenses(&self, query: &ExpenseListQuery) -> RepositoryResult<PageResult<Expense>> {
        let mut params = page_params(query.page);
        if let Some(year) = query.year {
            params.push(("year", year.to_string()));
        }
        if let Some(month) = query.month {
            params.push(("month", month.to_string()));
        }
        let page: DataPage<Expense> = self.get_json("/expenses", &params).await?;
        Ok(page.into_page_result(query.page))
    }

    async fn get_expense(&self, id: ExpenseId) -> RepositoryResult<Option<Expense>> {
        self.get_optional(&format!("/expenses/{id}")).await
    }
}

#[async_trait]
impl ExpenseWriter for ApiRepository {
    async fn create_expense(&self, expense: &NewExpense) -> RepositoryResult<()> {
        self.send_json(Method::POST, "/expenses", Some(expense)).await
    }

    async fn update_expense(&self, id: ExpenseId, expense: &NewExpense) -> RepositoryResult<()> {
        self.send_json(Method::PUT, &format!("/expenses/{id}"), Some(expense))
            .await
    }

    async fn delete_expense(&self, id: ExpenseId) -> RepositoryResult<()> {
        self.delete(&format!("/expenses/{id}")).await
    }

    async fn upload_expenses(&self, file: UploadFile) -> RepositoryResult<()> {
        self.upload("/expenses/upload", file).await
    }
}
