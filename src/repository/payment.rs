use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Method;

use crate::domain::payment::{NewPayment, Payment, PendingPayment};
use crate::domain::report::Defaulter;
use crate::domain::types::MemberId;
use crate::dto::page::SpringPage;
use crate::pagination::{PageRequest, PageResult};
use crate::repository::api::{Params, page_params};
use crate::repository::errors::RepositoryResult;
use crate::repository::{ApiRepository, PaymentReader, PaymentWriter};

#[async_trait]
impl PaymentReader for ApiRepository {
    async fn list_pending_payments(
        &self,
        date: Option<NaiveDate>,
    ) -> RepositoryResult<Vec<PendingPayment>> {
        let mut params = Params::new();
        if let Some(date) = date {
            params.push(("date", date.format("%Y-%m-%d").to_string()));
        }
        self.get_json("/payments/pending", &params).await
    }

    async fn list_member_payments(&self, id: MemberId) -> RepositoryResult<Vec<Payment>> {
        self.get_json(&format!("/payments/member/{id}"), &Params::new())
            .await
    }

    async fn list_defaulters(&self, page: PageRequest) -> RepositoryResult<PageResult<Defaulter>> {
        let page: SpringPage<Defaulter> = self
            .get_json("/payments/reports/defaulters", &page_params(page))
            .await?;
        Ok(page.into_page_result())
    }
}

#[async_trait]
impl PaymentWriter for ApiRepository {
    async fn record_payment(&self, payment: &NewPayment) -> RepositoryResult<()> {
        self.send_json(Method::POST, "/payments", Some(payment)).await
    }
}
