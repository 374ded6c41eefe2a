use async_trait::async_trait;
use reqwest::Method;

use crate::domain::holiday::{Holiday, NewHoliday};
use crate::domain::types::HolidayId;
use crate::repository::api::Params;
use crate::repository::errors::RepositoryResult;
use crate::repository::{ApiRepository, HolidayReader, HolidayWriter};

#[async_trait]
impl HolidayReader for ApiRepository {
    async fn list_holidays(&self) -> RepositoryResult<Vec<Holiday>> {
        self.get_json("/holidays", &Params::new()).await
    }
}

#[async_trait]
impl HolidayWriter for ApiRepository {
    async fn create_holiday(&self, holiday: &NewHoliday) -> RepositoryResult<()> {
        self.send_json(Method::POST, "/holidays", Some(holiday)).await
    }

    async fn update_holiday(&self, id: HolidayId, holiday: &NewHoliday) -> RepositoryResult<()> {
        self.send_json(Method::PUT, &format!("/holidays/{id}"), Some(holiday))
            .await
    }

    async fn delete_holiday(&self, id: HolidayId) -> RepositoryResult<()> {
        self.delete(&format!("/holidays/{id}")).await
    }
}
