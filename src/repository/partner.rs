use async_trait::async_trait;
use reqwest::Method;

use crate::domain::partner::{NewPartner, Partner};
use crate::domain::types::PartnerId;
use crate::repository::api::Params;
use crate::repository::errors::RepositoryResult;
use crate::repository::{ApiRepository, PartnerReader, PartnerWriter};

#[async_trait]
impl PartnerReader for ApiRepository {
    async fn list_partners(&self, active_only: bool) -> RepositoryResult<Vec<Partner>> {
        let path = if active_only {
            "/partners/active"
        } else {
            "/partners"
        };
        self.get_json(path, &Params::new()).await
    }
}

#[async_trait]
impl PartnerWriter for ApiRepository {
    async fn create_partner(&self, partner: &NewPartner) -> RepositoryResult<()> {
        self.send_json(Method::POST, "/partners", Some(partner)).await
    }

    async fn update_partner(&self, id: PartnerId, partner: &NewPartner) -> RepositoryResult<()> {
        self.send_json(Method::PUT, &format!("/partners/{id}"), Some(partner))
            .await
    }

    async fn delete_partner(&self, id: PartnerId) -> RepositoryResult<()> {
        self.delete(&format!("/partners/{id}")).await
    }
}
