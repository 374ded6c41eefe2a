use async_trait::async_trait;
use reqwest::Method;

use crate::domain::setting::{NewSetting, Setting};
use crate::domain::types::SettingId;
use crate::repository::api::Params;
use crate::repository::errors::RepositoryResult;
use crate::repository::{ApiRepository, SettingReader, SettingScope, SettingWriter};

#[async_trait]
impl SettingReader for ApiRepository {
    async fn list_settings(&self, scope: &SettingScope) -> RepositoryResult<Vec<Setting>> {
        let path = match scope {
            SettingScope::All => "/settings".to_string(),
            SettingScope::Current => "/settings/current".to_string(),
            SettingScope::Future => "/settings/future".to_string(),
            SettingScope::Key(key) => format!("/settings/key/{key}"),
        };
        self.get_json(&path, &Params::new()).await
    }
}

#[async_trait]
impl SettingWriter for ApiRepository {
    async fn create_setting(&self, setting: &NewSetting) -> RepositoryResult<()> {
        self.send_json(Method::POST, "/settings", Some(setting)).await
    }

    async fn update_setting(&self, id: SettingId, setting: &NewSetting) -> RepositoryResult<()> {
        self.send_json(Method::PUT, &format!("/settings/{id}"), Some(setting))
            .await
    }

    async fn deactivate_setting(&self, id: SettingId) -> RepositoryResult<()> {
        self.send_json::<()>(Method::PUT, &format!("/settings/{id}/deactivate"), None)
            .await
    }

    async fn delete_setting(&self, id: SettingId) -> RepositoryResult<()> {
        self.delete(&format!("/settings/{id}")).await
    }
}
