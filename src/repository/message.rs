use async_trait::async_trait;
use reqwest::Method;

use crate::domain::message::WhatsAppMessage;
use crate::repository::errors::RepositoryResult;
use crate::repository::{ApiRepository, MessageSender};

#[async_trait]
impl MessageSender for ApiRepository {
    async fn send_whatsapp(&self, message: &WhatsAppMessage) -> RepositoryResult<()> {
        self.send_json(Method::POST, "/whatsapp/send", Some(message))
            .await
    }
}
