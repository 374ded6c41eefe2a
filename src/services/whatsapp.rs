//! WhatsApp template messages.

use crate::domain::message::WhatsAppMessage;
use crate::dto::whatsapp::{WhatsAppPageData, WhatsAppPrefill};
use crate::forms::whatsapp::WhatsAppForm;
use crate::query::{MutationOptions, QueryClient};
use crate::repository::MessageSender;
use crate::services::ServiceResult;

pub const WHATSAPP_PATH: &str = "/whatsapp";

pub fn load_whatsapp_page(prefill: WhatsAppPrefill) -> WhatsAppPageData {
    WhatsAppPageData::new(prefill)
}

/// Sends one template message. Nothing is cached, so nothing is invalidated.
pub async fn send_whatsapp<R>(repo: &R, client: QueryClient<'_>, form: WhatsAppForm) -> ServiceResult<()>
where
    R: MessageSender + ?Sized,
{
    let message = WhatsAppMessage::try_from(form)?;
    client
        .mutate(
            |message: WhatsAppMessage| async move { repo.send_whatsapp(&message).await },
            message,
            MutationOptions::new().success("WhatsApp message sent successfully!"),
        )
        .await?;
    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::query::{QueryCache, Toast, ToastBuffer};
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn form(to: &str) -> WhatsAppForm {
        WhatsAppForm {
            to: to.into(),
            template_name: "payment_reminder".into(),
            language: "en".into(),
            parameters: "Asha, 600, 2025-11-15".into(),
        }
    }

    #[tokio::test]
    async fn message_is_sent_with_split_parameters() {
        let mut repo = MockRepository::new();
        repo.expect_send_whatsapp()
            .withf(|message| message.parameters.len() == 3 && message.to.as_str() == "9876543210")
            .times(1)
            .returning(|_| Ok(()));
        let cache = QueryCache::default();
        let toasts = ToastBuffer::new();
        let client = QueryClient::new(&cache, &toasts);

        send_whatsapp(&repo, client, form("9876543210")).await.unwrap();

        assert_eq!(toasts.take(), vec![Toast::success("WhatsApp message sent successfully!")]);
    }

    #[tokio::test]
    async fn provider_rejection_is_toasted_once() {
        let mut repo = MockRepository::new();
        repo.expect_send_whatsapp().times(1).returning(|_| {
            Err(RepositoryError::Server {
                status: 502,
                message: Some("Template not approved".into()),
            })
        });
        let cache = QueryCache::default();
        let toasts = ToastBuffer::new();
        let client = QueryClient::new(&cache, &toasts);

        assert!(send_whatsapp(&repo, client, form("9876543210")).await.is_err());
        assert_eq!(toasts.take(), vec![Toast::error("Template not approved")]);
    }
}
