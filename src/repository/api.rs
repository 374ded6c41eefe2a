use std::time::Duration;

use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{Download, UploadFile};

/// Query string parameters of a single request.
pub(crate) type Params = Vec<(&'static str, String)>;

/// Repository backed by the gym REST API.
///
/// Cloning is cheap: the underlying `reqwest::Client` shares its connection
/// pool between clones.
#[derive(Clone, Debug)]
pub struct ApiRepository {
    client: Client,
    base_url: String,
}

impl ApiRepository {
    /// Creates a repository for the API rooted at `base_url`,
    /// e.g. `http://localhost:9090/rockgymapp/api`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> RepositoryResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RepositoryError::Unexpected(e.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turns error statuses into [`RepositoryError`], keeping the body's message.
    async fn check(response: Response) -> RepositoryResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        log::warn!("API answered {status}: {body}");
        Err(RepositoryError::from_response(status.as_u16(), &body))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &Params,
    ) -> RepositoryResult<T> {
        let response = self
            .client
            .get(self.url(path))
            .query(params)
            .send()
            .await?;
        let response = Self::check(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Like [`Self::get_json`], but a 404 means "no such entity".
    pub(crate) async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> RepositoryResult<Option<T>> {
        match self.get_json(path, &Params::new()).await {
            Ok(value) => Ok(Some(value)),
            Err(RepositoryError::NotFound)
            | Err(RepositoryError::Server { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Sends a write request; the response body, if any, is ignored.
    pub(crate) async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> RepositoryResult<()> {
        let mut request = self.client.request(method, self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        Self::check(response).await?;
        Ok(())
    }

    pub(crate) async fn delete(&self, path: &str) -> RepositoryResult<()> {
        self.send_json::<()>(Method::DELETE, path, None).await
    }

    /// Forwards a file as the multipart `file` part.
    pub(crate) async fn upload(&self, path: &str, file: UploadFile) -> RepositoryResult<()> {
        let mut part = Part::bytes(file.bytes).file_name(file.file_name);
        if let Some(content_type) = file.content_type.as_deref() {
            part = part.mime_str(content_type)?;
        }
        let form = Form::new().part("file", part);
        let response = self
            .client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Fetches a binary export together with its content type and file name.
    pub(crate) async fn download(&self, path: &str, params: &Params) -> RepositoryResult<Download> {
        let response = self
            .client
            .get(self.url(path))
            .query(params)
            .send()
            .await?;
        let response = Self::check(response).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let file_name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(attachment_file_name);
        let bytes = response.bytes().await?.to_vec();
        Ok(Download {
            content_type,
            file_name,
            bytes,
        })
    }
}

/// Extracts `name` from `attachment; filename="name"`.
fn attachment_file_name(disposition: &str) -> Option<String> {
    disposition
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

/// Shorthand for the `page`/`size` pair most list endpoints take.
pub(crate) fn page_params(page: crate::pagination::PageRequest) -> Params {
    vec![("page", page.page.to_string()), ("size", page.size.to_string())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_quoted_and_bare_file_names() {
        assert_eq!(
            attachment_file_name(r#"attachment; filename="inactive_30.xlsx""#),
            Some("inactive_30.xlsx".to_string())
        );
        assert_eq!(
            attachment_file_name("attachment; filename=report.pdf"),
            Some("report.pdf".to_string())
        );
        assert_eq!(attachment_file_name("inline"), None);
    }

    #[test]
    fn trailing_slash_is_dropped() {
        let repo = ApiRepository::with_client(Client::new(), "http://localhost:9090/rockgymapp/api/");
        assert_eq!(repo.base_url(), "http://localhost:9090/rockgymapp/api");
        assert_eq!(repo.url("/members"), "http://localhost:9090/rockgymapp/api/members");
    }
}
