#[cfg(test)]
#[path = "mekody_test.rs"]
mod tests;

use async_trait::async_trait;
use serde_derive::Deserialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ApiError;
use crate::domain::models::ApiResult;
use crate::domain::models::Contact;
use crate::domain::models::ContactDraft;
use crate::domain::models::ContactId;
use crate::domain::models::ContactsApi;
use crate::domain::models::LoginCredentials;

const CONTACTS_PATH: &str = "/api/contact/contact_mekody";
const LOGIN_PATH: &str = "/api/mekody/login";

/// Body the API sends alongside a rejection.
#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
struct ErrorResponse {
    message: Option<String>,
}

fn network_error(err: reqwest::Error) -> ApiError {
    tracing::error!(error = ?err, "request to the Mekody API did not complete");
    return ApiError::Network(err.to_string());
}

/// Passes 2xx responses through and turns everything else into a rejection,
/// keeping the JSON `message` field when the body has one.
async fn check_status(res: reqwest::Response) -> ApiResult<reqwest::Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let body = res.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .ok()
        .and_then(|err| return err.message);

    tracing::warn!(
        status = status.as_u16(),
        message = message.as_deref().unwrap_or_default(),
        "Mekody API rejected the request"
    );

    return Err(ApiError::Rejected {
        status: status.as_u16(),
        message,
    });
}

pub struct MekodyApi {
    url: String,
    client: reqwest::Client,
}

impl Default for MekodyApi {
    fn default() -> MekodyApi {
        return MekodyApi::new(&Config::get(ConfigKey::ApiUrl));
    }
}

impl MekodyApi {
    pub fn new(url: &str) -> MekodyApi {
        return MekodyApi {
            url: url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        };
    }

    fn contact_url(&self, id: &ContactId) -> String {
        return format!("{url}{CONTACTS_PATH}/{id}", url = self.url);
    }
}

#[async_trait]
impl ContactsApi for MekodyApi {
    #[allow(clippy::implicit_return)]
    async fn login(&self, credentials: &LoginCredentials) -> ApiResult<()> {
        tracing::debug!(courriel = credentials.courriel, "logging in");
        let res = self
            .client
            .post(format!("{url}{LOGIN_PATH}", url = self.url))
            .json(credentials)
            .send()
            .await
            .map_err(network_error)?;

        check_status(res).await?;
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn list_contacts(&self) -> ApiResult<Vec<Contact>> {
        let res = self
            .client
            .get(format!("{url}{CONTACTS_PATH}", url = self.url))
            .send()
            .await
            .map_err(network_error)?;

        let contacts = check_status(res)
            .await?
            .json::<Vec<Contact>>()
            .await
            .map_err(network_error)?;

        tracing::debug!(count = contacts.len(), "listed contacts");
        return Ok(contacts);
    }

    #[allow(clippy::implicit_return)]
    async fn create_contact(&self, draft: &ContactDraft) -> ApiResult<()> {
        let res = self
            .client
            .post(format!("{url}{CONTACTS_PATH}", url = self.url))
            .json(draft)
            .send()
            .await
            .map_err(network_error)?;

        check_status(res).await?;
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn update_contact(&self, id: &ContactId, contact: &Contact) -> ApiResult<()> {
        let res = self
            .client
            .put(self.contact_url(id))
            .json(contact)
            .send()
            .await
            .map_err(network_error)?;

        check_status(res).await?;
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn delete_contact(&self, id: &ContactId) -> ApiResult<()> {
        let res = self
            .client
            .delete(self.contact_url(id))
            .send()
            .await
            .map_err(network_error)?;

        check_status(res).await?;
        return Ok(());
    }
}
