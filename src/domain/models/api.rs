use async_trait::async_trait;
use thiserror::Error;

use super::Contact;
use super::ContactDraft;
use super::ContactId;
use super::LoginCredentials;

/// The two ways a request can go wrong. Both end up as a notification, the UI
/// only branches on them to pick the wording.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never completed, or its body could not be decoded.
    #[error("network error: {0}")]
    Network(String),
    /// The server answered with a non 2xx status.
    #[error("request rejected with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },
}

impl ApiError {
    /// Message sent back by the server alongside a rejection, if any.
    pub fn server_message(&self) -> Option<&str> {
        if let ApiError::Rejected {
            message: Some(message),
            ..
        } = self
        {
            if !message.is_empty() {
                return Some(message.as_str());
            }
        }

        return None;
    }

    pub fn is_network(&self) -> bool {
        return matches!(self, ApiError::Network(_));
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[async_trait]
pub trait ContactsApi {
    /// Checks credentials against the login endpoint. Any 2xx answer is a
    /// successful login, the body is not inspected.
    async fn login(&self, credentials: &LoginCredentials) -> ApiResult<()>;

    async fn list_contacts(&self) -> ApiResult<Vec<Contact>>;

    async fn create_contact(&self, draft: &ContactDraft) -> ApiResult<()>;

    /// Replaces the whole record stored under `id`.
    async fn update_contact(&self, id: &ContactId, contact: &Contact) -> ApiResult<()>;

    async fn delete_contact(&self, id: &ContactId) -> ApiResult<()>;
}

pub type ApiBox = Box<dyn ContactsApi + Send + Sync>;
