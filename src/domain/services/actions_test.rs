use std::path::PathBuf;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use test_utils::contacts_fixture;
use test_utils::temp_path;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::ActionsService;
use crate::domain::models::Action;
use crate::domain::models::ApiError;
use crate::domain::models::ApiResult;
use crate::domain::models::Contact;
use crate::domain::models::ContactDraft;
use crate::domain::models::ContactId;
use crate::domain::models::ContactsApi;
use crate::domain::models::Event;
use crate::domain::models::LoginCredentials;
use crate::domain::models::Operation;
use crate::domain::services::Storage;

struct FakeApi {
    reject: bool,
}

impl FakeApi {
    fn outcome(&self) -> ApiResult<()> {
        if self.reject {
            return Err(ApiError::Rejected {
                status: 500,
                message: Some("boom".to_string()),
            });
        }

        return Ok(());
    }
}

#[async_trait]
impl ContactsApi for FakeApi {
    async fn login(&self, _credentials: &LoginCredentials) -> ApiResult<()> {
        return self.outcome();
    }

    async fn list_contacts(&self) -> ApiResult<Vec<Contact>> {
        self.outcome()?;
        return serde_json::from_str(contacts_fixture())
            .map_err(|err| return ApiError::Network(err.to_string()));
    }

    async fn create_contact(&self, _draft: &ContactDraft) -> ApiResult<()> {
        return self.outcome();
    }

    async fn update_contact(&self, _id: &ContactId, _contact: &Contact) -> ApiResult<()> {
        return self.outcome();
    }

    async fn delete_contact(&self, _id: &ContactId) -> ApiResult<()> {
        return self.outcome();
    }
}

struct Harness {
    action_tx: mpsc::UnboundedSender<Action>,
    event_rx: mpsc::UnboundedReceiver<Event>,
    storage: Storage,
    worker: JoinHandle<Result<()>>,
}

fn start(reject: bool) -> Harness {
    return start_with_storage(reject, temp_path("storage.yaml"));
}

/// Storage path that exists as a directory, so every read and write fails.
fn unusable_storage_path() -> Result<PathBuf> {
    let path = temp_path("storage.yaml");
    std::fs::create_dir_all(&path)?;
    return Ok(path);
}

fn start_with_storage(reject: bool, path: PathBuf) -> Harness {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    let service_storage = Storage::new(path.clone());
    let worker = tokio::spawn(async move {
        return ActionsService::start(
            Box::new(FakeApi { reject }),
            service_storage,
            event_tx,
            &mut action_rx,
        )
        .await;
    });

    return Harness {
        action_tx,
        event_rx,
        storage: Storage::new(path),
        worker,
    };
}

#[tokio::test]
async fn it_stores_the_session_marker_on_login() -> Result<()> {
    let mut harness = start(false);
    harness
        .action_tx
        .send(Action::Login(LoginCredentials::default()))?;

    assert_eq!(harness.event_rx.recv().await, Some(Event::LoginSucceeded()));
    assert!(harness.storage.is_authenticated().await?);

    return Ok(());
}

#[tokio::test]
async fn it_leaves_storage_alone_when_login_fails() -> Result<()> {
    let mut harness = start(true);
    harness
        .action_tx
        .send(Action::Login(LoginCredentials::default()))?;

    match harness.event_rx.recv().await {
        Some(Event::LoginFailed(err)) => assert_eq!(err.server_message(), Some("boom")),
        _ => bail!("Wrong enum"),
    }
    assert!(!harness.storage.is_authenticated().await?);

    return Ok(());
}

#[tokio::test]
async fn it_clears_the_session_marker_on_logout() -> Result<()> {
    let mut harness = start(false);
    harness.storage.store_session_marker().await?;

    harness.action_tx.send(Action::Logout())?;
    drop(harness.action_tx);
    harness.worker.await??;

    assert!(!harness.storage.is_authenticated().await?);
    assert_eq!(harness.event_rx.recv().await, Some(Event::LogoutSucceeded()));

    return Ok(());
}

#[tokio::test]
async fn it_reports_a_session_marker_it_cannot_store() -> Result<()> {
    let mut harness = start_with_storage(false, unusable_storage_path()?);
    harness
        .action_tx
        .send(Action::Login(LoginCredentials::default()))?;

    assert_eq!(harness.event_rx.recv().await, Some(Event::SessionNotStored()));

    return Ok(());
}

#[tokio::test]
async fn it_reports_a_session_marker_it_cannot_clear() -> Result<()> {
    let mut harness = start_with_storage(false, unusable_storage_path()?);
    harness.action_tx.send(Action::Logout())?;

    assert_eq!(harness.event_rx.recv().await, Some(Event::LogoutFailed()));
    assert!(harness.storage.is_authenticated().await.is_err());

    return Ok(());
}

#[tokio::test]
async fn it_tags_lists_with_their_generation() -> Result<()> {
    let mut harness = start(false);
    harness.action_tx.send(Action::ListContacts(7))?;

    match harness.event_rx.recv().await {
        Some(Event::ContactsLoaded(generation, contacts)) => {
            assert_eq!(generation, 7);
            assert_eq!(contacts.len(), 3);
        }
        _ => bail!("Wrong enum"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_reports_failed_submits_by_operation() -> Result<()> {
    let mut harness = start(true);
    harness
        .action_tx
        .send(Action::DeleteContact(ContactId::new(serde_json::json!(1))))?;

    match harness.event_rx.recv().await {
        Some(Event::SubmitFailed(operation, err)) => {
            assert_eq!(operation, Operation::Delete);
            assert!(!err.is_network());
        }
        _ => bail!("Wrong enum"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_reports_successful_submits() -> Result<()> {
    let mut harness = start(false);
    harness
        .action_tx
        .send(Action::CreateContact(ContactDraft::default()))?;

    assert_eq!(
        harness.event_rx.recv().await,
        Some(Event::SubmitSucceeded(Operation::Create))
    );

    return Ok(());
}
