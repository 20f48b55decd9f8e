#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use super::Storage;
use crate::domain::models::Action;
use crate::domain::models::ApiBox;
use crate::domain::models::ApiResult;
use crate::domain::models::Event;
use crate::domain::models::LoginCredentials;
use crate::domain::models::Operation;

async fn login(
    api: &ApiBox,
    storage: &Storage,
    credentials: LoginCredentials,
    tx: &mpsc::UnboundedSender<Event>,
) -> Result<()> {
    if let Err(err) = api.login(&credentials).await {
        tx.send(Event::LoginFailed(err))?;
        return Ok(());
    }

    if let Err(err) = storage.store_session_marker().await {
        tracing::error!(error = ?err, "failed to persist session marker");
        tx.send(Event::SessionNotStored())?;
        return Ok(());
    }

    tx.send(Event::LoginSucceeded())?;
    return Ok(());
}

async fn logout(storage: &Storage, tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
    if let Err(err) = storage.clear_session_marker().await {
        tracing::error!(error = ?err, "failed to clear session marker");
        tx.send(Event::LogoutFailed())?;
        return Ok(());
    }

    tx.send(Event::LogoutSucceeded())?;
    return Ok(());
}

async fn list_contacts(
    api: &ApiBox,
    generation: u64,
    tx: &mpsc::UnboundedSender<Event>,
) -> Result<()> {
    match api.list_contacts().await {
        Ok(contacts) => {
            tracing::debug!(generation, count = contacts.len(), "contacts loaded");
            tx.send(Event::ContactsLoaded(generation, contacts))?;
        }
        Err(err) => {
            tx.send(Event::ContactsFailed(generation, err))?;
        }
    }

    return Ok(());
}

fn submit_result(
    operation: Operation,
    res: ApiResult<()>,
    tx: &mpsc::UnboundedSender<Event>,
) -> Result<()> {
    match res {
        Ok(()) => tx.send(Event::SubmitSucceeded(operation))?,
        Err(err) => tx.send(Event::SubmitFailed(operation, err))?,
    }

    return Ok(());
}

/// Runs the requests the UI asks for. Every action gets its own task so a
/// slow list never holds back a delete, and every outcome comes back as an
/// `Event`.
pub struct ActionsService {}

impl ActionsService {
    pub async fn start(
        api: ApiBox,
        storage: Storage,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let api = Arc::new(api);
        let storage = Arc::new(storage);
        let mut workers: JoinSet<Result<()>> = JoinSet::new();

        while let Some(action) = rx.recv().await {
            // Surface failures from finished workers without blocking.
            while let Some(res) = workers.try_join_next() {
                if let Ok(Err(err)) = res {
                    tracing::error!(error = ?err, "action worker failed");
                }
            }

            let api = api.clone();
            let storage = storage.clone();
            let worker_tx = tx.clone();

            match action {
                Action::Login(credentials) => {
                    workers.spawn(async move {
                        return login(&api, &storage, credentials, &worker_tx).await;
                    });
                }
                Action::Logout() => {
                    // Inline so a login queued right after cannot race the removal.
                    if let Err(err) = logout(&storage, &tx).await {
                        tracing::error!(error = ?err, "logout failed");
                    }
                }
                Action::ListContacts(generation) => {
                    workers.spawn(async move {
                        return list_contacts(&api, generation, &worker_tx).await;
                    });
                }
                Action::CreateContact(draft) => {
                    workers.spawn(async move {
                        let res = api.create_contact(&draft).await;
                        return submit_result(Operation::Create, res, &worker_tx);
                    });
                }
                Action::UpdateContact(id, contact) => {
                    workers.spawn(async move {
                        let res = api.update_contact(&id, &contact).await;
                        return submit_result(Operation::Update, res, &worker_tx);
                    });
                }
                Action::DeleteContact(id) => {
                    workers.spawn(async move {
                        let res = api.delete_contact(&id).await;
                        return submit_result(Operation::Delete, res, &worker_tx);
                    });
                }
            }
        }

        // The UI hung up. Dropping the set aborts requests still in flight.
        tracing::debug!(in_flight = workers.len(), "actions service stopped");
        return Ok(());
    }
}
