#[cfg(test)]
#[path = "notifications_test.rs"]
mod tests;

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tokio::task::JoinSet;
use tokio::time;

use crate::domain::models::Event;
use crate::domain::models::Notification;
use crate::domain::models::Severity;

/// Visible notifications and the timers that expire them.
///
/// Each notification gets one timer task which sends
/// `Event::NotificationExpired` once the timeout elapses. Dismissing a
/// notification aborts its timer, and dropping the store aborts every timer
/// still pending.
pub struct Notifications {
    entries: Vec<Notification>,
    timers: JoinSet<()>,
    pending: HashMap<u64, AbortHandle>,
    next_id: u64,
    timeout: Duration,
    tx: mpsc::UnboundedSender<Event>,
}

impl Notifications {
    pub fn new(timeout: Duration, tx: mpsc::UnboundedSender<Event>) -> Notifications {
        return Notifications {
            entries: vec![],
            timers: JoinSet::new(),
            pending: HashMap::new(),
            next_id: 1,
            timeout,
            tx,
        };
    }

    pub fn list(&self) -> &[Notification] {
        return &self.entries;
    }

    pub fn push(&mut self, message: &str, severity: Severity) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        self.entries.push(Notification {
            id,
            message: message.to_string(),
            severity,
        });

        let tx = self.tx.clone();
        let timeout = self.timeout;
        let handle = self.timers.spawn(async move {
            time::sleep(timeout).await;
            // The UI may already be gone on shutdown.
            let _ = tx.send(Event::NotificationExpired(id));
        });
        self.pending.insert(id, handle);

        tracing::debug!(id, severity = %severity, message, "notification added");
        return id;
    }

    pub fn success(&mut self, message: &str) -> u64 {
        return self.push(message, Severity::Success);
    }

    pub fn error(&mut self, message: &str) -> u64 {
        return self.push(message, Severity::Error);
    }

    pub fn info(&mut self, message: &str) -> u64 {
        return self.push(message, Severity::Info);
    }

    /// Removal triggered by the timer. Returns false when the notification
    /// was already gone.
    pub fn expire(&mut self, id: u64) -> bool {
        self.pending.remove(&id);
        self.reap();
        return self.remove_entry(id);
    }

    /// Manual removal. Cancels the pending timer.
    pub fn dismiss(&mut self, id: u64) -> bool {
        if let Some(handle) = self.pending.remove(&id) {
            handle.abort();
        }
        self.reap();
        return self.remove_entry(id);
    }

    pub fn dismiss_latest(&mut self) -> bool {
        if let Some(notification) = self.entries.last() {
            let id = notification.id;
            return self.dismiss(id);
        }

        return false;
    }

    fn remove_entry(&mut self, id: u64) -> bool {
        let len = self.entries.len();
        self.entries.retain(|notification| return notification.id != id);
        return self.entries.len() != len;
    }

    fn reap(&mut self) {
        while self.timers.try_join_next().is_some() {}
    }
}
