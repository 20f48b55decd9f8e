use std::collections::HashMap;

/// Remote operations tracked independently so one finishing never clears the
/// pending state of another.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
    Login,
    List,
    Create,
    Update,
    Delete,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RequestStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Error(String),
}

#[derive(Default)]
pub struct RequestStatuses {
    statuses: HashMap<Operation, RequestStatus>,
}

impl RequestStatuses {
    pub fn get(&self, operation: Operation) -> RequestStatus {
        return self.statuses.get(&operation).cloned().unwrap_or_default();
    }

    pub fn is_pending(&self, operation: Operation) -> bool {
        return self.get(operation) == RequestStatus::Pending;
    }

    pub fn begin(&mut self, operation: Operation) {
        self.statuses.insert(operation, RequestStatus::Pending);
    }

    pub fn succeed(&mut self, operation: Operation) {
        self.statuses.insert(operation, RequestStatus::Success);
    }

    pub fn fail(&mut self, operation: Operation, message: &str) {
        self.statuses
            .insert(operation, RequestStatus::Error(message.to_string()));
    }

    pub fn reset(&mut self) {
        self.statuses.clear();
    }
}
