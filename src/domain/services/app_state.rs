#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tui_textarea::Input;
use tui_textarea::Key;

use super::Form;
use super::Notifications;
use crate::domain::models::cycle_service;
use crate::domain::models::Action;
use crate::domain::models::ApiError;
use crate::domain::models::Contact;
use crate::domain::models::ContactDraft;
use crate::domain::models::ContactField;
use crate::domain::models::CredentialField;
use crate::domain::models::Event;
use crate::domain::models::LoginCredentials;
use crate::domain::models::Modal;
use crate::domain::models::Operation;
use crate::domain::models::RequestStatuses;

const SERVER_UNREACHABLE: &str = "Erreur de connexion au serveur";
const NOTHING_SELECTED: &str = "Aucun contact sélectionné";
const SESSION_NOT_STORED: &str = "La session n'a pas pu être enregistrée";
const SESSION_NOT_CLEARED: &str = "La session n'a pas pu être supprimée";

/// Notification text for a failed request.
pub fn submit_error_message(operation: Operation, err: &ApiError) -> String {
    if operation == Operation::List {
        return "Erreur lors du chargement des contacts".to_string();
    }

    if err.is_network() {
        return SERVER_UNREACHABLE.to_string();
    }

    let message = match operation {
        Operation::Login => err.server_message().unwrap_or("Erreur de connexion"),
        Operation::Create => "Erreur lors de l'ajout du contact",
        Operation::Update => "Erreur lors de la modification du contact",
        Operation::Delete => "Erreur lors de la suppression du contact",
        Operation::List => "Erreur lors du chargement des contacts",
    };

    return message.to_string();
}

fn required_hint(label: &str) -> String {
    return format!("Le champ « {} » est requis.", label.trim_end_matches(" *"));
}

fn is_char(input: &Input, c: char) -> bool {
    return input.key == Key::Char(c) && !input.ctrl && !input.alt;
}

fn is_ctrl(input: &Input, c: char) -> bool {
    return input.key == Key::Char(c) && input.ctrl;
}

/// Every piece of UI state, mutated only from the UI loop.
///
/// Keyboard input and service events go through `handle_input` and
/// `handle_event`; both may emit `Action`s for the actions service. The
/// contact list is only ever replaced by the answer to the latest list
/// request, never patched after a create, update or delete.
pub struct AppState {
    pub authenticated: bool,
    pub contacts: Vec<Contact>,
    pub contact_form: Form<ContactField>,
    pub credentials: LoginCredentials,
    pub draft: ContactDraft,
    pub form_hint: Option<String>,
    pub login_form: Form<CredentialField>,
    pub modal: Option<Modal>,
    pub notifications: Notifications,
    pub requests: RequestStatuses,
    pub selected: usize,
    list_generation: u64,
    /// Bumped every time the add or edit form is opened.
    form_generation: u64,
    /// Form a create or update is in flight for.
    submitted_form: Option<u64>,
}

impl AppState {
    pub fn new(
        authenticated: bool,
        notification_timeout: Duration,
        event_tx: mpsc::UnboundedSender<Event>,
    ) -> AppState {
        let mut app_state = AppState {
            authenticated,
            contacts: vec![],
            contact_form: Form::new(&ContactField::ALL, None),
            credentials: LoginCredentials::default(),
            draft: ContactDraft::default(),
            form_hint: None,
            login_form: Form::new(&CredentialField::ALL, Some(CredentialField::MotDePasse)),
            modal: None,
            notifications: Notifications::new(notification_timeout, event_tx),
            requests: RequestStatuses::default(),
            selected: 0,
            list_generation: 0,
            form_generation: 0,
            submitted_form: None,
        };

        app_state.focus_login_field(CredentialField::Courriel);
        return app_state;
    }

    /// Issues the initial fetch when a session marker was found at startup.
    pub fn start(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        if self.authenticated {
            self.refresh(tx)?;
        }

        return Ok(());
    }

    pub fn selected_contact(&self) -> Option<&Contact> {
        return self.contacts.get(self.selected);
    }

    pub fn submit_login(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        if self.requests.is_pending(Operation::Login) {
            return Ok(());
        }

        if let Some(field) = self.credentials.missing_required() {
            self.form_hint = Some(required_hint(field.label()));
            self.focus_login_field(field);
            return Ok(());
        }

        self.form_hint = None;
        self.requests.begin(Operation::Login);
        tx.send(Action::Login(self.credentials.clone()))?;

        return Ok(());
    }

    pub fn logout(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        tx.send(Action::Logout())?;

        self.authenticated = false;
        self.contacts = vec![];
        self.credentials = self
            .credentials
            .with_field(CredentialField::MotDePasse, "");
        self.draft = ContactDraft::default();
        self.form_hint = None;
        self.modal = None;
        self.selected = 0;
        self.requests.reset();
        self.submitted_form = None;
        // Answers to list requests sent before the logout must not commit.
        self.list_generation += 1;
        self.focus_login_field(CredentialField::Courriel);

        tracing::debug!("logged out");
        return Ok(());
    }

    /// Requests a fresh copy of the contact list. Only the answer to the most
    /// recent call is applied.
    pub fn refresh(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        if !self.authenticated {
            return Ok(());
        }

        self.list_generation += 1;
        self.requests.begin(Operation::List);
        tx.send(Action::ListContacts(self.list_generation))?;

        return Ok(());
    }

    pub fn open_add(&mut self) {
        self.form_generation += 1;
        self.form_hint = None;
        self.modal = Some(Modal::Add);
        self.focus_contact_field(ContactField::NomComplet);
    }

    fn selected_or_notify(&mut self) -> Option<Contact> {
        let contact = self.selected_contact().cloned();
        if contact.is_none() {
            self.notifications.info(NOTHING_SELECTED);
        }

        return contact;
    }

    pub fn open_view(&mut self) {
        if let Some(contact) = self.selected_or_notify() {
            self.modal = Some(Modal::View(contact));
        }
    }

    pub fn open_edit(&mut self) {
        if let Some(contact) = self.selected_or_notify() {
            self.form_generation += 1;
            self.form_hint = None;
            self.modal = Some(Modal::Edit(contact));
            self.focus_contact_field(ContactField::NomComplet);
        }
    }

    /// Opens the confirmation step. Nothing is sent until `confirm_delete`.
    pub fn request_delete(&mut self) {
        if let Some(contact) = self.selected_or_notify() {
            self.modal = Some(Modal::ConfirmDelete(contact));
        }
    }

    pub fn confirm_delete(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        let id = match &self.modal {
            Some(Modal::ConfirmDelete(contact)) => contact.id.clone(),
            _ => return Ok(()),
        };

        self.modal = None;
        self.requests.begin(Operation::Delete);
        tx.send(Action::DeleteContact(id))?;

        return Ok(());
    }

    /// Closes whatever modal is open. The add draft and the edit record are
    /// discarded with it.
    pub fn close_modal(&mut self) {
        if self.modal == Some(Modal::Add) {
            self.draft = ContactDraft::default();
        }

        self.form_hint = None;
        self.modal = None;
    }

    pub fn set_contact_field(&mut self, field: ContactField, value: &str) {
        match &self.modal {
            Some(Modal::Add) => {
                self.draft = self.draft.with_field(field, value);
            }
            Some(Modal::Edit(contact)) => {
                self.modal = Some(Modal::Edit(contact.with_field(field, value)));
            }
            _ => (),
        }
    }

    pub fn set_login_field(&mut self, field: CredentialField, value: &str) {
        self.credentials = self.credentials.with_field(field, value);
    }

    pub fn submit_contact(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        match &self.modal {
            Some(Modal::Add) => {
                if self.requests.is_pending(Operation::Create) {
                    return Ok(());
                }

                if let Some(field) = self.draft.missing_required() {
                    self.form_hint = Some(required_hint(field.label()));
                    self.focus_contact_field(field);
                    return Ok(());
                }

                self.form_hint = None;
                self.submitted_form = Some(self.form_generation);
                self.requests.begin(Operation::Create);
                tx.send(Action::CreateContact(self.draft.clone()))?;
            }
            Some(Modal::Edit(contact)) => {
                if self.requests.is_pending(Operation::Update) {
                    return Ok(());
                }

                if let Some(field) = contact.missing_required() {
                    self.form_hint = Some(required_hint(field.label()));
                    self.focus_contact_field(field);
                    return Ok(());
                }

                let action = Action::UpdateContact(contact.id.clone(), contact.clone());
                self.form_hint = None;
                self.submitted_form = Some(self.form_generation);
                self.requests.begin(Operation::Update);
                tx.send(action)?;
            }
            _ => (),
        }

        return Ok(());
    }

    pub fn handle_event(&mut self, event: Event, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        match event {
            Event::LoginSucceeded() => {
                self.requests.succeed(Operation::Login);
                self.authenticated = true;
                self.credentials = self
                    .credentials
                    .with_field(CredentialField::MotDePasse, "");
                self.focus_login_field(CredentialField::Courriel);
                self.refresh(tx)?;
                self.notifications.success("Connexion réussie!");
            }
            Event::SessionNotStored() => {
                self.requests.fail(Operation::Login, SESSION_NOT_STORED);
                self.notifications.error(SESSION_NOT_STORED);
            }
            Event::LogoutSucceeded() => {
                self.notifications.success("Déconnexion réussie");
            }
            Event::LogoutFailed() => {
                self.notifications.error(SESSION_NOT_CLEARED);
            }
            Event::LoginFailed(err) => {
                let message = submit_error_message(Operation::Login, &err);
                tracing::warn!(error = %err, "login failed");
                self.requests.fail(Operation::Login, &message);
                self.notifications.error(&message);
            }
            Event::ContactsLoaded(generation, contacts) => {
                if generation != self.list_generation {
                    tracing::debug!(generation, latest = self.list_generation, "dropping stale contact list");
                    return Ok(());
                }

                self.requests.succeed(Operation::List);
                self.contacts = contacts;
                if self.selected >= self.contacts.len() {
                    self.selected = self.contacts.len().saturating_sub(1);
                }

                self.notifications.success(&format!(
                    "{} contacts chargés avec succès",
                    self.contacts.len()
                ));
            }
            Event::ContactsFailed(generation, err) => {
                if generation != self.list_generation {
                    tracing::debug!(generation, latest = self.list_generation, "dropping stale list error");
                    return Ok(());
                }

                let message = submit_error_message(Operation::List, &err);
                tracing::warn!(error = %err, "listing contacts failed");
                self.requests.fail(Operation::List, &message);
                self.notifications.error(&message);
            }
            Event::SubmitSucceeded(operation) => {
                self.handle_submit_succeeded(operation, tx)?;
            }
            Event::SubmitFailed(operation, err) => {
                let message = submit_error_message(operation, &err);
                tracing::warn!(operation = %operation, error = %err, "submit failed");
                if matches!(operation, Operation::Create | Operation::Update) {
                    self.submitted_form = None;
                }
                self.requests.fail(operation, &message);
                self.notifications.error(&message);
            }
            Event::NotificationExpired(id) => {
                self.notifications.expire(id);
            }
            _ => (),
        }

        return Ok(());
    }

    fn handle_submit_succeeded(
        &mut self,
        operation: Operation,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        self.requests.succeed(operation);

        // A form opened after the submit was cancelled is left alone.
        let same_form = matches!(operation, Operation::Create | Operation::Update)
            && self.submitted_form.take() == Some(self.form_generation);

        match operation {
            Operation::Create => {
                if same_form && self.modal == Some(Modal::Add) {
                    self.draft = ContactDraft::default();
                    self.modal = None;
                }
                self.refresh(tx)?;
                self.notifications.success("Contact ajouté avec succès");
            }
            Operation::Update => {
                if same_form && matches!(self.modal, Some(Modal::Edit(_))) {
                    self.modal = None;
                }
                self.refresh(tx)?;
                self.notifications.success("Contact modifié avec succès");
            }
            Operation::Delete => {
                self.refresh(tx)?;
                self.notifications.success("Contact supprimé avec succès");
            }
            Operation::Login | Operation::List => (),
        }

        return Ok(());
    }

    /// Routes a key press to the active view. Returns true when the user asked
    /// to quit.
    pub fn handle_input(&mut self, input: Input, tx: &mpsc::UnboundedSender<Action>) -> Result<bool> {
        if is_ctrl(&input, 'x') {
            self.notifications.dismiss_latest();
            return Ok(false);
        }

        if !self.authenticated {
            self.handle_login_input(input, tx)?;
            return Ok(false);
        }

        match self.modal {
            None => {
                return self.handle_dashboard_input(input, tx);
            }
            Some(Modal::Add) | Some(Modal::Edit(_)) => {
                self.handle_contact_form_input(input, tx)?;
            }
            Some(Modal::View(_)) => {
                if matches!(input.key, Key::Esc | Key::Enter) || is_char(&input, 'q') {
                    self.close_modal();
                }
            }
            Some(Modal::ConfirmDelete(_)) => {
                if is_char(&input, 'o') || is_char(&input, 'y') {
                    self.confirm_delete(tx)?;
                } else if input.key == Key::Esc || is_char(&input, 'n') {
                    self.close_modal();
                }
            }
        }

        return Ok(false);
    }

    fn handle_dashboard_input(
        &mut self,
        input: Input,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<bool> {
        match input {
            Input { key: Key::Down, .. } => {
                if self.selected + 1 < self.contacts.len() {
                    self.selected += 1;
                }
            }
            Input { key: Key::Up, .. } => {
                self.selected = self.selected.saturating_sub(1);
            }
            Input {
                key: Key::Enter, ..
            } => {
                self.open_view();
            }
            input if is_char(&input, 'v') => {
                self.open_view();
            }
            input if is_char(&input, 'n') => {
                self.open_add();
            }
            input if is_char(&input, 'e') => {
                self.open_edit();
            }
            input if is_char(&input, 'd') => {
                self.request_delete();
            }
            input if is_char(&input, 'r') => {
                if !self.requests.is_pending(Operation::List) {
                    self.refresh(tx)?;
                }
            }
            input if is_char(&input, 'l') => {
                self.logout(tx)?;
            }
            input if is_char(&input, 'x') => {
                self.notifications.dismiss_latest();
            }
            input if is_char(&input, 'q') => {
                return Ok(true);
            }
            _ => (),
        }

        return Ok(false);
    }

    fn handle_login_input(&mut self, input: Input, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        match input {
            Input {
                key: Key::Enter, ..
            } => {
                self.submit_login(tx)?;
            }
            Input {
                key: Key::Tab,
                shift: true,
                ..
            }
            | Input { key: Key::Up, .. } => {
                self.focus_login_field(self.login_form.previous_field());
            }
            Input { key: Key::Tab, .. } | Input { key: Key::Down, .. } => {
                self.focus_login_field(self.login_form.next_field());
            }
            input => {
                if self.login_form.input(input) {
                    let field = self.login_form.focused();
                    let value = self.login_form.value();
                    self.set_login_field(field, &value);
                }
            }
        }

        return Ok(());
    }

    fn handle_contact_form_input(
        &mut self,
        input: Input,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        let field = self.contact_form.focused();
        let multiline = field == ContactField::Message;

        match input {
            Input { key: Key::Esc, .. } => {
                self.close_modal();
            }
            input if is_ctrl(&input, 's') => {
                self.submit_contact(tx)?;
            }
            Input {
                key: Key::Enter, ..
            } if !multiline => {
                self.submit_contact(tx)?;
            }
            Input {
                key: Key::Tab,
                shift: true,
                ..
            } => {
                self.focus_contact_field(self.contact_form.previous_field());
            }
            Input { key: Key::Tab, .. } => {
                self.focus_contact_field(self.contact_form.next_field());
            }
            Input { key: Key::Up, .. } if !multiline => {
                self.focus_contact_field(self.contact_form.previous_field());
            }
            Input { key: Key::Down, .. } if !multiline => {
                self.focus_contact_field(self.contact_form.next_field());
            }
            Input {
                key: Key::Left | Key::Right,
                ..
            } if field == ContactField::ServiceInteresse => {
                let current = self.contact_field_value(field);
                let next = cycle_service(&current, input.key == Key::Right);
                self.set_contact_field(field, next);
                self.focus_contact_field(field);
            }
            _ if field == ContactField::ServiceInteresse => (),
            input => {
                if self.contact_form.input(input) {
                    let value = self.contact_form.value();
                    self.set_contact_field(field, &value);
                }
            }
        }

        return Ok(());
    }

    fn contact_field_value(&self, field: ContactField) -> String {
        match &self.modal {
            Some(Modal::Edit(contact)) => return contact.field(field).to_string(),
            _ => return self.draft.field(field).to_string(),
        }
    }

    fn focus_contact_field(&mut self, field: ContactField) {
        let value = self.contact_field_value(field);
        self.contact_form.focus(field, field.label(), &value);
    }

    fn focus_login_field(&mut self, field: CredentialField) {
        let value = self.credentials.field(field).to_string();
        self.login_form.focus(field, field.label(), &value);
    }
}
