use super::Contact;
use super::ContactDraft;
use super::ContactId;
use super::LoginCredentials;

/// Work requested by the UI loop from the actions service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Login(LoginCredentials),
    Logout(),
    /// Fetch the contact list. Carries the generation the UI will accept the
    /// answer for.
    ListContacts(u64),
    CreateContact(ContactDraft),
    UpdateContact(ContactId, Contact),
    DeleteContact(ContactId),
}
