use tui_textarea::Input;

use super::ApiError;
use super::Contact;
use super::Operation;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    ContactsFailed(u64, ApiError),
    ContactsLoaded(u64, Vec<Contact>),
    KeyboardCTRLC(),
    KeyboardInput(Input),
    LoginFailed(ApiError),
    LoginSucceeded(),
    LogoutFailed(),
    LogoutSucceeded(),
    NotificationExpired(u64),
    /// The server accepted the login but the session marker could not be
    /// written.
    SessionNotStored(),
    SubmitFailed(Operation, ApiError),
    SubmitSucceeded(Operation),
    UIResize(),
    UITick(),
}
