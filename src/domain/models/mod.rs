mod action;
mod api;
mod contact;
mod credentials;
mod event;
mod loading;
mod modal;
mod notification;
mod request_status;
mod textarea;

pub use action::*;
pub use api::*;
pub use contact::*;
pub use credentials::*;
pub use event::*;
pub use loading::*;
pub use modal::*;
pub use notification::*;
pub use request_status::*;
pub use textarea::*;
