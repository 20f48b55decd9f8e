pub mod actions;
mod app_state;
pub mod events;
mod form;
mod notifications;
mod stats;
mod storage;

pub use app_state::*;
pub use form::*;
pub use notifications::*;
pub use stats::*;
pub use storage::*;
