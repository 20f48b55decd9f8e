use super::Contact;

/// Overlay drawn on top of the dashboard. The edit record lives inside
/// `Edit` and is dropped with the modal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Modal {
    Add,
    View(Contact),
    Edit(Contact),
    ConfirmDelete(Contact),
}
