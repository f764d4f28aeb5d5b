use crate::domain::entities::{activity_result::ActivityResult, user_message::UserMessage};

/// The screen a billing session is bound to.
pub trait ScreenHost: Send {
    /// Shows a non-cancelable dialog with a single OK action.
    fn show_message(&self, message: &UserMessage);

    /// Receives activity results that the billing library did not claim.
    fn on_unhandled_activity_result(&self, result: &ActivityResult);
}
