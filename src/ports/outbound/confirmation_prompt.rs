/// ConfirmationPrompt port for interactive confirmation of destructive actions
pub trait ConfirmationPrompt: Send + Sync {
    /// Asks the user to confirm an action
    ///
    /// # Returns
    /// `true` only when the user explicitly agreed
    fn confirm(&self, message: &str) -> bool;
}

impl<T: ConfirmationPrompt + ?Sized> ConfirmationPrompt for Box<T> {
    fn confirm(&self, message: &str) -> bool {
        (**self).confirm(message)
    }
}
