//! Confirmation port for destructive actions.

/// Yes/no question put to the user before a destructive action.
pub trait ConfirmPrompt {
    /// Returns `true` when the user accepts.
    fn confirm(&mut self, question: &str) -> bool;
}

impl<F> ConfirmPrompt for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, question: &str) -> bool {
        self(question)
    }
}
