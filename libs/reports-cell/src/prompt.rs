/// Blocking user dialogs used by the reports screen.
#[cfg_attr(test, mockall::automock)]
pub trait Prompt: Send + Sync {
    /// Asks a yes/no question; `true` means the user agreed.
    fn confirm(&self, message: &str) -> bool;

    fn alert(&self, message: &str);
}
