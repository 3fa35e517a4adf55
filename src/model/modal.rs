//! Modal stack for managing overlays
//!
//! Only the top modal receives key events; everything below it is drawn but inert.

/// An overlay displayed on top of the question bank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// Add-question form
    AddQuestion,
    /// Keyboard shortcut reference
    Help,
    /// History of raised notifications
    NotificationLog,
}

/// A stack of modal overlays, rendered bottom to top
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Push a modal unless it is already on top
    pub fn push(&mut self, modal: Modal) {
        if self.top() != Some(&modal) {
            self.stack.push(modal);
        }
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    /// Remove every occurrence of `modal`
    pub fn remove(&mut self, modal: Modal) {
        self.stack.retain(|m| *m != modal);
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn contains(&self, modal: Modal) -> bool {
        self.stack.contains(&modal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_stack_push_pop() {
        let mut stack = ModalStack::new();
        assert!(stack.top().is_none());

        stack.push(Modal::AddQuestion);
        stack.push(Modal::Help);
        assert_eq!(stack.top(), Some(&Modal::Help));

        assert_eq!(stack.pop(), Some(Modal::Help));
        assert_eq!(stack.pop(), Some(Modal::AddQuestion));
        assert!(stack.top().is_none());
    }

    #[test]
    fn test_modal_stack_ignores_duplicate_top() {
        let mut stack = ModalStack::new();
        stack.push(Modal::QuitConfirm);
        stack.push(Modal::QuitConfirm);
        assert_eq!(stack.pop(), Some(Modal::QuitConfirm));
        assert!(stack.top().is_none());
    }

    #[test]
    fn test_modal_stack_remove() {
        let mut stack = ModalStack::new();
        stack.push(Modal::AddQuestion);
        stack.push(Modal::Help);
        stack.remove(Modal::AddQuestion);

        assert!(!stack.contains(Modal::AddQuestion));
        assert_eq!(stack.top(), Some(&Modal::Help));
    }
}
