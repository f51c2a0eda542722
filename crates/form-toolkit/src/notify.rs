// File: crates/form-toolkit/src/notify.rs
// Purpose: User-facing notification capability

use std::cell::RefCell;
use std::rc::Rc;

/// Presents a message to the user (a blocking modal in the browser)
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Notifier that keeps every message instead of showing it
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    messages: Rc<RefCell<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.messages.borrow().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}
