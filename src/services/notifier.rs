use std::cell::RefCell;
use std::collections::VecDeque;

/// Transient user-facing message (snackbar).
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Queues snackbar messages until the host page picks them up.
#[derive(Debug)]
pub struct SnackbarNotifier {
    duration_ms: u32,
    pending: RefCell<VecDeque<String>>,
}

impl SnackbarNotifier {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            pending: RefCell::new(VecDeque::new()),
        }
    }

    /// How long each snackbar stays up
    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Messages not yet shown, oldest first
    pub fn take(&self) -> Vec<String> {
        self.pending.borrow_mut().drain(..).collect()
    }
}

impl Notifier for SnackbarNotifier {
    fn notify(&self, message: &str) {
        log::info!("💬 {} ({} ms)", message, self.duration_ms);
        self.pending.borrow_mut().push_back(message.to_string());
    }
}
