// ============================================================================
// VIEW SCOPE - Ties pending requests to the lifetime of a view
// ============================================================================

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use futures::future::{AbortHandle, Abortable};

struct ScopeInner {
    alive: Cell<bool>,
    next_id: Cell<u64>,
    pending: RefCell<Vec<(u64, AbortHandle)>>,
}

/// Every request a view issues goes through [`ViewScope::run`]. Once the
/// scope is disposed, pending futures are aborted and late results are
/// reported as `None` so the view never mutates state after teardown.
#[derive(Clone)]
pub struct ViewScope {
    inner: Rc<ScopeInner>,
}

impl ViewScope {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(ScopeInner {
                alive: Cell::new(true),
                next_id: Cell::new(0),
                pending: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.inner.alive.get()
    }

    /// Number of futures currently running inside the scope
    pub fn pending(&self) -> usize {
        self.inner.pending.borrow().len()
    }

    /// Drive `future` unless the scope is (or gets) disposed, in which case `None`.
    pub async fn run<F: Future>(&self, future: F) -> Option<F::Output> {
        if !self.is_alive() {
            return None;
        }

        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        let (handle, registration) = AbortHandle::new_pair();
        self.inner.pending.borrow_mut().push((id, handle));

        let result = Abortable::new(future, registration).await;

        self.inner.pending.borrow_mut().retain(|(pending_id, _)| *pending_id != id);
        match result {
            Ok(output) if self.is_alive() => Some(output),
            _ => None,
        }
    }

    /// Abort everything in flight; later `run` calls resolve to `None` immediately.
    pub fn dispose(&self) {
        if !self.inner.alive.replace(false) {
            return;
        }
        let pending: Vec<(u64, AbortHandle)> = self.inner.pending.borrow_mut().drain(..).collect();
        log::debug!("🧹 Disposing view scope ({} pending)", pending.len());
        for (_, handle) in pending {
            handle.abort();
        }
    }
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}
