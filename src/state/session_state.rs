// ============================================================================
// SESSION STATE - Current authenticated identity + login status stream
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::{Identity, UserId, Viewer};
use crate::state::reactivity::{ReactiveState, Subscription};

/// Holder of the single authenticated identity of this client.
///
/// Owned by the application root and shared by cloning (all clones see the
/// same slot). Nothing is persisted: a reload starts logged out.
#[derive(Clone)]
pub struct SessionState {
    identity: Rc<RefCell<Option<Identity>>>,
    is_logged: ReactiveState<bool>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            identity: Rc::new(RefCell::new(None)),
            is_logged: ReactiveState::new(false),
        }
    }

    /// Store the identity and publish `true`
    pub fn log_in(&self, identity: Identity) {
        log::info!("🔐 [SESSION] Logged in as {} (admin: {})", identity.username, identity.admin);
        *self.identity.borrow_mut() = Some(identity);
        self.is_logged.set(true);
    }

    /// Clear the identity and publish `false`
    pub fn log_out(&self) {
        log::info!("👋 [SESSION] Logged out");
        *self.identity.borrow_mut() = None;
        self.is_logged.set(false);
    }

    /// Snapshot of the login flag
    pub fn is_logged(&self) -> bool {
        self.is_logged.get()
    }

    /// Login status stream: the callback gets the current value right away,
    /// then every transition.
    pub fn subscribe_logged<F>(&self, callback: F) -> Subscription
    where
        F: Fn(bool) + 'static,
    {
        self.is_logged.subscribe(move |logged| callback(*logged))
    }

    pub fn identity(&self) -> Option<Identity> {
        self.identity.borrow().clone()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.identity.borrow().as_ref().map(|identity| identity.id)
    }

    pub fn token(&self) -> Option<String> {
        self.identity.borrow().as_ref().map(|identity| identity.token.clone())
    }

    /// `None` when nobody is logged in
    pub fn viewer(&self) -> Option<Viewer> {
        self.identity.borrow().as_ref().map(Identity::viewer)
    }

    /// Application stop: forget the identity and every status subscriber
    pub fn teardown(&self) {
        *self.identity.borrow_mut() = None;
        self.is_logged.clear_subscribers();
        self.is_logged.set(false);
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
