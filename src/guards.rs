// ============================================================================
// GUARDS - Route activation checks against the current session snapshot
// ============================================================================

use crate::models::Viewer;
use crate::router::Route;
use crate::state::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Someone is logged in, otherwise go to login
    RequireAuthenticated,
    /// Nobody is logged in, otherwise go to the session list
    RequireAnonymous,
    /// The logged-in viewer is an admin, otherwise go to the session list
    RequireAdmin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow,
    Redirect(Route),
}

impl Guard {
    /// Synchronous check; never fails, a refusal carries its redirect target.
    pub fn check(self, session: &SessionState) -> GuardOutcome {
        let allowed = match self {
            Guard::RequireAuthenticated => require_authenticated(session),
            Guard::RequireAnonymous => require_anonymous(session),
            Guard::RequireAdmin => session.viewer() == Some(Viewer::Admin),
        };

        if allowed {
            GuardOutcome::Allow
        } else {
            GuardOutcome::Redirect(self.redirect_target())
        }
    }

    pub fn redirect_target(self) -> Route {
        match self {
            Guard::RequireAuthenticated => Route::Login,
            Guard::RequireAnonymous | Guard::RequireAdmin => Route::Sessions,
        }
    }
}

pub fn require_authenticated(session: &SessionState) -> bool {
    session.identity().is_some()
}

pub fn require_anonymous(session: &SessionState) -> bool {
    !require_authenticated(session)
}
