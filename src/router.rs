// ============================================================================
// ROUTER - Path <-> Route mapping and guarded activation
// ============================================================================

use std::fmt;
use std::rc::Rc;

use crate::guards::{Guard, GuardOutcome};
use crate::models::SessionId;
use crate::state::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    Sessions,
    SessionDetail(SessionId),
    SessionCreate,
    SessionUpdate(SessionId),
    Me,
    NotFound,
}

impl Route {
    /// Accepts `/sessions`, `#/sessions/`, `sessions?x=1`... Unknown paths map to `NotFound`.
    pub fn parse(path: &str) -> Route {
        let path = path.trim().trim_start_matches('#');
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["sessions"] => Route::Sessions,
            ["sessions", "create"] => Route::SessionCreate,
            ["sessions", "detail", id] => id.parse().map(Route::SessionDetail).unwrap_or(Route::NotFound),
            ["sessions", "update", id] => id.parse().map(Route::SessionUpdate).unwrap_or(Route::NotFound),
            ["me"] => Route::Me,
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Sessions => "/sessions".to_string(),
            Route::SessionDetail(id) => format!("/sessions/detail/{}", id),
            Route::SessionCreate => "/sessions/create".to_string(),
            Route::SessionUpdate(id) => format!("/sessions/update/{}", id),
            Route::Me => "/me".to_string(),
            Route::NotFound => "/404".to_string(),
        }
    }

    /// Guards evaluated in order before activation
    pub fn guards(&self) -> &'static [Guard] {
        match self {
            Route::Home | Route::Login | Route::Register => &[Guard::RequireAnonymous],
            Route::Sessions | Route::SessionDetail(_) | Route::Me => &[Guard::RequireAuthenticated],
            Route::SessionCreate | Route::SessionUpdate(_) => &[Guard::RequireAuthenticated, Guard::RequireAdmin],
            Route::NotFound => &[],
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Moves the user somewhere else (browser history in production).
pub trait Navigator {
    fn navigate(&self, route: &Route);
    fn back(&self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Activate(Route),
    Redirected { requested: Route, to: Route },
}

#[derive(Clone)]
pub struct Router {
    session: SessionState,
    navigator: Rc<dyn Navigator>,
}

impl Router {
    pub fn new(session: SessionState, navigator: Rc<dyn Navigator>) -> Self {
        Self { session, navigator }
    }

    /// Run the route's guards against the current session snapshot.
    /// The first refusal triggers exactly one navigator redirect.
    pub fn resolve(&self, path: &str) -> Resolution {
        let route = Route::parse(path);
        for guard in route.guards() {
            if let GuardOutcome::Redirect(to) = guard.check(&self.session) {
                log::info!("🚧 [ROUTER] {:?} refused {}, redirecting to {}", guard, route, to);
                self.navigator.navigate(&to);
                return Resolution::Redirected { requested: route, to };
            }
        }
        log::debug!("🧭 [ROUTER] Activating {}", route);
        Resolution::Activate(route)
    }
}
