use crate::app::AppContext;
use crate::error::AppError;
use crate::models::{Identity, Viewer, YogaSession};
use crate::state::{LoadState, ReactiveState, Subscription};
use crate::viewmodels::view_scope::ViewScope;

#[derive(Clone)]
pub struct SessionListViewModel {
    ctx: AppContext,
    scope: ViewScope,
    sessions: ReactiveState<LoadState<Vec<YogaSession>>>,
}

impl SessionListViewModel {
    pub fn new(ctx: AppContext) -> Result<Self, AppError> {
        if ctx.session.identity().is_none() {
            return Err(AppError::NotAuthenticated);
        }
        Ok(Self {
            ctx,
            scope: ViewScope::new(),
            sessions: ReactiveState::new(LoadState::Loading),
        })
    }

    pub async fn load(&self) {
        if !self.scope.is_alive() {
            return;
        }
        self.sessions.set(LoadState::Loading);

        let Some(result) = self.scope.run(self.ctx.sessions.all()).await else {
            return;
        };
        match &result {
            Ok(sessions) => log::info!("📋 [LIST] {} sessions loaded", sessions.len()),
            Err(e) => log::error!("❌ [LIST] Could not load sessions: {}", e),
        }
        self.sessions.set(result.into());
    }

    pub fn sessions(&self) -> LoadState<Vec<YogaSession>> {
        self.sessions.get()
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&LoadState<Vec<YogaSession>>) + 'static,
    {
        self.sessions.subscribe(callback)
    }

    pub fn identity(&self) -> Option<Identity> {
        self.ctx.session.identity()
    }

    /// Admins get the create / edit affordances
    pub fn can_manage(&self) -> bool {
        self.ctx
            .session
            .viewer()
            .map(Viewer::can_manage_sessions)
            .unwrap_or(false)
    }

    pub fn dispose(&self) {
        self.scope.dispose();
    }
}
