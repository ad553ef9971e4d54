// ============================================================================
// SESSION DETAIL VIEWMODEL - Session + teacher + participation flag
// ============================================================================
// Loading -> Ready -> Loading ... while mounted. Mutations never patch the
// displayed data: on success they re-run the whole load sequence, so the
// participation flag always comes from the latest fetched roster.
// ============================================================================

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use serde::Serialize;

use crate::app::AppContext;
use crate::error::{ApiError, AppError};
use crate::models::{SessionId, Teacher, Viewer, YogaSession};
use crate::router::Route;
use crate::state::{LoadState, ReactiveState, Subscription};
use crate::utils::constants::MSG_SESSION_DELETED;
use crate::viewmodels::view_scope::ViewScope;

/// Everything the detail screen renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDetail {
    pub session: YogaSession,
    pub teacher: Teacher,
    pub is_participating: bool,
}

impl SessionDetail {
    pub fn attendee_count(&self) -> usize {
        self.session.attendee_count()
    }
}

#[derive(Clone)]
pub struct SessionDetailViewModel {
    ctx: AppContext,
    scope: ViewScope,
    session_id: SessionId,
    state: ReactiveState<LoadState<SessionDetail>>,
    mutating: Rc<Cell<bool>>,
    generation: Rc<Cell<u64>>,
}

impl SessionDetailViewModel {
    pub fn new(ctx: AppContext, session_id: SessionId) -> Result<Self, AppError> {
        if ctx.session.identity().is_none() {
            return Err(AppError::NotAuthenticated);
        }
        Ok(Self {
            ctx,
            scope: ViewScope::new(),
            session_id,
            state: ReactiveState::new(LoadState::Loading),
            mutating: Rc::new(Cell::new(false)),
            generation: Rc::new(Cell::new(0)),
        })
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn state(&self) -> LoadState<SessionDetail> {
        self.state.get()
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&LoadState<SessionDetail>) + 'static,
    {
        self.state.subscribe(callback)
    }

    pub fn viewer(&self) -> Option<Viewer> {
        self.ctx.session.viewer()
    }

    pub fn is_admin(&self) -> bool {
        self.viewer() == Some(Viewer::Admin)
    }

    pub fn can_participate(&self) -> bool {
        self.viewer().map(Viewer::can_participate).unwrap_or(false)
    }

    /// Fetch the session, derive the participation flag, then fetch its teacher.
    /// `Ready` only once both replies are in; any failure ends in `Failed`.
    /// A load superseded by a newer one never writes its result.
    pub async fn load(&self) {
        if !self.scope.is_alive() {
            return;
        }
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        self.state.set(LoadState::Loading);

        let Some(fetched) = self.scope.run(self.ctx.sessions.detail(self.session_id)).await else {
            return;
        };
        if self.is_superseded(generation) {
            return;
        }
        let session = match fetched {
            Ok(session) => session,
            Err(e) => return self.fail("session", e),
        };

        let is_participating = self
            .ctx
            .session
            .user_id()
            .map(|user_id| session.has_attendee(user_id))
            .unwrap_or(false);

        let Some(fetched) = self.scope.run(self.ctx.teachers.detail(session.teacher_id)).await else {
            return;
        };
        if self.is_superseded(generation) {
            return;
        }
        let teacher = match fetched {
            Ok(teacher) => teacher,
            Err(e) => return self.fail("teacher", e),
        };

        log::info!(
            "✅ [DETAIL] Session {} ready: {} attendees, participating: {}",
            self.session_id,
            session.attendee_count(),
            is_participating
        );
        self.state.set(LoadState::Ready(SessionDetail {
            session,
            teacher,
            is_participating,
        }));
    }

    /// Re-run the load sequence after a failure
    pub async fn retry(&self) {
        log::info!("🔄 [DETAIL] Retrying session {}", self.session_id);
        self.load().await;
    }

    pub async fn participate(&self) -> Result<(), AppError> {
        let user_id = self.participant()?;
        let request = self.ctx.sessions.participate(self.session_id, user_id);
        self.mutate("participate", request).await
    }

    pub async fn un_participate(&self) -> Result<(), AppError> {
        let user_id = self.participant()?;
        let request = self.ctx.sessions.un_participate(self.session_id, user_id);
        self.mutate("unparticipate", request).await
    }

    /// Admin only. On success: notification + back to the list.
    pub async fn delete(&self) -> Result<(), AppError> {
        if !self.is_admin() {
            return Err(AppError::Forbidden("delete session"));
        }
        match self.scope.run(self.ctx.sessions.delete(self.session_id)).await {
            None => Ok(()),
            Some(Err(e)) => {
                log::error!("❌ [DETAIL] Delete of session {} failed: {}", self.session_id, e);
                Err(e.into())
            }
            Some(Ok(())) => {
                self.ctx.notifier.notify(MSG_SESSION_DELETED);
                self.ctx.navigator.navigate(&Route::Sessions);
                Ok(())
            }
        }
    }

    pub fn back(&self) {
        self.ctx.navigator.back();
    }

    pub fn dispose(&self) {
        self.scope.dispose();
    }

    fn participant(&self) -> Result<u64, AppError> {
        let viewer = self.viewer().ok_or(AppError::NotAuthenticated)?;
        if !viewer.can_participate() {
            return Err(AppError::Forbidden("participation is for regular users"));
        }
        self.ctx.session.user_id().ok_or(AppError::NotAuthenticated)
    }

    async fn mutate<F>(&self, action: &str, request: F) -> Result<(), AppError>
    where
        F: Future<Output = Result<(), ApiError>>,
    {
        if self.mutating.replace(true) {
            log::warn!("⏳ [DETAIL] {} ignored, another change is in flight", action);
            return Ok(());
        }
        let _busy = BusyFlag(self.mutating.clone());

        match self.scope.run(request).await {
            None => Ok(()),
            Some(Err(e)) => {
                // Nothing was applied locally, the displayed state stays as is
                log::error!("❌ [DETAIL] {} on session {} failed: {}", action, self.session_id, e);
                Err(e.into())
            }
            Some(Ok(())) => {
                log::info!("🔁 [DETAIL] {} accepted, refreshing session {}", action, self.session_id);
                self.load().await;
                Ok(())
            }
        }
    }

    fn is_superseded(&self, generation: u64) -> bool {
        if self.generation.get() == generation {
            return false;
        }
        log::debug!("⏭️ [DETAIL] Dropping stale load #{} of session {}", generation, self.session_id);
        true
    }

    fn fail(&self, what: &str, err: ApiError) {
        log::error!("❌ [DETAIL] Could not load {} for session {}: {}", what, self.session_id, err);
        self.state.set(LoadState::Failed(err));
    }
}

/// Clears the in-flight marker even if the mutation future is dropped midway.
struct BusyFlag(Rc<Cell<bool>>);

impl Drop for BusyFlag {
    fn drop(&mut self) {
        self.0.set(false);
    }
}
