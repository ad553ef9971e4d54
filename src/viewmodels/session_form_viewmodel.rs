// ============================================================================
// SESSION FORM VIEWMODEL - Admin create / update of a session
// ============================================================================

use serde::Serialize;

use crate::app::AppContext;
use crate::error::AppError;
use crate::models::session::form_date;
use crate::models::{SessionDraft, SessionId, Teacher, TeacherId, Viewer, YogaSession};
use crate::router::Route;
use crate::state::{LoadState, ReactiveState, Subscription};
use crate::utils::constants::{MSG_SESSION_CREATED, MSG_SESSION_UPDATED};
use crate::viewmodels::view_scope::ViewScope;

pub const DESCRIPTION_MAX_LEN: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update(SessionId),
}

/// Editable fields, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionForm {
    pub name: String,
    pub date: String,
    pub teacher_id: Option<TeacherId>,
    pub description: String,
}

impl SessionForm {
    pub fn from_session(session: &YogaSession) -> Self {
        Self {
            name: session.name.clone(),
            date: session.form_date().unwrap_or_default(),
            teacher_id: Some(session.teacher_id),
            description: session.description.clone(),
        }
    }

    pub fn to_draft(&self) -> Result<SessionDraft, AppError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidForm("name is required".to_string()));
        }
        let date = form_date(&self.date).ok_or_else(|| AppError::InvalidForm("date is required".to_string()))?;
        let teacher_id = self
            .teacher_id
            .ok_or_else(|| AppError::InvalidForm("teacher is required".to_string()))?;
        let description = self.description.trim();
        if description.is_empty() {
            return Err(AppError::InvalidForm("description is required".to_string()));
        }
        if description.chars().count() > DESCRIPTION_MAX_LEN {
            return Err(AppError::InvalidForm(format!(
                "description is limited to {} characters",
                DESCRIPTION_MAX_LEN
            )));
        }

        Ok(SessionDraft {
            name: name.to_string(),
            date,
            teacher_id,
            description: description.to_string(),
        })
    }
}

#[derive(Clone)]
pub struct SessionFormViewModel {
    ctx: AppContext,
    scope: ViewScope,
    mode: FormMode,
    form: ReactiveState<LoadState<SessionForm>>,
    teachers: ReactiveState<LoadState<Vec<Teacher>>>,
}

impl SessionFormViewModel {
    pub fn new(ctx: AppContext, mode: FormMode) -> Result<Self, AppError> {
        if ctx.session.identity().is_none() {
            return Err(AppError::NotAuthenticated);
        }
        let form = match mode {
            FormMode::Create => LoadState::Ready(SessionForm::default()),
            FormMode::Update(_) => LoadState::Loading,
        };
        Ok(Self {
            ctx,
            scope: ViewScope::new(),
            mode,
            form: ReactiveState::new(form),
            teachers: ReactiveState::new(LoadState::Loading),
        })
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_update(&self) -> bool {
        matches!(self.mode, FormMode::Update(_))
    }

    /// Regular users are sent back to the list before anything is fetched.
    /// Otherwise loads the teacher choices and, when updating, the session to edit.
    pub async fn init(&self) -> Result<(), AppError> {
        self.ensure_admin()?;

        let teachers = self.scope.run(self.ctx.teachers.all());
        match self.mode {
            FormMode::Create => {
                if let Some(result) = teachers.await {
                    self.teachers.set(result.into());
                }
            }
            FormMode::Update(id) => {
                let session = self.scope.run(self.ctx.sessions.detail(id));
                let (teachers, session) = futures::join!(teachers, session);
                if let Some(result) = teachers {
                    self.teachers.set(result.into());
                }
                if let Some(result) = session {
                    if let Err(e) = &result {
                        log::error!("❌ [FORM] Could not load session {}: {}", id, e);
                    }
                    self.form.set(result.map(|session| SessionForm::from_session(&session)).into());
                }
            }
        }
        Ok(())
    }

    pub fn form(&self) -> LoadState<SessionForm> {
        self.form.get()
    }

    pub fn teachers(&self) -> LoadState<Vec<Teacher>> {
        self.teachers.get()
    }

    pub fn subscribe_form<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&LoadState<SessionForm>) + 'static,
    {
        self.form.subscribe(callback)
    }

    /// Edit the fields; ignored until the form is loaded
    pub fn update_form<F>(&self, updater: F)
    where
        F: FnOnce(&mut SessionForm),
    {
        self.form.update(|state| {
            if let LoadState::Ready(form) = state {
                updater(form);
            }
        });
    }

    /// Create or update, then notify and return to the list.
    pub async fn submit(&self) -> Result<(), AppError> {
        self.ensure_admin()?;
        let draft = match self.form.get() {
            LoadState::Ready(form) => form.to_draft()?,
            _ => return Err(AppError::InvalidForm("form is not loaded".to_string())),
        };

        let (result, message) = match self.mode {
            FormMode::Create => (self.scope.run(self.ctx.sessions.create(&draft)).await, MSG_SESSION_CREATED),
            FormMode::Update(id) => (self.scope.run(self.ctx.sessions.update(id, &draft)).await, MSG_SESSION_UPDATED),
        };

        match result {
            None => Ok(()),
            Some(Err(e)) => {
                log::error!("❌ [FORM] Saving '{}' failed: {}", draft.name, e);
                Err(e.into())
            }
            Some(Ok(saved)) => {
                log::info!("✅ [FORM] Saved session {:?}", saved.id);
                self.ctx.notifier.notify(message);
                self.ctx.navigator.navigate(&Route::Sessions);
                Ok(())
            }
        }
    }

    pub fn dispose(&self) {
        self.scope.dispose();
    }

    fn ensure_admin(&self) -> Result<(), AppError> {
        if self.ctx.session.viewer() == Some(Viewer::Admin) {
            return Ok(());
        }
        log::warn!("🚫 [FORM] Session management requires admin rights");
        self.ctx.navigator.navigate(&Route::Sessions);
        Err(AppError::Forbidden("manage sessions"))
    }
}
