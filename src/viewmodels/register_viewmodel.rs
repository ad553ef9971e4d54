use crate::app::AppContext;
use crate::error::AppError;
use crate::models::RegisterRequest;
use crate::router::Route;
use crate::state::ReactiveState;
use crate::viewmodels::view_scope::ViewScope;

#[derive(Clone)]
pub struct RegisterViewModel {
    ctx: AppContext,
    scope: ViewScope,
    form: ReactiveState<RegisterRequest>,
    on_error: ReactiveState<bool>,
}

impl RegisterViewModel {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            scope: ViewScope::new(),
            form: ReactiveState::new(RegisterRequest::default()),
            on_error: ReactiveState::new(false),
        }
    }

    pub fn form(&self) -> RegisterRequest {
        self.form.get()
    }

    pub fn update_form<F>(&self, updater: F)
    where
        F: FnOnce(&mut RegisterRequest),
    {
        self.form.update(updater);
    }

    pub fn is_valid(&self) -> bool {
        self.form.with(|form| {
            !form.email.trim().is_empty()
                && !form.first_name.trim().is_empty()
                && !form.last_name.trim().is_empty()
                && !form.password.is_empty()
        })
    }

    pub fn on_error(&self) -> bool {
        self.on_error.get()
    }

    /// Create the account, then send the user to the login screen.
    pub async fn submit(&self) -> Result<(), AppError> {
        if !self.is_valid() {
            return Err(AppError::InvalidForm("all fields are required".to_string()));
        }
        let request = self.form.get();

        match self.scope.run(self.ctx.auth.register(&request)).await {
            None => Ok(()),
            Some(Ok(())) => {
                log::info!("✅ [REGISTER] Account created for {}", request.email);
                self.on_error.set(false);
                self.ctx.navigator.navigate(&Route::Login);
                Ok(())
            }
            Some(Err(e)) => {
                log::warn!("⚠️ [REGISTER] Registration failed for {}: {}", request.email, e);
                self.on_error.set(true);
                Err(e.into())
            }
        }
    }

    pub fn dispose(&self) {
        self.scope.dispose();
    }
}
