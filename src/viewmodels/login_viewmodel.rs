use crate::app::AppContext;
use crate::error::AppError;
use crate::models::LoginRequest;
use crate::router::Route;
use crate::state::{ReactiveState, Subscription};
use crate::viewmodels::view_scope::ViewScope;

#[derive(Clone)]
pub struct LoginViewModel {
    ctx: AppContext,
    scope: ViewScope,
    form: ReactiveState<LoginRequest>,
    on_error: ReactiveState<bool>,
}

impl LoginViewModel {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            scope: ViewScope::new(),
            form: ReactiveState::new(LoginRequest::default()),
            on_error: ReactiveState::new(false),
        }
    }

    pub fn form(&self) -> LoginRequest {
        self.form.get()
    }

    pub fn set_email(&self, email: &str) {
        self.form.update(|form| form.email = email.trim().to_string());
    }

    pub fn set_password(&self, password: &str) {
        self.form.update(|form| form.password = password.to_string());
    }

    pub fn is_valid(&self) -> bool {
        self.form.with(|form| !form.email.is_empty() && !form.password.is_empty())
    }

    /// Inline "invalid credentials" indicator
    pub fn on_error(&self) -> bool {
        self.on_error.get()
    }

    pub fn subscribe_error<F>(&self, callback: F) -> Subscription
    where
        F: Fn(bool) + 'static,
    {
        self.on_error.subscribe(move |on_error| callback(*on_error))
    }

    /// Log in, store the identity and go to the session list.
    pub async fn submit(&self) -> Result<(), AppError> {
        if !self.is_valid() {
            return Err(AppError::InvalidForm("email and password are required".to_string()));
        }
        let request = self.form.get();

        match self.scope.run(self.ctx.auth.login(&request)).await {
            None => Ok(()),
            Some(Ok(identity)) => {
                self.on_error.set(false);
                self.ctx.session.log_in(identity);
                self.ctx.navigator.navigate(&Route::Sessions);
                Ok(())
            }
            Some(Err(e)) => {
                log::warn!("⚠️ [LOGIN] Login failed for {}: {}", request.email, e);
                self.on_error.set(true);
                Err(e.into())
            }
        }
    }

    pub fn dispose(&self) {
        self.scope.dispose();
    }
}
