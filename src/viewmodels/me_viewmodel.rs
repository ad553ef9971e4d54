use crate::app::AppContext;
use crate::error::AppError;
use crate::models::{User, UserId};
use crate::router::Route;
use crate::state::{LoadState, ReactiveState, Subscription};
use crate::utils::constants::MSG_ACCOUNT_DELETED;
use crate::viewmodels::view_scope::ViewScope;

/// Account page of the logged-in user.
#[derive(Clone)]
pub struct MeViewModel {
    ctx: AppContext,
    scope: ViewScope,
    user_id: UserId,
    user: ReactiveState<LoadState<User>>,
}

impl MeViewModel {
    pub fn new(ctx: AppContext) -> Result<Self, AppError> {
        let user_id = ctx.session.user_id().ok_or(AppError::NotAuthenticated)?;
        Ok(Self {
            ctx,
            scope: ViewScope::new(),
            user_id,
            user: ReactiveState::new(LoadState::Loading),
        })
    }

    pub async fn load(&self) {
        if !self.scope.is_alive() {
            return;
        }
        self.user.set(LoadState::Loading);

        let Some(result) = self.scope.run(self.ctx.users.get_by_id(self.user_id)).await else {
            return;
        };
        if let Err(e) = &result {
            log::error!("❌ [ME] Could not load user {}: {}", self.user_id, e);
        }
        self.user.set(result.into());
    }

    pub fn user(&self) -> LoadState<User> {
        self.user.get()
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&LoadState<User>) + 'static,
    {
        self.user.subscribe(callback)
    }

    /// Delete the account, log out and return to the home page.
    pub async fn delete(&self) -> Result<(), AppError> {
        match self.scope.run(self.ctx.users.delete(self.user_id)).await {
            None => Ok(()),
            Some(Err(e)) => {
                log::error!("❌ [ME] Account deletion failed: {}", e);
                Err(e.into())
            }
            Some(Ok(())) => {
                self.ctx.notifier.notify(MSG_ACCOUNT_DELETED);
                self.ctx.session.log_out();
                self.ctx.navigator.navigate(&Route::Home);
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
}
