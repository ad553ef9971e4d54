// ============================================================================
// APP - Composition root: shared context, routing and the active page
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use futures::future::{self, FutureExt, LocalBoxFuture};
use serde_json::{json, Value};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::models::RegisterRequest;
use crate::router::{Navigator, Resolution, Route, Router};
use crate::services::{
    ApiClient, AuthService, HttpTransport, JwtInterceptor, Notifier, SessionApiService, TeacherService, UserService,
};
use crate::state::{SessionState, Subscription};
use crate::viewmodels::{
    FormMode, LoginViewModel, MeViewModel, RegisterViewModel, SessionDetailViewModel, SessionForm,
    SessionFormViewModel, SessionListViewModel,
};

/// Everything a view-model needs. Built once at start-up; clones are cheap
/// and share the same session state.
#[derive(Clone)]
pub struct AppContext {
    pub session: SessionState,
    pub auth: AuthService,
    pub sessions: SessionApiService,
    pub teachers: TeacherService,
    pub users: UserService,
    pub navigator: Rc<dyn Navigator>,
    pub notifier: Rc<dyn Notifier>,
}

impl AppContext {
    pub fn new(
        config: &AppConfig,
        transport: Rc<dyn HttpTransport>,
        navigator: Rc<dyn Navigator>,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        let session = SessionState::new();
        let client = ApiClient::new(config.backend_url(), transport, JwtInterceptor::new(session.clone()));

        Self {
            session,
            auth: AuthService::new(client.clone()),
            sessions: SessionApiService::new(client.clone()),
            teachers: TeacherService::new(client.clone()),
            users: UserService::new(client),
            navigator,
            notifier,
        }
    }
}

/// Screen currently mounted.
#[derive(Clone)]
pub enum Page {
    Home,
    Login(LoginViewModel),
    Register(RegisterViewModel),
    Sessions(SessionListViewModel),
    SessionDetail(SessionDetailViewModel),
    SessionForm(SessionFormViewModel),
    Me(MeViewModel),
    NotFound,
}

/// Something the host page asks the mounted screen to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    Login { email: String, password: String },
    Register(RegisterRequest),
    Participate,
    UnParticipate,
    DeleteSession,
    Retry,
    EditSessionForm(SessionForm),
    SubmitSessionForm,
    DeleteAccount,
    Back,
}

impl PageAction {
    pub fn name(&self) -> &'static str {
        match self {
            PageAction::Login { .. } => "login",
            PageAction::Register(_) => "register",
            PageAction::Participate => "participate",
            PageAction::UnParticipate => "unparticipate",
            PageAction::DeleteSession => "delete session",
            PageAction::Retry => "retry",
            PageAction::EditSessionForm(_) => "edit session form",
            PageAction::SubmitSessionForm => "submit session form",
            PageAction::DeleteAccount => "delete account",
            PageAction::Back => "back",
        }
    }
}

/// Outcome of a page action, to be driven by the host
pub type ActionTask = LocalBoxFuture<'static, Result<(), AppError>>;

impl Page {
    pub fn name(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Login(_) => "login",
            Page::Register(_) => "register",
            Page::Sessions(_) => "sessions",
            Page::SessionDetail(_) => "session-detail",
            Page::SessionForm(_) => "session-form",
            Page::Me(_) => "me",
            Page::NotFound => "not-found",
        }
    }

    /// What the host page needs to render this screen. Passwords never leave.
    pub fn snapshot(&self) -> Value {
        let data = match self {
            Page::Home | Page::NotFound => json!({}),
            Page::Login(vm) => json!({
                "email": vm.form().email,
                "onError": vm.on_error(),
            }),
            Page::Register(vm) => {
                let form = vm.form();
                json!({
                    "email": form.email,
                    "firstName": form.first_name,
                    "lastName": form.last_name,
                    "onError": vm.on_error(),
                })
            }
            Page::Sessions(vm) => json!({
                "sessions": vm.sessions().to_json(),
                "canManage": vm.can_manage(),
            }),
            Page::SessionDetail(vm) => json!({
                "sessionId": vm.session_id(),
                "isAdmin": vm.is_admin(),
                "canParticipate": vm.can_participate(),
                "state": vm.state().to_json(),
            }),
            Page::SessionForm(vm) => json!({
                "mode": if vm.is_update() { "update" } else { "create" },
                "form": vm.form().to_json(),
                "teachers": vm.teachers().to_json(),
            }),
            Page::Me(vm) => json!({ "user": vm.user().to_json() }),
        };
        json!({ "page": self.name(), "data": data })
    }

    /// Run `action` against this screen. Instant actions resolve right away.
    pub fn dispatch(&self, action: PageAction) -> Result<ActionTask, AppError> {
        let task: ActionTask = match (self, action) {
            (Page::Login(vm), PageAction::Login { email, password }) => {
                vm.set_email(&email);
                vm.set_password(&password);
                let vm = vm.clone();
                async move { vm.submit().await }.boxed_local()
            }
            (Page::Register(vm), PageAction::Register(request)) => {
                vm.update_form(|form| *form = request);
                let vm = vm.clone();
                async move { vm.submit().await }.boxed_local()
            }
            (Page::SessionDetail(vm), PageAction::Participate) => {
                let vm = vm.clone();
                async move { vm.participate().await }.boxed_local()
            }
            (Page::SessionDetail(vm), PageAction::UnParticipate) => {
                let vm = vm.clone();
                async move { vm.un_participate().await }.boxed_local()
            }
            (Page::SessionDetail(vm), PageAction::DeleteSession) => {
                let vm = vm.clone();
                async move { vm.delete().await }.boxed_local()
            }
            (Page::SessionDetail(vm), PageAction::Retry) => {
                let vm = vm.clone();
                async move {
                    vm.retry().await;
                    Ok(())
                }
                .boxed_local()
            }
            (Page::SessionDetail(vm), PageAction::Back) => {
                vm.back();
                future::ready(Ok(())).boxed_local()
            }
            (Page::SessionForm(vm), PageAction::EditSessionForm(fields)) => {
                vm.update_form(|form| *form = fields);
                future::ready(Ok(())).boxed_local()
            }
            (Page::SessionForm(vm), PageAction::SubmitSessionForm) => {
                let vm = vm.clone();
                async move { vm.submit().await }.boxed_local()
            }
            (Page::Me(vm), PageAction::DeleteAccount) => {
                let vm = vm.clone();
                async move { vm.delete().await }.boxed_local()
            }
            (Page::Me(vm), PageAction::Back) => {
                vm.back();
                future::ready(Ok(())).boxed_local()
            }
            (page, action) => {
                return Err(AppError::Unavailable {
                    action: action.name(),
                    page: page.name(),
                })
            }
        };
        Ok(task)
    }

    fn build(ctx: &AppContext, route: Route) -> Result<Page, AppError> {
        let ctx = ctx.clone();
        Ok(match route {
            Route::Home => Page::Home,
            Route::Login => Page::Login(LoginViewModel::new(ctx)),
            Route::Register => Page::Register(RegisterViewModel::new(ctx)),
            Route::Sessions => Page::Sessions(SessionListViewModel::new(ctx)?),
            Route::SessionDetail(id) => Page::SessionDetail(SessionDetailViewModel::new(ctx, id)?),
            Route::SessionCreate => Page::SessionForm(SessionFormViewModel::new(ctx, FormMode::Create)?),
            Route::SessionUpdate(id) => Page::SessionForm(SessionFormViewModel::new(ctx, FormMode::Update(id))?),
            Route::Me => Page::Me(MeViewModel::new(ctx)?),
            Route::NotFound => Page::NotFound,
        })
    }

    /// Work the page runs when it is mounted
    fn entry(&self) -> Option<LocalBoxFuture<'static, ()>> {
        match self.clone() {
            Page::Sessions(vm) => Some(Box::pin(async move { vm.load().await })),
            Page::SessionDetail(vm) => Some(Box::pin(async move { vm.load().await })),
            Page::SessionForm(vm) => Some(Box::pin(async move {
                if let Err(e) = vm.init().await {
                    log::warn!("⚠️ [FORM] Not initialised: {}", e);
                }
            })),
            Page::Me(vm) => Some(Box::pin(async move { vm.load().await })),
            Page::Home | Page::Login(_) | Page::Register(_) | Page::NotFound => None,
        }
    }

    fn dispose(&self) {
        match self {
            Page::Login(vm) => vm.dispose(),
            Page::Register(vm) => vm.dispose(),
            Page::Sessions(vm) => vm.dispose(),
            Page::SessionDetail(vm) => vm.dispose(),
            Page::SessionForm(vm) => vm.dispose(),
            Page::Me(vm) => vm.dispose(),
            Page::Home | Page::NotFound => {}
        }
    }
}

/// Outcome of [`App::navigate`]. `entry` must be driven by the host
/// (`spawn_local` in the browser) for the new page to load its data.
pub struct Activation {
    pub resolution: Resolution,
    pub entry: Option<LocalBoxFuture<'static, ()>>,
}

pub struct App {
    ctx: AppContext,
    router: Router,
    route: Option<Route>,
    page: Option<Page>,
    logged_in: Rc<Cell<bool>>,
    _logged_subscription: Subscription,
}

impl App {
    pub fn new(ctx: AppContext) -> Self {
        let router = Router::new(ctx.session.clone(), ctx.navigator.clone());

        // Toolbar follows the login status stream
        let logged_in = Rc::new(Cell::new(false));
        let flag = logged_in.clone();
        let subscription = ctx.session.subscribe_logged(move |logged| flag.set(logged));

        Self {
            ctx,
            router,
            route: None,
            page: None,
            logged_in,
            _logged_subscription: subscription,
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    pub fn current_route(&self) -> Option<Route> {
        self.route
    }

    pub fn is_logged(&self) -> bool {
        self.logged_in.get()
    }

    /// Hand `action` to the mounted page
    pub fn dispatch(&self, action: PageAction) -> Result<ActionTask, AppError> {
        match &self.page {
            Some(page) => page.dispatch(action),
            None => Err(AppError::Unavailable {
                action: action.name(),
                page: "empty",
            }),
        }
    }

    /// Route, toolbar flag and mounted page, for the host to render
    pub fn snapshot(&self) -> Value {
        json!({
            "route": self.route.map(|route| route.path()),
            "logged": self.is_logged(),
            "page": self.page.as_ref().map(Page::snapshot),
        })
    }

    /// Resolve `path` through the guards and mount the matching page.
    /// A refused route leaves the current page mounted; the redirect has
    /// already been handed to the navigator.
    pub fn navigate(&mut self, path: &str) -> Activation {
        let resolution = self.router.resolve(path);
        let route = match &resolution {
            Resolution::Activate(route) => *route,
            Resolution::Redirected { .. } => {
                return Activation {
                    resolution,
                    entry: None,
                }
            }
        };

        self.unmount();

        match Page::build(&self.ctx, route) {
            Ok(page) => {
                log::info!("📄 [APP] Mounted {}", route);
                let entry = page.entry();
                self.route = Some(route);
                self.page = Some(page);
                Activation { resolution, entry }
            }
            Err(e) => {
                log::error!("❌ [APP] Could not mount {}: {}", route, e);
                self.ctx.navigator.navigate(&Route::Login);
                Activation {
                    resolution: Resolution::Redirected {
                        requested: route,
                        to: Route::Login,
                    },
                    entry: None,
                }
            }
        }
    }

    pub fn logout(&mut self) {
        self.ctx.session.log_out();
        self.ctx.navigator.navigate(&Route::Home);
    }

    /// Application stop
    pub fn teardown(&mut self) {
        self.unmount();
        self.ctx.session.teardown();
        self.logged_in.set(false);
    }

    fn unmount(&mut self) {
        if let Some(page) = self.page.take() {
            page.dispose();
        }
        self.route = None;
    }
}
