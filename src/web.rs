// ============================================================================
// WEB - Browser bindings (wasm32 only): hash routing, fetch, start-up
// ============================================================================
// The host page calls the exported actions and re-reads `page_state()`
// whenever `yoga:state` fires; snackbars are pulled on `yoga:notify`.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::app::{ActionTask, App, AppContext, PageAction};
use crate::config::CONFIG;
use crate::models::RegisterRequest;
use crate::router::{Navigator, Route};
use crate::services::{FetchTransport, Notifier, SnackbarNotifier};
use crate::viewmodels::SessionForm;

const STATE_EVENT: &str = "yoga:state";
const NOTIFY_EVENT: &str = "yoga:notify";

thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
    static SNACKBAR: Rc<SnackbarNotifier> = Rc::new(SnackbarNotifier::new(CONFIG.snackbar_duration_ms));
}

/// Routes live in `location.hash` (`#/sessions/detail/1`).
#[derive(Debug, Default, Clone, Copy)]
pub struct HashNavigator;

impl Navigator for HashNavigator {
    fn navigate(&self, route: &Route) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().set_hash(&route.path()) {
            log::error!("❌ [NAV] Could not navigate to {}: {:?}", route, e);
        }
    }

    fn back(&self) {
        if let Some(Err(e)) = web_sys::window().map(|window| window.history().and_then(|history| history.back())) {
            log::error!("❌ [NAV] history.back() failed: {:?}", e);
        }
    }
}

/// Queues the message and tells the host page to show it.
struct DomNotifier {
    snackbar: Rc<SnackbarNotifier>,
}

impl Notifier for DomNotifier {
    fn notify(&self, message: &str) {
        self.snackbar.notify(message);
        emit(NOTIFY_EVENT);
    }
}

fn emit(name: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    match web_sys::Event::new(name) {
        Ok(event) => {
            if let Err(e) = window.dispatch_event(&event) {
                log::error!("❌ [WEB] Could not dispatch {}: {:?}", name, e);
            }
        }
        Err(e) => log::error!("❌ [WEB] Could not create {}: {:?}", name, e),
    }
}

fn current_hash() -> String {
    web_sys::window()
        .and_then(|window| window.location().hash().ok())
        .unwrap_or_default()
}

/// Mount the page for `path` and spawn its entry task.
fn activate(path: &str) {
    let entry = APP.with(|app_cell| {
        let mut app = app_cell.borrow_mut();
        match app.as_mut() {
            Some(app) => app.navigate(path).entry,
            None => {
                log::warn!("⚠️ [WEB] App is not initialised");
                None
            }
        }
    });
    emit(STATE_EVENT);
    // Spawned after the borrow is released: entry tasks never touch APP
    if let Some(entry) = entry {
        wasm_bindgen_futures::spawn_local(async move {
            entry.await;
            emit(STATE_EVENT);
        });
    }
}

/// Hand `action` to the mounted page and drive the resulting task.
fn dispatch(action: PageAction) {
    let name = action.name();
    let task: Option<ActionTask> = APP.with(|app_cell| match app_cell.borrow().as_ref() {
        Some(app) => match app.dispatch(action) {
            Ok(task) => Some(task),
            Err(e) => {
                log::warn!("⚠️ [WEB] {}", e);
                None
            }
        },
        None => {
            log::warn!("⚠️ [WEB] App is not initialised, dropping '{}'", name);
            None
        }
    });
    let Some(task) = task else {
        return;
    };

    emit(STATE_EVENT);
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = task.await {
            log::warn!("⚠️ [WEB] '{}' failed: {}", name, e);
        }
        emit(STATE_EVENT);
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    if let Some(level) = CONFIG.log_level_filter().to_level() {
        wasm_logger::init(wasm_logger::Config::new(level));
    }
    log::info!("🧘 Yoga studio client starting ({})", CONFIG.environment);

    let notifier = DomNotifier {
        snackbar: SNACKBAR.with(Rc::clone),
    };
    let ctx = AppContext::new(&CONFIG, Rc::new(FetchTransport), Rc::new(HashNavigator), Rc::new(notifier));
    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(App::new(ctx));
    });

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window available"))?;
    let closure = Closure::wrap(Box::new(move |_e: web_sys::Event| {
        activate(&current_hash());
    }) as Box<dyn FnMut(web_sys::Event)>);
    window.add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref())?;
    // Registered once for the whole page lifetime
    closure.forget();

    activate(&current_hash());
    Ok(())
}

/// JSON snapshot of the route, the toolbar flag and the mounted page
#[wasm_bindgen]
pub fn page_state() -> String {
    APP.with(|app_cell| {
        app_cell
            .borrow()
            .as_ref()
            .map(|app| app.snapshot().to_string())
            .unwrap_or_else(|| "null".to_string())
    })
}

/// Pending snackbar messages as a JSON array, oldest first
#[wasm_bindgen]
pub fn take_notifications() -> String {
    let messages = SNACKBAR.with(|snackbar| snackbar.take());
    serde_json::Value::from(messages).to_string()
}

#[wasm_bindgen]
pub fn notification_duration_ms() -> u32 {
    SNACKBAR.with(|snackbar| snackbar.duration_ms())
}

#[wasm_bindgen]
pub fn login(email: String, password: String) {
    dispatch(PageAction::Login { email, password });
}

#[wasm_bindgen]
pub fn register(email: String, first_name: String, last_name: String, password: String) {
    dispatch(PageAction::Register(RegisterRequest {
        email,
        first_name,
        last_name,
        password,
    }));
}

#[wasm_bindgen]
pub fn participate() {
    dispatch(PageAction::Participate);
}

#[wasm_bindgen]
pub fn un_participate() {
    dispatch(PageAction::UnParticipate);
}

#[wasm_bindgen]
pub fn delete_session() {
    dispatch(PageAction::DeleteSession);
}

#[wasm_bindgen]
pub fn retry() {
    dispatch(PageAction::Retry);
}

/// Replace the session form fields; `teacher_id` is `undefined` until chosen
#[wasm_bindgen]
pub fn edit_session_form(name: String, date: String, teacher_id: Option<u32>, description: String) {
    dispatch(PageAction::EditSessionForm(SessionForm {
        name,
        date,
        teacher_id: teacher_id.map(u64::from),
        description,
    }));
}

#[wasm_bindgen]
pub fn submit_session_form() {
    dispatch(PageAction::SubmitSessionForm);
}

#[wasm_bindgen]
pub fn delete_account() {
    dispatch(PageAction::DeleteAccount);
}

#[wasm_bindgen]
pub fn go_back() {
    dispatch(PageAction::Back);
}

/// Toolbar "Logout" action
#[wasm_bindgen]
pub fn logout() {
    APP.with(|app_cell| {
        if let Some(app) = app_cell.borrow_mut().as_mut() {
            app.logout();
        }
    });
    emit(STATE_EVENT);
}

/// Whether the toolbar should show the logged-in menu
#[wasm_bindgen]
pub fn is_logged() -> bool {
    APP.with(|app_cell| app_cell.borrow().as_ref().map(App::is_logged).unwrap_or(false))
}

/// Page unload
#[wasm_bindgen]
pub fn shutdown() {
    APP.with(|app_cell| {
        if let Some(mut app) = app_cell.borrow_mut().take() {
            app.teardown();
        }
    });
}
