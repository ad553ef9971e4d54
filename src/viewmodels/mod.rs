// ============================================================================
// VIEWMODELS - Per-screen state + logic, no rendering
// ============================================================================
// Each view-model owns a ViewScope: dispose() when the screen goes away and
// pending requests are dropped without touching its state.
// ============================================================================

pub mod login_viewmodel;
pub mod me_viewmodel;
pub mod register_viewmodel;
pub mod session_detail_viewmodel;
pub mod session_form_viewmodel;
pub mod session_list_viewmodel;
pub mod view_scope;

pub use login_viewmodel::LoginViewModel;
pub use me_viewmodel::MeViewModel;
pub use register_viewmodel::RegisterViewModel;
pub use session_detail_viewmodel::{SessionDetail, SessionDetailViewModel};
pub use session_form_viewmodel::{FormMode, SessionForm, SessionFormViewModel};
pub use session_list_viewmodel::SessionListViewModel;
pub use view_scope::ViewScope;
