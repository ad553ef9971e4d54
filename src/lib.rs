// ============================================================================
// YOGA STUDIO PWA - Booking client (Rust + wasm, MVVM)
// ============================================================================
// - Models: wire records shared with the REST backend
// - Services: HTTP only (stateless), JWT attached by the interceptor
// - State: Rc<RefCell> shared state with subscribers
// - ViewModels: per-screen state + logic
// - Router/Guards: route activation against the session snapshot
// - App: composition root, owns the shared state
// ============================================================================

pub mod app;
pub mod config;
pub mod error;
pub mod guards;
pub mod models;
pub mod router;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use app::{ActionTask, Activation, App, AppContext, Page, PageAction};
pub use config::{AppConfig, CONFIG};
pub use error::{ApiError, AppError};
pub use router::{Navigator, Resolution, Route, Router};
pub use state::{LoadState, SessionState};
