// ============================================================================
// STATE MODULE - Shared state with Rc<RefCell> + subscriber notifications
// ============================================================================

pub mod load_state;
pub mod reactivity;
pub mod session_state;

pub use load_state::LoadState;
pub use reactivity::{ReactiveState, Subscription};
pub use session_state::SessionState;
