pub mod auth;
pub mod session;
pub mod teacher;
pub mod user;

pub use auth::{Identity, LoginRequest, RegisterRequest, UserId, Viewer};
pub use session::{SessionDraft, SessionId, YogaSession};
pub use teacher::{Teacher, TeacherId};
pub use user::User;
