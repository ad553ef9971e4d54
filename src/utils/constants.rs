/// REST resource roots (joined to the backend base URL)
pub const AUTH_PATH: &str = "api/auth";
pub const SESSION_PATH: &str = "api/session";
pub const TEACHER_PATH: &str = "api/teacher";
pub const USER_PATH: &str = "api/user";

// Snackbar texts
pub const MSG_SESSION_CREATED: &str = "Session created !";
pub const MSG_SESSION_UPDATED: &str = "Session updated !";
pub const MSG_SESSION_DELETED: &str = "Session deleted !";
pub const MSG_ACCOUNT_DELETED: &str = "Your account has been deleted !";
