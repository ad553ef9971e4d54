use serde::{Deserialize, Serialize};

pub type UserId = u64;

fn default_token_type() -> String {
    "Bearer".to_string()
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug, Default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

/// Authenticated user returned by `POST /api/auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub token: String,
    #[serde(rename = "type", default = "default_token_type")]
    pub token_type: String,
    pub id: UserId,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub admin: bool,
}

impl Identity {
    pub fn viewer(&self) -> Viewer {
        if self.admin {
            Viewer::Admin
        } else {
            Viewer::RegularUser
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Capability of the logged-in user, consulted at guard and render time.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Viewer {
    Admin,
    RegularUser,
}

impl Viewer {
    /// Create, edit and delete sessions
    pub fn can_manage_sessions(self) -> bool {
        matches!(self, Viewer::Admin)
    }

    /// Join or leave sessions
    pub fn can_participate(self) -> bool {
        matches!(self, Viewer::RegularUser)
    }
}
