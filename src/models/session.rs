use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::auth::UserId;
use crate::models::teacher::TeacherId;

pub type SessionId = u64;

/// Yoga class as served by `/api/session`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct YogaSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SessionId>,
    pub name: String,
    pub description: String,
    pub date: String,
    #[serde(rename = "teacher_id")]
    pub teacher_id: TeacherId,
    /// Attendee roster; membership matters, order does not
    #[serde(default)]
    pub users: BTreeSet<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl YogaSession {
    pub fn has_attendee(&self, user_id: UserId) -> bool {
        self.users.contains(&user_id)
    }

    pub fn attendee_count(&self) -> usize {
        self.users.len()
    }

    /// Session date as `YYYY-MM-DD`, the shape the edit form works with
    pub fn form_date(&self) -> Option<String> {
        form_date(&self.date)
    }
}

/// Accepts an RFC 3339 timestamp or a plain date and returns the calendar date.
pub fn form_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.naive_utc().date().format("%Y-%m-%d").to_string());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.format("%Y-%m-%d").to_string())
}

/// Body of create/update requests.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct SessionDraft {
    pub name: String,
    pub date: String,
    pub teacher_id: TeacherId,
    pub description: String,
}
