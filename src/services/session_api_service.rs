use crate::error::ApiError;
use crate::models::{SessionDraft, SessionId, UserId, YogaSession};
use crate::services::api_client::ApiClient;
use crate::utils::constants::SESSION_PATH;

/// Yoga sessions and their attendee rosters.
#[derive(Clone)]
pub struct SessionApiService {
    client: ApiClient,
}

impl SessionApiService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn all(&self) -> Result<Vec<YogaSession>, ApiError> {
        self.client.get(SESSION_PATH).await
    }

    pub async fn detail(&self, id: SessionId) -> Result<YogaSession, ApiError> {
        self.client.get(&format!("{}/{}", SESSION_PATH, id)).await
    }

    pub async fn create(&self, draft: &SessionDraft) -> Result<YogaSession, ApiError> {
        log::info!("➕ Creating session '{}'", draft.name);
        self.client.post(SESSION_PATH, draft).await
    }

    pub async fn update(&self, id: SessionId, draft: &SessionDraft) -> Result<YogaSession, ApiError> {
        log::info!("✏️ Updating session {}", id);
        self.client.put(&format!("{}/{}", SESSION_PATH, id), draft).await
    }

    pub async fn delete(&self, id: SessionId) -> Result<(), ApiError> {
        log::info!("🗑️ Deleting session {}", id);
        self.client.delete(&format!("{}/{}", SESSION_PATH, id)).await
    }

    /// Add `user_id` to the roster (no request body)
    pub async fn participate(&self, id: SessionId, user_id: UserId) -> Result<(), ApiError> {
        self.client
            .post_unit::<()>(&participation_path(id, user_id), None)
            .await
    }

    /// Remove `user_id` from the roster
    pub async fn un_participate(&self, id: SessionId, user_id: UserId) -> Result<(), ApiError> {
        self.client.delete(&participation_path(id, user_id)).await
    }
}

fn participation_path(id: SessionId, user_id: UserId) -> String {
    format!("{}/{}/participate/{}", SESSION_PATH, id, user_id)
}
