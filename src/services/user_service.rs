use crate::error::ApiError;
use crate::models::{User, UserId};
use crate::services::api_client::ApiClient;
use crate::utils::constants::USER_PATH;

#[derive(Clone)]
pub struct UserService {
    client: ApiClient,
}

impl UserService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_by_id(&self, id: UserId) -> Result<User, ApiError> {
        self.client.get(&format!("{}/{}", USER_PATH, id)).await
    }

    pub async fn delete(&self, id: UserId) -> Result<(), ApiError> {
        log::info!("🗑️ Deleting account {}", id);
        self.client.delete(&format!("{}/{}", USER_PATH, id)).await
    }
}
