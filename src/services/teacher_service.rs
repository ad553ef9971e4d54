use crate::error::ApiError;
use crate::models::{Teacher, TeacherId};
use crate::services::api_client::ApiClient;
use crate::utils::constants::TEACHER_PATH;

#[derive(Clone)]
pub struct TeacherService {
    client: ApiClient,
}

impl TeacherService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn all(&self) -> Result<Vec<Teacher>, ApiError> {
        self.client.get(TEACHER_PATH).await
    }

    pub async fn detail(&self, id: TeacherId) -> Result<Teacher, ApiError> {
        self.client.get(&format!("{}/{}", TEACHER_PATH, id)).await
    }
}
