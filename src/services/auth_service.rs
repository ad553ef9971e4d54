use crate::error::ApiError;
use crate::models::{Identity, LoginRequest, RegisterRequest};
use crate::services::api_client::ApiClient;
use crate::utils::constants::AUTH_PATH;

#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for an identity; bad credentials surface as `Unauthorized`
    pub async fn login(&self, request: &LoginRequest) -> Result<Identity, ApiError> {
        log::info!("🔐 Login attempt for {}", request.email);
        self.client.post(&format!("{}/login", AUTH_PATH), request).await
    }

    /// Create an account; any non-2xx reply is an error
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        log::info!("📝 Registering {}", request.email);
        self.client
            .post_unit(&format!("{}/register", AUTH_PATH), Some(request))
            .await
    }
}
