// ============================================================================
// API CLIENT - HTTP only (stateless)
// ============================================================================
// No business logic: builds the request, attaches the JWT, checks the
// status and decodes the body. No retry, no cache.
// ============================================================================

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::services::http::{HttpRequest, HttpResponse, HttpTransport, Method};
use crate::services::jwt_interceptor::JwtInterceptor;

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Rc<dyn HttpTransport>,
    interceptor: JwtInterceptor,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, transport: Rc<dyn HttpTransport>, interceptor: JwtInterceptor) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            interceptor,
        }
    }

    /// Absolute (or same-origin) URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let response = self.execute(HttpRequest::new(Method::Get, self.url(path))).await?;
        response.json()
    }

    pub async fn post<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, ApiError> {
        let request = HttpRequest::new(Method::Post, self.url(path)).with_json(to_json(body)?);
        self.execute(request).await?.json()
    }

    /// POST whose reply body is ignored
    pub async fn post_unit<B: Serialize>(&self, path: &str, body: Option<&B>) -> Result<(), ApiError> {
        let mut request = HttpRequest::new(Method::Post, self.url(path));
        if let Some(body) = body {
            request = request.with_json(to_json(body)?);
        }
        self.execute(request).await.map(|_| ())
    }

    pub async fn put<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, ApiError> {
        let request = HttpRequest::new(Method::Put, self.url(path)).with_json(to_json(body)?);
        self.execute(request).await?.json()
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(HttpRequest::new(Method::Delete, self.url(path)))
            .await
            .map(|_| ())
    }

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let request = self.interceptor.intercept(request);
        let method = request.method;
        let url = request.url.clone();

        log::debug!("➡️ {} {}", method, url);

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                log::error!("❌ {} {} failed: {}", method, url, e);
                return Err(e);
            }
        };

        if !response.is_success() {
            let err = ApiError::from_response(response.status, &response.body);
            log::warn!("⚠️ {} {} -> HTTP {}: {}", method, url, response.status, err.message());
            return Err(err);
        }

        log::debug!("✅ {} {} -> HTTP {}", method, url, response.status);
        Ok(response)
    }
}

fn to_json<B: Serialize>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::ServerFailure {
        status: None,
        message: format!("Serialization error: {}", e),
    })
}
