use crate::services::http::HttpRequest;
use crate::state::SessionState;

/// Adds `Authorization: Bearer <token>` to outgoing requests while an identity is held.
#[derive(Clone)]
pub struct JwtInterceptor {
    session: SessionState,
}

impl JwtInterceptor {
    pub fn new(session: SessionState) -> Self {
        Self { session }
    }

    pub fn intercept(&self, request: HttpRequest) -> HttpRequest {
        match self.session.token() {
            Some(token) => request.with_header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }
}
