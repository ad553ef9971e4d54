// ============================================================================
// FETCH TRANSPORT - Browser fetch via gloo-net (wasm32 only)
// ============================================================================

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};

use crate::error::ApiError;
use crate::services::http::{HttpRequest, HttpResponse, HttpTransport, Method};

#[derive(Debug, Default, Clone, Copy)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder: RequestBuilder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Delete => Request::delete(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let prepared = match &request.body {
            Some(body) => builder
                .json(body)
                .map_err(|e| ApiError::transport(format!("Request build error: {}", e)))?,
            None => builder
                .build()
                .map_err(|e| ApiError::transport(format!("Request build error: {}", e)))?,
        };

        let response = prepared
            .send()
            .await
            .map_err(|e| ApiError::transport(e.to_string()))?;

        let status = response.status();
        HttpResponse::from_read(status, response.text().await)
    }
}
