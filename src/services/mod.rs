pub mod api_client;
pub mod auth_service;
#[cfg(target_arch = "wasm32")]
pub mod fetch_transport;
pub mod http;
pub mod jwt_interceptor;
pub mod notifier;
pub mod session_api_service;
pub mod teacher_service;
pub mod user_service;

pub use api_client::ApiClient;
pub use auth_service::AuthService;
#[cfg(target_arch = "wasm32")]
pub use fetch_transport::FetchTransport;
pub use http::{HttpRequest, HttpResponse, HttpTransport, Method};
pub use jwt_interceptor::JwtInterceptor;
pub use notifier::{Notifier, SnackbarNotifier};
pub use session_api_service::SessionApiService;
pub use teacher_service::TeacherService;
pub use user_service::UserService;
