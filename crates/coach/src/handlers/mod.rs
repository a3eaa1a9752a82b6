//! HTTP request handlers for the coach API.

pub mod account;
pub mod feedback;
pub mod health;
pub mod speech;

// Re-export handlers (including utoipa __path types for OpenAPI)
pub use account::{__path_delete_account, delete_account};
pub use feedback::{__path_generate_feedback, generate_feedback};
pub use health::{__path_health_check, health_check, openapi_json};
pub use speech::{__path_synthesize_speech, synthesize_speech};
