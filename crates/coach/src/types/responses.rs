//! Response types for API endpoints.

use serde::Serialize;
use utoipa::ToSchema;

use crate::database::DeletionReport;

/// Account deletion response.
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountDeletionResponse {
    pub success: bool,
    pub message: String,
    pub deleted: DeletionReport,
}

/// Error body returned by the relay endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
