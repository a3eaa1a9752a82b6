//! Account deletion handler.

use axum::{Extension, response::Json};
use tracing::info;

use crate::{
    auth::{BearerToken, resolve_user},
    database::Database,
    errors::AppError,
    types::AccountDeletionResponse,
};

/// Delete the caller's account and all records that belong to it.
#[utoipa::path(
    post,
    path = "/account/delete",
    tag = "account",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Account deleted", body = AccountDeletionResponse),
        (status = 401, description = "Missing or unknown token", body = crate::types::ErrorResponse),
        (status = 500, description = "Database failure", body = crate::types::ErrorResponse)
    )
)]
pub async fn delete_account(
    Extension(db): Extension<Database>,
    BearerToken(token): BearerToken,
) -> Result<Json<AccountDeletionResponse>, AppError> {
    let (user_id, source) = resolve_user(&db, &token).await?;

    let deleted = db.delete_user_cascade(user_id).await?;
    info!(?source, ?deleted, "Deleted account {user_id}");

    Ok(Json(AccountDeletionResponse {
        success: true,
        message: "Account deleted".to_string(),
        deleted,
    }))
}
