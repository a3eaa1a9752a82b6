use serde::Serialize;
use sqlx::PgPool;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::AppError;

/// Rows removed by an account deletion, per table.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DeletionReport {
    pub run_splits: u64,
    pub runs: u64,
    pub coaching_feedback: u64,
    pub user_preferences: u64,
    pub subscriptions: u64,
    pub sessions: u64,
    pub users: u64,
}

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// User owning a live session token.
    pub async fn find_session_user(&self, token: &str) -> Result<Option<Uuid>, AppError> {
        let user_id: Option<Uuid> = sqlx::query_scalar(
            r#"
            SELECT user_id
            FROM sessions
            WHERE token = $1 AND expires_at > NOW()
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user_id)
    }

    pub async fn user_exists(&self, user_id: Uuid) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    /// Delete a user and everything that references them, children first.
    /// Runs in a single transaction.
    pub async fn delete_user_cascade(&self, user_id: Uuid) -> Result<DeletionReport, AppError> {
        let mut tx = self.pool.begin().await?;
        let mut report = DeletionReport::default();

        report.run_splits = sqlx::query(
            r#"
            DELETE FROM run_splits
            WHERE run_id IN (SELECT id FROM runs WHERE user_id = $1)
            "#,
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        report.coaching_feedback = sqlx::query("DELETE FROM coaching_feedback WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        report.runs = sqlx::query("DELETE FROM runs WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        report.user_preferences = sqlx::query("DELETE FROM user_preferences WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        report.subscriptions = sqlx::query("DELETE FROM subscriptions WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        report.sessions = sqlx::query("DELETE FROM sessions WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        report.users = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        Ok(report)
    }
}
