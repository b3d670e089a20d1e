//! Table setup
//!
//! Statements are idempotent and run at startup when the PostgreSQL store is
//! selected.

use sqlx::PgPool;
use tracing::info;

use crate::error::DatabaseError;

pub(crate) const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS warranty_claims (
        id              UUID PRIMARY KEY,
        seq             BIGSERIAL NOT NULL,
        is_draft        BOOLEAN NOT NULL,
        status          TEXT NOT NULL,
        draft_saved_at  TIMESTAMPTZ,
        created_at      TIMESTAMPTZ NOT NULL,
        updated_at      TIMESTAMPTZ NOT NULL,
        doc             JSONB NOT NULL
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS warranty_claims_drafts_idx
        ON warranty_claims (draft_saved_at DESC, seq DESC)
        WHERE is_draft
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS service_requests (
        id              UUID PRIMARY KEY,
        seq             BIGSERIAL NOT NULL,
        kind            TEXT NOT NULL,
        submitted_at    TIMESTAMPTZ NOT NULL,
        doc             JSONB NOT NULL
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS service_requests_kind_idx
        ON service_requests (kind, submitted_at DESC)
    "#,
];

/// Creates the tables and indexes if they do not exist
pub async fn run_migrations(pool: &PgPool) -> Result<(), DatabaseError> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
    }
    info!(statements = SCHEMA.len(), "Database schema ready");
    Ok(())
}
