//! Service request repository

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

/// Database row for a service request
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ServiceRequestRow {
    pub id: Uuid,
    pub kind: String,
    pub submitted_at: DateTime<Utc>,
    pub doc: Json<Value>,
}

/// Repository for service request documents
#[derive(Debug, Clone)]
pub struct ServiceRequestRepository {
    pool: PgPool,
}

impl ServiceRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, row: &ServiceRequestRow) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO service_requests (id, kind, submitted_at, doc)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(row.id)
        .bind(&row.kind)
        .bind(row.submitted_at)
        .bind(&row.doc)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Lists requests newest first, optionally of one kind
    pub async fn find(&self, kind: Option<&str>) -> Result<Vec<ServiceRequestRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ServiceRequestRow>(
            r#"
            SELECT id, kind, submitted_at, doc
            FROM service_requests
            WHERE $1::TEXT IS NULL OR kind = $1
            ORDER BY submitted_at DESC, seq DESC
            "#,
        )
        .bind(kind)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
