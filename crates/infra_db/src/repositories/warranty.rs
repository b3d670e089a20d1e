//! Warranty claim repository

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::DatabaseError;

const SELECT_CLAIMS: &str =
    "SELECT id, is_draft, status, draft_saved_at, created_at, updated_at, doc FROM warranty_claims";

/// Database row for a warranty claim
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClaimDocumentRow {
    pub id: Uuid,
    pub is_draft: bool,
    pub status: String,
    pub draft_saved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub doc: Json<Value>,
}

/// Column filters for listing claims
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimFilter {
    pub is_draft: Option<bool>,
    pub status: Option<String>,
}

/// Sort order for listing claims
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClaimSort {
    #[default]
    DraftSavedDesc,
    CreatedDesc,
}

impl ClaimSort {
    /// `ORDER BY` clause, with insertion order as the tie-break
    pub fn order_by(&self) -> &'static str {
        match self {
            ClaimSort::DraftSavedDesc => " ORDER BY draft_saved_at DESC NULLS LAST, seq DESC",
            ClaimSort::CreatedDesc => " ORDER BY created_at DESC, seq DESC",
        }
    }
}

/// Repository for warranty claim documents
#[derive(Debug, Clone)]
pub struct WarrantyClaimRepository {
    pool: PgPool,
}

impl WarrantyClaimRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a claim by its identifier
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<ClaimDocumentRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ClaimDocumentRow>(&format!("{} WHERE id = $1", SELECT_CLAIMS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Lists claims matching the filter
    pub async fn find(
        &self,
        filter: &ClaimFilter,
        sort: ClaimSort,
    ) -> Result<Vec<ClaimDocumentRow>, DatabaseError> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(SELECT_CLAIMS);
        query.push(" WHERE TRUE");
        if let Some(is_draft) = filter.is_draft {
            query.push(" AND is_draft = ").push_bind(is_draft);
        }
        if let Some(status) = &filter.status {
            query.push(" AND status = ").push_bind(status.clone());
        }
        query.push(sort.order_by());

        let rows = query
            .build_query_as::<ClaimDocumentRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Inserts a new claim
    ///
    /// Fails with `DuplicateEntry` if the identifier exists.
    pub async fn insert(&self, row: &ClaimDocumentRow) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO warranty_claims
                (id, is_draft, status, draft_saved_at, created_at, updated_at, doc)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(row.id)
        .bind(row.is_draft)
        .bind(&row.status)
        .bind(row.draft_saved_at)
        .bind(row.created_at)
        .bind(row.updated_at)
        .bind(&row.doc)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Replaces a stored claim, keeping its insertion sequence
    pub async fn update(&self, row: &ClaimDocumentRow) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE warranty_claims
            SET is_draft = $2, status = $3, draft_saved_at = $4, updated_at = $5, doc = $6
            WHERE id = $1
            "#,
        )
        .bind(row.id)
        .bind(row.is_draft)
        .bind(&row.status)
        .bind(row.draft_saved_at)
        .bind(row.updated_at)
        .bind(&row.doc)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("WarrantyClaim", row.id));
        }
        Ok(())
    }

    /// Checks that the database answers
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_order_puts_unsaved_last_and_breaks_ties_by_seq() {
        let clause = ClaimSort::DraftSavedDesc.order_by();
        assert!(clause.contains("draft_saved_at DESC NULLS LAST"));
        assert!(clause.trim_end().ends_with("seq DESC"));
    }

    #[test]
    fn test_default_sort_is_by_save_time() {
        assert_eq!(ClaimSort::default(), ClaimSort::DraftSavedDesc);
    }
}
