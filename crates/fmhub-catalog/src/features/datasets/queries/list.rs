//! List datasets query
//!
//! Pages through stored datasets, newest first, optionally filtered to a
//! single owning user.

use chrono::{DateTime, Utc};
use fmhub_common::types::Pagination;
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Query to list datasets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDatasetsQuery {
    /// Restrict to datasets owned by this user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// A single row in the dataset listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DatasetListItem {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// Response from listing datasets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDatasetsResponse {
    pub items: Vec<DatasetListItem>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Errors that can occur when listing datasets
#[derive(Debug, thiserror::Error)]
pub enum ListDatasetsError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<ListDatasetsResponse, ListDatasetsError>> for ListDatasetsQuery {}

impl crate::cqrs::middleware::Query for ListDatasetsQuery {}

/// Handles the list datasets query
#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: ListDatasetsQuery,
) -> Result<ListDatasetsResponse, ListDatasetsError> {
    let items: Vec<DatasetListItem> = sqlx::query_as(
        r#"
        SELECT d.id, d.user_id, m.title, d.created_at
        FROM data_sets d
        JOIN ds_meta_data m ON m.id = d.ds_meta_data_id
        WHERE ($1::bigint IS NULL OR d.user_id = $1)
        ORDER BY d.created_at DESC, d.id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(query.user_id)
    .bind(query.pagination.limit)
    .bind(query.pagination.offset)
    .fetch_all(&pool)
    .await?;

    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM data_sets WHERE ($1::bigint IS NULL OR user_id = $1)",
    )
    .bind(query.user_id)
    .fetch_one(&pool)
    .await?;

    Ok(ListDatasetsResponse {
        items,
        total,
        limit: query.pagination.limit,
        offset: query.pagination.offset,
    })
}
