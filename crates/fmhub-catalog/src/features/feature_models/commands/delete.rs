//! Delete feature model command
//!
//! Removes a single feature model with its files, metadata, and metadata
//! authors. The referenced metrics row, if any, is left behind.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Command to delete a feature model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteFeatureModelCommand {
    pub id: i64,
}

/// Response from deleting a feature model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteFeatureModelResponse {
    pub id: i64,
    pub deleted: bool,
    pub files_deleted: u64,
}

/// Errors that can occur when deleting a feature model
#[derive(Debug, thiserror::Error)]
pub enum DeleteFeatureModelError {
    #[error("Feature model with ID '{0}' not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<DeleteFeatureModelResponse, DeleteFeatureModelError>>
    for DeleteFeatureModelCommand
{
}

impl crate::cqrs::middleware::Command for DeleteFeatureModelCommand {}

/// Handles the delete feature model command
///
/// Files are removed first, then the model row, then its metadata's authors
/// and the metadata itself. Metrics rows are never touched here.
#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    command: DeleteFeatureModelCommand,
) -> Result<DeleteFeatureModelResponse, DeleteFeatureModelError> {
    let fm_meta_data_id: Option<i64> =
        sqlx::query_scalar("SELECT fm_meta_data_id FROM feature_models WHERE id = $1")
            .bind(command.id)
            .fetch_optional(&pool)
            .await?
            .ok_or(DeleteFeatureModelError::NotFound(command.id))?;

    let mut tx = pool.begin().await?;

    let files_deleted = sqlx::query("DELETE FROM files WHERE feature_model_id = $1")
        .bind(command.id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    sqlx::query("DELETE FROM feature_models WHERE id = $1")
        .bind(command.id)
        .execute(&mut *tx)
        .await?;

    if let Some(meta_id) = fm_meta_data_id {
        sqlx::query("DELETE FROM authors WHERE fm_meta_data_id = $1")
            .bind(meta_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM fm_meta_data WHERE id = $1")
            .bind(meta_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    tracing::info!(
        feature_model_id = command.id,
        files_deleted,
        "Deleted feature model"
    );

    Ok(DeleteFeatureModelResponse {
        id: command.id,
        deleted: true,
        files_deleted,
    })
}
