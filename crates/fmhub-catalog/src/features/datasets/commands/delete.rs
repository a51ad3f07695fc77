//! Delete dataset command
//!
//! Removes a dataset aggregate with an explicit child-first cascade: files,
//! feature models, feature-model metadata and its authors, then the dataset
//! row, its authors, metadata, and metrics. Feature-model metrics rows are
//! intentionally not touched and may be left behind.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Command to delete a dataset and everything it owns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteDatasetCommand {
    pub id: i64,
}

/// Response from deleting a dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteDatasetResponse {
    pub id: i64,
    pub deleted: bool,
    pub feature_models_deleted: u64,
    pub files_deleted: u64,
}

/// Errors that can occur when deleting a dataset
#[derive(Debug, thiserror::Error)]
pub enum DeleteDatasetError {
    #[error("Dataset with ID '{0}' not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<DeleteDatasetResponse, DeleteDatasetError>> for DeleteDatasetCommand {}

impl crate::cqrs::middleware::Command for DeleteDatasetCommand {}

/// Handles the delete dataset command
///
/// Deletion order matters: children are removed before the rows they
/// reference so the plain RESTRICT foreign keys are never violated.
#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    command: DeleteDatasetCommand,
) -> Result<DeleteDatasetResponse, DeleteDatasetError> {
    let ds_meta_data_id: i64 =
        sqlx::query_scalar("SELECT ds_meta_data_id FROM data_sets WHERE id = $1")
            .bind(command.id)
            .fetch_optional(&pool)
            .await?
            .ok_or(DeleteDatasetError::NotFound(command.id))?;

    let ds_metrics_id: Option<i64> =
        sqlx::query_scalar("SELECT ds_metrics_id FROM ds_meta_data WHERE id = $1")
            .bind(ds_meta_data_id)
            .fetch_one(&pool)
            .await?;

    let feature_models: Vec<(i64, Option<i64>)> = sqlx::query_as(
        "SELECT id, fm_meta_data_id FROM feature_models WHERE data_set_id = $1",
    )
    .bind(command.id)
    .fetch_all(&pool)
    .await?;

    let fm_ids: Vec<i64> = feature_models.iter().map(|(id, _)| *id).collect();
    let fm_meta_data_ids: Vec<i64> = feature_models
        .iter()
        .filter_map(|(_, meta_id)| *meta_id)
        .collect();

    let mut tx = pool.begin().await?;

    let files_deleted = sqlx::query("DELETE FROM files WHERE feature_model_id = ANY($1)")
        .bind(&fm_ids)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let feature_models_deleted =
        sqlx::query("DELETE FROM feature_models WHERE data_set_id = $1")
            .bind(command.id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

    sqlx::query("DELETE FROM authors WHERE fm_meta_data_id = ANY($1)")
        .bind(&fm_meta_data_ids)
        .execute(&mut *tx)
        .await?;

    // fm_metrics rows referenced by these metadata records are deliberately
    // left in place.
    sqlx::query("DELETE FROM fm_meta_data WHERE id = ANY($1)")
        .bind(&fm_meta_data_ids)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM data_sets WHERE id = $1")
        .bind(command.id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM authors WHERE ds_meta_data_id = $1")
        .bind(ds_meta_data_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM ds_meta_data WHERE id = $1")
        .bind(ds_meta_data_id)
        .execute(&mut *tx)
        .await?;

    if let Some(metrics_id) = ds_metrics_id {
        sqlx::query("DELETE FROM ds_metrics WHERE id = $1")
            .bind(metrics_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    tracing::info!(
        dataset_id = command.id,
        feature_models_deleted,
        files_deleted,
        "Deleted dataset aggregate"
    );

    Ok(DeleteDatasetResponse {
        id: command.id,
        deleted: true,
        feature_models_deleted,
        files_deleted,
    })
}
