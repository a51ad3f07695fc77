//! Get feature model query
//!
//! Loads one feature model with its metadata, metrics, authors, and files.
//! File sizes are reported both raw and human-formatted.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::datasets::queries::get::AuthorSummary;
use crate::models::{Author, FeatureModel, FeatureModelMetadata, FeatureModelMetrics, ModelFile};

/// Query to fetch a single feature model by ID
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetFeatureModelQuery {
    pub id: i64,
}

/// A stored file as it appears in the feature model details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileDetails {
    pub id: i64,
    pub name: String,
    pub checksum: String,
    pub size: i64,
    /// Size rendered for humans, e.g. "1.5 KB"
    pub formatted_size: String,
}

impl From<ModelFile> for FileDetails {
    fn from(file: ModelFile) -> Self {
        let formatted_size = file.formatted_size();
        Self {
            id: file.id,
            name: file.name,
            checksum: file.checksum,
            size: file.size,
            formatted_size,
        }
    }
}

/// Full feature model details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureModelDetails {
    pub id: i64,
    pub data_set_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<FeatureModelMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<FeatureModelMetrics>,
    pub authors: Vec<AuthorSummary>,
    pub files: Vec<FileDetails>,
}

/// Errors that can occur when fetching a feature model
#[derive(Debug, thiserror::Error)]
pub enum GetFeatureModelError {
    #[error("Feature model with ID '{0}' not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<FeatureModelDetails, GetFeatureModelError>> for GetFeatureModelQuery {}

impl crate::cqrs::middleware::Query for GetFeatureModelQuery {}

/// Handles the get feature model query
#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: GetFeatureModelQuery,
) -> Result<FeatureModelDetails, GetFeatureModelError> {
    let model: FeatureModel = sqlx::query_as(
        "SELECT id, data_set_id, fm_meta_data_id FROM feature_models WHERE id = $1",
    )
    .bind(query.id)
    .fetch_optional(&pool)
    .await?
    .ok_or(GetFeatureModelError::NotFound(query.id))?;

    let metadata: Option<FeatureModelMetadata> = match model.fm_meta_data_id {
        Some(meta_id) => Some(
            sqlx::query_as(
                r#"
                SELECT id, uvl_filename, title, description, publication_type,
                       publication_doi, tags, uvl_version, fm_metrics_id
                FROM fm_meta_data
                WHERE id = $1
                "#,
            )
            .bind(meta_id)
            .fetch_one(&pool)
            .await?,
        ),
        None => None,
    };

    let metrics: Option<FeatureModelMetrics> =
        match metadata.as_ref().and_then(|m| m.fm_metrics_id) {
            Some(metrics_id) => Some(
                sqlx::query_as("SELECT id, solver, not_solver FROM fm_metrics WHERE id = $1")
                    .bind(metrics_id)
                    .fetch_one(&pool)
                    .await?,
            ),
            None => None,
        };

    let authors: Vec<AuthorSummary> = match model.fm_meta_data_id {
        Some(meta_id) => {
            let rows: Vec<Author> = sqlx::query_as(
                r#"
                SELECT id, name, affiliation, orcid, ds_meta_data_id, fm_meta_data_id
                FROM authors
                WHERE fm_meta_data_id = $1
                ORDER BY id
                "#,
            )
            .bind(meta_id)
            .fetch_all(&pool)
            .await?;
            rows.into_iter()
                .map(|author| AuthorSummary {
                    name: author.name,
                    affiliation: author.affiliation,
                    orcid: author.orcid,
                })
                .collect()
        },
        None => Vec::new(),
    };

    let files: Vec<ModelFile> = sqlx::query_as(
        r#"
        SELECT id, feature_model_id, name, checksum, size
        FROM files
        WHERE feature_model_id = $1
        ORDER BY id
        "#,
    )
    .bind(query.id)
    .fetch_all(&pool)
    .await?;

    Ok(FeatureModelDetails {
        id: model.id,
        data_set_id: model.data_set_id,
        metadata,
        metrics,
        authors,
        files: files.into_iter().map(FileDetails::from).collect(),
    })
}
