//! Create dataset command
//!
//! Creates a dataset aggregate in a single transaction: the optional metrics
//! record, the metadata record, the dataset row itself, and the metadata's
//! authors.

use chrono::{DateTime, Utc};
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::shared::validation::{
    validate_authors, validate_max_length, validate_required, AuthorInput, AuthorValidationError,
    FieldValidationError,
};
use crate::models::PublicationType;

/// Aggregate counters supplied with dataset metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetMetricsInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_models: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_features: Option<String>,
}

/// Metadata supplied when creating a dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetMetadataInput {
    pub title: String,
    pub description: String,
    pub publication_type: PublicationType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_doi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_doi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposition_id: Option<i64>,
    /// Comma-delimited tag string, stored verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<DatasetMetricsInput>,
    pub authors: Vec<AuthorInput>,
}

/// Command to create a new dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDatasetCommand {
    pub user_id: i64,
    pub metadata: DatasetMetadataInput,
}

/// Response from creating a dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDatasetResponse {
    pub id: i64,
    pub ds_meta_data_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Errors that can occur when creating a dataset
#[derive(Debug, thiserror::Error)]
pub enum CreateDatasetError {
    /// A metadata field failed validation
    #[error("Metadata validation failed: {0}")]
    FieldValidation(#[from] FieldValidationError),
    /// An author entry failed validation
    #[error("Author validation failed: {0}")]
    AuthorValidation(#[from] AuthorValidationError),
    /// The owning user does not exist
    #[error("User with ID '{0}' not found")]
    UserNotFound(i64),
    /// A database error occurred
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<CreateDatasetResponse, CreateDatasetError>> for CreateDatasetCommand {}

impl crate::cqrs::middleware::Command for CreateDatasetCommand {}

impl CreateDatasetCommand {
    /// Validates the command parameters
    ///
    /// # Errors
    ///
    /// - `FieldValidation` - Title or description missing, or a text field
    ///   exceeds the column length
    /// - `AuthorValidation` - An author is missing a name or carries an
    ///   invalid ORCID
    pub fn validate(&self) -> Result<(), CreateDatasetError> {
        validate_required("title", &self.metadata.title)?;

        if self.metadata.description.trim().is_empty() {
            return Err(FieldValidationError::Required {
                field: "description",
            }
            .into());
        }

        if let Some(ref doi) = self.metadata.publication_doi {
            validate_max_length("publication_doi", doi, 255)?;
        }
        if let Some(ref doi) = self.metadata.dataset_doi {
            validate_max_length("dataset_doi", doi, 255)?;
        }
        if let Some(ref tags) = self.metadata.tags {
            validate_max_length("tags", tags, 255)?;
        }

        validate_authors(&self.metadata.authors)?;

        Ok(())
    }
}

/// Handles the create dataset command
///
/// Creates the aggregate in a transaction:
/// 1. Validates the owning user exists
/// 2. Inserts the optional `ds_metrics` record
/// 3. Inserts the `ds_meta_data` record
/// 4. Inserts the `data_sets` row (creation timestamp defaults to now)
/// 5. Inserts the metadata's authors
///
/// # Errors
///
/// - Validation errors if command parameters are invalid
/// - `UserNotFound` - The user ID doesn't exist
/// - `Database` - A database error occurred
#[tracing::instrument(skip(pool, command), fields(user_id = command.user_id))]
pub async fn handle(
    pool: PgPool,
    command: CreateDatasetCommand,
) -> Result<CreateDatasetResponse, CreateDatasetError> {
    command.validate()?;

    let user_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(command.user_id)
            .fetch_one(&pool)
            .await?;

    if !user_exists {
        return Err(CreateDatasetError::UserNotFound(command.user_id));
    }

    let mut tx = pool.begin().await?;

    let ds_metrics_id: Option<i64> = match command.metadata.metrics {
        Some(ref metrics) => {
            let id = sqlx::query_scalar(
                r#"
                INSERT INTO ds_metrics (number_of_models, number_of_features)
                VALUES ($1, $2)
                RETURNING id
                "#,
            )
            .bind(&metrics.number_of_models)
            .bind(&metrics.number_of_features)
            .fetch_one(&mut *tx)
            .await?;
            Some(id)
        },
        None => None,
    };

    let ds_meta_data_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO ds_meta_data
            (deposition_id, title, description, publication_type,
             publication_doi, dataset_doi, tags, ds_metrics_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id
        "#,
    )
    .bind(command.metadata.deposition_id)
    .bind(&command.metadata.title)
    .bind(&command.metadata.description)
    .bind(command.metadata.publication_type)
    .bind(&command.metadata.publication_doi)
    .bind(&command.metadata.dataset_doi)
    .bind(&command.metadata.tags)
    .bind(ds_metrics_id)
    .fetch_one(&mut *tx)
    .await?;

    let (id, created_at): (i64, DateTime<Utc>) = sqlx::query_as(
        r#"
        INSERT INTO data_sets (user_id, ds_meta_data_id)
        VALUES ($1, $2)
        RETURNING id, created_at
        "#,
    )
    .bind(command.user_id)
    .bind(ds_meta_data_id)
    .fetch_one(&mut *tx)
    .await?;

    for author in &command.metadata.authors {
        sqlx::query(
            r#"
            INSERT INTO authors (name, affiliation, orcid, ds_meta_data_id)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&author.name)
        .bind(&author.affiliation)
        .bind(&author.orcid)
        .bind(ds_meta_data_id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::info!(dataset_id = id, "Created dataset");

    Ok(CreateDatasetResponse {
        id,
        ds_meta_data_id,
        created_at,
    })
}
