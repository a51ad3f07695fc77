//! Add feature model command
//!
//! Attaches a feature model to an existing dataset, inserting its optional
//! metadata (with metrics and authors) and its stored files in one
//! transaction.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::shared::validation::{
    validate_authors, validate_max_length, validate_required, AuthorInput, AuthorValidationError,
    FieldValidationError,
};
use crate::models::PublicationType;

/// Solver compatibility notes supplied with feature model metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FmMetricsInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_solver: Option<String>,
}

/// Metadata supplied when adding a feature model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FmMetadataInput {
    pub uvl_filename: String,
    pub title: String,
    pub description: String,
    pub publication_type: PublicationType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_doi: Option<String>,
    /// Comma-delimited tag string, stored verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uvl_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<FmMetricsInput>,
    pub authors: Vec<AuthorInput>,
}

/// A stored file attached to the feature model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileInput {
    pub name: String,
    pub checksum: String,
    pub size: i64,
}

/// Command to add a feature model to a dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddFeatureModelCommand {
    pub data_set_id: i64,
    /// Metadata is optional; a model may be registered before its
    /// bibliographic record exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<FmMetadataInput>,
    #[serde(default)]
    pub files: Vec<FileInput>,
}

/// Response from adding a feature model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddFeatureModelResponse {
    pub id: i64,
    pub fm_meta_data_id: Option<i64>,
    pub file_ids: Vec<i64>,
}

/// Errors that can occur when adding a feature model
#[derive(Debug, thiserror::Error)]
pub enum AddFeatureModelError {
    /// A metadata or file field failed validation
    #[error("Validation failed: {0}")]
    FieldValidation(#[from] FieldValidationError),
    /// An author entry failed validation
    #[error("Author validation failed: {0}")]
    AuthorValidation(#[from] AuthorValidationError),
    /// A file was given a negative size
    #[error("File '{name}' has a negative size ({size})")]
    NegativeFileSize { name: String, size: i64 },
    /// The target dataset does not exist
    #[error("Dataset with ID '{0}' not found")]
    DatasetNotFound(i64),
    /// A database error occurred
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<AddFeatureModelResponse, AddFeatureModelError>> for AddFeatureModelCommand {}

impl crate::cqrs::middleware::Command for AddFeatureModelCommand {}

impl AddFeatureModelCommand {
    /// Validates the command parameters
    ///
    /// # Errors
    ///
    /// - `FieldValidation` - A required metadata or file field is missing or
    ///   exceeds the column length
    /// - `AuthorValidation` - An author is missing a name or carries an
    ///   invalid ORCID
    /// - `NegativeFileSize` - A file declares a size below zero
    pub fn validate(&self) -> Result<(), AddFeatureModelError> {
        if let Some(ref metadata) = self.metadata {
            validate_required("uvl_filename", &metadata.uvl_filename)?;
            validate_required("title", &metadata.title)?;

            if metadata.description.trim().is_empty() {
                return Err(FieldValidationError::Required {
                    field: "description",
                }
                .into());
            }

            if let Some(ref doi) = metadata.publication_doi {
                validate_max_length("publication_doi", doi, 255)?;
            }
            if let Some(ref tags) = metadata.tags {
                validate_max_length("tags", tags, 255)?;
            }

            validate_authors(&metadata.authors)?;
        }

        for file in &self.files {
            validate_required("file name", &file.name)?;
            validate_required("file checksum", &file.checksum)?;
            if file.size < 0 {
                return Err(AddFeatureModelError::NegativeFileSize {
                    name: file.name.clone(),
                    size: file.size,
                });
            }
        }

        Ok(())
    }
}

/// Handles the add feature model command
///
/// # Errors
///
/// - Validation errors if command parameters are invalid
/// - `DatasetNotFound` - The target dataset doesn't exist
/// - `Database` - A database error occurred
#[tracing::instrument(skip(pool, command), fields(data_set_id = command.data_set_id))]
pub async fn handle(
    pool: PgPool,
    command: AddFeatureModelCommand,
) -> Result<AddFeatureModelResponse, AddFeatureModelError> {
    command.validate()?;

    let dataset_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM data_sets WHERE id = $1)")
            .bind(command.data_set_id)
            .fetch_one(&pool)
            .await?;

    if !dataset_exists {
        return Err(AddFeatureModelError::DatasetNotFound(command.data_set_id));
    }

    let mut tx = pool.begin().await?;

    let fm_meta_data_id: Option<i64> = match command.metadata {
        Some(ref metadata) => {
            let fm_metrics_id: Option<i64> = match metadata.metrics {
                Some(ref metrics) => {
                    let id = sqlx::query_scalar(
                        r#"
                        INSERT INTO fm_metrics (solver, not_solver)
                        VALUES ($1, $2)
                        RETURNING id
                        "#,
                    )
                    .bind(&metrics.solver)
                    .bind(&metrics.not_solver)
                    .fetch_one(&mut *tx)
                    .await?;
                    Some(id)
                },
                None => None,
            };

            let meta_id: i64 = sqlx::query_scalar(
                r#"
                INSERT INTO fm_meta_data
                    (uvl_filename, title, description, publication_type,
                     publication_doi, tags, uvl_version, fm_metrics_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING id
                "#,
            )
            .bind(&metadata.uvl_filename)
            .bind(&metadata.title)
            .bind(&metadata.description)
            .bind(metadata.publication_type)
            .bind(&metadata.publication_doi)
            .bind(&metadata.tags)
            .bind(&metadata.uvl_version)
            .bind(fm_metrics_id)
            .fetch_one(&mut *tx)
            .await?;

            for author in &metadata.authors {
                sqlx::query(
                    r#"
                    INSERT INTO authors (name, affiliation, orcid, fm_meta_data_id)
                    VALUES ($1, $2, $3, $4)
                    "#,
                )
                .bind(&author.name)
                .bind(&author.affiliation)
                .bind(&author.orcid)
                .bind(meta_id)
                .execute(&mut *tx)
                .await?;
            }

            Some(meta_id)
        },
        None => None,
    };

    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO feature_models (data_set_id, fm_meta_data_id)
        VALUES ($1, $2)
        RETURNING id
        "#,
    )
    .bind(command.data_set_id)
    .bind(fm_meta_data_id)
    .fetch_one(&mut *tx)
    .await?;

    let mut file_ids = Vec::with_capacity(command.files.len());
    for file in &command.files {
        let file_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO files (feature_model_id, name, checksum, size)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(&file.name)
        .bind(&file.checksum)
        .bind(file.size)
        .fetch_one(&mut *tx)
        .await?;
        file_ids.push(file_id);
    }

    tx.commit().await?;

    tracing::info!(
        feature_model_id = id,
        files = file_ids.len(),
        "Added feature model"
    );

    Ok(AddFeatureModelResponse {
        id,
        fm_meta_data_id,
        file_ids,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmhub_common::checksum::{compute_checksum, ChecksumAlgorithm};
    use std::io::Cursor;

    fn uvl_checksum(content: &[u8]) -> String {
        compute_checksum(&mut Cursor::new(content), ChecksumAlgorithm::Sha256).unwrap()
    }

    fn minimal_command() -> AddFeatureModelCommand {
        AddFeatureModelCommand {
            data_set_id: 1,
            metadata: Some(FmMetadataInput {
                uvl_filename: "busybox.uvl".to_string(),
                title: "BusyBox".to_string(),
                description: "BusyBox variability model".to_string(),
                publication_type: PublicationType::SoftwareDocumentation,
                publication_doi: None,
                tags: Some("embedded".to_string()),
                uvl_version: Some("2.0".to_string()),
                metrics: None,
                authors: vec![],
            }),
            files: vec![FileInput {
                name: "busybox.uvl".to_string(),
                checksum: uvl_checksum(b"features\n    BusyBox\n"),
                size: 4096,
            }],
        }
    }

    #[test]
    fn test_validation_success() {
        assert!(minimal_command().validate().is_ok());
    }

    #[test]
    fn test_validation_allows_missing_metadata() {
        let cmd = AddFeatureModelCommand {
            data_set_id: 1,
            metadata: None,
            files: vec![],
        };
        assert!(cmd.validate().is_ok());
    }

    #[test]
    fn test_validation_empty_uvl_filename() {
        let mut cmd = minimal_command();
        if let Some(ref mut metadata) = cmd.metadata {
            metadata.uvl_filename = String::new();
        }
        assert!(matches!(
            cmd.validate(),
            Err(AddFeatureModelError::FieldValidation(
                FieldValidationError::Required {
                    field: "uvl_filename"
                }
            ))
        ));
    }

    #[test]
    fn test_validation_negative_file_size() {
        let mut cmd = minimal_command();
        cmd.files[0].size = -1;
        assert!(matches!(
            cmd.validate(),
            Err(AddFeatureModelError::NegativeFileSize { size: -1, .. })
        ));
    }

    async fn seed_dataset(pool: &PgPool) -> i64 {
        use crate::features::datasets::commands::create::{
            CreateDatasetCommand, DatasetMetadataInput,
        };
        use crate::models::PublicationType;

        let user_id: i64 =
            sqlx::query_scalar("INSERT INTO users (email) VALUES ($1) RETURNING id")
                .bind("owner@example.org")
                .fetch_one(pool)
                .await
                .unwrap();

        crate::features::datasets::commands::create::handle(
            pool.clone(),
            CreateDatasetCommand {
                user_id,
                metadata: DatasetMetadataInput {
                    title: "Host dataset".to_string(),
                    description: "Holds models".to_string(),
                    publication_type: PublicationType::None,
                    publication_doi: None,
                    dataset_doi: None,
                    deposition_id: None,
                    tags: None,
                    metrics: None,
                    authors: vec![],
                },
            },
        )
        .await
        .unwrap()
        .id
    }

    #[sqlx::test]
    async fn test_handle_creates_model_with_metadata_and_files(
        pool: PgPool,
    ) -> sqlx::Result<()> {
        let data_set_id = seed_dataset(&pool).await;

        let mut cmd = minimal_command();
        cmd.data_set_id = data_set_id;
        let response = handle(pool.clone(), cmd).await.unwrap();

        assert!(response.fm_meta_data_id.is_some());
        assert_eq!(response.file_ids.len(), 1);

        let uvl_filename: String =
            sqlx::query_scalar("SELECT uvl_filename FROM fm_meta_data WHERE id = $1")
                .bind(response.fm_meta_data_id)
                .fetch_one(&pool)
                .await?;
        assert_eq!(uvl_filename, "busybox.uvl");

        let file_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM files WHERE feature_model_id = $1")
                .bind(response.id)
                .fetch_one(&pool)
                .await?;
        assert_eq!(file_count, 1);
        Ok(())
    }

    #[sqlx::test]
    async fn test_handle_dataset_not_found(pool: PgPool) -> sqlx::Result<()> {
        let result = handle(pool.clone(), minimal_command()).await;
        assert!(matches!(
            result,
            Err(AddFeatureModelError::DatasetNotFound(1))
        ));
        Ok(())
    }
}
