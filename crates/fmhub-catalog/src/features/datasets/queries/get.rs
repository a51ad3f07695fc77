//! Get dataset query
//!
//! Loads a dataset together with its metadata, authors and the UVL filenames
//! of its feature models, flattened into the catalog's summary shape.

use chrono::{DateTime, Utc};
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::models::{Author, Dataset, DatasetMetadata};

/// Query to fetch a single dataset summary by ID
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetDatasetQuery {
    pub id: i64,
}

/// An author as it appears in a dataset summary
///
/// Absent affiliation and ORCID serialize as null; consuming layers bind to
/// all three keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorSummary {
    pub name: String,
    pub affiliation: Option<String>,
    pub orcid: Option<String>,
}

/// Flattened dataset summary
///
/// `publication_type` is the human-readable display name ("Journal Article"),
/// not the stored symbolic value. `uvl_filenames` lists the UVL filenames of
/// the dataset's feature models; models without metadata contribute nothing.
/// Consuming layers bind to these key names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub description: String,
    pub authors: Vec<AuthorSummary>,
    pub uvl_filenames: Vec<String>,
    pub publication_type: String,
    pub publication_doi: Option<String>,
    pub tags: Vec<String>,
}

/// Errors that can occur when fetching a dataset
#[derive(Debug, thiserror::Error)]
pub enum GetDatasetError {
    #[error("Dataset with ID '{0}' not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<DatasetSummary, GetDatasetError>> for GetDatasetQuery {}

impl crate::cqrs::middleware::Query for GetDatasetQuery {}

/// Assemble a summary from the loaded aggregate pieces
pub(crate) fn summarize(
    dataset: &Dataset,
    metadata: &DatasetMetadata,
    authors: Vec<AuthorSummary>,
    uvl_filenames: Vec<String>,
) -> DatasetSummary {
    DatasetSummary {
        id: dataset.id,
        created_at: dataset.created_at,
        title: metadata.title.clone(),
        description: metadata.description.clone(),
        authors,
        uvl_filenames,
        publication_type: metadata.publication_type.display_name(),
        publication_doi: metadata.publication_doi.clone(),
        tags: metadata.tag_list(),
    }
}

/// Handles the get dataset query
#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: GetDatasetQuery,
) -> Result<DatasetSummary, GetDatasetError> {
    let dataset: Dataset = sqlx::query_as(
        "SELECT id, user_id, ds_meta_data_id, created_at FROM data_sets WHERE id = $1",
    )
    .bind(query.id)
    .fetch_optional(&pool)
    .await?
    .ok_or(GetDatasetError::NotFound(query.id))?;

    let metadata: DatasetMetadata = sqlx::query_as(
        r#"
        SELECT id, deposition_id, title, description, publication_type,
               publication_doi, dataset_doi, tags, ds_metrics_id
        FROM ds_meta_data
        WHERE id = $1
        "#,
    )
    .bind(dataset.ds_meta_data_id)
    .fetch_one(&pool)
    .await?;

    let authors: Vec<Author> = sqlx::query_as(
        r#"
        SELECT id, name, affiliation, orcid, ds_meta_data_id, fm_meta_data_id
        FROM authors
        WHERE ds_meta_data_id = $1
        ORDER BY id
        "#,
    )
    .bind(dataset.ds_meta_data_id)
    .fetch_all(&pool)
    .await?;
    let authors = authors
        .into_iter()
        .map(|author| AuthorSummary {
            name: author.name,
            affiliation: author.affiliation,
            orcid: author.orcid,
        })
        .collect();

    let uvl_filenames: Vec<String> = sqlx::query_scalar(
        r#"
        SELECT m.uvl_filename
        FROM feature_models fm
        JOIN fm_meta_data m ON m.id = fm.fm_meta_data_id
        WHERE fm.data_set_id = $1
        ORDER BY fm.id
        "#,
    )
    .bind(query.id)
    .fetch_all(&pool)
    .await?;

    Ok(summarize(&dataset, &metadata, authors, uvl_filenames))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PublicationType;

    fn sample_dataset() -> Dataset {
        Dataset {
            id: 7,
            user_id: 1,
            ds_meta_data_id: 3,
            created_at: "2024-05-01T12:00:00Z".parse().unwrap(),
        }
    }

    fn sample_metadata() -> DatasetMetadata {
        DatasetMetadata {
            id: 3,
            deposition_id: None,
            title: "Linux kernel models".to_string(),
            description: "Feature models from Kconfig".to_string(),
            publication_type: PublicationType::JournalArticle,
            publication_doi: Some("10.1234/x".to_string()),
            dataset_doi: None,
            tags: Some("kernel,kconfig".to_string()),
            ds_metrics_id: None,
        }
    }

    #[test]
    fn test_summarize_uses_display_name() {
        let summary = summarize(&sample_dataset(), &sample_metadata(), vec![], vec![]);
        assert_eq!(summary.publication_type, "Journal Article");
    }

    #[test]
    fn test_summarize_splits_tags() {
        let summary = summarize(&sample_dataset(), &sample_metadata(), vec![], vec![]);
        assert_eq!(summary.tags, vec!["kernel", "kconfig"]);
    }

    #[test]
    fn test_summary_serializes_with_contract_keys() {
        let authors = vec![AuthorSummary {
            name: "Ada".to_string(),
            affiliation: None,
            orcid: None,
        }];
        let summary = summarize(&sample_dataset(), &sample_metadata(), authors, vec![]);
        let value = serde_json::to_value(&summary).unwrap();
        let object = value.as_object().unwrap();
        for key in [
            "id",
            "created_at",
            "title",
            "description",
            "authors",
            "uvl_filenames",
            "publication_type",
            "publication_doi",
            "tags",
        ] {
            assert!(object.contains_key(key), "missing key {key}");
        }

        // author entries always carry all three keys, null when unset
        let author = value["authors"][0].as_object().unwrap();
        for key in ["name", "orcid", "affiliation"] {
            assert!(author.contains_key(key), "missing author key {key}");
        }
        assert!(author["orcid"].is_null());
        assert!(author["affiliation"].is_null());
    }

    #[test]
    fn test_summarize_empty_tags() {
        let mut metadata = sample_metadata();
        metadata.tags = None;
        let summary = summarize(&sample_dataset(), &metadata, vec![], vec![]);
        assert!(summary.tags.is_empty());
    }

    #[sqlx::test]
    async fn test_handle_returns_full_summary(pool: PgPool) -> sqlx::Result<()> {
        use crate::features::datasets::commands::create::{
            CreateDatasetCommand, DatasetMetadataInput,
        };
        use crate::features::feature_models::commands::add::{
            AddFeatureModelCommand, FileInput, FmMetadataInput,
        };
        use crate::features::shared::validation::AuthorInput;

        let user_id: i64 =
            sqlx::query_scalar("INSERT INTO users (email) VALUES ($1) RETURNING id")
                .bind("owner@example.org")
                .fetch_one(&pool)
                .await?;

        let created = crate::features::datasets::commands::create::handle(
            pool.clone(),
            CreateDatasetCommand {
                user_id,
                metadata: DatasetMetadataInput {
                    title: "Linux kernel models".to_string(),
                    description: "Feature models from Kconfig".to_string(),
                    publication_type: PublicationType::JournalArticle,
                    publication_doi: Some("10.1234/x".to_string()),
                    dataset_doi: None,
                    deposition_id: None,
                    tags: Some("kernel,kconfig".to_string()),
                    metrics: None,
                    authors: vec![AuthorInput {
                        name: "Ada".to_string(),
                        affiliation: Some("ENIAC".to_string()),
                        orcid: None,
                    }],
                },
            },
        )
        .await
        .unwrap();

        crate::features::feature_models::commands::add::handle(
            pool.clone(),
            AddFeatureModelCommand {
                data_set_id: created.id,
                metadata: Some(FmMetadataInput {
                    uvl_filename: "kernel.uvl".to_string(),
                    title: "Kernel".to_string(),
                    description: "Kernel model".to_string(),
                    publication_type: PublicationType::Other,
                    publication_doi: None,
                    tags: None,
                    uvl_version: None,
                    metrics: None,
                    authors: vec![],
                }),
                files: vec![],
            },
        )
        .await
        .unwrap();

        // a model without metadata contributes no filename
        crate::features::feature_models::commands::add::handle(
            pool.clone(),
            AddFeatureModelCommand {
                data_set_id: created.id,
                metadata: None,
                files: vec![FileInput {
                    name: "raw.uvl".to_string(),
                    checksum: "deadbeef".to_string(),
                    size: 10,
                }],
            },
        )
        .await
        .unwrap();

        let summary = handle(pool.clone(), GetDatasetQuery { id: created.id })
            .await
            .unwrap();

        assert_eq!(summary.title, "Linux kernel models");
        assert_eq!(summary.publication_type, "Journal Article");
        assert_eq!(summary.tags, vec!["kernel", "kconfig"]);
        assert_eq!(summary.uvl_filenames, vec!["kernel.uvl"]);
        assert_eq!(summary.authors.len(), 1);
        assert_eq!(summary.authors[0].name, "Ada");
        Ok(())
    }

    #[sqlx::test]
    async fn test_handle_not_found(pool: PgPool) -> sqlx::Result<()> {
        let result = handle(pool.clone(), GetDatasetQuery { id: 42 }).await;
        assert!(matches!(result, Err(GetDatasetError::NotFound(42))));
        Ok(())
    }
}
