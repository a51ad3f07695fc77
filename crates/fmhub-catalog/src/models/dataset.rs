//! Dataset aggregate records
//!
//! A dataset belongs to a user and owns exactly one metadata record, which in
//! turn owns its authors and an optional metrics record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::publication_type::PublicationType;

/// A stored dataset (aggregate root)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Dataset {
    pub id: i64,
    pub user_id: i64,
    pub ds_meta_data_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Bibliographic metadata for a dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DatasetMetadata {
    pub id: i64,
    /// External deposition reference (e.g. a Zenodo deposition id)
    pub deposition_id: Option<i64>,
    pub title: String,
    pub description: String,
    pub publication_type: PublicationType,
    pub publication_doi: Option<String>,
    pub dataset_doi: Option<String>,
    /// Comma-delimited tag string; `None` and `""` both mean "no tags"
    pub tags: Option<String>,
    pub ds_metrics_id: Option<i64>,
}

impl DatasetMetadata {
    /// Tags as a sequence. Empty or absent tag strings yield an empty vec;
    /// otherwise the stored string is split on commas verbatim.
    pub fn tag_list(&self) -> Vec<String> {
        match self.tags.as_deref() {
            None | Some("") => Vec::new(),
            Some(tags) => tags.split(',').map(str::to_string).collect(),
        }
    }
}

/// Aggregate counters for a dataset, stored as text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DatasetMetrics {
    pub id: i64,
    pub number_of_models: Option<String>,
    pub number_of_features: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata_with_tags(tags: Option<&str>) -> DatasetMetadata {
        DatasetMetadata {
            id: 1,
            deposition_id: None,
            title: "Test dataset".to_string(),
            description: "A dataset".to_string(),
            publication_type: PublicationType::None,
            publication_doi: None,
            dataset_doi: None,
            tags: tags.map(str::to_string),
            ds_metrics_id: None,
        }
    }

    #[test]
    fn test_tag_list_absent() {
        assert!(metadata_with_tags(None).tag_list().is_empty());
    }

    #[test]
    fn test_tag_list_empty_string() {
        assert!(metadata_with_tags(Some("")).tag_list().is_empty());
    }

    #[test]
    fn test_tag_list_splits_on_commas() {
        assert_eq!(
            metadata_with_tags(Some("spl,uvl,benchmark")).tag_list(),
            vec!["spl", "uvl", "benchmark"]
        );
    }

    #[test]
    fn test_tag_list_preserves_whitespace_verbatim() {
        assert_eq!(metadata_with_tags(Some("a, b")).tag_list(), vec!["a", " b"]);
    }
}
