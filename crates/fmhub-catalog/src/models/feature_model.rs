//! Feature model records
//!
//! A feature model belongs to exactly one dataset and optionally owns a
//! metadata record (with its authors and an optional metrics record) plus
//! zero-or-more stored files.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::publication_type::PublicationType;

/// A stored feature model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FeatureModel {
    pub id: i64,
    pub data_set_id: i64,
    pub fm_meta_data_id: Option<i64>,
}

/// Bibliographic metadata for a single feature model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FeatureModelMetadata {
    pub id: i64,
    /// Name of the UVL source file this model was built from
    pub uvl_filename: String,
    pub title: String,
    pub description: String,
    pub publication_type: PublicationType,
    pub publication_doi: Option<String>,
    /// Comma-delimited tag string, same policy as dataset metadata
    pub tags: Option<String>,
    pub uvl_version: Option<String>,
    pub fm_metrics_id: Option<i64>,
}

impl FeatureModelMetadata {
    /// Tags as a sequence; empty or absent strings yield an empty vec.
    pub fn tag_list(&self) -> Vec<String> {
        match self.tags.as_deref() {
            None | Some("") => Vec::new(),
            Some(tags) => tags.split(',').map(str::to_string).collect(),
        }
    }
}

/// Solver compatibility notes for a feature model, free text.
///
/// Unlike dataset metrics, these rows are not removed by the aggregate
/// delete commands and can outlive the metadata that referenced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FeatureModelMetrics {
    pub id: i64,
    pub solver: Option<String>,
    pub not_solver: Option<String>,
}
