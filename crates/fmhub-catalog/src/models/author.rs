//! Author records
//!
//! An author row belongs to exactly one metadata record: either a dataset's
//! or a feature model's. The database stores this as two nullable foreign
//! keys constrained to exactly one non-null; in Rust the owner is a tagged
//! union so an author can never point to neither or both.

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::Row;

/// The metadata record an author row is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum AuthorOwner {
    /// Attached to a `ds_meta_data` row
    DatasetMetadata(i64),
    /// Attached to an `fm_meta_data` row
    FeatureModelMetadata(i64),
}

impl AuthorOwner {
    /// Value for the `ds_meta_data_id` column
    pub fn ds_meta_data_id(&self) -> Option<i64> {
        match self {
            AuthorOwner::DatasetMetadata(id) => Some(*id),
            AuthorOwner::FeatureModelMetadata(_) => None,
        }
    }

    /// Value for the `fm_meta_data_id` column
    pub fn fm_meta_data_id(&self) -> Option<i64> {
        match self {
            AuthorOwner::DatasetMetadata(_) => None,
            AuthorOwner::FeatureModelMetadata(id) => Some(*id),
        }
    }
}

/// A stored author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub affiliation: Option<String>,
    pub orcid: Option<String>,
    pub owner: AuthorOwner,
}

impl sqlx::FromRow<'_, PgRow> for Author {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let ds_meta_data_id: Option<i64> = row.try_get("ds_meta_data_id")?;
        let fm_meta_data_id: Option<i64> = row.try_get("fm_meta_data_id")?;

        let owner = match (ds_meta_data_id, fm_meta_data_id) {
            (Some(id), None) => AuthorOwner::DatasetMetadata(id),
            (None, Some(id)) => AuthorOwner::FeatureModelMetadata(id),
            _ => {
                return Err(sqlx::Error::ColumnDecode {
                    index: "ds_meta_data_id".to_string(),
                    source: "author row must reference exactly one metadata record".into(),
                })
            },
        };

        Ok(Author {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            affiliation: row.try_get("affiliation")?,
            orcid: row.try_get("orcid")?,
            owner,
        })
    }
}
