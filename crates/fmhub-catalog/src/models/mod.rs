//! Catalog record types
//!
//! Plain typed rows for the persisted schema. Relationships are explicit
//! foreign keys; aggregate ownership (and cascade deletion) lives in the
//! feature commands, not in the records themselves.

pub mod author;
pub mod dataset;
pub mod feature_model;
pub mod file;
pub mod publication_type;

pub use author::{Author, AuthorOwner};
pub use dataset::{Dataset, DatasetMetadata, DatasetMetrics};
pub use feature_model::{FeatureModel, FeatureModelMetadata, FeatureModelMetrics};
pub use file::ModelFile;
pub use publication_type::PublicationType;
