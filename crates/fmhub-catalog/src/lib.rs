//! Feature model catalog
//!
//! Persistent catalog for research datasets of feature models: datasets with
//! bibliographic metadata, authors, per-model metadata and metrics, and the
//! stored files behind each model.
//!
//! # Architecture
//!
//! The catalog follows a **CQRS (Command Query Responsibility Segregation)**
//! layout:
//!
//! - **Commands** (Write Operations): create/delete a dataset aggregate,
//!   add/delete a feature model. Writes run in transactions and perform the
//!   aggregate cascades explicitly.
//! - **Queries** (Read Operations): dataset summaries and listings, feature
//!   model details.
//!
//! Operations are dispatched through a mediator; see [`cqrs::build_mediator`].
//!
//! # Example
//!
//! ```no_run
//! use fmhub_catalog::{config::Config, cqrs, db};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let pool = db::connect(&config.database).await?;
//!     db::run_migrations(&pool).await?;
//!     let _mediator = cqrs::build_mediator(pool);
//!     Ok(())
//! }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod config;
pub mod cqrs;
pub mod db;
pub mod features;
pub mod models;

// Re-export commonly used types
pub use db::{DbError, DbResult};
pub use models::{Dataset, DatasetMetadata, FeatureModel, ModelFile, PublicationType};
