//! Stored file records

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

const KIB: i64 = 1024;
const MIB: i64 = KIB * KIB;
const GIB: i64 = MIB * KIB;

/// A file attached to a feature model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ModelFile {
    pub id: i64,
    pub feature_model_id: i64,
    pub name: String,
    /// Hex-encoded content digest, computed at upload time
    pub checksum: String,
    /// Size in bytes; non-negative, enforced at the write path and by the
    /// schema
    pub size: i64,
}

impl ModelFile {
    /// Human-readable size using binary (1024-based) units.
    ///
    /// The largest unit keeping the displayed value below 1024 is chosen
    /// (strict thresholds: exactly 1024 bytes formats as KB). Bytes render as
    /// an exact integer; KB/MB/GB round to two decimals with at least one
    /// decimal shown ("1.0 KB", "1.5 KB").
    pub fn formatted_size(&self) -> String {
        format_size(self.size)
    }
}

/// See [`ModelFile::formatted_size`].
pub fn format_size(size: i64) -> String {
    if size < KIB {
        format!("{} bytes", size)
    } else if size < MIB {
        format!("{} KB", round2(size as f64 / KIB as f64))
    } else if size < GIB {
        format!("{} MB", round2(size as f64 / MIB as f64))
    } else {
        format!("{} GB", round2(size as f64 / GIB as f64))
    }
}

// Two-decimal rounding without trailing noise: "1.00" -> "1.0",
// "1.50" -> "1.5", "1.25" -> "1.25".
fn round2(value: f64) -> String {
    let rendered = format!("{:.2}", value);
    let trimmed = rendered.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{}0", trimmed)
    } else {
        trimmed.to_string()
    }
}
