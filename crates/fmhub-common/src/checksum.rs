//! Checksum utilities for verifying uploaded model files
//!
//! Every stored file carries a checksum; this module computes and verifies
//! them over readers or filesystem paths.

use crate::error::{FmhubError, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};
use std::io::Read;
use std::path::Path;

/// Checksum algorithm for file integrity verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChecksumAlgorithm {
    #[default]
    Sha256,
    Sha512,
}

impl std::fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChecksumAlgorithm::Sha256 => write!(f, "sha256"),
            ChecksumAlgorithm::Sha512 => write!(f, "sha512"),
        }
    }
}

/// Compute a hex-encoded checksum for a file
pub fn compute_file_checksum(
    path: impl AsRef<Path>,
    algorithm: ChecksumAlgorithm,
) -> Result<String> {
    let mut file = std::fs::File::open(path)?;
    compute_checksum(&mut file, algorithm)
}

/// Compute a hex-encoded checksum for any readable source
pub fn compute_checksum<R: Read>(reader: &mut R, algorithm: ChecksumAlgorithm) -> Result<String> {
    match algorithm {
        ChecksumAlgorithm::Sha256 => digest_reader::<Sha256, R>(reader),
        ChecksumAlgorithm::Sha512 => digest_reader::<Sha512, R>(reader),
    }
}

fn digest_reader<D: Digest, R: Read>(reader: &mut R) -> Result<String> {
    let mut hasher = D::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Verify a file against an expected checksum
///
/// Returns `Ok(())` when the checksums match and `ChecksumMismatch` when they
/// do not, so callers can surface both digests.
pub fn verify_file_checksum(
    path: impl AsRef<Path>,
    expected: &str,
    algorithm: ChecksumAlgorithm,
) -> Result<()> {
    let actual = compute_file_checksum(path, algorithm)?;
    if actual == expected {
        Ok(())
    } else {
        Err(FmhubError::ChecksumMismatch {
            expected: expected.to_string(),
            actual,
        })
    }
}
