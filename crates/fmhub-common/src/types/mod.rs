//! Common types used across fmhub

use crate::error::FmhubError;
use serde::{Deserialize, Serialize};

/// A validated ORCID identifier (e.g., "0000-0002-1825-0097").
///
/// ORCID iDs are 16 characters in four hyphen-separated groups; the final
/// character is a checksum digit (ISO 7064 mod 11-2) and may be `X`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Orcid(String);

impl Orcid {
    /// Parse and validate an ORCID identifier.
    ///
    /// Checks the `XXXX-XXXX-XXXX-XXXX` layout and the ISO 7064 mod 11-2
    /// check digit.
    pub fn parse(value: &str) -> Result<Self, FmhubError> {
        let invalid = || FmhubError::InvalidOrcid(value.to_string());

        let groups: Vec<&str> = value.split('-').collect();
        if groups.len() != 4 || groups.iter().any(|g| g.len() != 4) {
            return Err(invalid());
        }

        let chars: Vec<char> = groups.concat().chars().collect();
        if chars.len() != 16 {
            return Err(invalid());
        }

        // All positions are digits except the final check character,
        // which may be 'X' (value 10).
        let mut total: u32 = 0;
        for c in &chars[..15] {
            let digit = c.to_digit(10).ok_or_else(invalid)?;
            total = (total + digit) * 2;
        }

        let check = match chars[15] {
            'X' => 10,
            c => c.to_digit(10).ok_or_else(invalid)?,
        };

        let remainder = total % 11;
        let expected = (12 - remainder) % 11;
        if check != expected {
            return Err(invalid());
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Orcid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Orcid {
    type Err = FmhubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Pagination parameters for list queries
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pagination {
    /// Maximum number of items to return
    pub limit: i64,

    /// Number of items to skip
    pub offset: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: 50,
            offset: 0,
        }
    }
}

impl Pagination {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self { limit, offset }
    }

    /// Pagination for a zero-based page with a given page size
    pub fn page(page: i64, page_size: i64) -> Self {
        Self {
            limit: page_size,
            offset: page * page_size,
        }
    }
}
