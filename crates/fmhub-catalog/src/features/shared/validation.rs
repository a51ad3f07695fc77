//! Shared validation utilities
//!
//! Common field-level checks used by the catalog commands. The storage layer
//! enforces nullability; these validators reject obviously malformed input
//! before a transaction is opened.

use fmhub_common::types::Orcid;
use thiserror::Error;

/// Errors produced by field-level validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldValidationError {
    #[error("{field} is required and cannot be empty")]
    Required { field: &'static str },

    #[error("{field} must be between 1 and {max_length} characters")]
    TooLong {
        field: &'static str,
        max_length: usize,
    },
}

/// Errors produced when validating author inputs
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthorValidationError {
    #[error("Author name is required and cannot be empty")]
    NameRequired,

    #[error("Author name must be between 1 and {max_length} characters")]
    NameTooLong { max_length: usize },

    #[error("Invalid ORCID identifier: {0}")]
    InvalidOrcid(String),
}

/// Maximum length for short text columns (titles, filenames, DOIs, names)
pub const MAX_TEXT_LENGTH: usize = 255;

/// Validate that a required text field is present and within bounds
pub fn validate_required(field: &'static str, value: &str) -> Result<(), FieldValidationError> {
    if value.trim().is_empty() {
        return Err(FieldValidationError::Required { field });
    }
    validate_max_length(field, value, MAX_TEXT_LENGTH)
}

/// Validate the length of a field without requiring presence
pub fn validate_max_length(
    field: &'static str,
    value: &str,
    max_length: usize,
) -> Result<(), FieldValidationError> {
    if value.len() > max_length {
        return Err(FieldValidationError::TooLong { field, max_length });
    }
    Ok(())
}

/// An author attached to a metadata record at creation time
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AuthorInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orcid: Option<String>,
}

/// Validate a list of author inputs
///
/// Names must be present; ORCID identifiers, when given, must pass format
/// and check-digit validation.
pub fn validate_authors(authors: &[AuthorInput]) -> Result<(), AuthorValidationError> {
    for author in authors {
        if author.name.trim().is_empty() {
            return Err(AuthorValidationError::NameRequired);
        }
        if author.name.len() > MAX_TEXT_LENGTH {
            return Err(AuthorValidationError::NameTooLong {
                max_length: MAX_TEXT_LENGTH,
            });
        }
        if let Some(ref orcid) = author.orcid {
            Orcid::parse(orcid)
                .map_err(|_| AuthorValidationError::InvalidOrcid(orcid.clone()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_rejects_empty() {
        assert!(matches!(
            validate_required("title", ""),
            Err(FieldValidationError::Required { field: "title" })
        ));
        assert!(matches!(
            validate_required("title", "   "),
            Err(FieldValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_required_rejects_too_long() {
        let long = "x".repeat(MAX_TEXT_LENGTH + 1);
        assert!(matches!(
            validate_required("title", &long),
            Err(FieldValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_validate_required_accepts_normal_text() {
        assert!(validate_required("title", "A feature model dataset").is_ok());
    }

    #[test]
    fn test_validate_authors_orcid() {
        let authors = vec![AuthorInput {
            name: "Josiah Carberry".to_string(),
            affiliation: Some("Brown University".to_string()),
            orcid: Some("0000-0002-1825-0097".to_string()),
        }];
        assert!(validate_authors(&authors).is_ok());

        let authors = vec![AuthorInput {
            name: "Josiah Carberry".to_string(),
            affiliation: None,
            orcid: Some("not-an-orcid".to_string()),
        }];
        assert!(matches!(
            validate_authors(&authors),
            Err(AuthorValidationError::InvalidOrcid(_))
        ));
    }

    #[test]
    fn test_validate_authors_requires_name() {
        let authors = vec![AuthorInput {
            name: " ".to_string(),
            affiliation: None,
            orcid: None,
        }];
        assert!(matches!(
            validate_authors(&authors),
            Err(AuthorValidationError::NameRequired)
        ));
    }
}
