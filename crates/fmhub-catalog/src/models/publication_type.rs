//! Publication type classification
//!
//! Closed set of publication categories used to tag dataset and feature-model
//! metadata. Stored in the database by symbolic name (e.g. `JOURNAL_ARTICLE`).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Publication category for a metadata record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PublicationType {
    None,
    AnnotationCollection,
    Book,
    BookSection,
    ConferencePaper,
    DataManagementPlan,
    JournalArticle,
    Patent,
    Preprint,
    ProjectDeliverable,
    ProjectMilestone,
    Proposal,
    Report,
    SoftwareDocumentation,
    TaxonomicTreatment,
    TechnicalNote,
    Thesis,
    WorkingPaper,
    Other,
}

/// Error returned when a stored publication type name is not recognized.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown publication type: {0}")]
pub struct ParsePublicationTypeError(String);

impl PublicationType {
    pub const ALL: [PublicationType; 19] = [
        PublicationType::None,
        PublicationType::AnnotationCollection,
        PublicationType::Book,
        PublicationType::BookSection,
        PublicationType::ConferencePaper,
        PublicationType::DataManagementPlan,
        PublicationType::JournalArticle,
        PublicationType::Patent,
        PublicationType::Preprint,
        PublicationType::ProjectDeliverable,
        PublicationType::ProjectMilestone,
        PublicationType::Proposal,
        PublicationType::Report,
        PublicationType::SoftwareDocumentation,
        PublicationType::TaxonomicTreatment,
        PublicationType::TechnicalNote,
        PublicationType::Thesis,
        PublicationType::WorkingPaper,
        PublicationType::Other,
    ];

    /// Symbolic name used as the storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PublicationType::None => "NONE",
            PublicationType::AnnotationCollection => "ANNOTATION_COLLECTION",
            PublicationType::Book => "BOOK",
            PublicationType::BookSection => "BOOK_SECTION",
            PublicationType::ConferencePaper => "CONFERENCE_PAPER",
            PublicationType::DataManagementPlan => "DATA_MANAGEMENT_PLAN",
            PublicationType::JournalArticle => "JOURNAL_ARTICLE",
            PublicationType::Patent => "PATENT",
            PublicationType::Preprint => "PREPRINT",
            PublicationType::ProjectDeliverable => "PROJECT_DELIVERABLE",
            PublicationType::ProjectMilestone => "PROJECT_MILESTONE",
            PublicationType::Proposal => "PROPOSAL",
            PublicationType::Report => "REPORT",
            PublicationType::SoftwareDocumentation => "SOFTWARE_DOCUMENTATION",
            PublicationType::TaxonomicTreatment => "TAXONOMIC_TREATMENT",
            PublicationType::TechnicalNote => "TECHNICAL_NOTE",
            PublicationType::Thesis => "THESIS",
            PublicationType::WorkingPaper => "WORKING_PAPER",
            PublicationType::Other => "OTHER",
        }
    }

    /// Human-readable name: symbolic name with underscores replaced by
    /// spaces and each word capitalized (e.g. "Journal Article").
    pub fn display_name(&self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => {
                        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                    },
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Upload-type slug used by the Zenodo deposition API.
    pub fn zenodo_value(&self) -> &'static str {
        match self {
            PublicationType::None => "none",
            PublicationType::AnnotationCollection => "annotationcollection",
            PublicationType::Book => "book",
            PublicationType::BookSection => "section",
            PublicationType::ConferencePaper => "conferencepaper",
            PublicationType::DataManagementPlan => "datamanagementplan",
            PublicationType::JournalArticle => "article",
            PublicationType::Patent => "patent",
            PublicationType::Preprint => "preprint",
            PublicationType::ProjectDeliverable => "deliverable",
            PublicationType::ProjectMilestone => "milestone",
            PublicationType::Proposal => "proposal",
            PublicationType::Report => "report",
            PublicationType::SoftwareDocumentation => "softwaredocumentation",
            PublicationType::TaxonomicTreatment => "taxonomictreatment",
            PublicationType::TechnicalNote => "technicalnote",
            PublicationType::Thesis => "thesis",
            PublicationType::WorkingPaper => "workingpaper",
            PublicationType::Other => "other",
        }
    }
}

impl std::fmt::Display for PublicationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PublicationType {
    type Err = ParsePublicationTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PublicationType::ALL
            .iter()
            .find(|p| p.as_str() == s)
            .copied()
            .ok_or_else(|| ParsePublicationTypeError(s.to_string()))
    }
}

// Stored as TEXT; map to and from the symbolic name at the driver boundary.

impl sqlx::Type<sqlx::Postgres> for PublicationType {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <&str as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <&str as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

impl sqlx::Encode<'_, sqlx::Postgres> for PublicationType {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Postgres> for PublicationType {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let name = <&str as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(name.parse::<PublicationType>()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_title_cases_words() {
        assert_eq!(PublicationType::JournalArticle.display_name(), "Journal Article");
        assert_eq!(PublicationType::DataManagementPlan.display_name(), "Data Management Plan");
        assert_eq!(PublicationType::None.display_name(), "None");
        assert_eq!(PublicationType::Other.display_name(), "Other");
    }

    #[test]
    fn test_round_trip_all_symbolic_names() {
        for p in PublicationType::ALL {
            assert_eq!(p.as_str().parse::<PublicationType>(), Ok(p));
        }
    }

    #[test]
    fn test_parse_unknown_name() {
        assert!("BLOG_POST".parse::<PublicationType>().is_err());
        // storage names are case-sensitive
        assert!("journal_article".parse::<PublicationType>().is_err());
    }

    #[test]
    fn test_zenodo_values_match_upload_types() {
        assert_eq!(PublicationType::JournalArticle.zenodo_value(), "article");
        assert_eq!(PublicationType::BookSection.zenodo_value(), "section");
        assert_eq!(PublicationType::ProjectDeliverable.zenodo_value(), "deliverable");
    }

    #[test]
    fn test_serde_uses_symbolic_names() {
        let json = serde_json::to_string(&PublicationType::JournalArticle).unwrap();
        assert_eq!(json, "\"JOURNAL_ARTICLE\"");
        let back: PublicationType = serde_json::from_str("\"WORKING_PAPER\"").unwrap();
        assert_eq!(back, PublicationType::WorkingPaper);
    }
}
