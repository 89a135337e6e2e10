//! Field registry: the canonical list of résumé form fields.
//!
//! Registry order is the order fields appear on the form and the order
//! missing fields are reported in.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FullName,
    JobTitle,
    Email,
    Phone,
    Location,
    Portfolio,
    Skills,
    Experience,
    JobDescription,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::FullName,
        Field::JobTitle,
        Field::Email,
        Field::Phone,
        Field::Location,
        Field::Portfolio,
        Field::Skills,
        Field::Experience,
        Field::JobDescription,
    ];

    /// The key used in persisted drafts, request payloads and form element ids.
    pub fn key(self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::JobTitle => "jobTitle",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Location => "location",
            Field::Portfolio => "portfolio",
            Field::Skills => "skills",
            Field::Experience => "experience",
            Field::JobDescription => "jobDescription",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::FullName => "Full Name",
            Field::JobTitle => "Job Title",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::Location => "Location",
            Field::Portfolio => "Portfolio / Website",
            Field::Skills => "Skills",
            Field::Experience => "Experience",
            Field::JobDescription => "Job Description",
        }
    }

    pub fn is_required(self) -> bool {
        matches!(
            self,
            Field::FullName
                | Field::JobTitle
                | Field::Skills
                | Field::Experience
                | Field::JobDescription
        )
    }

    /// Multi-line fields are rendered as text areas with a character counter.
    pub fn is_multiline(self) -> bool {
        matches!(self, Field::Experience | Field::JobDescription)
    }
}

pub fn required_fields() -> impl Iterator<Item = Field> {
    Field::ALL.into_iter().filter(|f| f.is_required())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_set() {
        let required: Vec<_> = required_fields().map(Field::key).collect();
        assert_eq!(
            required,
            vec!["fullName", "jobTitle", "skills", "experience", "jobDescription"]
        );
    }

    #[test]
    fn test_optional_set() {
        let optional: Vec<_> = Field::ALL
            .into_iter()
            .filter(|f| !f.is_required())
            .map(Field::key)
            .collect();
        assert_eq!(optional, vec!["email", "phone", "location", "portfolio"]);
    }

    #[test]
    fn test_serde_name_matches_key() {
        let json = serde_json::to_string(&Field::JobDescription).unwrap();
        assert_eq!(json, "\"jobDescription\"");
    }
}
