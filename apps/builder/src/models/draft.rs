use serde::{Deserialize, Deserializer, Serialize};

use crate::fields::Field;

/// In-progress form content, one raw string per registry field.
///
/// Serializes with every key present (empty strings included) so the
/// persisted draft always carries the full field set. Missing keys are
/// tolerated on the way in, and a `null` value reads as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormDraft {
    #[serde(deserialize_with = "null_as_empty")]
    pub full_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub job_title: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub location: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub portfolio: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub skills: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub experience: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub job_description: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl FormDraft {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FullName => &self.full_name,
            Field::JobTitle => &self.job_title,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Location => &self.location,
            Field::Portfolio => &self.portfolio,
            Field::Skills => &self.skills,
            Field::Experience => &self.experience,
            Field::JobDescription => &self.job_description,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::FullName => &mut self.full_name,
            Field::JobTitle => &mut self.job_title,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Location => &mut self.location,
            Field::Portfolio => &mut self.portfolio,
            Field::Skills => &mut self.skills,
            Field::Experience => &mut self.experience,
            Field::JobDescription => &mut self.job_description,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    /// Copy of the draft with every value trimmed, as sent to the generation service.
    pub fn trimmed(&self) -> FormDraft {
        let mut out = FormDraft::default();
        for field in Field::ALL {
            out.set(field, self.get(field).trim());
        }
        out
    }

    /// Overlays saved values onto this draft. Empty saved values never
    /// replace what is already here.
    pub fn apply_saved(&mut self, saved: &FormDraft) {
        for field in Field::ALL {
            let value = saved.get(field);
            if !value.is_empty() {
                self.set(field, value);
            }
        }
    }

    /// Character count shown under the multi-line fields.
    pub fn char_count(&self, field: Field) -> usize {
        self.get(field).chars().count()
    }

    pub fn sample() -> FormDraft {
        FormDraft {
            full_name: "John Doe".to_string(),
            job_title: "Senior Software Engineer".to_string(),
            email: "john.doe@email.com".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            location: "San Francisco, CA".to_string(),
            portfolio: "https://johndoe.dev".to_string(),
            skills: "Python, JavaScript, React, Node.js, AWS, Docker, Kubernetes, PostgreSQL, Git, Agile"
                .to_string(),
            experience: "Led a team of 5 developers to build and maintain a scalable microservices \
                architecture using Python and React. Improved system performance by 40% through \
                optimization and caching strategies. Implemented CI/CD pipelines reducing deployment \
                time by 60%. Collaborated with cross-functional teams to deliver features on time \
                and within budget."
                .to_string(),
            job_description: "We are seeking a Senior Software Engineer with 5+ years of experience \
                in Python and JavaScript. The ideal candidate will have experience with React, \
                Node.js, cloud platforms (AWS), containerization (Docker), and modern development \
                practices. You will work on building scalable applications, leading a team, and \
                collaborating with stakeholders. Experience with microservices, CI/CD, and database \
                design is a plus."
                .to_string(),
        }
    }
}
