use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The generated résumé as returned by the generation service.
///
/// `skills` stays an untyped value: the renderer only draws it when it is a
/// list, anything else leaves the section empty. Fields the builder does not
/// use (`matchedKeywords`, `aiEnhanced`, ...) are carried through untouched.
/// An explicit `null` on a known optional field is stored as an absent key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Value>,
    #[serde(default)]
    pub experience: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub const MAX_SCORE: u32 = 100;

impl ResumeDocument {
    /// Skills as a list of strings, or `None` when the payload is absent or
    /// not a list. Non-string entries are skipped.
    pub fn skill_list(&self) -> Option<Vec<&str>> {
        match &self.skills {
            Some(Value::Array(items)) => Some(items.iter().filter_map(Value::as_str).collect()),
            _ => None,
        }
    }
}
