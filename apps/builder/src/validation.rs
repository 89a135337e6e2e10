use crate::fields::{required_fields, Field};
use crate::models::draft::FormDraft;

/// Required fields whose trimmed value is empty, in registry order.
pub fn validate(draft: &FormDraft) -> Vec<Field> {
    required_fields()
        .filter(|f| draft.get(*f).trim().is_empty())
        .collect()
}

/// The message shown when submission is blocked on missing fields.
pub fn missing_fields_message(missing: &[Field]) -> String {
    let names: Vec<_> = missing.iter().map(|f| f.key()).collect();
    format!("Please fill in all required fields: {}", names.join(", "))
}
