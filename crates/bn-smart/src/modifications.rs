//! The find/replace payload: a JSON list of `{"find", "replace"}` objects.

use bn_core::Modification;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModificationError {
    #[error("Invalid modifications JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Modifications must be a list")]
    NotAList,
    #[error("Invalid modification at index {index}: expected an object with string 'find' and 'replace'")]
    InvalidEntry { index: usize },
}

/// Parse and validate the whole payload before anything is applied.
///
/// Missing `find`/`replace` fields default to the empty string. Any entry
/// that is not an object, or has a non-string field, rejects the payload.
pub fn parse_modifications(payload: &str) -> Result<Vec<Modification>, ModificationError> {
    let value: Value = serde_json::from_str(payload)?;
    let Value::Array(entries) = value else {
        return Err(ModificationError::NotAList);
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let Value::Object(map) = entry else {
                return Err(ModificationError::InvalidEntry { index });
            };
            let field = |name: &str| match map.get(name) {
                None | Some(Value::Null) => Ok(String::new()),
                Some(Value::String(s)) => Ok(s.clone()),
                Some(_) => Err(ModificationError::InvalidEntry { index }),
            };
            Ok(Modification::new(field("find")?, field("replace")?))
        })
        .collect()
}

/// Apply each modification in order.
pub fn apply_all(code: &str, modifications: &[Modification]) -> String {
    modifications
        .iter()
        .fold(code.to_string(), |text, m| m.apply(&text))
}
