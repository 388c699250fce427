//! Structured import
//!
//! The document must be a JSON array of group records. Shape problems are
//! reported before anything touches the browser.

use serde_json::Value;
use tabvault_tabs::GroupRecord;

use crate::error::ImportError;

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

pub fn import_groups(text: &str) -> Result<Vec<GroupRecord>, ImportError> {
    let document: Value = serde_json::from_str(text).map_err(ImportError::Malformed)?;

    let items = match document {
        Value::Array(items) => items,
        other => return Err(ImportError::NotAnArray(kind_of(&other))),
    };

    let groups = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<GroupRecord>(item).map_err(|e| ImportError::InvalidGroup {
                index,
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(groups = groups.len(), "Decoded import document");

    Ok(groups)
}
