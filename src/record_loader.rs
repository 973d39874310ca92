use crate::error::{ConvertError, ConvertResult};
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// One video entry from the input document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRecord {
    pub id: String,
    pub path: String,
    pub correct_sign: String,
}

/// Read the input file and parse it into records, in document order
pub fn load_records(input: &Path) -> ConvertResult<Vec<VideoRecord>> {
    let content = fs::read_to_string(input).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ConvertError::InputNotFound {
            path: input.to_path_buf(),
        },
        _ => ConvertError::InputRead {
            path: input.to_path_buf(),
            source,
        },
    })?;
    debug!(path = %input.display(), bytes = content.len(), "read input file");

    let document: Value = serde_json::from_str(&content).map_err(|source| ConvertError::Parse {
        path: input.to_path_buf(),
        source,
    })?;
    let Value::Array(entries) = document else {
        return Err(ConvertError::NotAnArray {
            path: input.to_path_buf(),
        });
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| record_from_value(index, entry))
        .collect()
}

/// Extract the three known fields from one JSON element.
///
/// `id` may be a string or a number; numbers are rendered the way
/// `serde_json` prints them. `path` and `correctSign` must be strings.
/// Extra keys are ignored.
pub fn record_from_value(index: usize, entry: &Value) -> ConvertResult<VideoRecord> {
    let Some(fields) = entry.as_object() else {
        return Err(ConvertError::InvalidRecord { index });
    };

    let id = match fields.get("id") {
        None => return Err(ConvertError::FieldMissing { index, field: "id" }),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(_) => {
            return Err(ConvertError::InvalidField {
                index,
                field: "id",
                expected: "a string or a number",
            });
        }
    };

    Ok(VideoRecord {
        id,
        path: string_field(fields, index, "path")?,
        correct_sign: string_field(fields, index, "correctSign")?,
    })
}

fn string_field(fields: &Map<String, Value>, index: usize, field: &'static str) -> ConvertResult<String> {
    match fields.get(field) {
        None => Err(ConvertError::FieldMissing { index, field }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ConvertError::InvalidField {
            index,
            field,
            expected: "a string",
        }),
    }
}
