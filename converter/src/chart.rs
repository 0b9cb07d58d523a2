use crate::error::{ConvertError, Result};
use crate::note::Note;
use crate::store;
use serde_json::{Map, Value};
use std::path::Path;

pub const NOTES_KEY: &str = "_notes";

/// One difficulty's chart. Only the note list is interpreted; every other
/// top-level field is carried through unchanged and in its original order.
#[derive(Debug, Clone)]
pub struct Chart {
    pub notes: Vec<Note>,
    // Full document; the `_notes` slot is kept (as null) to hold its position
    fields: Map<String, Value>,
}

impl Chart {
    /// Build a chart from a parsed document. `path` is only used for error reporting.
    pub fn from_value(path: &Path, value: Value) -> Result<Self> {
        let mut fields = match value {
            Value::Object(map) => map,
            other => {
                return Err(ConvertError::schema(
                    path,
                    format!("expected a JSON object, found {}", json_kind(&other)),
                ))
            }
        };

        let raw_notes = match fields.get_mut(NOTES_KEY) {
            Some(slot) if slot.is_array() => slot.take(),
            Some(other) => {
                return Err(ConvertError::schema(
                    path,
                    format!("`{}` must be an array, found {}", NOTES_KEY, json_kind(other)),
                ))
            }
            None => {
                return Err(ConvertError::schema(
                    path,
                    format!("missing `{}` array", NOTES_KEY),
                ))
            }
        };

        let notes: Vec<Note> = serde_json::from_value(raw_notes)
            .map_err(|e| ConvertError::schema(path, format!("malformed note: {}", e)))?;

        Ok(Chart { notes, fields })
    }

    /// Top-level field other than the note list
    pub fn field(&self, key: &str) -> Option<&Value> {
        if key == NOTES_KEY {
            return None;
        }
        self.fields.get(key)
    }

    /// The full document with the current notes spliced back in
    pub fn to_value(&self) -> serde_json::Result<Value> {
        let mut fields = self.fields.clone();
        fields.insert(NOTES_KEY.to_string(), serde_json::to_value(&self.notes)?);
        Ok(Value::Object(fields))
    }

    /// Compact JSON, as Beat Saber writes difficulty files
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(&self.to_value()?)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

pub fn load_chart(path: &Path) -> Result<Chart> {
    log::debug!("Loading chart {}", path.display());
    let value = store::read_json(path)?;
    Chart::from_value(path, value)
}

pub fn save_chart(path: &Path, chart: &Chart) -> Result<()> {
    log::debug!("Saving chart {}", path.display());
    let content = chart.to_json().map_err(|e| ConvertError::serialize(path, e))?;
    store::write_atomic(path, &content)
}
