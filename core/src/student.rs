use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::RequestError;

pub const FIELD_ID: &str = "id";
pub const FIELD_NAME: &str = "name";
pub const FIELD_CLASS: &str = "class";
pub const FIELD_AGE: &str = "age";

/// A row of the `Student` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: String,
    pub name: String,
    /// Enrolled group or section, e.g. `5A`.
    #[serde(rename = "class")]
    pub class_name: String,
    pub age: Age,
}

/// Age as stored. New writes are always whole years; items written by the old
/// browser form may hold whatever text was typed, and are returned unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Age {
    Years(i64),
    Legacy(String),
}

impl From<i64> for Age {
    fn from(years: i64) -> Self {
        Age::Years(years)
    }
}

impl Age {
    /// Reads a stored value, keeping anything that is not a whole number as
    /// legacy text.
    pub fn from_stored(raw: &str) -> Self {
        match raw.trim().parse::<i64>() {
            Ok(years) => Age::Years(years),
            Err(_) => Age::Legacy(raw.to_string()),
        }
    }
}

impl StudentRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        class_name: impl Into<String>,
        age: impl Into<Age>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            class_name: class_name.into(),
            age: age.into(),
        }
    }

    /// Extracts the four required fields from an insert payload.
    ///
    /// Fields are checked in the order `id`, `name`, `class`, `age` and the
    /// first absent one is reported. Extra fields are ignored. `id` may be a
    /// string or an integer; `age` may be an integer or a string holding one,
    /// since the browser form posts every value as a string.
    pub fn from_payload(payload: &Map<String, Value>) -> Result<Self, RequestError> {
        let id = required(payload, FIELD_ID)?;
        let name = required(payload, FIELD_NAME)?;
        let class_name = required(payload, FIELD_CLASS)?;
        let age = required(payload, FIELD_AGE)?;

        Ok(Self {
            id: identifier(FIELD_ID, id)?,
            name: text(FIELD_NAME, name)?,
            class_name: text(FIELD_CLASS, class_name)?,
            age: Age::Years(integer(FIELD_AGE, age)?),
        })
    }
}

fn required<'a>(payload: &'a Map<String, Value>, field: &str) -> Result<&'a Value, RequestError> {
    match payload.get(field) {
        None | Some(Value::Null) => Err(RequestError::missing(field)),
        Some(value) => Ok(value),
    }
}

fn text(field: &str, value: &Value) -> Result<String, RequestError> {
    value.as_str().map(str::to_string).ok_or_else(|| {
        RequestError::invalid(field, format!("expected a string, got {}", kind(value)))
    })
}

fn identifier(field: &str, value: &Value) -> Result<String, RequestError> {
    match value {
        Value::String(s) if s.is_empty() => Err(RequestError::invalid(field, "must not be empty")),
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(n.to_string()),
        other => Err(RequestError::invalid(
            field,
            format!("expected a string or integer, got {}", kind(other)),
        )),
    }
}

fn integer(field: &str, value: &Value) -> Result<i64, RequestError> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| RequestError::invalid(field, format!("{} is not an integer", n))),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| RequestError::invalid(field, format!("'{}' is not an integer", s))),
        other => Err(RequestError::invalid(
            field,
            format!("expected an integer, got {}", kind(other)),
        )),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
