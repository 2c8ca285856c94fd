use serde_json::{Map, Value};

use crate::errors::RequestError;

/// Returns the insert payload carried by an invocation event.
///
/// API Gateway's non-proxy integration hands the request body to the function
/// as the event itself. The proxy integration wraps it, with `body` holding
/// either the raw JSON text or an already decoded object.
pub fn normalize_event(event: Value) -> Result<Map<String, Value>, RequestError> {
    let Value::Object(mut object) = event else {
        return Err(malformed("event must be a JSON object"));
    };

    let Some(body) = object.remove("body") else {
        return Ok(object);
    };

    match body {
        Value::Null => Ok(Map::new()),
        Value::Object(inner) => Ok(inner),
        Value::String(text) => match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(inner)) => Ok(inner),
            Ok(_) => Err(malformed("body must be a JSON object")),
            Err(e) => Err(malformed(&format!("body is not valid JSON: {}", e))),
        },
        _ => Err(malformed("body must be a JSON object")),
    }
}

fn malformed(reason: &str) -> RequestError {
    RequestError::MalformedEvent {
        reason: reason.to_string(),
    }
}
