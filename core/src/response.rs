use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::CorsConfig;
use crate::errors::{RequestError, StudentsError};

pub const INSERT_CONFIRMATION: &str = "Student data saved successfully!";

/// The HTTP-shaped result API Gateway turns into a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    pub body: String,
}

impl ApiGatewayResponse {
    /// 200 whose body is `payload` rendered as JSON text.
    pub fn ok(payload: &impl Serialize) -> Result<Self, StudentsError> {
        Ok(Self {
            status_code: 200,
            headers: None,
            body: serde_json::to_string(payload)?,
        })
    }

    /// 400 describing why the event was rejected.
    pub fn bad_request(error: &RequestError) -> Self {
        Self {
            status_code: 400,
            headers: None,
            body: json!({
                "error": error.code(),
                "message": error.to_string(),
            })
            .to_string(),
        }
    }

    pub fn with_cors(mut self, cors: &CorsConfig) -> Self {
        self.headers = Some(cors_headers(cors));
        self
    }
}

pub fn cors_headers(cors: &CorsConfig) -> BTreeMap<String, String> {
    BTreeMap::from([
        (
            "Access-Control-Allow-Headers".to_string(),
            cors.allow_headers.clone(),
        ),
        (
            "Access-Control-Allow-Origin".to_string(),
            cors.allow_origin.clone(),
        ),
        (
            "Access-Control-Allow-Methods".to_string(),
            cors.allow_methods.clone(),
        ),
    ])
}
