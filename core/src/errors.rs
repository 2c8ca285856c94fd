use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudentsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Request error: {0}")]
    Request(#[from] RequestError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),
}

/// Problems with the invocation event itself. These are the caller's fault and
/// are answered with a 400 instead of failing the invocation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for field {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Malformed event: {reason}")]
    MalformedEvent { reason: String },
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to scan table {table}: {reason}")]
    Scan { table: String, reason: String },

    #[error("Failed to put item {id} into table {table}: {reason}")]
    Put {
        table: String,
        id: String,
        reason: String,
    },

    #[error("Item conversion failed: {reason}")]
    Conversion { reason: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed: {reason}")]
    ValidationFailed { reason: String },

    #[error("Failed to load configuration from {origin}: {error}")]
    LoadFailed {
        origin: String,
        #[source]
        error: Box<dyn std::error::Error + Send + Sync>,
    },
}

#[derive(Error, Debug)]
pub enum SerializationError {
    #[error("JSON serialization failed: {reason}")]
    Json { reason: String },
}

pub type Result<T> = std::result::Result<T, StudentsError>;

impl From<serde_json::Error> for StudentsError {
    fn from(err: serde_json::Error) -> Self {
        StudentsError::Serialization(SerializationError::Json {
            reason: err.to_string(),
        })
    }
}

impl RequestError {
    /// Machine-readable code placed in the `error` field of a 400 body.
    pub fn code(&self) -> &'static str {
        match self {
            RequestError::MissingField { .. } => "missing_field",
            RequestError::InvalidField { .. } => "invalid_field",
            RequestError::MalformedEvent { .. } => "malformed_event",
        }
    }

    pub fn missing(field: &str) -> Self {
        RequestError::MissingField {
            field: field.to_string(),
        }
    }

    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        RequestError::InvalidField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl StudentsError {
    /// True when the error should be answered with a 4xx response rather than
    /// failing the invocation.
    pub fn is_client_error(&self) -> bool {
        matches!(self, StudentsError::Request(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_codes() {
        assert_eq!(RequestError::missing("age").code(), "missing_field");
        assert_eq!(RequestError::invalid("age", "not a number").code(), "invalid_field");
        assert_eq!(
            RequestError::MalformedEvent {
                reason: "bad".to_string()
            }
            .code(),
            "malformed_event"
        );
    }

    #[test]
    fn test_error_messages() {
        let err = RequestError::missing("class");
        assert_eq!(err.to_string(), "Missing required field: class");

        let err = StoreError::Put {
            table: "Student".to_string(),
            id: "s1".to_string(),
            reason: "throttled".to_string(),
        };
        assert!(err.to_string().contains("s1"));
        assert!(err.to_string().contains("Student"));
    }

    #[test]
    fn test_client_error_classification() {
        let request: StudentsError = RequestError::missing("id").into();
        assert!(request.is_client_error());

        let store: StudentsError = StoreError::Scan {
            table: "Student".to_string(),
            reason: "unavailable".to_string(),
        }
        .into();
        assert!(!store.is_client_error());

        let config: StudentsError = ConfigError::ValidationFailed {
            reason: "empty table".to_string(),
        }
        .into();
        assert!(!config.is_client_error());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: StudentsError = json_err.into();
        assert!(matches!(
            err,
            StudentsError::Serialization(SerializationError::Json { .. })
        ));
    }
}
