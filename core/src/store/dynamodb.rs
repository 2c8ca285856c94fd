use std::fmt::Debug;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use tracing::{debug, info};

use crate::config::StudentsConfig;
use crate::errors::StoreError;
use crate::student::StudentRecord;

use super::conversions::{Item, scan_output_to_page, student_to_item};
use super::{ScanPage, StudentStore};

/// `Student` table backed by DynamoDB.
///
/// Cloning is cheap; the SDK client shares its connection pool.
#[derive(Clone)]
pub struct DynamoStudentStore {
    client: Client,
    table_name: String,
    page_limit: Option<i32>,
}

impl DynamoStudentStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            page_limit: None,
        }
    }

    pub fn with_page_limit(mut self, limit: Option<i32>) -> Self {
        self.page_limit = limit;
        self
    }

    /// Builds a client for the configured region using the default credential
    /// chain, pointed at `endpoint_url` when one is set.
    pub async fn from_config(config: &StudentsConfig) -> Self {
        let region = aws_config::Region::new(config.region.clone());
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(region)
            .load()
            .await;

        let mut builder = aws_sdk_dynamodb::config::Builder::from(&sdk_config);
        if let Some(endpoint_url) = &config.endpoint_url {
            info!("Using DynamoDB endpoint override {}", endpoint_url);
            builder = builder.endpoint_url(endpoint_url);
        }

        Self::new(Client::from_conf(builder.build()), config.table_name.clone())
            .with_page_limit(config.scan_page_limit)
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl StudentStore for DynamoStudentStore {
    type Cursor = Item;

    async fn scan_page(&self, start: Option<Item>) -> Result<ScanPage<Item>, StoreError> {
        let output = self
            .client
            .scan()
            .table_name(&self.table_name)
            .set_limit(self.page_limit)
            .set_exclusive_start_key(start)
            .send()
            .await
            .map_err(|e| map_scan_error(e, &self.table_name))?;

        scan_output_to_page(output.items, output.last_evaluated_key)
    }

    async fn put_student(&self, record: &StudentRecord) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(student_to_item(record)))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, &self.table_name, &record.id))?;

        debug!("Put student {} into {}", record.id, self.table_name);
        Ok(())
    }
}

fn map_scan_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ScanError, R>,
    table: &str,
) -> StoreError {
    let reason = match err.into_service_error() {
        ScanError::ResourceNotFoundException(_) => "Table not found".to_string(),
        ScanError::ProvisionedThroughputExceededException(_) => {
            "Throughput exceeded".to_string()
        }
        ScanError::RequestLimitExceeded(_) => "Request limit exceeded".to_string(),
        ScanError::InternalServerError(_) => "DynamoDB internal server error".to_string(),
        err => format!("Scan failed: {:?}", err),
    };
    StoreError::Scan {
        table: table.to_string(),
        reason,
    }
}

fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    table: &str,
    id: &str,
) -> StoreError {
    let reason = match err.into_service_error() {
        PutItemError::ResourceNotFoundException(_) => "Table not found".to_string(),
        PutItemError::ProvisionedThroughputExceededException(_) => {
            "Throughput exceeded".to_string()
        }
        PutItemError::RequestLimitExceeded(_) => "Request limit exceeded".to_string(),
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            "Item collection size limit exceeded".to_string()
        }
        PutItemError::TransactionConflictException(_) => "Transaction conflict".to_string(),
        PutItemError::InternalServerError(_) => "DynamoDB internal server error".to_string(),
        err => format!("PutItem failed: {:?}", err),
    };
    StoreError::Put {
        table: table.to_string(),
        id: id.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::types::error::ResourceNotFoundException;

    #[test]
    fn test_scan_error_names_table() {
        let err: SdkError<ScanError, ()> = SdkError::construction_failure("bad request");
        let mapped = map_scan_error(err, "Student");

        match mapped {
            StoreError::Scan { table, reason } => {
                assert_eq!(table, "Student");
                assert!(reason.starts_with("Scan failed"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_put_error_for_missing_table() {
        let service = PutItemError::ResourceNotFoundException(
            ResourceNotFoundException::builder().build(),
        );
        let err: SdkError<PutItemError, ()> = SdkError::service_error(service, ());
        let mapped = map_put_item_error(err, "Student", "s1");

        match mapped {
            StoreError::Put { table, id, reason } => {
                assert_eq!(table, "Student");
                assert_eq!(id, "s1");
                assert_eq!(reason, "Table not found");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_from_config_uses_configured_table() {
        let config = StudentsConfig {
            table_name: "StudentsTest".to_string(),
            endpoint_url: Some("http://localhost:8000".to_string()),
            scan_page_limit: Some(10),
            ..StudentsConfig::default()
        };

        let store = DynamoStudentStore::from_config(&config).await;
        assert_eq!(store.table_name(), "StudentsTest");
        assert_eq!(store.page_limit, Some(10));
    }
}
