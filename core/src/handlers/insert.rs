use serde_json::Value;
use tracing::{error, info, warn};

use crate::errors::StudentsError;
use crate::event::normalize_event;
use crate::response::{ApiGatewayResponse, INSERT_CONFIRMATION};
use crate::store::StudentStore;
use crate::student::StudentRecord;

use super::StudentHandlers;

impl<S: StudentStore> StudentHandlers<S> {
    /// Upserts the student described by the event.
    ///
    /// A malformed event or a missing or mistyped field is answered with a 400
    /// and nothing is written. No headers are set on this path.
    pub async fn insert_student(&self, event: Value) -> Result<ApiGatewayResponse, StudentsError> {
        let parsed =
            normalize_event(event).and_then(|payload| StudentRecord::from_payload(&payload));
        let record = match parsed {
            Ok(record) => record,
            Err(e) => {
                warn!("Rejected insert: {}", e);
                return Ok(ApiGatewayResponse::bad_request(&e));
            }
        };

        if let Err(e) = self.store.put_student(&record).await {
            error!("Failed to save student {}: {}", record.id, e);
            return Err(e.into());
        }

        info!("Saved student {}", record.id);
        ApiGatewayResponse::ok(&INSERT_CONFIRMATION)
    }
}
