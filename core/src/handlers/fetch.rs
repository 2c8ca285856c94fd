use serde_json::Value;
use tracing::{error, info};

use crate::errors::StudentsError;
use crate::response::ApiGatewayResponse;
use crate::store::{Pages, StudentStore};

use super::StudentHandlers;

impl<S: StudentStore> StudentHandlers<S> {
    /// Returns every student in the table, in scan order, with the CORS headers
    /// the browser client needs. The event carries nothing this handler reads.
    pub async fn fetch_all_students(
        &self,
        _event: Value,
    ) -> Result<ApiGatewayResponse, StudentsError> {
        let mut pages = Pages::new(&self.store);
        let students = match pages.collect_all().await {
            Ok(students) => students,
            Err(e) => {
                error!("Scan failed after {} requests: {}", pages.requests(), e);
                return Err(e.into());
            }
        };

        info!(
            "Fetched {} students in {} scan requests",
            students.len(),
            pages.requests()
        );
        Ok(ApiGatewayResponse::ok(&students)?.with_cors(&self.cors))
    }
}
