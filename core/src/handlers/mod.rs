//! The two Lambda handlers. Each takes the raw invocation event and returns
//! the API Gateway response; store failures are returned as errors so the
//! invocation fails.

mod fetch;
mod insert;

use crate::config::{CorsConfig, StudentsConfig};
use crate::store::StudentStore;

/// Handler state built once per process and shared by every invocation.
pub struct StudentHandlers<S> {
    store: S,
    cors: CorsConfig,
}

impl<S: StudentStore> StudentHandlers<S> {
    pub fn new(store: S, cors: CorsConfig) -> Self {
        Self { store, cors }
    }

    pub fn from_config(store: S, config: &StudentsConfig) -> Self {
        Self::new(store, config.cors.clone())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
