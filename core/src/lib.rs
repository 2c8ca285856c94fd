pub mod config;
pub mod errors;
pub mod event;
pub mod handlers;
pub mod response;
pub mod store;
pub mod student;
pub mod telemetry;

pub use config::{StudentsConfig, load_config};
pub use errors::{Result, StudentsError};
pub use handlers::StudentHandlers;
pub use response::ApiGatewayResponse;
pub use store::{DynamoStudentStore, InMemoryStudentStore, StudentStore};
pub use student::{Age, StudentRecord};
