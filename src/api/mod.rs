//! API endpoint modules.

pub mod datasets;
pub mod health;
pub mod jobs;
pub mod models;
pub mod openapi;
pub mod websocket;

pub use datasets::configure_routes as configure_dataset_routes;
pub use health::configure_health_routes;
pub use jobs::configure_routes as configure_job_routes;
pub use models::configure_routes as configure_model_routes;
pub use openapi::ApiDoc;
pub use tests::configure_routes as configure_test_routes;
pub use websocket::configure_routes as configure_websocket_routes;
