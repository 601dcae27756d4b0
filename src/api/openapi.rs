//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Model Evaluation Test Server",
        version = "0.3.0",
        description = "API server for launching and viewing model evaluation tests against registered datasets"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Registry endpoints
        api::models::register_model,
        api::models::list_models,
        api::datasets::register_dataset,
        api::datasets::list_datasets,
        api::datasets::delete_dataset,
        // Test endpoints
        api::tests::run_test,
        api::tests::list_tests,
        api::tests::get_test,
        api::tests::delete_test,
        // Job endpoints
        api::jobs::update_job_status,
        api::jobs::get_job,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            models::Pagination,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Registry
            models::TaskType,
            models::OptimizationType,
            models::ModelInfo,
            models::RegisterModelRequest,
            models::ModelResponse,
            models::ModelListResponse,
            models::DatasetInfo,
            models::RegisterDatasetRequest,
            models::DatasetResponse,
            models::DatasetListResponse,
            // Tests
            models::ScoreMetric,
            models::TestScore,
            models::RunTestBody,
            models::TestDetail,
            models::TestsResponse,
            // Jobs
            models::JobInfoStatus,
            models::JobInfo,
            models::JobStatusUpdate,
            models::JobDetailResponse,
        )
    ),
    tags(
        (name = "Health", description = "Service health endpoints"),
        (name = "Registry", description = "Model and dataset registries"),
        (name = "Tests", description = "Launching and viewing evaluation tests"),
        (name = "Jobs", description = "Evaluation job lifecycle")
    )
)]
pub struct ApiDoc;
