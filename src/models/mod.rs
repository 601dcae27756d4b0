//! Domain models for the evaluation test service.

use utoipa::ToSchema;

pub mod dataset;
pub mod job;
pub mod model;
pub mod ws_event;

// Re-export commonly used types
pub use dataset::{DatasetInfo, DatasetListResponse, DatasetResponse, RegisterDatasetRequest};
pub use job::{JobDetailResponse, JobInfo, JobInfoStatus, JobStatusUpdate};
pub use model::{
    ModelInfo, ModelListResponse, ModelResponse, OptimizationType, RegisterModelRequest, TaskType,
};
pub use test::{RunTestBody, ScoreMetric, TestDetail, TestScore, TestsResponse};
pub use ws_event::{WsEvent, WsEventMessage};

/// Pagination parameters.
#[derive(Debug, Clone, serde::Deserialize, ToSchema)]
pub struct PaginationParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    20
}

impl PaginationParams {
    /// Calculate the offset for list queries.
    pub fn offset(&self) -> u32 {
        let page = self.page.unwrap_or(default_page());
        let limit = self.clamped_limit();
        page.saturating_sub(1).saturating_mul(limit)
    }

    /// Page number with the default applied.
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(default_page()).max(1)
    }

    /// Clamp limit to maximum allowed value.
    pub fn clamped_limit(&self) -> u32 {
        self.limit.unwrap_or(default_limit()).clamp(1, 100)
    }
}

/// Pagination metadata for responses.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, ToSchema)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl Pagination {
    /// Create pagination metadata.
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            ((total as f64) / (limit as f64)).ceil() as u32
        };

        Pagination {
            page,
            limit,
            total,
            total_pages,
        }
    }
}
