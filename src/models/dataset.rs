//! Dataset registry DTOs and the dataset summary embedded in test results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Dataset summary as rendered inside a test result.
///
/// Media counts are snapshot values copied at launch; `is_deleted` reflects
/// the dataset's soft-delete state at read time. A test referencing a
/// deleted dataset stays valid and keeps rendering the snapshot counts.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DatasetInfo {
    /// Dataset id (opaque, caller-assigned).
    pub id: String,
    /// Dataset display name.
    pub name: String,
    /// True once the dataset has been soft-deleted.
    pub is_deleted: bool,
    /// Number of images.
    pub n_images: u64,
    /// Number of video frames.
    pub n_frames: u64,
    /// Total annotated samples.
    pub n_samples: u64,
}

/// Request to register a dataset with the service.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterDatasetRequest {
    /// Dataset id (opaque, caller-assigned, unique).
    pub id: String,
    /// Dataset display name.
    pub name: String,
    /// Number of images.
    #[serde(default)]
    pub n_images: u64,
    /// Number of video frames.
    #[serde(default)]
    pub n_frames: u64,
    /// Total annotated samples.
    #[serde(default)]
    pub n_samples: u64,
}

/// Registered dataset as returned by the registry endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DatasetResponse {
    #[serde(flatten)]
    pub info: DatasetInfo,
    /// Registration timestamp.
    pub registered_at: DateTime<Utc>,
}

/// Dataset list response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DatasetListResponse {
    pub datasets: Vec<DatasetResponse>,
}
