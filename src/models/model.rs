//! Model registry DTOs and the model snapshot embedded in test results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Trainable task type of a model. Closed set matching the platform's
/// task vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Classification,
    Detection,
    Segmentation,
    InstanceSegmentation,
    AnomalyClassification,
    AnomalyDetection,
    AnomalySegmentation,
    RotatedDetection,
    KeypointDetection,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classification => "classification",
            Self::Detection => "detection",
            Self::Segmentation => "segmentation",
            Self::InstanceSegmentation => "instance_segmentation",
            Self::AnomalyClassification => "anomaly_classification",
            Self::AnomalyDetection => "anomaly_detection",
            Self::AnomalySegmentation => "anomaly_segmentation",
            Self::RotatedDetection => "rotated_detection",
            Self::KeypointDetection => "keypoint_detection",
        }
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a model version was optimized for inference. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptimizationType {
    None,
    Mo,
    Pot,
    Nncf,
    Onnx,
}

impl OptimizationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Mo => "MO",
            Self::Pot => "POT",
            Self::Nncf => "NNCF",
            Self::Onnx => "ONNX",
        }
    }
}

impl std::fmt::Display for OptimizationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Point-in-time snapshot of the exact model version a test evaluated.
///
/// Copied into the test record at launch and never mutated afterwards, even
/// if the registry entry changes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ModelInfo {
    /// Model version id (opaque, caller-assigned).
    pub id: String,
    /// Model group id.
    pub group_id: String,
    /// Model template id.
    pub template_id: String,
    /// Task the model was trained for.
    pub task_type: TaskType,
    /// Number of labels the model predicts.
    pub n_labels: u32,
    /// Version number within the group.
    pub version: u32,
    /// Optimization applied to this version.
    pub optimization_type: OptimizationType,
    /// Precision modes used (e.g. "FP32", "INT8").
    pub precision: Vec<String>,
}

/// Request to register a model version with the service.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterModelRequest {
    /// Model version id (opaque, caller-assigned, unique).
    pub id: String,
    /// Model group id.
    pub group_id: String,
    /// Model template id.
    pub template_id: String,
    /// Task the model was trained for.
    pub task_type: TaskType,
    /// Version number within the group.
    pub version: u32,
    /// Optimization applied to this version.
    pub optimization_type: OptimizationType,
    /// Precision modes used.
    #[serde(default)]
    pub precision: Vec<String>,
    /// Ids of the labels the model predicts. Must be non-empty.
    pub labels: Vec<String>,
}

/// Registered model as returned by the registry endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ModelResponse {
    #[serde(flatten)]
    pub info: ModelInfo,
    /// Ids of the labels the model predicts.
    pub labels: Vec<String>,
    /// Registration timestamp.
    pub registered_at: DateTime<Utc>,
}

/// Model list response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ModelListResponse {
    pub models: Vec<ModelResponse>,
}
