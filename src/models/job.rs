//! Evaluation job domain models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::test::TestScore;

/// Lifecycle status of a background evaluation job.
///
/// Closed set: the wire values are exactly the seven strings below. An
/// unknown status from a worker is a contract violation and fails
/// deserialization instead of being coerced to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobInfoStatus {
    /// Job accepted, waiting for a worker to pick it up.
    Pending,
    /// Worker is assembling the testing dataset.
    CreatingDataset,
    /// Model inference over the testing dataset in progress.
    Inferring,
    /// Metric computation over the predictions in progress.
    Evaluating,
    /// Evaluation finished, scores recorded.
    Done,
    /// Evaluation failed (worker-reported).
    Failed,
    /// Job aborted by the service (e.g. watchdog timeout).
    Error,
}

impl JobInfoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::CreatingDataset => "CREATING_DATASET",
            Self::Inferring => "INFERRING",
            Self::Evaluating => "EVALUATING",
            Self::Done => "DONE",
            Self::Failed => "FAILED",
            Self::Error => "ERROR",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(Self::Pending),
            "CREATING_DATASET" => Some(Self::CreatingDataset),
            "INFERRING" => Some(Self::Inferring),
            "EVALUATING" => Some(Self::Evaluating),
            "DONE" => Some(Self::Done),
            "FAILED" => Some(Self::Failed),
            "ERROR" => Some(Self::Error),
            _ => None,
        }
    }

    /// Terminal statuses never change again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed | Self::Error)
    }

    /// Position in the forward progression. Terminal failure states have no
    /// rank; they are reachable from any non-terminal status.
    fn rank(&self) -> Option<u8> {
        match self {
            Self::Pending => Some(0),
            Self::CreatingDataset => Some(1),
            Self::Inferring => Some(2),
            Self::Evaluating => Some(3),
            Self::Done => Some(4),
            Self::Failed | Self::Error => None,
        }
    }

    /// Whether a worker update from `self` to `to` is legal.
    ///
    /// Updates may skip forward (a fast worker can go straight from PENDING
    /// to EVALUATING) but never move backward, repeat the current status, or
    /// leave a terminal status.
    pub fn can_transition_to(&self, to: JobInfoStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        match (self.rank(), to.rank()) {
            (_, None) => true,
            (Some(from), Some(to)) => to > from,
            (None, _) => false,
        }
    }
}

impl std::fmt::Display for JobInfoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Job reference embedded in a test result.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobInfo {
    /// Job UUID.
    pub id: Uuid,
    /// Current job status.
    pub status: JobInfoStatus,
}

/// Worker callback body reporting job progress.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct JobStatusUpdate {
    /// New job status.
    pub status: JobInfoStatus,
    /// Scores produced by the evaluation. Only accepted with DONE.
    #[serde(default)]
    pub scores: Option<Vec<TestScore>>,
    /// Failure detail. Recorded for FAILED and ERROR.
    #[serde(default)]
    pub message: Option<String>,
}

/// Detailed job response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct JobDetailResponse {
    /// Job UUID.
    pub id: Uuid,
    /// UUID of the test this job evaluates.
    pub test_id: Uuid,
    /// Job status.
    pub status: JobInfoStatus,
    /// Failure detail if the job failed or errored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Last status change timestamp.
    pub updated_at: DateTime<Utc>,
}
