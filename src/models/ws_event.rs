//! WebSocket event types for real-time updates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::job::JobInfoStatus;

/// WebSocket event sent to connected clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
#[serde(rename_all = "snake_case")]
pub enum WsEvent {
    /// A new test was launched.
    TestCreated(TestCreatedPayload),
    /// An evaluation job changed status.
    JobUpdated(JobUpdatedPayload),
}

/// Payload for test_created event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCreatedPayload {
    pub test_id: Uuid,
    pub name: String,
    pub job_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Payload for job_updated event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobUpdatedPayload {
    pub test_id: Uuid,
    pub job_id: Uuid,
    pub status: JobInfoStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Wrapper that includes timestamp with every event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsEventMessage {
    #[serde(flatten)]
    pub event: WsEvent,
    pub timestamp: DateTime<Utc>,
}

impl WsEventMessage {
    /// Create a new event message with the current timestamp.
    pub fn new(event: WsEvent) -> Self {
        Self {
            event,
            timestamp: Utc::now(),
        }
    }
}

impl WsEvent {
    /// Create a test_created event.
    pub fn test_created(test_id: Uuid, name: String, job_id: Uuid) -> Self {
        WsEvent::TestCreated(TestCreatedPayload {
            test_id,
            name,
            job_id,
            created_at: Utc::now(),
        })
    }

    /// Create a job_updated event.
    pub fn job_updated(
        test_id: Uuid,
        job_id: Uuid,
        status: JobInfoStatus,
        message: Option<String>,
    ) -> Self {
        WsEvent::JobUpdated(JobUpdatedPayload {
            test_id,
            job_id,
            status,
            message,
            updated_at: Utc::now(),
        })
    }
}
