//! In-memory dataset registry with soft deletion.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};
use crate::models::{DatasetInfo, DatasetResponse, RegisterDatasetRequest};

/// A registered dataset. Records are never removed, only flagged deleted,
/// so tests referencing them keep rendering.
#[derive(Debug, Clone)]
pub struct DatasetRecord {
    pub id: String,
    pub name: String,
    pub is_deleted: bool,
    pub n_images: u64,
    pub n_frames: u64,
    pub n_samples: u64,
    pub registered_at: DateTime<Utc>,
}

impl DatasetRecord {
    pub fn to_response(&self) -> DatasetResponse {
        DatasetResponse {
            info: DatasetInfo {
                id: self.id.clone(),
                name: self.name.clone(),
                is_deleted: self.is_deleted,
                n_images: self.n_images,
                n_frames: self.n_frames,
                n_samples: self.n_samples,
            },
            registered_at: self.registered_at,
        }
    }
}

/// Registry of datasets available for evaluation.
#[derive(Clone, Default)]
pub struct DatasetRegistry {
    inner: Arc<RwLock<HashMap<String, DatasetRecord>>>,
}

impl DatasetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a dataset. Fails on duplicate id.
    pub async fn register(&self, req: RegisterDatasetRequest) -> AppResult<DatasetRecord> {
        if req.id.trim().is_empty() {
            return Err(AppError::InvalidInput("dataset id must not be empty".into()));
        }

        let record = DatasetRecord {
            id: req.id,
            name: req.name,
            is_deleted: false,
            n_images: req.n_images,
            n_frames: req.n_frames,
            n_samples: req.n_samples,
            registered_at: Utc::now(),
        };

        let mut map = self.inner.write().await;
        if map.contains_key(&record.id) {
            return Err(AppError::Conflict(format!(
                "dataset '{}' is already registered",
                record.id
            )));
        }
        map.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    /// Look up a dataset by id.
    pub async fn get(&self, id: &str) -> Option<DatasetRecord> {
        self.inner.read().await.get(id).cloned()
    }

    /// Soft-delete a dataset. Idempotent; repeating the delete is a no-op.
    pub async fn soft_delete(&self, id: &str) -> AppResult<DatasetRecord> {
        let mut map = self.inner.write().await;
        let record = map
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Dataset '{}'", id)))?;
        record.is_deleted = true;
        Ok(record.clone())
    }

    /// Current soft-delete state. A dataset missing from the registry is
    /// reported deleted rather than panicking a render path.
    pub async fn is_deleted(&self, id: &str) -> bool {
        self.inner
            .read()
            .await
            .get(id)
            .map(|r| r.is_deleted)
            .unwrap_or(true)
    }

    /// List datasets (soft-deleted included), oldest registration first.
    pub async fn list(&self) -> Vec<DatasetRecord> {
        let map = self.inner.read().await;
        let mut records: Vec<DatasetRecord> = map.values().cloned().collect();
        records.sort_by(|a, b| {
            a.registered_at
                .cmp(&b.registered_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        records
    }
}
