//! In-memory state for the service.
//!
//! Test records are ephemeral by design; there is no persistence layer.
//! Three registries live behind one cloneable handle shared through
//! `web::Data`: models, datasets, and launched tests.

use chrono::Utc;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    DatasetInfo, JobInfo, JobInfoStatus, RunTestBody, ScoreMetric, TestDetail,
};

pub mod datasets;
pub mod models;

pub use datasets::{DatasetRecord, DatasetRegistry};
pub use models::{ModelRecord, ModelRegistry};
pub use tests::{DatasetSnapshot, JobRecord, TestRecord, TestStore};

/// Shared application state.
#[derive(Clone, Default)]
pub struct Store {
    pub models: ModelRegistry,
    pub datasets: DatasetRegistry,
    pub tests: TestStore,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Launch a new test: validate the request, snapshot the model and
    /// dataset state, and insert a record with a PENDING job.
    pub async fn run_test(
        &self,
        body: RunTestBody,
        max_datasets: usize,
    ) -> AppResult<TestRecord> {
        if body.name.trim().is_empty() {
            return Err(AppError::InvalidInput("test name must not be empty".into()));
        }
        if body.dataset_ids.is_empty() {
            return Err(AppError::InvalidInput(
                "dataset_ids must not be empty".into(),
            ));
        }
        if body.dataset_ids.len() > max_datasets {
            return Err(AppError::InvalidInput(format!(
                "at most {} datasets may be evaluated in one test",
                max_datasets
            )));
        }
        for (i, id) in body.dataset_ids.iter().enumerate() {
            if body.dataset_ids[..i].contains(id) {
                return Err(AppError::InvalidInput(format!(
                    "dataset '{}' is listed more than once",
                    id
                )));
            }
        }

        let model = self
            .models
            .get(&body.model_id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Model '{}'", body.model_id)))?;
        if model.info.group_id != body.model_group_id {
            return Err(AppError::InvalidInput(format!(
                "model '{}' does not belong to group '{}'",
                body.model_id, body.model_group_id
            )));
        }

        let mut snapshots = Vec::with_capacity(body.dataset_ids.len());
        for id in &body.dataset_ids {
            let dataset = self
                .datasets
                .get(id)
                .await
                .ok_or_else(|| AppError::NotFound(format!("Dataset '{}'", id)))?;
            if dataset.is_deleted {
                return Err(AppError::InvalidInput(format!(
                    "dataset '{}' has been deleted",
                    id
                )));
            }
            snapshots.push(DatasetSnapshot {
                id: dataset.id,
                name: dataset.name,
                n_images: dataset.n_images,
                n_frames: dataset.n_frames,
                n_samples: dataset.n_samples,
            });
        }

        let now = Utc::now();
        let record = TestRecord {
            id: Uuid::now_v7(),
            name: body.name,
            creation_time: now,
            job: JobRecord {
                id: Uuid::now_v7(),
                status: JobInfoStatus::Pending,
                message: None,
                updated_at: now,
            },
            metric: body.metric.unwrap_or(ScoreMetric::Global),
            model_info: model.info,
            datasets: snapshots,
            scores: Vec::new(),
        };

        self.tests.insert(record.clone()).await;
        Ok(record)
    }

    /// Build the wire representation of a record, joining in the live
    /// soft-delete flag for each referenced dataset.
    pub async fn to_detail(&self, record: &TestRecord) -> TestDetail {
        let mut datasets_info = Vec::with_capacity(record.datasets.len());
        for snapshot in &record.datasets {
            datasets_info.push(DatasetInfo {
                id: snapshot.id.clone(),
                name: snapshot.name.clone(),
                is_deleted: self.datasets.is_deleted(&snapshot.id).await,
                n_images: snapshot.n_images,
                n_frames: snapshot.n_frames,
                n_samples: snapshot.n_samples,
            });
        }

        TestDetail {
            id: record.id,
            name: record.name.clone(),
            creation_time: record.creation_time,
            job_info: Some(JobInfo {
                id: record.job.id,
                status: record.job.status,
            }),
            model_info: record.model_info.clone(),
            datasets_info,
            scores: record.scores.clone(),
        }
    }
}
