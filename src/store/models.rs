//! In-memory model registry.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};
use crate::models::{ModelInfo, ModelResponse, RegisterModelRequest};

/// A registered model version.
#[derive(Debug, Clone)]
pub struct ModelRecord {
    pub info: ModelInfo,
    pub labels: Vec<String>,
    pub registered_at: DateTime<Utc>,
}

impl ModelRecord {
    pub fn to_response(&self) -> ModelResponse {
        ModelResponse {
            info: self.info.clone(),
            labels: self.labels.clone(),
            registered_at: self.registered_at,
        }
    }
}

/// Registry of model versions available for evaluation.
#[derive(Clone, Default)]
pub struct ModelRegistry {
    inner: Arc<RwLock<HashMap<String, ModelRecord>>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model version. Fails on duplicate id or when the label
    /// list is empty.
    pub async fn register(&self, req: RegisterModelRequest) -> AppResult<ModelRecord> {
        if req.id.trim().is_empty() {
            return Err(AppError::InvalidInput("model id must not be empty".into()));
        }
        if req.labels.is_empty() {
            return Err(AppError::InvalidInput(
                "model must declare at least one label".into(),
            ));
        }

        let record = ModelRecord {
            info: ModelInfo {
                id: req.id.clone(),
                group_id: req.group_id,
                template_id: req.template_id,
                task_type: req.task_type,
                n_labels: req.labels.len() as u32,
                version: req.version,
                optimization_type: req.optimization_type,
                precision: req.precision,
            },
            labels: req.labels,
            registered_at: Utc::now(),
        };

        let mut map = self.inner.write().await;
        if map.contains_key(&record.info.id) {
            return Err(AppError::Conflict(format!(
                "model '{}' is already registered",
                record.info.id
            )));
        }
        map.insert(record.info.id.clone(), record.clone());
        Ok(record)
    }

    /// Look up a model version by id.
    pub async fn get(&self, id: &str) -> Option<ModelRecord> {
        self.inner.read().await.get(id).cloned()
    }

    /// List registered models, oldest registration first.
    pub async fn list(&self) -> Vec<ModelRecord> {
        let map = self.inner.read().await;
        let mut records: Vec<ModelRecord> = map.values().cloned().collect();
        records.sort_by(|a, b| {
            a.registered_at
                .cmp(&b.registered_at)
                .then_with(|| a.info.id.cmp(&b.info.id))
        });
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OptimizationType, TaskType};

    fn request(id: &str) -> RegisterModelRequest {
        RegisterModelRequest {
            id: id.to_string(),
            group_id: "g1".to_string(),
            template_id: "tmpl-detection".to_string(),
            task_type: TaskType::Detection,
            version: 1,
            optimization_type: OptimizationType::Mo,
            precision: vec!["FP16".to_string()],
            labels: vec!["cat".to_string(), "dog".to_string()],
        }
    }

    #[tokio::test]
    async fn test_register_derives_label_count() {
        let registry = ModelRegistry::new();
        let record = registry.register(request("m1")).await.unwrap();
        assert_eq!(record.info.n_labels, 2);
        assert!(registry.get("m1").await.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_id_conflicts() {
        let registry = ModelRegistry::new();
        registry.register(request("m1")).await.unwrap();
        let err = registry.register(request("m1")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_empty_labels_rejected() {
        let registry = ModelRegistry::new();
        let mut req = request("m1");
        req.labels.clear();
        let err = registry.register(req).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
