//! Dataset registry API handlers.

use actix_web::{HttpResponse, delete, get, post, web};
use tracing::info;

use crate::error::AppResult;
use crate::models::{DatasetListResponse, RegisterDatasetRequest};
use crate::store::Store;

/// Register a dataset available for evaluation.
#[utoipa::path(
    post,
    path = "/api/v1/datasets",
    tag = "Registry",
    request_body = RegisterDatasetRequest,
    responses(
        (status = 201, description = "Dataset registered", body = crate::models::DatasetResponse),
        (status = 400, description = "Invalid dataset payload", body = crate::error::ErrorResponse),
        (status = 409, description = "Dataset id already registered", body = crate::error::ErrorResponse)
    )
)]
#[post("/datasets")]
pub async fn register_dataset(
    store: web::Data<Store>,
    body: web::Json<RegisterDatasetRequest>,
) -> AppResult<HttpResponse> {
    let record = store.datasets.register(body.into_inner()).await?;
    info!(dataset_id = %record.id, n_samples = record.n_samples, "Dataset registered");
    Ok(HttpResponse::Created().json(record.to_response()))
}

/// List datasets, soft-deleted ones included (flagged).
#[utoipa::path(
    get,
    path = "/api/v1/datasets",
    tag = "Registry",
    responses(
        (status = 200, description = "Registered datasets", body = DatasetListResponse)
    )
)]
#[get("/datasets")]
pub async fn list_datasets(store: web::Data<Store>) -> AppResult<HttpResponse> {
    let datasets = store
        .datasets
        .list()
        .await
        .iter()
        .map(|r| r.to_response())
        .collect();
    Ok(HttpResponse::Ok().json(DatasetListResponse { datasets }))
}

/// Soft-delete a dataset.
///
/// The record stays readable and tests referencing it keep rendering their
/// snapshot values; only the is_deleted flag flips. Idempotent.
#[utoipa::path(
    delete,
    path = "/api/v1/datasets/{id}",
    tag = "Registry",
    params(
        ("id" = String, Path, description = "Dataset id")
    ),
    responses(
        (status = 200, description = "Dataset soft-deleted", body = crate::models::DatasetResponse),
        (status = 404, description = "Unknown dataset", body = crate::error::ErrorResponse)
    )
)]
#[delete("/datasets/{id}")]
pub async fn delete_dataset(
    store: web::Data<Store>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let record = store.datasets.soft_delete(&id).await?;
    info!(dataset_id = %id, "Dataset soft-deleted");
    Ok(HttpResponse::Ok().json(record.to_response()))
}

/// Configure dataset registry routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(register_dataset)
        .service(list_datasets)
        .service(delete_dataset);
}
