//! Model registry API handlers.

use actix_web::{HttpResponse, get, post, web};
use tracing::info;

use crate::error::AppResult;
use crate::models::{ModelListResponse, RegisterModelRequest};
use crate::store::Store;

/// Register a model version available for evaluation.
#[utoipa::path(
    post,
    path = "/api/v1/models",
    tag = "Registry",
    request_body = RegisterModelRequest,
    responses(
        (status = 201, description = "Model registered", body = crate::models::ModelResponse),
        (status = 400, description = "Invalid model payload", body = crate::error::ErrorResponse),
        (status = 409, description = "Model id already registered", body = crate::error::ErrorResponse)
    )
)]
#[post("/models")]
pub async fn register_model(
    store: web::Data<Store>,
    body: web::Json<RegisterModelRequest>,
) -> AppResult<HttpResponse> {
    let record = store.models.register(body.into_inner()).await?;
    info!(
        model_id = %record.info.id,
        group_id = %record.info.group_id,
        task_type = %record.info.task_type,
        "Model registered"
    );
    Ok(HttpResponse::Created().json(record.to_response()))
}

/// List registered models.
#[utoipa::path(
    get,
    path = "/api/v1/models",
    tag = "Registry",
    responses(
        (status = 200, description = "Registered models", body = ModelListResponse)
    )
)]
#[get("/models")]
pub async fn list_models(store: web::Data<Store>) -> AppResult<HttpResponse> {
    let models = store
        .models
        .list()
        .await
        .iter()
        .map(|r| r.to_response())
        .collect();
    Ok(HttpResponse::Ok().json(ModelListResponse { models }))
}

/// Configure model registry routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(register_model).service(list_models);
}
