//! Job API handlers: worker progress callbacks and job status reads.

use actix_web::{HttpResponse, get, post, web};
use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{JobDetailResponse, JobStatusUpdate, WsEvent, WsEventMessage};
use crate::services::EventBroadcaster;
use crate::store::Store;

/// Worker callback reporting evaluation progress.
///
/// Transitions may skip forward through the lifecycle but never move
/// backward or leave a terminal status; scores are only accepted with DONE.
#[utoipa::path(
    post,
    path = "/api/v1/jobs/{job_id}/status",
    tag = "Jobs",
    params(
        ("job_id" = Uuid, Path, description = "Job UUID")
    ),
    request_body = JobStatusUpdate,
    responses(
        (status = 200, description = "Job updated", body = JobDetailResponse),
        (status = 400, description = "Invalid update", body = crate::error::ErrorResponse),
        (status = 404, description = "Unknown job", body = crate::error::ErrorResponse),
        (status = 409, description = "Illegal status transition", body = crate::error::ErrorResponse)
    )
)]
#[post("/jobs/{job_id}/status")]
pub async fn update_job_status(
    store: web::Data<Store>,
    broadcaster: web::Data<EventBroadcaster>,
    path: web::Path<Uuid>,
    body: web::Json<JobStatusUpdate>,
) -> AppResult<HttpResponse> {
    let job_id = path.into_inner();
    let record = store.tests.apply_job_update(job_id, body.into_inner()).await?;

    info!(
        job_id = %job_id,
        test_id = %record.id,
        status = %record.job.status,
        "Job status updated"
    );

    broadcaster.send(WsEventMessage::new(WsEvent::job_updated(
        record.id,
        record.job.id,
        record.job.status,
        record.job.message.clone(),
    )));

    Ok(HttpResponse::Ok().json(JobDetailResponse {
        id: record.job.id,
        test_id: record.id,
        status: record.job.status,
        message: record.job.message,
        updated_at: record.job.updated_at,
    }))
}

/// Fetch the current state of a job.
#[utoipa::path(
    get,
    path = "/api/v1/jobs/{job_id}",
    tag = "Jobs",
    params(
        ("job_id" = Uuid, Path, description = "Job UUID")
    ),
    responses(
        (status = 200, description = "Job", body = JobDetailResponse),
        (status = 404, description = "Unknown job", body = crate::error::ErrorResponse)
    )
)]
#[get("/jobs/{job_id}")]
pub async fn get_job(store: web::Data<Store>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let job_id = path.into_inner();
    let record = store
        .tests
        .get_by_job(job_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Job '{}'", job_id)))?;

    Ok(HttpResponse::Ok().json(JobDetailResponse {
        id: record.job.id,
        test_id: record.id,
        status: record.job.status,
        message: record.job.message,
        updated_at: record.job.updated_at,
    }))
}

/// Configure job routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(update_job_status).service(get_job);
}
