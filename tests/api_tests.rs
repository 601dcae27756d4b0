//! Integration tests for the evaluation test API.
//!
//! Exercise the full HTTP surface against the in-memory store: registry
//! seeding, launching tests, worker status callbacks, and soft deletion.

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use serde_json::{Value, json};

use model_eval_test_server::api;
use model_eval_test_server::config::{Config, Environment};
use model_eval_test_server::services::EventBroadcaster;
use model_eval_test_server::store::Store;

fn test_config() -> Config {
    Config {
        environment: Environment::Development,
        host: "127.0.0.1".to_string(),
        port: 0,
        allowed_origin: None,
        job_timeout_minutes: 120,
        max_datasets_per_test: 50,
    }
}

macro_rules! spawn_app {
    () => {{
        test::init_service(
            App::new()
                .app_data(web::Data::new(Store::new()))
                .app_data(web::Data::new(EventBroadcaster::new()))
                .app_data(web::Data::new(test_config()))
                .service(
                    web::scope("/api/v1")
                        .configure(api::configure_health_routes)
                        .configure(api::configure_model_routes)
                        .configure(api::configure_dataset_routes)
                        .configure(api::configure_test_routes)
                        .configure(api::configure_job_routes),
                ),
        )
        .await
    }};
}

async fn seed_registries<S, B>(app: &S)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/models")
        .set_json(json!({
            "id": "m1",
            "group_id": "g1",
            "template_id": "tmpl-detection",
            "task_type": "detection",
            "version": 2,
            "optimization_type": "MO",
            "precision": ["FP16"],
            "labels": ["cat", "dog"]
        }))
        .to_request();
    assert_eq!(test::call_service(app, req).await.status(), 201);

    for (id, images) in [("d1", 40), ("d2", 10)] {
        let req = test::TestRequest::post()
            .uri("/api/v1/datasets")
            .set_json(json!({
                "id": id,
                "name": format!("dataset {id}"),
                "n_images": images,
                "n_frames": 0,
                "n_samples": images
            }))
            .to_request();
        assert_eq!(test::call_service(app, req).await.status(), 201);
    }
}

async fn launch_test<S, B>(app: &S, name: &str) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
    B::Error: std::fmt::Debug,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/tests")
        .set_json(json!({
            "name": name,
            "model_group_id": "g1",
            "model_id": "m1",
            "dataset_ids": ["d1", "d2"]
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 201);
    test::read_body_json(resp).await
}

#[actix_rt::test]
async fn test_health_endpoint() {
    let app = spawn_app!();

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
}

#[actix_rt::test]
async fn test_run_test_creates_pending_job_with_snapshots() {
    let app = spawn_app!();
    seed_registries(&app).await;

    let body = launch_test(&app, "t1").await;

    assert_eq!(body["job_info"]["status"], "PENDING");
    assert_eq!(body["model_info"]["version"], 2);
    assert_eq!(body["model_info"]["n_labels"], 2);
    assert_eq!(body["model_info"]["optimization_type"], "MO");
    assert_eq!(body["model_info"]["task_type"], "detection");
    assert_eq!(body["datasets_info"][0]["id"], "d1");
    assert_eq!(body["datasets_info"][0]["is_deleted"], false);
    assert_eq!(body["datasets_info"][1]["n_images"], 10);
    assert_eq!(body["scores"].as_array().unwrap().len(), 0);
}

#[actix_rt::test]
async fn test_worker_flow_records_scores_on_done() {
    let app = spawn_app!();
    seed_registries(&app).await;
    let created = launch_test(&app, "t1").await;
    let test_id = created["id"].as_str().unwrap().to_string();
    let job_id = created["job_info"]["id"].as_str().unwrap().to_string();

    // Worker reports progress.
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/jobs/{}/status", job_id))
        .set_json(json!({ "status": "INFERRING" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    // Worker finishes with a model-level and a per-label score.
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/jobs/{}/status", job_id))
        .set_json(json!({
            "status": "DONE",
            "scores": [
                { "label_id": null, "name": "F-measure", "value": 0.82 },
                { "label_id": "cat", "name": "F-measure", "value": 0.91 }
            ]
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/tests/{}", test_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["job_info"]["status"], "DONE");
    let scores = body["scores"].as_array().unwrap();
    assert_eq!(scores.len(), 2);
    assert!(scores[0]["label_id"].is_null());
    assert_eq!(scores[1]["label_id"], "cat");
}

#[actix_rt::test]
async fn test_backward_transition_is_conflict() {
    let app = spawn_app!();
    seed_registries(&app).await;
    let created = launch_test(&app, "t1").await;
    let job_id = created["job_info"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/jobs/{}/status", job_id))
        .set_json(json!({ "status": "EVALUATING" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/jobs/{}/status", job_id))
        .set_json(json!({ "status": "INFERRING" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "CONFLICT");
}

#[actix_rt::test]
async fn test_unknown_status_string_is_rejected() {
    let app = spawn_app!();
    seed_registries(&app).await;
    let created = launch_test(&app, "t1").await;
    let job_id = created["job_info"]["id"].as_str().unwrap().to_string();

    // An eighth status value must fail loudly at the boundary.
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/jobs/{}/status", job_id))
        .set_json(json!({ "status": "OPTIMIZING" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
async fn test_run_test_validation_errors() {
    let app = spawn_app!();
    seed_registries(&app).await;

    // Empty name.
    let req = test::TestRequest::post()
        .uri("/api/v1/tests")
        .set_json(json!({
            "name": "",
            "model_group_id": "g1",
            "model_id": "m1",
            "dataset_ids": ["d1"]
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);

    // Empty dataset list.
    let req = test::TestRequest::post()
        .uri("/api/v1/tests")
        .set_json(json!({
            "name": "t1",
            "model_group_id": "g1",
            "model_id": "m1",
            "dataset_ids": []
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);

    // Unknown model.
    let req = test::TestRequest::post()
        .uri("/api/v1/tests")
        .set_json(json!({
            "name": "t1",
            "model_group_id": "g1",
            "model_id": "missing",
            "dataset_ids": ["d1"]
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);

    // Unknown dataset.
    let req = test::TestRequest::post()
        .uri("/api/v1/tests")
        .set_json(json!({
            "name": "t1",
            "model_group_id": "g1",
            "model_id": "m1",
            "dataset_ids": ["d1", "missing"]
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}

#[actix_rt::test]
async fn test_soft_deleted_dataset_flags_existing_tests() {
    let app = spawn_app!();
    seed_registries(&app).await;
    let created = launch_test(&app, "t1").await;
    let test_id = created["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::delete()
        .uri("/api/v1/datasets/d1")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    // The recorded test stays readable; the flag flips, counts stay snapshot.
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/tests/{}", test_id))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["datasets_info"][0]["is_deleted"], true);
    assert_eq!(body["datasets_info"][0]["n_images"], 40);
    assert_eq!(body["datasets_info"][1]["is_deleted"], false);

    // But new tests can no longer reference it.
    let req = test::TestRequest::post()
        .uri("/api/v1/tests")
        .set_json(json!({
            "name": "t2",
            "model_group_id": "g1",
            "model_id": "m1",
            "dataset_ids": ["d1"]
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);
}

#[actix_rt::test]
async fn test_list_tests_filters_by_status() {
    let app = spawn_app!();
    seed_registries(&app).await;
    let first = launch_test(&app, "t1").await;
    launch_test(&app, "t2").await;

    let job_id = first["job_info"]["id"].as_str().unwrap().to_string();
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/jobs/{}/status", job_id))
        .set_json(json!({ "status": "DONE", "scores": [] }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let req = test::TestRequest::get()
        .uri("/api/v1/tests?status=DONE")
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["test_results"].as_array().unwrap().len(), 1);
    assert_eq!(body["test_results"][0]["name"], "t1");
    assert_eq!(body["pagination"]["total"], 1);

    // Unknown filter value is a client error, not an empty list.
    let req = test::TestRequest::get()
        .uri("/api/v1/tests?status=bogus")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);
}

#[actix_rt::test]
async fn test_delete_test() {
    let app = spawn_app!();
    seed_registries(&app).await;
    let created = launch_test(&app, "t1").await;
    let test_id = created["id"].as_str().unwrap().to_string();
    let job_id = created["job_info"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/tests/{}", test_id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 204);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/tests/{}", test_id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);

    // The job index entry goes with it.
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/jobs/{}", job_id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}
