use super::*;
use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use shared::error::FailureKind;
use tokio::net::TcpListener;

async fn handle_breed_list() -> Json<Value> {
    Json(json!({
        "status": "success",
        "message": {
            "akita": [],
            "bulldog": ["boston", "english", "french"],
            "setter": ["english", "gordon", "irish"]
        }
    }))
}

async fn handle_random_image() -> Json<Value> {
    Json(json!({
        "status": "success",
        "message": "https://images.dog.ceo/breeds/setter-irish/n02100877_1.jpg"
    }))
}

async fn handle_breed_images(Path((breed, count)): Path<(String, usize)>) -> impl IntoResponse {
    if breed == "boxer" {
        let urls: Vec<_> = (0..count)
            .map(|n| format!("https://images.dog.ceo/breeds/boxer/n{n}.jpg"))
            .collect();
        return (
            StatusCode::OK,
            Json(json!({ "status": "success", "message": urls })),
        );
    }
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "status": "error",
            "message": "Breed not found (main breed does not exist)",
            "code": 404
        })),
    )
}

async fn handle_server_error() -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded")
}

async fn handle_garbled() -> &'static str {
    "definitely not json"
}

async fn handle_wrong_shape() -> Json<Value> {
    Json(json!({ "status": "success", "message": "should have been a map" }))
}

async fn handle_unordered_breed_list() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        r#"{"status":"success","message":{"zebra-dog":[],"akita":[],"mastiff":["bull","english"]}}"#,
    )
}

async fn spawn_dog_api_server() -> anyhow::Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new()
        .route("/api/breeds/list/all", get(handle_breed_list))
        .route("/api/breeds/image/random", get(handle_random_image))
        .route(
            "/api/breed/:breed/images/random/:count",
            get(handle_breed_images),
        )
        .route("/broken/breeds/image/random", get(handle_server_error))
        .route("/garbled/breeds/image/random", get(handle_garbled))
        .route("/wrongshape/breeds/list/all", get(handle_wrong_shape))
        .route("/unordered/breeds/list/all", get(handle_unordered_breed_list));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

#[test]
fn base_url_gets_trailing_slash() {
    let url = parse_base_url("https://dog.ceo/api").expect("valid base");
    assert_eq!(url.as_str(), "https://dog.ceo/api/");
    assert_eq!(
        url.join(random_image_path()).expect("join").as_str(),
        "https://dog.ceo/api/breeds/image/random"
    );
    assert_eq!(
        parse_base_url(" https://dog.ceo/api/ ").expect("valid base"),
        url
    );
}

#[test]
fn rejects_non_http_base_urls() {
    assert!(matches!(
        parse_base_url("not a url"),
        Err(DogApiError::InvalidBaseUrl(_))
    ));
    assert!(matches!(
        parse_base_url("mailto:dogs@example.com"),
        Err(DogApiError::InvalidBaseUrl(_))
    ));
    assert!(HttpDogApi::new(DEFAULT_API_BASE_URL).is_ok());
}

#[tokio::test]
async fn lists_breed_names_only() {
    let server = spawn_dog_api_server().await.expect("spawn server");
    let api = HttpDogApi::new(&format!("{server}/api")).expect("client");

    let breeds = api.list_breeds().await.expect("breeds");

    assert_eq!(breeds, vec!["akita", "bulldog", "setter"]);
}

#[tokio::test]
async fn breed_names_keep_response_order() {
    let server = spawn_dog_api_server().await.expect("spawn server");
    let api = HttpDogApi::new(&format!("{server}/unordered")).expect("client");

    let breeds = api.list_breeds().await.expect("breeds");

    assert_eq!(breeds, vec!["zebra-dog", "akita", "mastiff"]);
}

#[tokio::test]
async fn breed_outside_one_path_segment_is_rejected() {
    let server = spawn_dog_api_server().await.expect("spawn server");
    let api = HttpDogApi::new(&format!("{server}/api")).expect("client");

    let err = api
        .breed_images("../../breeds/list/all", 8)
        .await
        .expect_err("traversal must fail");

    assert!(matches!(&err, DogApiError::InvalidBreed(breed) if breed == "../../breeds/list/all"));
    assert_eq!(err.kind(), FailureKind::Transport);
    assert!(err.endpoint().is_none());
}

#[tokio::test]
async fn fetches_random_image_url() {
    let server = spawn_dog_api_server().await.expect("spawn server");
    let api = HttpDogApi::new(&format!("{server}/api/")).expect("client");

    let url = api.random_image().await.expect("random image");

    assert!(url.ends_with("setter-irish/n02100877_1.jpg"));
}

#[tokio::test]
async fn requests_breed_images_with_count() {
    let server = spawn_dog_api_server().await.expect("spawn server");
    let api = HttpDogApi::new(&format!("{server}/api")).expect("client");

    let urls = api.breed_images("boxer", 8).await.expect("breed images");

    assert_eq!(urls.len(), 8);
    assert!(urls.iter().all(|url| url.contains("/breeds/boxer/")));
}

#[tokio::test]
async fn unknown_breed_maps_to_upstream_failure() {
    let server = spawn_dog_api_server().await.expect("spawn server");
    let api = HttpDogApi::new(&format!("{server}/api")).expect("client");

    let err = api
        .breed_images("wolfhound", 8)
        .await
        .expect_err("unknown breed must fail");

    assert_eq!(err.kind(), FailureKind::Upstream);
    match &err {
        DogApiError::Upstream { status, detail, .. } => {
            assert_eq!(status, "error");
            assert!(detail.starts_with("Breed not found"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err
        .endpoint()
        .expect("endpoint")
        .ends_with("/api/breed/wolfhound/images/random/8"));
}

#[tokio::test]
async fn non_json_error_status_maps_to_http_status() {
    let server = spawn_dog_api_server().await.expect("spawn server");
    let api = HttpDogApi::new(&format!("{server}/broken")).expect("client");

    let err = api.random_image().await.expect_err("500 must fail");

    assert_eq!(err.kind(), FailureKind::Transport);
    assert!(matches!(
        err,
        DogApiError::HttpStatus { status, .. } if status == StatusCode::INTERNAL_SERVER_ERROR
    ));
}

#[tokio::test]
async fn garbled_success_body_maps_to_decode() {
    let server = spawn_dog_api_server().await.expect("spawn server");
    let api = HttpDogApi::new(&format!("{server}/garbled")).expect("client");

    let err = api.random_image().await.expect_err("garbled body must fail");

    assert!(matches!(err, DogApiError::Decode { .. }));
    assert_eq!(err.kind(), FailureKind::Transport);
}

#[tokio::test]
async fn wrong_message_shape_maps_to_decode() {
    let server = spawn_dog_api_server().await.expect("spawn server");
    let api = HttpDogApi::new(&format!("{server}/wrongshape")).expect("client");

    let err = api.list_breeds().await.expect_err("shape mismatch must fail");

    assert!(matches!(err, DogApiError::Decode { .. }));
}

#[tokio::test]
async fn unreachable_server_maps_to_transport() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let api = HttpDogApi::new(&format!("http://{addr}/api")).expect("client");

    let err = api.list_breeds().await.expect_err("closed port must fail");

    assert!(matches!(err, DogApiError::Transport { .. }));
    assert_eq!(err.kind(), FailureKind::Transport);
}
