#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use nutriplan::app::build_app;
use nutriplan::catalog::Catalog;
use nutriplan::config::AppConfig;
use nutriplan::state::AppState;

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: String::new(),
        host: "127.0.0.1".to_string(),
        port: 0,
        catalog_data_dir: "./data".into(),
        static_dir: "./public".into(),
    }
}

/// A small fixed catalog so the reference routes serve predictable data.
pub fn test_catalog() -> Catalog {
    Catalog::from_csv(
        "id,name\nC1,Fruits\nC2,Vegetables",
        concat!(
            "foodId,kcal,protein,lipids,carbohydrates\n",
            "F1,89,1.1,0.3,23\n",
            "F2,25,2.8,0.4,4.9",
        ),
        concat!(
            "id,name,categoryId\n",
            "F1,Banana crua,C1\n",
            "F2,Broccoli cozido,C2\n",
            "F3,Banana frita,C1",
        ),
    )
    .expect("test catalog")
}

/// Build the full application router the way `main` does, so tests exercise
/// the same routing and middleware stack as production.
pub fn build_test_app(pool: PgPool) -> Router {
    let state = AppState::from_parts(pool, Arc::new(test_config()), Arc::new(test_catalog()));
    build_app(state)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    request_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    request_json(app, Method::PUT, uri, body).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

async fn request_json(app: Router, method: Method, uri: &str, body: Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_json(res: Response<Body>) -> Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
