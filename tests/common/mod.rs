#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use rust_rtb::config::ConfigManager;
use rust_rtb::logging::bid_log_writer::BidLogWriter;
use rust_rtb::model::{Campaign, StaticCampaignSource};
use rust_rtb::{api, AppState};

pub fn campaign(name: &str, price: f64, hs_os: &str, country: &str, dimension: &str) -> Campaign {
    Campaign {
        campaignname: name.to_string(),
        advertiser: format!("{} Inc", name),
        creative_type: "banner".to_string(),
        image_url: format!("https://cdn.example.com/{}.png", name),
        url: format!("https://example.com/{}", name),
        price,
        code: format!("code-{}", name),
        creative_id: format!("creative-{}", name),
        hs_os: hs_os.to_string(),
        country: country.to_string(),
        dimension: dimension.to_string(),
    }
}

/// 测试用应用；返回的 TempDir 需要在测试期间保持存活
pub fn build_test_app(campaigns: Vec<Campaign>) -> (Router, TempDir) {
    let log_dir = tempfile::tempdir().unwrap();
    let config = ConfigManager::new(Box::new(StaticCampaignSource::new(campaigns))).unwrap();
    let bid_log = BidLogWriter::new(log_dir.path().to_str().unwrap(), 64, 10, 1000, 72);
    let state = Arc::new(AppState {
        config: Arc::new(config),
        bid_log,
    });
    (api::router(state), log_dir)
}

pub async fn send(app: Router, method: Method, uri: &str, body: impl Into<Body>) -> Response {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.into())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: &Value) -> Response {
    send(app, Method::POST, uri, body.to_string()).await
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
