// src/api/handlers.rs

use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::response::SuccessEnvelope;
use crate::bidding::engine;
use crate::error::BidError;
use crate::logging::bid_log::BidLog;
use crate::openrtb::request::BidRequest;
use crate::AppState;

/// **处理竞价请求**
///
/// 请求体解析失败时不进入评估逻辑；解析成功后对当前目录快照评估一次。
pub async fn handle_bid_request(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let start = Instant::now();

    let mut body = body.to_vec();
    let bid_request = match BidRequest::from_slice(&mut body) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "rejected malformed bid request");
            return e.into_response();
        }
    };

    let request_id = bid_request
        .id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let catalog = state.config.snapshot();
    let mut bid_log = BidLog::new(&request_id);

    let result = engine::evaluate(&bid_request, catalog.campaigns()).and_then(|evaluation| {
        bid_log.record_evaluation(&evaluation);
        evaluation.winner.ok_or(BidError::NoEligibleCampaign)
    });

    let response = match result {
        Ok(campaign) => {
            info!(
                request_id = %request_id,
                campaign = %campaign.campaignname,
                price = campaign.price,
                "bid request filled"
            );
            SuccessEnvelope::new(campaign).into_response()
        }
        Err(e) => {
            bid_log.set_error(&e);
            info!(request_id = %request_id, kind = e.kind(), reason = %e, "bid request not filled");
            e.into_response()
        }
    };

    bid_log.elapsed_us = start.elapsed().as_micros();
    state.bid_log.log(&bid_log);

    response
}

/// 健康检查，返回当前目录快照信息
pub async fn health(State(state): State<Arc<AppState>>) -> Response {
    let catalog = state.config.snapshot();
    Json(json!({
        "status": "ok",
        "campaigns": catalog.len(),
        "source": catalog.source(),
        "loaded_at": catalog.loaded_at().to_rfc3339(),
    }))
    .into_response()
}
