// src/api/response.rs

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::BidError;
use crate::model::campaign::Campaign;

/// 胜出活动返回给调用方的创意信息
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CampaignCreative {
    pub name: String,
    pub advertiser: String,
    pub creative_type: String,
    pub image_url: String,
    pub landing_page_url: String,
    pub bid_price: f64,
    pub ad_id: String,
    pub creative_id: String,
}

impl From<&Campaign> for CampaignCreative {
    fn from(campaign: &Campaign) -> Self {
        Self {
            name: campaign.campaignname.clone(),
            advertiser: campaign.advertiser.clone(),
            creative_type: campaign.creative_type.clone(),
            image_url: campaign.image_url.clone(),
            landing_page_url: campaign.url.clone(),
            bid_price: campaign.price,
            ad_id: campaign.code.clone(),
            creative_id: campaign.creative_id.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SuccessEnvelope {
    pub status: String,
    pub campaign: CampaignCreative,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorEnvelope {
    pub status: String,
    pub message: String,
}

impl SuccessEnvelope {
    pub fn new(campaign: &Campaign) -> Self {
        Self {
            status: "success".to_string(),
            campaign: campaign.into(),
        }
    }
}

impl IntoResponse for SuccessEnvelope {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}

/// 所有竞价错误统一返回 400 + 错误信封
impl IntoResponse for BidError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(ErrorEnvelope::new(self.to_string()))).into_response()
    }
}

pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorEnvelope::new("Invalid request method. Please use POST.")),
    )
        .into_response()
}
