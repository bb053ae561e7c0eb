// src/logging/bid_log.rs

use chrono::{FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::bidding::engine::Evaluation;
use crate::error::BidError;
use crate::model::campaign::Campaign;

/// **竞价评估日志**，每个请求一条
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BidLog {
    pub timestamp: String,
    pub log_type: String,
    pub request_id: String,
    /// "success"、"no_fill" 或 "rejected"
    pub outcome: String,
    pub error_kind: Option<String>,
    pub error_message: Option<String>,
    pub impressions: usize,
    pub campaigns_tested: usize,
    pub eligible: usize,
    pub winning_campaign: Option<String>,
    pub winning_code: Option<String>,
    pub winning_price: f64,
    pub elapsed_us: u128,
}

impl BidLog {
    pub fn new(request_id: &str) -> Self {
        Self {
            timestamp: local_timestamp(),
            log_type: "rtb_bid_request".to_string(),
            request_id: request_id.to_string(),
            outcome: "rejected".to_string(),
            error_kind: None,
            error_message: None,
            impressions: 0,
            campaigns_tested: 0,
            eligible: 0,
            winning_campaign: None,
            winning_code: None,
            winning_price: 0.0,
            elapsed_us: 0,
        }
    }

    /// 记录评估统计；没有胜出者时标记为 no_fill
    pub fn record_evaluation(&mut self, evaluation: &Evaluation<'_>) {
        self.impressions = evaluation.impressions;
        self.campaigns_tested = evaluation.campaigns_tested;
        self.eligible = evaluation.eligible;
        match evaluation.winner {
            Some(campaign) => self.set_winner(campaign),
            None => self.set_error(&BidError::NoEligibleCampaign),
        }
    }

    pub fn set_winner(&mut self, campaign: &Campaign) {
        self.outcome = "success".to_string();
        self.error_kind = None;
        self.error_message = None;
        self.winning_campaign = Some(campaign.campaignname.clone());
        self.winning_code = Some(campaign.code.clone());
        self.winning_price = campaign.price;
    }

    pub fn set_error(&mut self, error: &BidError) {
        self.outcome = match error {
            BidError::NoEligibleCampaign => "no_fill",
            _ => "rejected",
        }
        .to_string();
        self.error_kind = Some(error.kind().to_string());
        self.error_message = Some(error.to_string());
    }
}

/// 东八区 RFC3339 时间戳
fn local_timestamp() -> String {
    let now = Utc::now();
    match FixedOffset::east_opt(8 * 3600) {
        Some(tz) => now.with_timezone(&tz).to_rfc3339(),
        None => now.to_rfc3339(),
    }
}
