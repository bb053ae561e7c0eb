// src/model/campaign.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// 广告活动配置，来自静态目录文件
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Campaign {
    pub campaignname: String,
    pub advertiser: String,
    pub creative_type: String,
    pub image_url: String,
    pub url: String,
    /// 固定出价（一价）
    pub price: f64,
    pub code: String,
    pub creative_id: String,
    /// 逗号分隔的操作系统白名单，大小写不敏感
    pub hs_os: String,
    /// 单个国家代码，大小写不敏感
    pub country: String,
    /// "WxH"，例如 "300x250"
    pub dimension: String,
}

impl Campaign {
    fn check(&self) -> Result<(), String> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(format!("price must be a non-negative number, got {}", self.price));
        }
        if self.hs_os.trim().is_empty() {
            return Err("hs_os must not be empty".to_string());
        }
        if self.country.trim().is_empty() {
            return Err("country must not be empty".to_string());
        }
        if !is_dimension(&self.dimension) {
            return Err(format!("dimension must look like WxH, got {:?}", self.dimension));
        }
        Ok(())
    }
}

fn is_dimension(s: &str) -> bool {
    match s.split_once('x') {
        Some((w, h)) => {
            !w.is_empty()
                && !h.is_empty()
                && w.bytes().all(|b| b.is_ascii_digit())
                && h.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

/// 广告活动目录快照，加载后只读
#[derive(Debug, Clone)]
pub struct CampaignCatalog {
    campaigns: Vec<Campaign>,
    source: String,
    loaded_at: DateTime<Utc>,
}

impl CampaignCatalog {
    /// 校验每个活动后冻结为快照，保持原有顺序
    pub fn new(campaigns: Vec<Campaign>, source: impl Into<String>) -> Result<Self, ConfigError> {
        for (index, campaign) in campaigns.iter().enumerate() {
            campaign.check().map_err(|reason| ConfigError::InvalidCampaign {
                index,
                name: campaign.campaignname.clone(),
                reason,
            })?;
        }
        Ok(Self {
            campaigns,
            source: source.into(),
            loaded_at: Utc::now(),
        })
    }

    pub fn campaigns(&self) -> &[Campaign] {
        &self.campaigns
    }

    pub fn len(&self) -> usize {
        self.campaigns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}
