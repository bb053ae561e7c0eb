// src/bidding/eligibility.rs

use crate::error::BidError;
use crate::model::campaign::Campaign;
use crate::openrtb::request::{BidRequest, Impression};

/// 设备操作系统是否在活动的 hs_os 白名单中（逗号分隔，不去除空白）
pub fn os_match(campaign: &Campaign, os: &str) -> bool {
    let os = os.to_lowercase();
    campaign
        .hs_os
        .to_lowercase()
        .split(',')
        .any(|allowed| allowed == os)
}

pub fn country_match(campaign: &Campaign, country: &str) -> bool {
    campaign.country.to_lowercase() == country.to_lowercase()
}

/// banner.format 中至少有一个尺寸与活动 dimension 完全一致
pub fn dimension_match(campaign: &Campaign, imp: &Impression) -> bool {
    imp.format_dimensions()
        .iter()
        .any(|dimension| *dimension == campaign.dimension)
}

pub fn bid_floor_match(campaign: &Campaign, bid_floor: f64) -> bool {
    campaign.price >= bid_floor
}

/// **判断活动对某个 impression 是否满足全部四个条件**
///
/// 设备上下文在这里才读取，缺失时返回 MissingContext。
pub fn is_campaign_eligible(
    campaign: &Campaign,
    imp: &Impression,
    request: &BidRequest,
) -> Result<bool, BidError> {
    let os = os_match(campaign, request.device_os()?);
    let country = country_match(campaign, request.device_country()?);
    let dimension = dimension_match(campaign, imp);
    let floor = bid_floor_match(campaign, imp.bid_floor()?);

    Ok(os && country && dimension && floor)
}
