// src/bidding/engine.rs

use crate::bidding::eligibility::is_campaign_eligible;
use crate::bidding::validator::validate_imp;
use crate::error::BidError;
use crate::model::campaign::Campaign;
use crate::openrtb::request::BidRequest;

/// 一次评估的结果及统计信息（用于竞价日志）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation<'a> {
    /// 最高出价的合格活动，None 表示无填充
    pub winner: Option<&'a Campaign>,
    pub impressions: usize,
    pub campaigns_tested: usize,
    pub eligible: usize,
}

/// **处理竞价请求**
///
/// 按顺序遍历每个 impression：先校验，任何一个不合法都会让整个请求失败；
/// 再按目录顺序测试每个活动，只有出价严格大于当前最高价时才替换，
/// 因此同价时保留先出现的活动，价格为 0 的活动永远不会胜出。
pub fn evaluate<'a>(request: &BidRequest, campaigns: &'a [Campaign]) -> Result<Evaluation<'a>, BidError> {
    let imps = request.impressions()?;

    let mut highest_price = 0.0;
    let mut evaluation = Evaluation {
        winner: None,
        impressions: 0,
        campaigns_tested: 0,
        eligible: 0,
    };

    for imp in imps {
        validate_imp(imp)?;
        evaluation.impressions += 1;

        for campaign in campaigns {
            evaluation.campaigns_tested += 1;
            if !is_campaign_eligible(campaign, imp, request)? {
                continue;
            }
            evaluation.eligible += 1;
            if campaign.price > highest_price {
                highest_price = campaign.price;
                evaluation.winner = Some(campaign);
            }
        }
    }

    Ok(evaluation)
}

/// 选出最高价的合格活动；`Ok(None)` 表示没有合格活动
pub fn select_best_campaign<'a>(
    request: &BidRequest,
    campaigns: &'a [Campaign],
) -> Result<Option<&'a Campaign>, BidError> {
    evaluate(request, campaigns).map(|evaluation| evaluation.winner)
}
