// src/bidding/validator.rs

use crate::error::{BidError, MissingField};
use crate::openrtb::request::Impression;

/// **校验单个 impression 的结构**
///
/// 只检查字段是否存在以及 bidfloor 是否合法，不检查 banner.format。
pub fn validate_imp(imp: &Impression) -> Result<(), BidError> {
    if !imp.has_id() {
        return Err(BidError::MissingField(MissingField::ImpId));
    }

    if !imp.has_banner_size() {
        return Err(BidError::MissingField(MissingField::Banner));
    }

    imp.bid_floor()?;

    Ok(())
}
