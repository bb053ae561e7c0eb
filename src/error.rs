// src/error.rs

use std::io;

/// 竞价评估过程中可能出现的错误
///
/// 任意一种错误都会让整个请求立即失败，不做重试，也不返回部分结果。
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BidError {
    /// 请求体不是合法 JSON（在进入核心逻辑之前）
    #[error("Invalid JSON format: {0}")]
    MalformedPayload(String),

    /// 必填字段缺失：imp、imp.id、banner、banner.w/h
    #[error("{}", .0.message())]
    MissingField(MissingField),

    /// 字段存在但取值非法，例如负数 bidfloor
    #[error("{0}")]
    InvalidValue(String),

    /// 评估资格时找不到设备上下文（device / device.os / device.geo.country）
    #[error("Missing device context: {0}")]
    MissingContext(&'static str),

    /// 所有广告活动都不满足条件
    #[error("No suitable campaign found")]
    NoEligibleCampaign,
}

/// 缺失的必填字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Imp,
    ImpId,
    Banner,
}

impl MissingField {
    pub fn message(&self) -> &'static str {
        match self {
            MissingField::Imp => "Missing or invalid 'imp' field",
            MissingField::ImpId => "Each impression must have an 'id'",
            MissingField::Banner => "Each impression must include a 'banner' with width and height",
        }
    }
}

impl BidError {
    /// 日志中使用的错误类别
    pub fn kind(&self) -> &'static str {
        match self {
            BidError::MalformedPayload(_) => "malformed_payload",
            BidError::MissingField(_) => "missing_field",
            BidError::InvalidValue(_) => "invalid_value",
            BidError::MissingContext(_) => "missing_context",
            BidError::NoEligibleCampaign => "no_eligible_campaign",
        }
    }

    pub fn invalid_bid_floor() -> Self {
        BidError::InvalidValue("Invalid bid floor value".to_string())
    }
}

/// 广告活动目录加载错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unable to read campaign catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Unable to parse campaign catalog {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid campaign #{index} ({name}): {reason}")]
    InvalidCampaign {
        index: usize,
        name: String,
        reason: String,
    },
}
