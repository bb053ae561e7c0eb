// src/model/adapters.rs

use std::fs;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::model::campaign::Campaign;

/// 广告活动来源，ConfigManager 通过它加载 / 重新加载目录
pub trait CampaignSource: Send + Sync {
    fn load(&self) -> Result<Vec<Campaign>, ConfigError>;

    /// 日志里展示的来源描述
    fn describe(&self) -> String;
}

/// 从 JSON 数组文件读取广告活动
pub struct FileCampaignSource {
    pub path: PathBuf,
}

impl FileCampaignSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CampaignSource for FileCampaignSource {
    fn load(&self) -> Result<Vec<Campaign>, ConfigError> {
        let path = self.path.display().to_string();
        let content = fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

/// 内存中的固定目录
pub struct StaticCampaignSource {
    campaigns: Vec<Campaign>,
}

impl StaticCampaignSource {
    pub fn new(campaigns: Vec<Campaign>) -> Self {
        Self { campaigns }
    }
}

impl CampaignSource for StaticCampaignSource {
    fn load(&self) -> Result<Vec<Campaign>, ConfigError> {
        Ok(self.campaigns.clone())
    }

    fn describe(&self) -> String {
        format!("static:{}", self.campaigns.len())
    }
}
