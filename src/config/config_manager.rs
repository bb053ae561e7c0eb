// src/config/config_manager.rs

use std::sync::{Arc, RwLock};

use tracing::{info, warn};

use crate::error::ConfigError;
use crate::model::adapters::CampaignSource;
use crate::model::campaign::CampaignCatalog;

/// **广告活动目录管理器**
///
/// 持有当前生效的只读快照。请求通过 `snapshot()` 拿到 `Arc` 后独立评估，
/// 重新加载只替换指针，不会修改正在被使用的快照。
pub struct ConfigManager {
    source: Box<dyn CampaignSource>,
    current: RwLock<Arc<CampaignCatalog>>,
}

impl ConfigManager {
    /// 首次加载失败直接返回错误，服务不启动
    pub fn new(source: Box<dyn CampaignSource>) -> Result<Self, ConfigError> {
        let catalog = Self::build(source.as_ref())?;
        info!(
            source = %catalog.source(),
            campaigns = catalog.len(),
            "campaign catalog loaded"
        );
        Ok(Self {
            source,
            current: RwLock::new(Arc::new(catalog)),
        })
    }

    pub fn snapshot(&self) -> Arc<CampaignCatalog> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// 重新加载目录；失败时保留旧快照继续服务
    pub fn reload(&self) -> Result<Arc<CampaignCatalog>, ConfigError> {
        let catalog = match Self::build(self.source.as_ref()) {
            Ok(catalog) => Arc::new(catalog),
            Err(e) => {
                warn!(error = %e, "campaign catalog reload failed, keeping previous snapshot");
                return Err(e);
            }
        };

        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = catalog.clone();
        info!(
            source = %catalog.source(),
            campaigns = catalog.len(),
            "campaign catalog reloaded"
        );
        Ok(catalog)
    }

    fn build(source: &dyn CampaignSource) -> Result<CampaignCatalog, ConfigError> {
        CampaignCatalog::new(source.load()?, source.describe())
    }
}
