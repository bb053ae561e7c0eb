// src/logging/logger.rs

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// 运行日志文件名前缀（按小时滚动）
pub const RUNTIME_LOG_FILE: &str = "rtb.json";

/// **初始化全局 tracing 日志**
///
/// JSON 格式写入按小时滚动的文件，同时在终端输出简洁格式。
/// 返回的 guard 必须一直持有，否则后台写线程退出后日志会丢失。
pub fn init(log_dir: &str) -> Result<WorkerGuard, tracing_subscriber::util::TryInitError> {
    let log_file = rolling::hourly(log_dir, RUNTIME_LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(log_file);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    Registry::default()
        .with(filter)
        .with(fmt::layer().json().with_writer(non_blocking))
        .with(fmt::layer().compact().with_target(false))
        .try_init()?;

    Ok(guard)
}
