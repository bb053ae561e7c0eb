// src/logging/bid_log_writer.rs

use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration as StdDuration, SystemTime};

use tokio::sync::mpsc::{self, error::TrySendError, Receiver, Sender};
use tokio::sync::oneshot;
use tokio::task;
use tokio::time::{self, Duration};
use tracing::{debug, error, warn};
use tracing_appender::rolling;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::MakeWriter;

use crate::logging::bid_log::BidLog;

/// 竞价日志文件名前缀（按小时滚动）
pub const BID_LOG_FILE: &str = "bid_log.json";

enum Command {
    Line(String),
    Flush(oneshot::Sender<()>),
}

/// **竞价日志写入器**
///
/// 请求路径上只做一次非阻塞入队，后台任务按批量或定时写入滚动文件。
pub struct BidLogWriter {
    sender: Sender<Command>,
}

impl BidLogWriter {
    /// - `log_dir`: 日志目录
    /// - `buffer_size`: mpsc 通道容量，满了以后新日志会被丢弃
    /// - `batch_size`: 攒够多少条立即写盘
    /// - `flush_interval`: 定时写盘间隔（毫秒）
    /// - `retention_hours`: 超过该时长的日志文件会被后台清理
    pub fn new(
        log_dir: &str,
        buffer_size: usize,
        batch_size: usize,
        flush_interval: u64,
        retention_hours: u64,
    ) -> Arc<Self> {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let appender = Arc::new(rolling::hourly(log_dir, BID_LOG_FILE));
        tokio::spawn(Self::background_log_writer(appender, receiver, batch_size, flush_interval));

        let log_dir = log_dir.to_string();
        tokio::spawn(async move {
            let cleanup_interval = Duration::from_secs(3600);
            loop {
                cleanup_old_logs(&log_dir, retention_hours).await;
                time::sleep(cleanup_interval).await;
            }
        });

        Arc::new(Self { sender })
    }

    /// 记录一条竞价日志，通道已满时丢弃
    pub fn log(&self, entry: &BidLog) {
        let line = match serde_json::to_string(entry) {
            Ok(line) => line,
            Err(e) => {
                error!(error = %e, "failed to serialize bid log");
                return;
            }
        };
        match self.sender.try_send(Command::Line(line)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                warn!(request_id = %entry.request_id, "bid log buffer full, entry dropped");
            }
            Err(TrySendError::Closed(_)) => {
                warn!(request_id = %entry.request_id, "bid log writer stopped, entry dropped");
            }
        }
    }

    /// 把缓冲区中的日志全部写盘后返回
    pub async fn shutdown(&self) {
        let (ack, done) = oneshot::channel();
        if self.sender.send(Command::Flush(ack)).await.is_ok() {
            let _ = done.await;
        }
    }

    async fn background_log_writer(
        appender: Arc<RollingFileAppender>,
        mut receiver: Receiver<Command>,
        batch_size: usize,
        flush_interval: u64,
    ) {
        let mut buffer = Vec::with_capacity(batch_size);
        let mut interval = time::interval(Duration::from_millis(flush_interval));
        loop {
            tokio::select! {
                command = receiver.recv() => match command {
                    Some(Command::Line(line)) => {
                        buffer.push(line);
                        if buffer.len() >= batch_size {
                            Self::write_logs_to_disk(appender.clone(), &mut buffer).await;
                        }
                    }
                    Some(Command::Flush(ack)) => {
                        Self::write_logs_to_disk(appender.clone(), &mut buffer).await;
                        let _ = ack.send(());
                    }
                    None => {
                        Self::write_logs_to_disk(appender.clone(), &mut buffer).await;
                        break;
                    }
                },
                _ = interval.tick() => {
                    Self::write_logs_to_disk(appender.clone(), &mut buffer).await;
                }
            }
        }
    }

    async fn write_logs_to_disk(file: Arc<RollingFileAppender>, buffer: &mut Vec<String>) {
        if buffer.is_empty() {
            return;
        }
        let content = buffer.join("\n") + "\n";
        buffer.clear();

        let result = task::spawn_blocking(move || {
            let mut writer = MakeWriter::make_writer(&*file);
            writer.write_all(content.as_bytes())?;
            writer.flush()
        })
        .await;

        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!(error = %e, "failed to write bid logs"),
            Err(e) => error!(error = %e, "bid log write task failed"),
        }
    }
}

/// 删除目录中超过保留时长的竞价日志和运行日志
pub async fn cleanup_old_logs(log_dir: &str, retention_hours: u64) {
    let retention = StdDuration::from_secs(retention_hours * 3600);
    let now = SystemTime::now();
    let mut dir = match tokio::fs::read_dir(log_dir).await {
        Ok(dir) => dir,
        Err(e) => {
            warn!(log_dir, error = %e, "failed to read log directory");
            return;
        }
    };

    while let Ok(Some(entry)) = dir.next_entry().await {
        let path = entry.path();
        if !is_managed_log(&path) {
            continue;
        }
        let Ok(modified) = entry.metadata().await.and_then(|m| m.modified()) else {
            continue;
        };
        if now.duration_since(modified).unwrap_or_default() > retention {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => debug!(path = %path.display(), "deleted old log file"),
                Err(e) => warn!(path = %path.display(), error = %e, "failed to delete old log file"),
            }
        }
    }
}

fn is_managed_log(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| {
            name.starts_with(BID_LOG_FILE) || name.starts_with(crate::logging::logger::RUNTIME_LOG_FILE)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn read_all(dir: &Path) -> String {
        let mut content = String::new();
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if is_managed_log(&path) {
                content.push_str(&fs::read_to_string(path).unwrap());
            }
        }
        content
    }

    #[tokio::test]
    async fn shutdown_flushes_pending_lines() {
        let dir = tempfile::tempdir().unwrap();
        let writer = BidLogWriter::new(dir.path().to_str().unwrap(), 16, 100, 60_000, 72);

        writer.log(&BidLog::new("req-a"));
        writer.log(&BidLog::new("req-b"));
        writer.shutdown().await;

        let content = read_all(dir.path());
        let lines: Vec<BidLog> = content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].request_id, "req-a");
        assert_eq!(lines[1].request_id, "req-b");
    }

    #[tokio::test]
    async fn batch_size_triggers_write() {
        let dir = tempfile::tempdir().unwrap();
        let writer = BidLogWriter::new(dir.path().to_str().unwrap(), 16, 1, 60_000, 72);

        writer.log(&BidLog::new("req-batch"));
        writer.shutdown().await;

        assert!(read_all(dir.path()).contains("req-batch"));
    }

    #[tokio::test]
    async fn cleanup_only_touches_managed_files() {
        let dir = tempfile::tempdir().unwrap();
        let old_log = dir.path().join("bid_log.json.2020-01-01-00");
        let other = dir.path().join("notes.txt");
        fs::write(&old_log, "{}\n").unwrap();
        fs::write(&other, "keep me").unwrap();
        time::sleep(Duration::from_millis(20)).await;

        cleanup_old_logs(dir.path().to_str().unwrap(), 0).await;

        assert!(!old_log.exists());
        assert!(other.exists());
    }
}
