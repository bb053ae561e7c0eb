// src/config/cli.rs

use std::path::PathBuf;

use clap::Parser;

/// 命令行参数，同时支持 RTB_* 环境变量
#[derive(Parser, Debug, Clone)]
#[command(author = "whiteCcinn", version = "1.0", about = "A first-price RTB campaign selector")]
pub struct CliArgs {
    #[arg(long, env = "RTB_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(short, long, env = "RTB_PORT", default_value_t = 8080)]
    pub port: u16,

    /// 广告活动目录（JSON 数组）
    #[arg(long, env = "RTB_CAMPAIGNS", default_value = "static/campaigns.json")]
    pub campaigns: PathBuf,

    #[arg(long, env = "RTB_LOG_DIR", default_value = "logs")]
    pub log_dir: String,

    /// 竞价日志保留时长（小时）
    #[arg(long, default_value_t = 72)]
    pub log_retention_hours: u64,
}

impl CliArgs {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = CliArgs::try_parse_from(["rust-rtb"]).unwrap();
        assert_eq!(args.port, 8080);
        assert_eq!(args.campaigns, PathBuf::from("static/campaigns.json"));
        assert_eq!(args.log_retention_hours, 72);
    }

    #[test]
    fn flags_override_defaults() {
        let args = CliArgs::try_parse_from([
            "rust-rtb",
            "--host",
            "127.0.0.1",
            "-p",
            "9000",
            "--campaigns",
            "/etc/rtb/campaigns.json",
        ])
        .unwrap();
        assert_eq!(args.bind_addr(), "127.0.0.1:9000");
        assert_eq!(args.campaigns, PathBuf::from("/etc/rtb/campaigns.json"));
    }
}
