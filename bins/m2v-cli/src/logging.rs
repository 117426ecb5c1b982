//! 日志初始化模块.
//!
//! 指定配置文件时按文件内容初始化, 否则写入 $cwd/logs/m2v-cli.{date}.log,
//! 级别由 -v/-vv 决定, M2V_LOG 环境变量可覆盖文件输出级别.

use anyhow::Result;
use m2v::logging::{self, LoggingConfig};
use std::path::Path;

/// 日志文件前缀
const FILE_PREFIX: &str = "m2v-cli";

/// 0=info, 1=debug, 2+=trace
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

pub fn init(config_path: Option<&Path>, verbosity: u8) -> Result<()> {
    let config = match config_path {
        Some(path) => LoggingConfig::from_json_file(path)?,
        None => LoggingConfig {
            level: level_for(verbosity).to_string(),
            directory: "logs".to_string(),
            file_prefix: FILE_PREFIX.to_string(),
            retention_days: 7,
            compress_history: true,
        },
    };
    logging::init(config)
}
