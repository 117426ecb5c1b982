//! 日志系统.
//!
//! 库 crate 只通过 `log` 门面输出, 这里安装 tracing 订阅器:
//! 彩色控制台输出加按日滚动的文件输出. `log` 记录经 tracing-log 桥接进入同一订阅器.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{Event, Level, Subscriber};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{self, FormatEvent, FormatFields, format::Writer},
    layer::{Layer, SubscriberExt},
    registry::LookupSpan,
    util::SubscriberInitExt,
};

mod maintenance;

pub use maintenance::cleanup_logs;

/// 文件日志过滤器的环境变量
pub const LOG_ENV: &str = "M2V_LOG";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: String,
    pub file_prefix: String,
    #[serde(default = "default_retention_days")]
    pub retention_days: i64,
    #[serde(default = "default_true")]
    pub compress_history: bool,
}

fn default_true() -> bool {
    true
}

fn default_retention_days() -> i64 {
    30
}

impl LoggingConfig {
    /// 从 JSON 文件读取配置
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("读取日志配置失败, path={}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("解析日志配置失败, path={}", path.display()))
    }
}

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// 安装全局订阅器, 每个进程只能成功一次
///
/// 控制台 (stderr) 使用 `config.level`; 文件优先使用 `M2V_LOG` 环境变量.
/// 安装成功后立即清理一次历史日志.
pub fn init(config: LoggingConfig) -> Result<()> {
    let writer = open_file_writer(&config)?;

    let console_layer = fmt::Layer::default()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .event_format(LineFormat { colored: true })
        .with_filter(EnvFilter::new(&config.level));

    let file_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&config.level));
    let file_layer = fmt::Layer::default()
        .with_writer(writer)
        .with_ansi(false)
        .event_format(LineFormat { colored: false })
        .with_filter(file_filter);

    Registry::default()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("日志订阅器已经初始化")?;

    if let Err(err) = cleanup_logs(&config) {
        tracing::error!("启动时清理日志失败: {:#}", err);
    }
    Ok(())
}

/// 按日滚动的非阻塞文件写入器, 文件名为 `{prefix}.{yyyy-mm-dd}.log`
fn open_file_writer(config: &LoggingConfig) -> Result<NonBlocking> {
    std::fs::create_dir_all(&config.directory)
        .with_context(|| format!("创建日志目录失败, path={}", config.directory))?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(&config.file_prefix)
        .filename_suffix("log")
        .build(&config.directory)
        .context("创建滚动日志文件失败")?;
    let (writer, guard) = tracing_appender::non_blocking(appender);
    // 重复初始化时保留第一个 guard
    let _ = LOG_GUARD.set(guard);
    Ok(writer)
}

/// 指定日期的日志文件路径
pub fn log_file_path(config: &LoggingConfig, date: NaiveDate) -> PathBuf {
    Path::new(&config.directory).join(format!(
        "{}.{}.log",
        config.file_prefix,
        date.format("%Y-%m-%d")
    ))
}

/// `[月-日 时:分:秒.毫秒] LEVEL target > 消息`
struct LineFormat {
    colored: bool,
}

impl LineFormat {
    fn level_color(level: &Level) -> &'static str {
        match *level {
            Level::ERROR => "\x1b[31m",
            Level::WARN => "\x1b[33m",
            Level::INFO => "\x1b[32m",
            _ => "\x1b[34m",
        }
    }
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let now = Local::now();
        write!(
            writer,
            "[{}.{:03}] ",
            now.format("%m-%d %H:%M:%S"),
            now.timestamp_subsec_millis()
        )?;
        if self.colored {
            write!(writer, "{}{:5}\x1b[0m", Self::level_color(meta.level()), meta.level())?;
        } else {
            write!(writer, "{:5}", meta.level())?;
        }
        write!(writer, " {} > ", meta.target())?;
        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
