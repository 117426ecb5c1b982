//! 历史日志维护.

use super::LoggingConfig;
use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 按前缀识别出的日志文件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LogName {
    date: NaiveDate,
    gzipped: bool,
}

impl LogName {
    /// 识别 `{prefix}.{yyyy-mm-dd}.log` 与其 `.gz` 形式
    fn parse(file_name: &str, prefix: &str) -> Option<Self> {
        let rest = file_name.strip_prefix(prefix)?.strip_prefix('.')?;
        let (date, gzipped) = match rest.strip_suffix(".log.gz") {
            Some(date) => (date, true),
            None => (rest.strip_suffix(".log")?, false),
        };
        if date.len() != 10 {
            return None;
        }
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
        Some(Self { date, gzipped })
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Action {
    Keep,
    Remove,
    Compress,
}

fn plan(name: LogName, config: &LoggingConfig, today: NaiveDate) -> Action {
    if name.date < today - Duration::days(config.retention_days) {
        Action::Remove
    } else if config.compress_history && !name.gzipped && name.date < today {
        Action::Compress
    } else {
        Action::Keep
    }
}

/// 清理日志目录: 超出保留天数的删除, 往日未压缩的改写为 `.gz`
///
/// 单个文件失败只记录警告, 只有目录不可读时返回错误.
pub fn cleanup_logs(config: &LoggingConfig) -> Result<()> {
    cleanup_logs_at(config, Local::now().date_naive())
}

fn cleanup_logs_at(config: &LoggingConfig, today: NaiveDate) -> Result<()> {
    let directory = Path::new(&config.directory);
    if !directory.is_dir() {
        return Ok(());
    }
    let entries = fs::read_dir(directory)
        .with_context(|| format!("读取日志目录失败, path={}", directory.display()))?;

    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = LogName::parse(&entry.file_name().to_string_lossy(), &config.file_prefix)
        else {
            continue;
        };
        match plan(name, config, today) {
            Action::Keep => {}
            Action::Remove => match fs::remove_file(&path) {
                Ok(()) => debug!("删除过期日志 {}", path.display()),
                Err(err) => warn!("删除过期日志失败, path={}: {}", path.display(), err),
            },
            Action::Compress => {
                if let Err(err) = gzip_in_place(&path) {
                    warn!("压缩日志失败: {:#}", err);
                }
            }
        }
    }
    Ok(())
}

/// `x.log` 压缩为 `x.log.gz` 后删除原文件; 目标已存在时不动
fn gzip_in_place(path: &Path) -> Result<()> {
    let mut target = path.as_os_str().to_owned();
    target.push(".gz");
    let target = PathBuf::from(target);
    if target.exists() {
        return Ok(());
    }

    let mut input =
        File::open(path).with_context(|| format!("打开待压缩日志失败, path={}", path.display()))?;
    let output = File::create(&target)
        .with_context(|| format!("创建压缩日志失败, path={}", target.display()))?;
    let mut encoder = GzEncoder::new(output, Compression::default());
    io::copy(&mut input, &mut encoder)?;
    encoder.finish()?;

    fs::remove_file(path)
        .with_context(|| format!("删除已压缩日志失败, path={}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;
    use tempfile::TempDir;

    fn config(directory: &Path) -> LoggingConfig {
        LoggingConfig {
            level: "info".to_string(),
            directory: directory.to_string_lossy().to_string(),
            file_prefix: "m2v".to_string(),
            retention_days: 7,
            compress_history: true,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap_or_else(|| panic!("非法日期 {y}-{m}-{d}"))
    }

    #[test]
    fn test_识别日志文件名() {
        let parsed = LogName::parse("m2v.2026-02-06.log", "m2v");
        assert_eq!(
            parsed,
            Some(LogName {
                date: date(2026, 2, 6),
                gzipped: false
            })
        );
        assert_eq!(
            LogName::parse("m2v.2026-02-06.log.gz", "m2v").map(|n| n.gzipped),
            Some(true)
        );
        assert!(LogName::parse("m2v.log", "m2v").is_none());
        assert!(LogName::parse("m2v.2026-2-6.log", "m2v").is_none());
        assert!(LogName::parse("other.2026-02-06.log", "m2v").is_none());
    }

    #[test]
    fn test_处理计划() {
        let cfg = config(Path::new("logs"));
        let today = date(2026, 3, 20);
        let name = |d, gzipped| LogName {
            date: d,
            gzipped,
        };
        assert_eq!(plan(name(date(2026, 3, 12), true), &cfg, today), Action::Remove);
        assert_eq!(plan(name(date(2026, 3, 13), false), &cfg, today), Action::Compress);
        assert_eq!(plan(name(date(2026, 3, 13), true), &cfg, today), Action::Keep);
        assert_eq!(plan(name(today, false), &cfg, today), Action::Keep);
    }

    #[test]
    fn test_清理过期与压缩往日日志() {
        let temp_dir = match TempDir::new() {
            Ok(temp_dir) => temp_dir,
            Err(err) => panic!("创建临时目录失败: {}", err),
        };
        let dir = temp_dir.path();
        let today = date(2026, 3, 20);

        fs::write(dir.join("m2v.2026-03-01.log"), "old").unwrap();
        fs::write(dir.join("m2v.2026-03-18.log"), "recent").unwrap();
        fs::write(dir.join("m2v.2026-03-20.log"), "today").unwrap();
        fs::write(dir.join("notes.txt"), "keep").unwrap();

        cleanup_logs_at(&config(dir), today).unwrap();

        assert!(!dir.join("m2v.2026-03-01.log").exists());
        assert!(!dir.join("m2v.2026-03-18.log").exists());
        assert!(dir.join("m2v.2026-03-20.log").exists());
        assert!(dir.join("notes.txt").exists());

        let gz = File::open(dir.join("m2v.2026-03-18.log.gz")).unwrap();
        let mut text = String::new();
        GzDecoder::new(gz).read_to_string(&mut text).unwrap();
        assert_eq!(text, "recent");
    }

    #[test]
    fn test_关闭压缩时保留原文件() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        fs::write(dir.join("m2v.2026-03-18.log"), "recent").unwrap();

        let mut cfg = config(dir);
        cfg.compress_history = false;
        cleanup_logs_at(&cfg, date(2026, 3, 20)).unwrap();
        assert!(dir.join("m2v.2026-03-18.log").exists());
        assert!(!dir.join("m2v.2026-03-18.log.gz").exists());
    }

    #[test]
    fn test_目录不存在时直接返回() {
        let cfg = config(Path::new("/nonexistent/m2v-logs"));
        assert!(cleanup_logs(&cfg).is_ok());
    }
}
