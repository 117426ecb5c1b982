use std::fs;
use std::path::Path;
use m2v::logging::{LoggingConfig, cleanup_logs, init, log_file_path};

// 注意: tracing 的全局订阅器只能初始化一次,
// 涉及 init() 的测试用 #[ignore] 标记, 需要单独运行

fn temp_dir() -> tempfile::TempDir {
    match tempfile::TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("创建临时目录失败: {}", err),
    }
}

fn config_in(dir: &Path, prefix: &str, level: &str) -> LoggingConfig {
    LoggingConfig {
        level: level.to_string(),
        directory: dir.to_string_lossy().to_string(),
        file_prefix: prefix.to_string(),
        retention_days: 7,
        compress_history: false,
    }
}

#[test]
fn test_从_json_文件读取配置() {
    let dir = temp_dir();
    let path = dir.path().join("logging.json");
    fs::write(
        &path,
        r#"{ "level": "debug", "directory": "logs", "file_prefix": "m2v", "retention_days": 3 }"#,
    )
    .expect("写入配置文件失败");

    let config = LoggingConfig::from_json_file(&path).expect("读取配置失败");
    assert_eq!(config.level, "debug");
    assert_eq!(config.file_prefix, "m2v");
    assert_eq!(config.retention_days, 3);
    assert!(config.compress_history, "默认应该开启压缩");
}

#[test]
fn test_配置文件缺失或格式错误() {
    let dir = temp_dir();
    assert!(LoggingConfig::from_json_file(dir.path().join("missing.json")).is_err());

    let path = dir.path().join("bad.json");
    fs::write(&path, "{ level: info").expect("写入配置文件失败");
    let err = LoggingConfig::from_json_file(&path).expect_err("格式错误应返回错误");
    assert!(format!("{:#}", err).contains("解析日志配置失败"));
}

#[test]
fn test_配置序列化往返() {
    let config = config_in(Path::new("logs"), "m2v-cli", "trace");
    let text = serde_json::to_string(&config).expect("序列化失败");
    let back: LoggingConfig = serde_json::from_str(&text).expect("反序列化失败");
    assert_eq!(back, config);
}

#[test]
fn test_清理只处理匹配前缀的文件() {
    let dir = temp_dir();
    fs::write(dir.path().join("m2v.2000-01-01.log"), "old").expect("写入失败");
    fs::write(dir.path().join("other.2000-01-01.log"), "other").expect("写入失败");

    cleanup_logs(&config_in(dir.path(), "m2v", "info")).expect("清理失败");
    assert!(!dir.path().join("m2v.2000-01-01.log").exists());
    assert!(dir.path().join("other.2000-01-01.log").exists());
}

#[test]
#[ignore] // 需要单独运行: cargo test --test logging_system test_logging_file_content -- --ignored
fn test_logging_file_content() {
    let dir = temp_dir();
    let log_dir = dir.path().join("nested").join("logs");
    let config = config_in(&log_dir, "content-test", "info");
    init(config.clone()).expect("日志初始化失败");
    assert!(log_dir.exists(), "嵌套日志目录应该被创建");

    tracing::info!("这是一条测试日志消息_12345");
    tracing::debug!("调试日志_DEBUG_MSG");
    // log 门面的记录经桥接写入同一文件
    log::warn!("解码器警告_WARN_MSG");

    std::thread::sleep(std::time::Duration::from_millis(200));

    let log_file = log_file_path(&config, chrono::Local::now().date_naive());
    let content = fs::read_to_string(&log_file)
        .unwrap_or_else(|e| panic!("读取日志文件失败: {:?}, 错误: {}", log_file, e));
    assert!(content.contains("这是一条测试日志消息_12345"));
    assert!(content.contains("INFO"));
    assert!(content.contains("解码器警告_WARN_MSG"));
    assert!(!content.contains("调试日志_DEBUG_MSG"), "debug 日志应该被过滤掉");
}
