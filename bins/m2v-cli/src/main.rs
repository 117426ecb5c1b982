//! m2v-cli - MPEG-2 视频基本流解码命令行工具
//!
//! 解码原始 .m2v 基本流, 可选输出按显示尺寸裁剪的平面 YUV, 并打印逐图片汇总.

mod decode;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process;

use decode::{StreamSummary, decode_stream};
use m2v_codec::decoders::mpeg2::DEFAULT_RING_CAPACITY;

#[derive(Parser, Debug)]
#[command(name = "m2v-cli", version, about = "纯 Rust MPEG-2 视频基本流解码工具")]
struct Cli {
    /// 输入基本流文件
    input: PathBuf,

    /// 输出原始 YUV 文件 (按显示尺寸裁剪的 Y/Cb/Cr 平面)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 以 JSON 输出汇总
    #[arg(long)]
    json: bool,

    /// 输出环容量
    #[arg(long, default_value_t = DEFAULT_RING_CAPACITY)]
    ring_capacity: usize,

    /// 日志配置文件 (JSON)
    #[arg(long)]
    log_config: Option<PathBuf>,

    /// 日志级别 (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = logging::init(cli.log_config.as_deref(), cli.verbose) {
        eprintln!("警告: 日志初始化失败: {e:#}");
    }
    tracing::debug!("m2v {} 解码 {}", m2v::version(), cli.input.display());

    if let Err(e) = run(&cli) {
        tracing::error!("{:#}", e);
        eprintln!("错误: {e:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let data = std::fs::read(&cli.input)
        .with_context(|| format!("无法读取输入文件 '{}'", cli.input.display()))?;

    let mut writer = match &cli.output {
        Some(path) => Some(BufWriter::new(File::create(path).with_context(|| {
            format!("无法创建输出文件 '{}'", path.display())
        })?)),
        None => None,
    };

    let mut summary = decode_stream(
        &data,
        cli.ring_capacity,
        writer.as_mut().map(|w| w as &mut dyn Write),
    )?;
    if let Some(mut w) = writer {
        w.flush().context("写出 YUV 失败")?;
    }
    summary.input = cli.input.display().to_string();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(summary: &StreamSummary) {
    println!("输入: {}", summary.input);
    println!(
        "尺寸: {}x{} (显示 {}x{}), 帧率 {}, SAR {}",
        summary.width,
        summary.height,
        summary.display_width,
        summary.display_height,
        summary.frame_rate.as_deref().unwrap_or("未知"),
        summary.sample_aspect_ratio.as_deref().unwrap_or("未知"),
    );
    for pic in &summary.pictures {
        println!(
            "  #{:<5} {}  pts={:<8} {} 字节",
            pic.index, pic.picture_type, pic.pts, pic.bytes
        );
    }
    println!(
        "共 {} 张图片: I {} / P {} / B {}",
        summary.pictures.len(),
        summary.i_pictures,
        summary.p_pictures,
        summary.b_pictures
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(input: PathBuf, output: Option<PathBuf>) -> Cli {
        Cli {
            input,
            output,
            json: true,
            ring_capacity: 8,
            log_config: None,
            verbose: 0,
        }
    }

    #[test]
    fn test_命令行解析() {
        let cli = Cli::try_parse_from(["m2v-cli", "in.m2v", "-o", "out.yuv", "--json", "-vv"])
            .unwrap_or_else(|e| panic!("解析参数失败: {}", e));
        assert_eq!(cli.input, PathBuf::from("in.m2v"));
        assert_eq!(cli.output, Some(PathBuf::from("out.yuv")));
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.ring_capacity, DEFAULT_RING_CAPACITY);
    }

    #[test]
    fn test_输入文件不存在() {
        let dir = tempfile::TempDir::new().unwrap_or_else(|e| panic!("创建临时目录失败: {}", e));
        let err = run(&cli(dir.path().join("missing.m2v"), None)).unwrap_err();
        assert!(format!("{:#}", err).contains("无法读取输入文件"));
    }

    #[test]
    fn test_无图片时输出空文件() {
        let dir = tempfile::TempDir::new().unwrap_or_else(|e| panic!("创建临时目录失败: {}", e));
        let input = dir.path().join("noise.m2v");
        let output = dir.path().join("out.yuv");
        std::fs::write(&input, [0x12u8, 0x34, 0x00, 0x00, 0x01]).unwrap();

        run(&cli(input, Some(output.clone()))).unwrap();
        assert_eq!(std::fs::metadata(&output).map(|m| m.len()).ok(), Some(0));
    }
}
