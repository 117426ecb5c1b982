//! # m2v
//!
//! 纯 Rust 实现的 MPEG-2 视频基本流解码器.
//!
//! - **解码**: I/P/B 帧图片, 帧/场运动补偿, 输出 YUV 4:2:0
//! - **输出**: 按时间戳查询的输出帧环, 以及标准 `Decoder` 收发接口
//! - **日志**: 基于 tracing 的控制台与滚动文件日志
//!
//! # 快速开始
//!
//! ```rust,no_run
//! use m2v::codec::{Mpeg2Decoder, split_pictures};
//!
//! let data = std::fs::read("input.m2v").unwrap();
//! let mut decoder = Mpeg2Decoder::new();
//! for (i, unit) in split_pictures(&data).into_iter().enumerate() {
//!     let status = decoder.decode_pes(unit, i as i64 + 1).unwrap();
//!     if let Some(frame) = decoder.nearest_frame(i as i64 + 1) {
//!         println!("{:?} {}x{}", status.picture, frame.width, frame.height);
//!     }
//! }
//! ```
//!
//! # Crate 结构
//!
//! | Crate | 功能 |
//! |-------|------|
//! | `m2v-core` | 核心类型与位流工具 |
//! | `m2v-codec` | 解码器框架与 MPEG-2 解码器 |

pub mod logging;

/// 核心类型与工具
pub use m2v_core as core;

/// 解码器框架
pub use m2v_codec as codec;

/// 获取 m2v 版本号
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// 创建已注册所有内置解码器的注册表
pub fn default_codec_registry() -> m2v_codec::CodecRegistry {
    let mut registry = m2v_codec::CodecRegistry::new();
    m2v_codec::register_all(&mut registry);
    registry
}
