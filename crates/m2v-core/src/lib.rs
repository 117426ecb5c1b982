//! # m2v-core
//!
//! m2v 解码器核心库, 提供基础类型定义、错误处理和位流工具.
//!
//! 位流读取器 [`bitreader::BitReader`] 是整个解码器的唯一取位入口,
//! [`bitwriter::BitWriter`] 用于测试和工具中合成码流.

pub mod bitreader;
pub mod bitwriter;
pub mod color;
pub mod error;
pub mod pixel_format;
pub mod rational;
pub mod timestamp;

// 重导出常用类型
pub use error::{M2vError, M2vResult};
pub use pixel_format::PixelFormat;
pub use rational::Rational;
pub use timestamp::{MPEG_TIME_BASE, NOPTS_VALUE};
