//! 时间戳常量.
//!
//! PES 层的 PTS 以 90kHz 时钟计数, 解码器只把它当作输出帧的键值.

use crate::rational::Rational;

/// 未定义的时间戳
pub const NOPTS_VALUE: i64 = i64::MIN;

/// MPEG 系统层 PTS/DTS 的时间基 (90kHz)
pub const MPEG_TIME_BASE: Rational = Rational::new(1, 90_000);
