//! 编解码器标识符.

use std::fmt;

/// 编解码器标识符
///
/// 唯一标识一种编解码算法, 与容器格式无关.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CodecId {
    /// 未知编解码器
    None,
    /// MPEG-2 Video (ISO/IEC 13818-2)
    Mpeg2Video,
}

impl CodecId {
    /// 获取编解码器的人类可读名称
    pub const fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Mpeg2Video => "mpeg2video",
        }
    }

    /// 按名称查找编解码器标识
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "mpeg2video" | "m2v" | "mpeg2" => Some(Self::Mpeg2Video),
            _ => None,
        }
    }
}

impl fmt::Display for CodecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
