//! 平面 YUV 像素格式.

use std::fmt;

/// 序列扩展 chroma_format 对应的三种 8 位平面格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelFormat {
    #[default]
    None,
    Yuv420p,
    Yuv422p,
    Yuv444p,
}

impl PixelFormat {
    /// chroma_format 码值 1..=3, 保留值 0 得到 `None`
    pub const fn from_chroma_format(code: u32) -> Self {
        match code {
            1 => Self::Yuv420p,
            2 => Self::Yuv422p,
            3 => Self::Yuv444p,
            _ => Self::None,
        }
    }

    /// 色度平面相对亮度的 (水平, 垂直) 右移位数
    pub const fn chroma_subsampling(&self) -> (u32, u32) {
        match self {
            Self::Yuv420p => (1, 1),
            Self::Yuv422p => (1, 0),
            Self::Yuv444p | Self::None => (0, 0),
        }
    }

    pub const fn plane_count(&self) -> usize {
        if matches!(self, Self::None) { 0 } else { 3 }
    }

    /// 指定尺寸下的整帧字节数
    pub fn frame_size(&self, width: usize, height: usize) -> usize {
        let (sx, sy) = self.chroma_subsampling();
        match self.plane_count() {
            0 => 0,
            _ => width * height + 2 * (width >> sx) * (height >> sy),
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Yuv420p => "yuv420p",
            Self::Yuv422p => "yuv422p",
            Self::Yuv444p => "yuv444p",
        })
    }
}
