//! 色彩相关类型定义.
//!
//! 取值对应 MPEG-2 sequence_display_extension 中的 matrix_coefficients 字段.

/// YCbCr 色彩空间 (矩阵系数)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorSpace {
    /// 未指定
    #[default]
    Unspecified,
    /// ITU-R BT.709 (高清)
    Bt709,
    /// FCC 73.682
    Fcc,
    /// ITU-R BT.470 BG (PAL/SECAM)
    Bt470bg,
    /// SMPTE 170M (NTSC)
    Smpte170m,
    /// SMPTE 240M
    Smpte240m,
}

impl ColorSpace {
    /// 由 matrix_coefficients 码值映射 (ISO/IEC 13818-2 表 6-9)
    pub const fn from_matrix_coefficients(code: u32) -> Self {
        match code {
            1 => Self::Bt709,
            4 => Self::Fcc,
            5 => Self::Bt470bg,
            6 => Self::Smpte170m,
            7 => Self::Smpte240m,
            _ => Self::Unspecified,
        }
    }
}

/// 色彩范围
///
/// MPEG-2 视频总是有限范围, 保留 Full 以便上层标注外部来源的帧.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorRange {
    /// 未指定
    #[default]
    Unspecified,
    /// 有限范围 (广播/TV) Y 16-235
    Limited,
    /// 完整范围 (JPEG/PC) Y 0-255
    Full,
}
