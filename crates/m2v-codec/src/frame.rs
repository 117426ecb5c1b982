//! 解码输出帧.

use m2v_core::color::{ColorRange, ColorSpace};
use m2v_core::{NOPTS_VALUE, PixelFormat, Rational};

/// 一张解码完成的图片
///
/// `width`/`height` 是宏块对齐后的编码尺寸, 平面按此尺寸存放;
/// `display_*` 是序列头 (或显示扩展) 给出的可见区域.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    /// Y, Cb, Cr 三个平面
    pub data: Vec<Vec<u8>>,
    pub linesize: Vec<usize>,
    pub width: u32,
    pub height: u32,
    pub display_width: u32,
    pub display_height: u32,
    pub pixel_format: PixelFormat,
    pub pts: i64,
    pub time_base: Rational,
    pub duration: i64,
    /// I 图片
    pub is_keyframe: bool,
    pub picture_type: PictureType,
    pub sample_aspect_ratio: Rational,
    pub frame_rate: Rational,
    pub color_space: ColorSpace,
    pub color_range: ColorRange,
}

impl VideoFrame {
    pub fn new(width: u32, height: u32, pixel_format: PixelFormat) -> Self {
        let planes = pixel_format.plane_count();
        Self {
            data: vec![Vec::new(); planes],
            linesize: vec![0; planes],
            width,
            height,
            display_width: width,
            display_height: height,
            pixel_format,
            pts: NOPTS_VALUE,
            time_base: Rational::UNDEFINED,
            duration: 0,
            is_keyframe: false,
            picture_type: PictureType::None,
            sample_aspect_ratio: Rational::new(1, 1),
            frame_rate: Rational::UNDEFINED,
            color_space: ColorSpace::Unspecified,
            color_range: ColorRange::Unspecified,
        }
    }

    /// 平面中落在显示区域内的各行, 色度平面按子采样向上取整
    pub fn cropped_rows(&self, plane: usize) -> impl Iterator<Item = &[u8]> {
        let (sx, sy) = match plane {
            0 => (0, 0),
            _ => self.pixel_format.chroma_subsampling(),
        };
        let width = (self.display_width as usize).div_ceil(1 << sx);
        let rows = (self.display_height as usize).div_ceil(1 << sy);
        let stride = self.linesize.get(plane).copied().unwrap_or(0);
        let data = self.data.get(plane).map(Vec::as_slice).unwrap_or(&[]);
        (0..rows).filter_map(move |row| data.get(row * stride..row * stride + width))
    }
}

#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum Frame {
    Video(VideoFrame),
}

/// picture_coding_type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PictureType {
    #[default]
    None,
    I,
    P,
    B,
}

impl PictureType {
    /// 1/2/3 对应 I/P/B, D 图片 (4) 与保留值返回 `None`
    pub const fn from_coding_type(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::I),
            2 => Some(Self::P),
            3 => Some(Self::B),
            _ => None,
        }
    }

    pub const fn as_char(&self) -> char {
        match self {
            Self::I => 'I',
            Self::P => 'P',
            Self::B => 'B',
            Self::None => '?',
        }
    }
}
