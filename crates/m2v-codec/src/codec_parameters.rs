//! 容器层传入的流参数.

use m2v_core::{PixelFormat, Rational};

use crate::codec_id::CodecId;

#[derive(Debug, Clone)]
pub struct CodecParameters {
    pub codec_id: CodecId,
    /// 可携带序列头 (及其扩展), 在首个数据包之前解析
    pub extra_data: Vec<u8>,
    pub params: CodecParamsType,
}

#[derive(Debug, Clone)]
pub enum CodecParamsType {
    Video(VideoCodecParams),
    None,
}

/// 容器声明的视频属性, 码流中的序列头优先
#[derive(Debug, Clone)]
pub struct VideoCodecParams {
    pub width: u32,
    pub height: u32,
    pub pixel_format: PixelFormat,
    pub frame_rate: Rational,
    pub sample_aspect_ratio: Rational,
}

impl CodecParameters {
    /// 4:2:0 的 MPEG-2 视频参数, 帧率未知
    pub fn mpeg2_video(width: u32, height: u32) -> Self {
        let video = VideoCodecParams {
            width,
            height,
            pixel_format: PixelFormat::Yuv420p,
            frame_rate: Rational::UNDEFINED,
            sample_aspect_ratio: Rational::new(1, 1),
        };
        Self {
            codec_id: CodecId::Mpeg2Video,
            extra_data: Vec::new(),
            params: CodecParamsType::Video(video),
        }
    }

    pub fn video(&self) -> Option<&VideoCodecParams> {
        if let CodecParamsType::Video(v) = &self.params {
            Some(v)
        } else {
            None
        }
    }
}
