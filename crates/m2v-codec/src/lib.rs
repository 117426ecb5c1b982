//! # m2v-codec
//!
//! m2v 编解码器库, 提供解码器框架、Packet/Frame 抽象以及 MPEG-2 视频解码器.
//!
//! ## 支持的编解码器
//!
//! - **解码器**: MPEG-2 视频 (主档次, 兼容 MPEG-1 图片头)
//!
//! ## 使用示例
//!
//! ```rust
//! use m2v_codec::{CodecId, CodecRegistry};
//!
//! let mut reg = CodecRegistry::new();
//! m2v_codec::register_all(&mut reg);
//!
//! let decoder = reg.create_decoder(CodecId::Mpeg2Video).unwrap();
//! assert_eq!(decoder.name(), "mpeg2video");
//! ```

pub mod codec_id;
pub mod codec_parameters;
pub mod decoder;
pub mod decoders;
pub mod frame;
pub mod packet;
pub mod registry;

// 重导出常用类型
pub use codec_id::CodecId;
pub use codec_parameters::{CodecParameters, CodecParamsType, VideoCodecParams};
pub use decoder::Decoder;
pub use decoders::mpeg2::{DecodeStatus, FrameView, Mpeg2Config, Mpeg2Decoder, split_pictures};
pub use frame::{Frame, PictureType, VideoFrame};
pub use packet::Packet;
pub use registry::CodecRegistry;

/// 注册所有内置解码器
pub fn register_all(registry: &mut CodecRegistry) {
    decoders::register_all_decoders(registry);
}
