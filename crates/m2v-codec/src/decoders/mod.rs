//! 解码器实现模块.

pub mod mpeg2;

use crate::codec_id::CodecId;
use crate::registry::CodecRegistry;

/// 注册所有内置解码器
pub fn register_all_decoders(registry: &mut CodecRegistry) {
    registry.register_decoder(
        CodecId::Mpeg2Video,
        "mpeg2video",
        mpeg2::Mpeg2Decoder::create,
    );
}
