//! 解码器注册表.

use m2v_core::{M2vError, M2vResult};

use crate::codec_id::CodecId;
use crate::decoder::Decoder;

pub type DecoderFactory = fn() -> M2vResult<Box<dyn Decoder>>;

struct Registration {
    codec_id: CodecId,
    name: &'static str,
    factory: DecoderFactory,
}

/// 按注册顺序保存解码器工厂, 同一 [`CodecId`] 先注册者优先
#[derive(Default)]
pub struct CodecRegistry {
    entries: Vec<Registration>,
}

impl CodecRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_decoder(
        &mut self,
        codec_id: CodecId,
        name: &'static str,
        factory: DecoderFactory,
    ) {
        log::trace!("注册解码器 {} ({})", name, codec_id);
        self.entries.push(Registration {
            codec_id,
            name,
            factory,
        });
    }

    pub fn create_decoder(&self, codec_id: CodecId) -> M2vResult<Box<dyn Decoder>> {
        self.entries
            .iter()
            .find(|e| e.codec_id == codec_id)
            .ok_or_else(|| M2vError::CodecNotFound(format!("未找到 {} 的解码器", codec_id)))
            .and_then(|e| (e.factory)())
    }

    /// 按解码器名称创建 (如命令行指定 `mpeg2video`)
    pub fn create_decoder_by_name(&self, name: &str) -> M2vResult<Box<dyn Decoder>> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| M2vError::CodecNotFound(format!("未找到名为 {} 的解码器", name)))
            .and_then(|e| (e.factory)())
    }

    pub fn list_decoders(&self) -> Vec<(CodecId, &str)> {
        self.entries.iter().map(|e| (e.codec_id, e.name)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> CodecRegistry {
        let mut registry = CodecRegistry::new();
        crate::register_all(&mut registry);
        registry
    }

    #[test]
    fn test_注册所有解码器() {
        assert_eq!(
            registry().list_decoders(),
            vec![(CodecId::Mpeg2Video, "mpeg2video")]
        );
    }

    #[test]
    fn test_按标识与名称创建() {
        let registry = registry();
        let dec = registry
            .create_decoder(CodecId::Mpeg2Video)
            .expect("创建 mpeg2video 解码器失败");
        assert_eq!(dec.codec_id(), CodecId::Mpeg2Video);

        let dec = registry
            .create_decoder_by_name("mpeg2video")
            .expect("按名称创建失败");
        assert_eq!(dec.name(), "mpeg2video");
    }

    #[test]
    fn test_未注册的编解码器返回错误() {
        let empty = CodecRegistry::new();
        assert!(matches!(
            empty.create_decoder(CodecId::Mpeg2Video),
            Err(M2vError::CodecNotFound(_))
        ));
        assert!(matches!(
            registry().create_decoder_by_name("h264"),
            Err(M2vError::CodecNotFound(_))
        ));
    }
}
