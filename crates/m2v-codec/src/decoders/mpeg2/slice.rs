//! 片层循环: 宏块地址推进、跳过宏块与重建调度.

use log::warn;
use m2v_core::bitreader::BitReader;

use super::Mpeg2Decoder;
use super::header::{is_slice_code, next_code, parse_slice_header};
use super::macroblock::{MacroblockState, map_quantizer_scale};
use super::vlc::decode_address_increment;

/// 一个片的结束方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SliceEnd {
    /// 遇到片尾零位串, 继续下一个片
    NextSlice,
    /// 宏块网格已写满, 图片结束
    PictureFull,
}

impl Mpeg2Decoder {
    /// 解码当前图片的全部片, 写入帧缓冲 `target`
    ///
    /// 进入时游标位于第一个片起始码之前; 返回时游标停在片之后的下一个起始码或数据末尾.
    pub(super) fn decode_slices(&mut self, br: &mut BitReader, target: usize) {
        while let Some(code) = next_code(br) {
            if !is_slice_code(code) {
                return;
            }
            br.consume(32);
            if self.decode_slice(br, code, target) == SliceEnd::PictureFull {
                return;
            }
        }
    }

    fn decode_slice(&mut self, br: &mut BitReader, code: u32, target: usize) -> SliceEnd {
        let vertical_size = self.sequence.as_ref().map_or(0, |s| s.vertical_size);
        let header = parse_slice_header(br, code, vertical_size);
        let mb_width = self.store.geometry.mb_width;
        let mb_count = self.store.geometry.mb_count();

        // 片开始时预测器清零, 前一宏块类型视为空
        let mut mb = MacroblockState::new();
        mb.quantizer_scale = map_quantizer_scale(header.quantizer_scale_code, self.picture.q_scale_type);

        let mut increment = match decode_address_increment(br) {
            Ok(inc) => inc,
            Err(e) => {
                warn!("片 0x{:03X} 起始处{}", code, e);
                return SliceEnd::NextSlice;
            }
        };

        let mut address = header.mb_row * mb_width;
        while address < mb_count {
            if increment == 0 {
                if br.peek(23) == 0 {
                    return SliceEnd::NextSlice;
                }
                increment = match decode_address_increment(br) {
                    Ok(inc) => inc,
                    Err(e) => {
                        warn!("宏块 {} 处{}", address, e);
                        return SliceEnd::NextSlice;
                    }
                };
            }

            if increment == 1 {
                if let Err(e) = self.decode_macroblock(br, &mut mb) {
                    warn!("宏块 {} 解码失败: {}", address, e);
                    return SliceEnd::NextSlice;
                }
            } else {
                mb.skip(self.picture.picture_type);
            }

            let (mb_x, mb_y) = (address % mb_width, address / mb_width);
            self.store
                .reconstruct_macroblock(target, &self.picture, &mut mb, mb_x, mb_y);
            increment -= 1;
            address += 1;
        }
        SliceEnd::PictureFull
    }
}
