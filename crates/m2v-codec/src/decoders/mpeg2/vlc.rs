//! 分层 VLC 查表解码.
//!
//! 每个语法元素先按固定宽度预读, 再按数值区间选择对应层级的码表.
//! 表项给出真实码长, 因此消费 `len` 位即可准确前移游标.

use log::warn;
use m2v_core::bitreader::BitReader;
use m2v_core::{M2vError, M2vResult};

use super::macroblock::MbFlags;
use super::tables::*;
use crate::frame::PictureType;

/// 消费一个有效表项, 非法哨兵返回错误
fn take(br: &mut BitReader, entry: Vlc, what: &str) -> M2vResult<i32> {
    if entry.is_invalid() {
        return Err(M2vError::InvalidData(format!("{what} 码字非法")));
    }
    br.consume(u32::from(entry.len));
    Ok(i32::from(entry.val))
}

// ============================================================================
// 宏块层
// ============================================================================

/// 解码 macroblock_type (表 B-2/B-3/B-4)
pub(super) fn decode_macroblock_type(
    br: &mut BitReader,
    picture_type: PictureType,
) -> M2vResult<MbFlags> {
    let bits = match picture_type {
        PictureType::I => {
            if br.get_flag() {
                return Ok(MbFlags::INTRA);
            }
            if !br.get_flag() {
                warn!("I 图片 macroblock_type 码字非法, 按 Intra+Quant 处理");
            }
            return Ok(MbFlags::QUANT | MbFlags::INTRA);
        }
        PictureType::P => {
            let code = br.peek(6) as usize;
            if code >= 8 {
                take(br, P_MB_TAB0[code >> 3], "P macroblock_type")?
            } else if code == 0 {
                return Err(M2vError::InvalidData("P macroblock_type 码字非法".into()));
            } else {
                take(br, P_MB_TAB1[code], "P macroblock_type")?
            }
        }
        PictureType::B => {
            let code = br.peek(6) as usize;
            if code >= 8 {
                take(br, B_MB_TAB0[code >> 2], "B macroblock_type")?
            } else if code == 0 {
                return Err(M2vError::InvalidData("B macroblock_type 码字非法".into()));
            } else {
                take(br, B_MB_TAB1[code], "B macroblock_type")?
            }
        }
        PictureType::None => {
            return Err(M2vError::InvalidData("未知图片类型".into()));
        }
    };
    Ok(MbFlags::from_bits_truncate(bits as u8))
}

/// 解码 coded_block_pattern (表 B-9), 返回 6 位块掩码
pub(super) fn decode_coded_block_pattern(br: &mut BitReader) -> M2vResult<u8> {
    let code = br.peek(9) as usize;
    let cbp = if code >= 128 {
        take(br, CBP_TAB0[code >> 4], "coded_block_pattern")?
    } else if code >= 8 {
        take(br, CBP_TAB1[code >> 1], "coded_block_pattern")?
    } else if code < 1 {
        return Err(M2vError::InvalidData("coded_block_pattern 码字非法".into()));
    } else {
        take(br, CBP_TAB2[code], "coded_block_pattern")?
    };
    Ok(cbp as u8)
}

/// 解码 macroblock_address_increment (表 B-1)
///
/// 处理填充码 (stuffing) 与每次加 33 的转义码.
pub(super) fn decode_address_increment(br: &mut BitReader) -> M2vResult<u32> {
    let mut val = 0u32;
    loop {
        let code = br.peek(11);
        if code >= 24 {
            break;
        }
        match code {
            // macroblock_stuffing
            15 => {}
            // macroblock_escape
            8 => val += 33,
            _ => {
                return Err(M2vError::InvalidData(format!(
                    "macroblock_address_increment 码字非法: {code}"
                )));
            }
        }
        br.consume(11);
    }

    let code = br.peek(11) as usize;
    if code >= 1024 {
        br.consume(1);
        return Ok(val + 1);
    }
    let inc = if code >= 128 {
        take(br, MBA_TAB1[code >> 6], "macroblock_address_increment")?
    } else {
        take(br, MBA_TAB2[code - 24], "macroblock_address_increment")?
    };
    Ok(val + inc as u32)
}

/// 解码 motion_code (表 B-10), 返回带符号的运动码
pub(super) fn decode_motion_code(br: &mut BitReader) -> M2vResult<i32> {
    if br.get_flag() {
        return Ok(0);
    }
    let code = br.peek(9) as usize;
    let magnitude = if code >= 64 {
        take(br, MV_TAB0[code >> 6], "motion_code")?
    } else if code >= 24 {
        take(br, MV_TAB1[code >> 3], "motion_code")?
    } else if code < 12 {
        return Err(M2vError::InvalidData("motion_code 码字非法".into()));
    } else {
        take(br, MV_TAB2[code - 12], "motion_code")?
    };
    Ok(if br.get_flag() { -magnitude } else { magnitude })
}

// ============================================================================
// 块层
// ============================================================================

/// 解码亮度 dct_dc_size (表 B-12)
fn decode_luma_dc_size(br: &mut BitReader) -> u32 {
    let code = br.peek(5) as usize;
    let entry = if code < 31 {
        DC_LUMA_TAB0[code]
    } else {
        DC_LUMA_TAB1[br.peek(9) as usize - 0x1F0]
    };
    br.consume(u32::from(entry.len));
    entry.val as u32
}

/// 解码色度 dct_dc_size (表 B-13)
fn decode_chroma_dc_size(br: &mut BitReader) -> u32 {
    let code = br.peek(5) as usize;
    let entry = if code < 31 {
        DC_CHROMA_TAB0[code]
    } else {
        DC_CHROMA_TAB1[br.peek(10) as usize - 0x3E0]
    };
    br.consume(u32::from(entry.len));
    entry.val as u32
}

/// 解码帧内 DC 差值 (含符号扩展)
pub(super) fn decode_dc_diff(br: &mut BitReader, luma: bool) -> i32 {
    let size = if luma {
        decode_luma_dc_size(br)
    } else {
        decode_chroma_dc_size(br)
    };
    if size == 0 {
        return 0;
    }
    let mut diff = br.get_bits(size) as i32;
    if diff & (1 << (size - 1)) == 0 {
        diff -= (1 << size) - 1;
    }
    diff
}

/// 按 16 位预读值查找 DCT 系数表项 (不消费)
///
/// - `first`: 非帧内块的第一个系数, 使用 B-14 的首系数表
/// - `intra_vlc`: 帧内块且 intra_vlc_format = 1, 使用表 B-15
///
/// 预读值小于 16 时码字非法, 返回 None.
pub(super) fn lookup_dct(br: &BitReader, first: bool, intra_vlc: bool) -> Option<DctEntry> {
    let code = br.peek(16) as usize;
    let entry = if code >= 16384 && !intra_vlc {
        if first {
            DCT_TAB_FIRST[(code >> 12) - 4]
        } else {
            DCT_TAB_NEXT[(code >> 12) - 4]
        }
    } else if code >= 1024 {
        if intra_vlc {
            DCT_TAB0A[(code >> 8) - 4]
        } else {
            DCT_TAB0[(code >> 8) - 4]
        }
    } else if code >= 512 {
        if intra_vlc {
            DCT_TAB1A[(code >> 6) - 8]
        } else {
            DCT_TAB1[(code >> 6) - 8]
        }
    } else if code >= 256 {
        DCT_TAB2[(code >> 4) - 16]
    } else if code >= 128 {
        DCT_TAB3[(code >> 3) - 16]
    } else if code >= 64 {
        DCT_TAB4[(code >> 2) - 16]
    } else if code >= 32 {
        DCT_TAB5[(code >> 1) - 16]
    } else if code >= 16 {
        DCT_TAB6[code - 16]
    } else {
        return None;
    };
    Some(entry)
}
