//! 8x8 块系数解码与反量化.

use log::warn;
use m2v_core::bitreader::BitReader;

use super::tables::{DctEntry, RUN_EOB, RUN_ESCAPE, SCAN};
use super::vlc::{decode_dc_diff, lookup_dct};

/// 块解码所需的图片/片级参数
pub(super) struct BlockParams<'a> {
    /// 当前量化尺度 (已映射)
    pub quantizer_scale: i32,
    /// intra_dc_precision (0..=3)
    pub intra_dc_precision: u32,
    /// 是否使用交替扫描
    pub alternate_scan: bool,
    /// 帧内 AC 是否使用表 B-15
    pub intra_vlc_format: bool,
    /// 帧内量化矩阵 (光栅顺序)
    pub intra_matrix: &'a [u8; 64],
    /// 非帧内量化矩阵 (光栅顺序)
    pub non_intra_matrix: &'a [u8; 64],
}

/// 一个 AC 游程步骤的结果
enum Step {
    /// 块结束
    End,
    /// (run, 无符号 level, 是否为负)
    Coeff(u32, i32, bool),
}

/// 读取一个 run/level 对, 码字非法或转义非法时返回 None
fn read_run_level(br: &mut BitReader, entry: DctEntry) -> Option<Step> {
    br.consume(u32::from(entry.len));
    match entry.run {
        RUN_EOB => Some(Step::End),
        RUN_ESCAPE => {
            let run = br.get_bits(6);
            let mut val = br.get_bits(12) as i32;
            if val & 2047 == 0 {
                return None;
            }
            let negative = val >= 2048;
            if negative {
                val = 4096 - val;
            }
            Some(Step::Coeff(run, val, negative))
        }
        run => {
            let negative = br.get_flag();
            Some(Step::Coeff(u32::from(run), i32::from(entry.level), negative))
        }
    }
}

#[inline]
fn saturate(val: i32, negative: bool) -> i16 {
    let v = if negative { -val } else { val };
    v.clamp(-2048, 2047) as i16
}

/// 解码一个帧内块
///
/// `comp` 为块序号 (0..4 亮度, 4 Cb, 5 Cr). DC 值累加进对应分量的预测器,
/// 预测器以 0 为基准 (重建时统一加 128).
pub(super) fn decode_intra_block(
    br: &mut BitReader,
    params: &BlockParams,
    comp: usize,
    dc_pred: &mut [i32; 3],
    block: &mut [i16; 64],
) {
    let cc = if comp < 4 { 0 } else { (comp & 1) + 1 };
    dc_pred[cc] += decode_dc_diff(br, cc == 0);
    let dc = dc_pred[cc] << (3 - params.intra_dc_precision);
    block[0] = dc.clamp(-2048, 2047) as i16;

    let scan = &SCAN[usize::from(params.alternate_scan)];
    let mut i = 1usize;
    loop {
        let Some(entry) = lookup_dct(br, false, params.intra_vlc_format) else {
            warn!("帧内块 {} 中 DCT 系数码字非法", comp);
            return;
        };
        let (run, val, negative) = match read_run_level(br, entry) {
            Some(Step::End) => return,
            Some(Step::Coeff(run, val, negative)) => (run, val, negative),
            None => {
                warn!("帧内块 {} 中转义码非法", comp);
                return;
            }
        };
        i += run as usize;
        if i >= 64 {
            warn!("帧内块 {} 系数索引越界", comp);
            return;
        }
        let j = usize::from(scan[i]);
        let val = (val * params.quantizer_scale * i32::from(params.intra_matrix[j])) >> 4;
        block[j] = saturate(val, negative);
        i += 1;
    }
}

/// 解码一个非帧内块
pub(super) fn decode_non_intra_block(
    br: &mut BitReader,
    params: &BlockParams,
    comp: usize,
    block: &mut [i16; 64],
) {
    let scan = &SCAN[usize::from(params.alternate_scan)];
    let mut i = 0usize;
    loop {
        let Some(entry) = lookup_dct(br, i == 0, false) else {
            warn!("非帧内块 {} 中 DCT 系数码字非法", comp);
            return;
        };
        let (run, val, negative) = match read_run_level(br, entry) {
            Some(Step::End) => return,
            Some(Step::Coeff(run, val, negative)) => (run, val, negative),
            None => {
                warn!("非帧内块 {} 中转义码非法", comp);
                return;
            }
        };
        i += run as usize;
        if i >= 64 {
            warn!("非帧内块 {} 系数索引越界", comp);
            return;
        }
        let j = usize::from(scan[i]);
        let val = ((2 * val + 1) * params.quantizer_scale * i32::from(params.non_intra_matrix[j]))
            >> 5;
        block[j] = saturate(val, negative);
        i += 1;
    }
}
