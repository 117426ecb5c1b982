//! 宏块层语法解码: 宏块模式、量化尺度、运动向量、编码块模式.

use bitflags::bitflags;
use log::debug;
use m2v_core::M2vResult;
use m2v_core::bitreader::BitReader;

use super::Mpeg2Decoder;
use super::block::{BlockParams, decode_intra_block, decode_non_intra_block};
use super::tables::NON_LINEAR_QUANTIZER_SCALE;
use super::vlc::{decode_coded_block_pattern, decode_macroblock_type, decode_motion_code};
use crate::frame::PictureType;

bitflags! {
    /// 宏块类型标志
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MbFlags: u8 {
        /// 帧内编码
        const INTRA = 1;
        /// 存在 coded_block_pattern
        const PATTERN = 2;
        /// 后向运动补偿
        const BACKWARD = 4;
        /// 前向运动补偿
        const FORWARD = 8;
        /// 宏块携带新的量化尺度
        const QUANT = 16;
    }
}

/// 帧图片中的运动类型 (frame_motion_type)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(super) enum MotionType {
    /// 场预测, 每个方向两个向量
    Field,
    /// 帧预测
    #[default]
    Frame,
    /// 双基预测 (按同极性场预测近似)
    DualPrime,
}

impl MotionType {
    fn from_code(code: u32) -> Self {
        match code {
            1 => Self::Field,
            3 => Self::DualPrime,
            _ => Self::Frame,
        }
    }
}

/// 宏块解码状态
///
/// 运动向量预测器下标为 `pmv[r][s][t]`: r 为第几个向量 (场), s 为方向 (0 前向, 1 后向),
/// t 为分量 (0 水平, 1 垂直).
#[derive(Debug, Clone)]
pub(super) struct MacroblockState {
    pub flags: MbFlags,
    pub motion_type: MotionType,
    /// 场 DCT
    pub field_dct: bool,
    pub pmv: [[[i32; 2]; 2]; 2],
    /// motion_vertical_field_select[r][s]
    pub field_select: [[bool; 2]; 2],
    pub dc_pred: [i32; 3],
    pub quantizer_scale: i32,
    pub coded_block_pattern: u8,
    pub blocks: [[i16; 64]; 6],
}

impl MacroblockState {
    pub(super) fn new() -> Self {
        Self {
            flags: MbFlags::empty(),
            motion_type: MotionType::Frame,
            field_dct: false,
            pmv: [[[0; 2]; 2]; 2],
            field_select: [[false; 2]; 2],
            dc_pred: [0; 3],
            quantizer_scale: 0,
            coded_block_pattern: 0,
            blocks: [[0; 64]; 6],
        }
    }

    fn reset_forward_vectors(&mut self) {
        self.pmv[0][0] = [0; 2];
        self.pmv[1][0] = [0; 2];
    }

    /// 跳过宏块: 沿用上一宏块的预测方向 (去掉帧内标志), 无残差
    pub(super) fn skip(&mut self, picture_type: PictureType) {
        self.dc_pred = [0; 3];
        self.blocks = [[0; 64]; 6];
        self.coded_block_pattern = 0;
        if picture_type == PictureType::P {
            self.reset_forward_vectors();
        }
        self.motion_type = MotionType::Frame;
        self.flags.remove(MbFlags::INTRA);
    }
}

/// 运动向量格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MvFormat {
    Field,
    Frame,
}

/// 宏块模式派生出的运动向量解码参数
struct VectorLayout {
    count: usize,
    format: MvFormat,
    /// 帧图片中的场向量, 垂直预测器需先减半再恢复
    scale: bool,
    dual_prime: bool,
}

// ============================================================================
// 运动向量重建
// ============================================================================

/// 按差分方式重建一个运动向量分量, 结果写回预测器
///
/// 超出 `[-16 << r_size, 16 << r_size)` 的结果按 `2 * limit` 回绕.
pub(super) fn decode_vector(pred: &mut i32, r_size: u32, code: i32, residual: i32, full_pel: bool) {
    let lim = 16 << r_size;
    let mut vec = if full_pel { *pred >> 1 } else { *pred };
    if code > 0 {
        vec += ((code - 1) << r_size) + residual + 1;
        if vec >= lim {
            vec -= lim + lim;
        }
    } else if code < 0 {
        vec -= ((-code - 1) << r_size) + residual + 1;
        if vec < -lim {
            vec += lim + lim;
        }
    }
    *pred = if full_pel { vec << 1 } else { vec };
}

/// 解码一个二维运动向量 (先水平后垂直)
fn decode_motion_vector(
    br: &mut BitReader,
    pmv: &mut [i32; 2],
    r_size: [u32; 2],
    full_pel: bool,
    scale: bool,
    dual_prime: bool,
) -> M2vResult<()> {
    for t in 0..2 {
        let code = decode_motion_code(br)?;
        let residual = if r_size[t] != 0 && code != 0 {
            br.get_bits(r_size[t]) as i32
        } else {
            0
        };
        if dual_prime {
            // dmvector: 读出后不参与预测
            if br.get_flag() {
                br.consume(1);
            }
        }
        if t == 1 && scale {
            pmv[1] >>= 1;
            decode_vector(&mut pmv[1], r_size[1], code, residual, full_pel);
            pmv[1] <<= 1;
        } else {
            decode_vector(&mut pmv[t], r_size[t], code, residual, full_pel);
        }
    }
    Ok(())
}

impl Mpeg2Decoder {
    /// 解码宏块模式, 返回运动向量布局
    fn decode_macroblock_modes(
        &self,
        br: &mut BitReader,
        mb: &mut MacroblockState,
    ) -> M2vResult<VectorLayout> {
        let pic = &self.picture;
        mb.flags = decode_macroblock_type(br, pic.picture_type)?;

        mb.motion_type = if mb.flags.intersects(MbFlags::FORWARD | MbFlags::BACKWARD) {
            if pic.frame_pred_frame_dct {
                MotionType::Frame
            } else {
                MotionType::from_code(br.get_bits(2))
            }
        } else {
            MotionType::Frame
        };

        let layout = match mb.motion_type {
            MotionType::Field => VectorLayout {
                count: 2,
                format: MvFormat::Field,
                scale: true,
                dual_prime: false,
            },
            MotionType::Frame => VectorLayout {
                count: 1,
                format: MvFormat::Frame,
                scale: false,
                dual_prime: false,
            },
            MotionType::DualPrime => VectorLayout {
                count: 1,
                format: MvFormat::Field,
                scale: true,
                dual_prime: true,
            },
        };

        mb.field_dct = !pic.frame_pred_frame_dct
            && mb.flags.intersects(MbFlags::PATTERN | MbFlags::INTRA)
            && br.get_flag();
        Ok(layout)
    }

    /// 解码一个方向 (s) 的全部运动向量
    fn decode_motion_vectors(
        &self,
        br: &mut BitReader,
        mb: &mut MacroblockState,
        s: usize,
        layout: &VectorLayout,
    ) -> M2vResult<()> {
        let pic = &self.picture;
        let r_size = [
            u32::from(pic.f_code[s][0].saturating_sub(1)),
            u32::from(pic.f_code[s][1].saturating_sub(1)),
        ];
        let full_pel = pic.full_pel[s];

        if layout.count == 1 {
            if layout.format == MvFormat::Field && !layout.dual_prime {
                let select = br.get_flag();
                mb.field_select[0][s] = select;
                mb.field_select[1][s] = select;
            }
            if layout.dual_prime {
                mb.field_select[0][s] = false;
                mb.field_select[1][s] = true;
            }
            decode_motion_vector(
                br,
                &mut mb.pmv[0][s],
                r_size,
                full_pel,
                layout.scale,
                layout.dual_prime,
            )?;
            mb.pmv[1][s] = mb.pmv[0][s];
        } else {
            mb.field_select[0][s] = br.get_flag();
            decode_motion_vector(br, &mut mb.pmv[0][s], r_size, full_pel, layout.scale, false)?;
            mb.field_select[1][s] = br.get_flag();
            decode_motion_vector(br, &mut mb.pmv[1][s], r_size, full_pel, layout.scale, false)?;
        }
        Ok(())
    }

    /// 解码一个编码宏块 (地址增量为 1 的宏块)
    ///
    /// 块系数写入 `mb.blocks`, 未编码的块保持为 0.
    pub(super) fn decode_macroblock(
        &self,
        br: &mut BitReader,
        mb: &mut MacroblockState,
    ) -> M2vResult<()> {
        let layout = self.decode_macroblock_modes(br, mb)?;
        let pic = &self.picture;
        let intra = mb.flags.contains(MbFlags::INTRA);
        let concealment = intra && pic.concealment_motion_vectors;

        if mb.flags.contains(MbFlags::QUANT) {
            mb.quantizer_scale = map_quantizer_scale(br.get_bits(5), pic.q_scale_type);
        }

        if mb.flags.contains(MbFlags::FORWARD) || concealment {
            self.decode_motion_vectors(br, mb, 0, &layout)?;
        }
        if mb.flags.contains(MbFlags::BACKWARD) {
            self.decode_motion_vectors(br, mb, 1, &layout)?;
        }
        if concealment {
            // marker_bit
            br.consume(1);
        }

        mb.coded_block_pattern = if mb.flags.contains(MbFlags::PATTERN) {
            decode_coded_block_pattern(br)?
        } else if intra {
            0x3F
        } else {
            0
        };

        let params = BlockParams {
            quantizer_scale: mb.quantizer_scale,
            intra_dc_precision: pic.intra_dc_precision,
            alternate_scan: pic.alternate_scan,
            intra_vlc_format: pic.intra_vlc_format,
            intra_matrix: &self.matrices.intra,
            non_intra_matrix: &self.matrices.non_intra,
        };
        mb.blocks = [[0; 64]; 6];
        for comp in 0..6 {
            if mb.coded_block_pattern & (1 << (5 - comp)) == 0 {
                continue;
            }
            if intra {
                decode_intra_block(br, &params, comp, &mut mb.dc_pred, &mut mb.blocks[comp]);
            } else {
                decode_non_intra_block(br, &params, comp, &mut mb.blocks[comp]);
            }
        }

        if !intra {
            mb.dc_pred = [0; 3];
        }
        if intra && !pic.concealment_motion_vectors {
            mb.pmv = [[[0; 2]; 2]; 2];
        }
        // P 图片中既无前向运动也非帧内: 零向量帧预测
        if pic.picture_type == PictureType::P
            && !mb.flags.intersects(MbFlags::FORWARD | MbFlags::INTRA)
        {
            mb.reset_forward_vectors();
            mb.motion_type = MotionType::Frame;
        }

        if layout.dual_prime && !self.dual_prime_reported.get() {
            self.dual_prime_reported.set(true);
            debug!("双基预测按同极性场预测近似处理");
        }
        Ok(())
    }
}

/// 将 5 位 quantiser_scale_code 映射为量化尺度
pub(super) fn map_quantizer_scale(code: u32, q_scale_type: bool) -> i32 {
    let code = (code & 31) as usize;
    if q_scale_type {
        i32::from(NON_LINEAR_QUANTIZER_SCALE[code])
    } else {
        (code as i32) << 1
    }
}
