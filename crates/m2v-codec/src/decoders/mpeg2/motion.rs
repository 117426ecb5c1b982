//! 运动补偿与宏块重建.
//!
//! 预测先在宏块本地缓冲中形成 (只读借用参考帧), 再与残差相加写回目标帧.

use log::warn;

use super::header::{Geometry, PictureParams};
use super::idct::idct_8x8;
use super::macroblock::{MacroblockState, MbFlags, MotionType};
use super::picture::FrameStore;
use crate::frame::PictureType;

// ============================================================================
// 饱和表
// ============================================================================

const CLIP_OFFSET: i32 = 1024;

const fn build_clip_table() -> [u8; 2048] {
    let mut table = [0u8; 2048];
    let mut i = 0;
    while i < 2048 {
        let v = i as i32 - CLIP_OFFSET;
        table[i] = if v < 0 {
            0
        } else if v > 255 {
            255
        } else {
            v as u8
        };
        i += 1;
    }
    table
}

/// 饱和到 [0, 255] 的查找表, 下标偏移 1024
static CLIP: [u8; 2048] = build_clip_table();

#[inline]
fn clip(v: i32) -> u8 {
    CLIP[(v + CLIP_OFFSET).clamp(0, 2047) as usize]
}

// ============================================================================
// 半像素混合
// ============================================================================

/// 由运动向量奇偶性决定的插值方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HalfPel {
    /// 整像素复制
    Full,
    /// 水平半像素
    Horizontal,
    /// 垂直半像素
    Vertical,
    /// 双向半像素
    Both,
}

impl HalfPel {
    fn from_vector(dx: i32, dy: i32) -> Self {
        match (dx & 1 != 0, dy & 1 != 0) {
            (false, false) => Self::Full,
            (true, false) => Self::Horizontal,
            (false, true) => Self::Vertical,
            (true, true) => Self::Both,
        }
    }

    /// 由左上、右、下、右下四个邻样本混合出预测样本, 不需要的邻样本被忽略
    #[inline]
    fn blend(self, p00: u8, p01: u8, p10: u8, p11: u8) -> u8 {
        let (a, b, c, d) = (u32::from(p00), u32::from(p01), u32::from(p10), u32::from(p11));
        let v = match self {
            Self::Full => a,
            Self::Horizontal => (a + b + 1) >> 1,
            Self::Vertical => (a + c + 1) >> 1,
            Self::Both => (a + b + c + d + 2) >> 2,
        };
        v as u8
    }

    /// 计算一个预测样本, `a` 为左上样本下标, `down` 为垂直邻样本偏移
    #[inline]
    fn sample(self, src: &[u8], a: usize, down: usize) -> u8 {
        match self {
            Self::Full => src[a],
            Self::Horizontal => self.blend(src[a], src[a + 1], 0, 0),
            Self::Vertical => self.blend(src[a], 0, src[a + down], 0),
            Self::Both => self.blend(src[a], src[a + 1], src[a + down], src[a + down + 1]),
        }
    }
}

/// 一个平面上的单场预测请求
struct PlanePrediction {
    /// 目标块宽度 (16 亮度, 8 色度)
    width: usize,
    /// 每场行数
    rows: usize,
    /// 块左上角横坐标
    x: i32,
    /// 块左上角纵坐标 (场预测时为场行号)
    y: i32,
    dx: i32,
    dy: i32,
    /// 源场 (0 顶场, 1 底场)
    src_field: usize,
    /// 目标场
    dst_field: usize,
    /// 场预测 (源行间隔 2)
    field: bool,
    /// 与已有预测取平均
    average: bool,
}

#[inline]
fn store(d: &mut u8, p: u8, average: bool) {
    *d = if average {
        ((u32::from(*d) + u32::from(p) + 1) >> 1) as u8
    } else {
        p
    };
}

/// 在一个平面上形成预测, 返回参考区域是否完全位于图片内
///
/// 越界的参考样本取最近的边缘样本 (场预测时取同场的边缘行), 预测总会被写满.
fn predict_plane(dst: &mut [u8], src: &[u8], stride: usize, height: usize, req: &PlanePrediction) -> bool {
    let hp = HalfPel::from_vector(req.dx, req.dy);
    let fs: i32 = if req.field { 2 } else { 1 };
    let x0 = req.x + (req.dx >> 1);
    let row0 = req.src_field as i32 + fs * (req.y + (req.dy >> 1));
    let extra_x = i32::from(matches!(hp, HalfPel::Horizontal | HalfPel::Both));
    let extra_y = if matches!(hp, HalfPel::Vertical | HalfPel::Both) { fs } else { 0 };
    let last_row = row0 + 2 * (req.rows as i32 - 1) + extra_y;
    let last_col = x0 + req.width as i32 - 1 + extra_x;
    if x0 >= 0 && row0 >= 0 && last_col < stride as i32 && last_row < height as i32 {
        let down = fs as usize * stride;
        for k in 0..req.rows {
            let src_row = (row0 as usize + 2 * k) * stride + x0 as usize;
            let dst_row = (req.dst_field + 2 * k) * req.width;
            for c in 0..req.width {
                store(&mut dst[dst_row + c], hp.sample(src, src_row + c, down), req.average);
            }
        }
        return true;
    }

    // 边缘延伸: 帧预测按帧行钳位, 场预测按源场的场行钳位
    let field_lines = ((height as i32 - req.src_field as i32 + 1) / 2).max(1);
    let src_row = |unit: i32| -> usize {
        if req.field {
            req.src_field + 2 * unit.clamp(0, field_lines - 1) as usize
        } else {
            unit.clamp(0, height as i32 - 1) as usize
        }
    };
    let col = |x: i32| x.clamp(0, stride as i32 - 1) as usize;
    for k in 0..req.rows {
        let unit = if req.field {
            req.y + (req.dy >> 1) + k as i32
        } else {
            row0 + 2 * k as i32
        };
        let (top, bottom) = (src_row(unit) * stride, src_row(unit + 1) * stride);
        let dst_row = (req.dst_field + 2 * k) * req.width;
        for c in 0..req.width {
            let (left, right) = (col(x0 + c as i32), col(x0 + c as i32 + 1));
            let p = hp.blend(src[top + left], src[top + right], src[bottom + left], src[bottom + right]);
            store(&mut dst[dst_row + c], p, req.average);
        }
    }
    false
}

// ============================================================================
// 宏块预测
// ============================================================================

/// 宏块的本地预测像素
pub(super) struct MbPixels {
    pub luma: [u8; 256],
    pub cb: [u8; 64],
    pub cr: [u8; 64],
}

impl MbPixels {
    fn new() -> Self {
        Self {
            luma: [0; 256],
            cb: [0; 64],
            cr: [0; 64],
        }
    }
}

/// 单个向量的场预测参数
struct FieldRef {
    src_field: usize,
    dst_field: usize,
    dx: i32,
    /// 亮度垂直向量 (帧预测为帧行单位, 场预测为场行单位)
    dy: i32,
}

/// 从一块参考帧形成亮度与色度预测
fn predict_from(
    pixels: &mut MbPixels,
    planes: &[Vec<u8>; 3],
    geometry: &Geometry,
    mb_x: usize,
    mb_y: usize,
    r: &FieldRef,
    field: bool,
    average: bool,
) -> bool {
    let bx = (mb_x * 16) as i32;
    let by = (mb_y * 16) as i32;
    let luma = PlanePrediction {
        width: 16,
        rows: 8,
        x: bx,
        y: if field { by >> 1 } else { by },
        dx: r.dx,
        dy: r.dy,
        src_field: r.src_field,
        dst_field: r.dst_field,
        field,
        average,
    };
    let mut ok = predict_plane(&mut pixels.luma, &planes[0], geometry.width, geometry.height, &luma);

    let chroma = PlanePrediction {
        width: 8,
        rows: 4,
        x: bx >> 1,
        y: if field { by >> 2 } else { by >> 1 },
        dx: r.dx / 2,
        dy: r.dy / 2,
        ..luma
    };
    for (dst, plane) in [(&mut pixels.cb, &planes[1]), (&mut pixels.cr, &planes[2])] {
        ok &= predict_plane(dst, plane, geometry.chroma_width, geometry.chroma_height, &chroma);
    }
    ok
}

/// 按一个方向 (s) 的向量形成两场预测
fn predict_direction(
    pixels: &mut MbPixels,
    planes: &[Vec<u8>; 3],
    geometry: &Geometry,
    mb: &MacroblockState,
    mb_x: usize,
    mb_y: usize,
    s: usize,
    frame_prediction: bool,
    average: bool,
) -> bool {
    let mut ok = true;
    for r in 0..2 {
        let fr = if frame_prediction {
            FieldRef {
                src_field: r,
                dst_field: r,
                dx: mb.pmv[0][s][0],
                dy: mb.pmv[0][s][1],
            }
        } else {
            FieldRef {
                src_field: usize::from(mb.field_select[r][s]),
                dst_field: r,
                dx: mb.pmv[r][s][0],
                dy: mb.pmv[r][s][1] >> 1,
            }
        };
        ok &= predict_from(pixels, planes, geometry, mb_x, mb_y, &fr, !frame_prediction, average);
    }
    ok
}

impl FrameStore {
    /// 形成宏块预测, 返回是否存在运动补偿预测
    ///
    /// 指向图片之外的向量按边缘延伸取样, 只记录警告.
    fn form_predictions(
        &self,
        pixels: &mut MbPixels,
        pic: &PictureParams,
        mb: &MacroblockState,
        mb_x: usize,
        mb_y: usize,
    ) -> bool {
        let g = &self.geometry;
        let mut predicted = false;
        let mut ok = true;

        if mb.flags.contains(MbFlags::FORWARD) || pic.picture_type == PictureType::P {
            let frame = mb.motion_type == MotionType::Frame || !mb.flags.contains(MbFlags::FORWARD);
            let planes = &self.buffers[self.forward].planes;
            ok &= predict_direction(pixels, planes, g, mb, mb_x, mb_y, 0, frame, false);
            predicted = true;
        }
        if mb.flags.contains(MbFlags::BACKWARD) {
            let frame = mb.motion_type == MotionType::Frame;
            let planes = &self.buffers[self.backward].planes;
            ok &= predict_direction(pixels, planes, g, mb, mb_x, mb_y, 1, frame, predicted);
            predicted = true;
        }
        if !ok {
            warn!("宏块 ({}, {}) 运动向量指向图片之外", mb_x, mb_y);
        }
        predicted
    }

    /// 将目标帧中宏块当前内容复制为预测
    fn copy_block(&self, pixels: &mut MbPixels, target: usize, mb_x: usize, mb_y: usize) {
        let planes = &self.buffers[target].planes;
        let g = &self.geometry;
        for row in 0..16 {
            let at = (mb_y * 16 + row) * g.width + mb_x * 16;
            pixels.luma[row * 16..row * 16 + 16].copy_from_slice(&planes[0][at..at + 16]);
        }
        for row in 0..8 {
            let at = (mb_y * 8 + row) * g.chroma_width + mb_x * 8;
            pixels.cb[row * 8..row * 8 + 8].copy_from_slice(&planes[1][at..at + 8]);
            pixels.cr[row * 8..row * 8 + 8].copy_from_slice(&planes[2][at..at + 8]);
        }
    }

    /// 重建一个宏块: 形成预测, 反变换残差, 相加并饱和写入目标帧
    pub(super) fn reconstruct_macroblock(
        &mut self,
        target: usize,
        pic: &PictureParams,
        mb: &mut MacroblockState,
        mb_x: usize,
        mb_y: usize,
    ) {
        let g = self.geometry;
        if mb_x >= g.mb_width || mb_y >= g.mb_height {
            return;
        }
        let intra = mb.flags.contains(MbFlags::INTRA);
        let mut pixels = MbPixels::new();
        if !intra && !self.form_predictions(&mut pixels, pic, mb, mb_x, mb_y) {
            self.copy_block(&mut pixels, target, mb_x, mb_y);
        }

        let planes = &mut self.buffers[target].planes;
        for comp in 0..6 {
            if mb.coded_block_pattern & (1 << (5 - comp)) != 0 {
                idct_8x8(&mut mb.blocks[comp]);
            }
            let block = &mb.blocks[comp];
            if comp < 4 {
                // 场 DCT 时块行在宏块内隔行排列
                let (r, step) = if mb.field_dct {
                    (comp >> 1, 2)
                } else {
                    ((comp >> 1) * 8, 1)
                };
                let col = (comp & 1) * 8;
                for k in 0..8 {
                    let row = r + k * step;
                    let at = (mb_y * 16 + row) * g.width + mb_x * 16 + col;
                    let p = row * 16 + col;
                    add_row(
                        &mut planes[0][at..at + 8],
                        &pixels.luma[p..p + 8],
                        &block[k * 8..k * 8 + 8],
                        intra,
                    );
                }
            } else {
                let pred = if comp == 4 { &pixels.cb } else { &pixels.cr };
                for k in 0..8 {
                    let at = (mb_y * 8 + k) * g.chroma_width + mb_x * 8;
                    add_row(
                        &mut planes[comp - 3][at..at + 8],
                        &pred[k * 8..k * 8 + 8],
                        &block[k * 8..k * 8 + 8],
                        intra,
                    );
                }
            }
        }
    }
}

/// 残差与预测相加并饱和 (帧内块以 128 为预测)
#[inline]
fn add_row(dst: &mut [u8], pred: &[u8], residual: &[i16], intra: bool) {
    for ((d, &p), &r) in dst.iter_mut().zip(pred).zip(residual) {
        let base = if intra { 128 } else { i32::from(p) };
        *d = clip(base + i32::from(r));
    }
}
