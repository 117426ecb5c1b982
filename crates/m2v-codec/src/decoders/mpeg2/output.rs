//! 输出帧环.
//!
//! 固定容量的槽位数组, 按轮转顺序写入. 槽位只记录缓冲下标与代数,
//! 像素在查询时从帧缓冲借出.

use super::picture::FrameStore;
use crate::frame::PictureType;

/// 一次 PES 解码的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeStatus {
    /// 解码出的图片类型, None 表示本次没有完整图片
    pub picture: Option<PictureType>,
    /// 已处理到的字节偏移 (下一个起始码的位置, 或数据长度)
    pub consumed: usize,
}

impl DecodeStatus {
    /// 是否解码出一张图片
    pub fn decoded(&self) -> bool {
        self.picture.is_some()
    }
}

/// 输出环中的一个槽位
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameSlot {
    /// 显示时间戳, 0 表示空槽
    pub pts: i64,
    /// 帧缓冲下标
    pub buffer: usize,
    /// 发布时的缓冲代数
    pub generation: u64,
    /// 源数据包字节数
    pub byte_size: usize,
    pub picture_type: PictureType,
}

/// 借出的已解码帧
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub pts: i64,
    pub picture_type: PictureType,
    pub byte_size: usize,
    /// 编码宽度 (宏块对齐)
    pub width: usize,
    pub height: usize,
    pub chroma_width: usize,
    pub chroma_height: usize,
    /// Y, Cb, Cr 平面
    pub planes: [&'a [u8]; 3],
    pub luma_stride: usize,
    pub chroma_stride: usize,
}

/// 轮转写入的输出环
#[derive(Debug)]
pub(super) struct OutputRing {
    slots: Vec<FrameSlot>,
    write_index: usize,
}

impl OutputRing {
    pub(super) fn new(capacity: usize) -> Self {
        Self {
            slots: vec![FrameSlot::default(); capacity.max(1)],
            write_index: 0,
        }
    }

    /// 写入下一个槽位
    pub(super) fn publish(&mut self, slot: FrameSlot) {
        let idx = self.write_index % self.slots.len();
        self.slots[idx] = slot;
        self.write_index = (idx + 1) % self.slots.len();
    }

    pub(super) fn slot(&self, index: usize) -> Option<&FrameSlot> {
        self.slots.get(index)
    }

    /// 最近一次写入的槽位
    pub(super) fn latest(&self) -> &FrameSlot {
        let cap = self.slots.len();
        &self.slots[(self.write_index + cap - 1) % cap]
    }

    /// 槽位是否仍然有效 (时间戳非零且缓冲未被之后的图片改写)
    pub(super) fn is_valid(slot: &FrameSlot, store: &FrameStore) -> bool {
        slot.pts != 0
            && store
                .buffers
                .get(slot.buffer)
                .is_some_and(|b| b.generation == slot.generation)
    }

    /// 查找时间戳最接近的有效槽位, 距离相同时取环中靠前者
    pub(super) fn nearest(&self, pts: i64, store: &FrameStore) -> Option<&FrameSlot> {
        let mut best: Option<(&FrameSlot, u64)> = None;
        for slot in self.slots.iter().filter(|s| Self::is_valid(s, store)) {
            let dist = slot.pts.abs_diff(pts);
            if best.is_none_or(|(_, d)| dist < d) {
                best = Some((slot, dist));
            }
        }
        best.map(|(slot, _)| slot)
    }

    /// 清空全部时间戳并重置写入位置
    pub(super) fn invalidate(&mut self) {
        for slot in &mut self.slots {
            slot.pts = 0;
        }
        self.write_index = 0;
    }
}

impl FrameStore {
    /// 借出槽位对应的像素
    pub(super) fn view(&self, slot: &FrameSlot) -> Option<FrameView<'_>> {
        let buf = self.buffers.get(slot.buffer)?;
        let g = &self.geometry;
        Some(FrameView {
            pts: slot.pts,
            picture_type: slot.picture_type,
            byte_size: slot.byte_size,
            width: g.width,
            height: g.height,
            chroma_width: g.chroma_width,
            chroma_height: g.chroma_height,
            planes: [&buf.planes[0], &buf.planes[1], &buf.planes[2]],
            luma_stride: g.width,
            chroma_stride: g.chroma_width,
        })
    }
}
