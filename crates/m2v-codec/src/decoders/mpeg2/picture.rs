//! 参考帧集合.
//!
//! 三块帧缓冲 (前向参考、后向参考、B 帧辅助) 由解码器独占,
//! 参考关系的转移通过交换缓冲下标完成.

use log::debug;
use m2v_core::{M2vError, M2vResult};

use super::header::Geometry;
use crate::frame::PictureType;

/// 一块 YUV 4:2:0 帧缓冲
#[derive(Debug, Default)]
pub(super) struct FrameBuffer {
    /// Y, Cb, Cr 平面
    pub planes: [Vec<u8>; 3],
    /// 每次被选为写入目标时递增
    pub generation: u64,
}

impl FrameBuffer {
    fn allocate(geometry: &Geometry) -> M2vResult<Self> {
        let mut planes: [Vec<u8>; 3] = Default::default();
        for (i, plane) in planes.iter_mut().enumerate() {
            let size = geometry.plane_size(i);
            plane.try_reserve_exact(size).map_err(|e| {
                M2vError::OutOfMemory(format!("帧缓冲平面 {} ({} 字节): {}", i, size, e))
            })?;
            // 初始为黑色
            plane.resize(size, if i == 0 { 16 } else { 128 });
        }
        Ok(Self {
            planes,
            generation: 0,
        })
    }
}

/// 参考帧集合
#[derive(Debug, Default)]
pub(super) struct FrameStore {
    pub buffers: [FrameBuffer; 3],
    /// 前向参考缓冲下标
    pub forward: usize,
    /// 后向参考缓冲下标 (I/P 图片写入此处)
    pub backward: usize,
    /// B 图片写入的辅助缓冲下标
    pub aux: usize,
    pub geometry: Geometry,
}

impl FrameStore {
    /// 按几何分配三块缓冲
    pub(super) fn allocate(geometry: Geometry) -> M2vResult<Self> {
        let buffers = [
            FrameBuffer::allocate(&geometry)?,
            FrameBuffer::allocate(&geometry)?,
            FrameBuffer::allocate(&geometry)?,
        ];
        debug!(
            "分配帧缓冲: {}x{} (宏块 {}x{})",
            geometry.width, geometry.height, geometry.mb_width, geometry.mb_height
        );
        Ok(Self {
            buffers,
            forward: 0,
            backward: 1,
            aux: 2,
            geometry,
        })
    }

    pub(super) fn is_allocated(&self) -> bool {
        !self.buffers[0].planes[0].is_empty()
    }

    /// 为新图片选择写入缓冲并返回其下标
    ///
    /// I/P 图片交换前后向参考, 写入新的后向缓冲 (原前向参考被回收);
    /// B 图片写入辅助缓冲, 不改变参考关系.
    pub(super) fn begin_picture(&mut self, picture_type: PictureType) -> usize {
        let target = if picture_type == PictureType::B {
            self.aux
        } else {
            std::mem::swap(&mut self.forward, &mut self.backward);
            self.backward
        };
        self.buffers[target].generation += 1;
        target
    }
}
