//! 压缩数据包.
//!
//! 一个数据包对应一个 PES 负载, 可以包含一张或多张图片的基本流数据.
//! 数据为空的包表示排空 (flush) 信号.

use bytes::Bytes;
use m2v_core::{NOPTS_VALUE, Rational};

#[derive(Debug, Clone)]
pub struct Packet {
    pub data: Bytes,
    /// 显示时间戳, 小于等于 0 时解码器改用递增序号
    pub pts: i64,
    /// 时长 (time_base 单位), 原样带到输出帧
    pub duration: i64,
    /// 未设置时输出帧使用 90kHz 时间基
    pub time_base: Rational,
}

impl Packet {
    /// 排空信号
    pub fn empty() -> Self {
        Self::from_data(Bytes::new())
    }

    pub fn from_data(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            pts: NOPTS_VALUE,
            duration: 0,
            time_base: Rational::UNDEFINED,
        }
    }

    /// 带时间戳的数据包
    pub fn with_pts(data: impl Into<Bytes>, pts: i64, time_base: Rational) -> Self {
        Self {
            pts,
            time_base,
            ..Self::from_data(data)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
