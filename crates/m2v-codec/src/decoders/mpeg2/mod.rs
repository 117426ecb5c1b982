//! MPEG-2 视频解码器
//!
//! 实现 ISO/IEC 13818-2 主档次视频基本流解码, 输出 YUV 4:2:0 图片.
//!
//! 已实现:
//! - 序列头、序列扩展、显示扩展、量化矩阵扩展、图片编码扩展
//! - I/P/B 帧图片解码, 帧/场运动补偿与半像素插值
//! - 帧/场 DCT, 之字形与交替扫描, 线性与非线性量化尺度
//! - 兼容 MPEG-1 图片头语义 (full_pel 向量)
//! - 按时间戳查询的输出帧环
//!
//! 场图片按帧图片处理, 双基预测按同极性场预测近似.
//!
//! ## 模块结构
//!
//! - `tables`: 码表与常量
//! - `vlc`: 分层 VLC 查表
//! - `header`: 序列/图片/片头解析
//! - `block`: 块系数解码与反量化
//! - `macroblock`: 宏块模式与运动向量
//! - `idct`: 8x8 整数反 DCT
//! - `motion`: 运动补偿与宏块重建
//! - `slice`: 片层循环
//! - `picture`: 参考帧集合
//! - `output`: 输出帧环

mod block;
mod header;
pub mod idct;
mod macroblock;
mod motion;
mod output;
mod picture;
mod slice;
mod tables;
mod vlc;

use std::cell::Cell;
use std::collections::VecDeque;

use log::{debug, trace, warn};
use m2v_core::bitreader::BitReader;
use m2v_core::color::ColorRange;
use m2v_core::timestamp::MPEG_TIME_BASE;
use m2v_core::{M2vError, M2vResult, PixelFormat};

use crate::codec_id::CodecId;
use crate::codec_parameters::CodecParameters;
use crate::decoder::Decoder;
use crate::frame::{Frame, PictureType, VideoFrame};
use crate::packet::Packet;

use header::{
    EXTENSION_START_CODE, ExtensionTarget, FRAME_PICTURE, GROUP_START_CODE, Geometry,
    PICTURE_START_CODE, PictureParams, QuantMatrices, SEQUENCE_END_CODE, SEQUENCE_HEADER_CODE,
    USER_DATA_START_CODE, is_slice_code, next_code, parse_extension, parse_picture_header,
    parse_sequence_header,
};
use output::OutputRing;
use picture::FrameStore;

pub use header::SequenceHeader;
pub use output::{DecodeStatus, FrameSlot, FrameView};

// ============================================================================
// 配置
// ============================================================================

/// 默认输出环容量
pub const DEFAULT_RING_CAPACITY: usize = 40;

/// MPEG-2 解码器配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mpeg2Config {
    /// 输出环槽位数
    pub ring_capacity: usize,
}

impl Default for Mpeg2Config {
    fn default() -> Self {
        Self {
            ring_capacity: DEFAULT_RING_CAPACITY,
        }
    }
}

// ============================================================================
// 解码器
// ============================================================================

/// MPEG-2 视频解码器
pub struct Mpeg2Decoder {
    config: Mpeg2Config,
    /// 最近的序列头, None 表示尚未同步
    sequence: Option<SequenceHeader>,
    /// 当前图片参数
    picture: PictureParams,
    matrices: QuantMatrices,
    store: FrameStore,
    ring: OutputRing,
    dual_prime_reported: Cell<bool>,
    field_picture_reported: bool,
    /// 已解码、等待取出的帧 (解码顺序)
    frames: VecDeque<VideoFrame>,
    /// 收到空包后进入排空状态
    draining: bool,
    /// 数据包缺少 PTS 时使用的递增时间戳
    synthetic_pts: i64,
}

impl Default for Mpeg2Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Mpeg2Decoder {
    /// 使用默认配置创建解码器
    pub fn new() -> Self {
        Self::with_config(Mpeg2Config::default())
    }

    pub fn with_config(config: Mpeg2Config) -> Self {
        let ring = OutputRing::new(config.ring_capacity);
        Self {
            config,
            sequence: None,
            picture: PictureParams::default(),
            matrices: QuantMatrices::default(),
            store: FrameStore::default(),
            ring,
            dual_prime_reported: Cell::new(false),
            field_picture_reported: false,
            frames: VecDeque::new(),
            draining: false,
            synthetic_pts: 0,
        }
    }

    /// 注册表工厂
    pub fn create() -> M2vResult<Box<dyn Decoder>> {
        Ok(Box::new(Self::new()))
    }

    pub fn config(&self) -> &Mpeg2Config {
        &self.config
    }

    /// 当前序列头
    pub fn sequence_header(&self) -> Option<&SequenceHeader> {
        self.sequence.as_ref()
    }

    /// 解码一个 PES 负载中的一张图片
    ///
    /// 返回解码出的图片类型以及处理到的字节偏移. 偏移指向结束该图片的下一个起始码,
    /// 调用方可以从这里继续送入剩余数据. 没有完整图片时 `picture` 为 None,
    /// 偏移等于数据长度.
    pub fn decode_pes(&mut self, data: &[u8], pts: i64) -> M2vResult<DecodeStatus> {
        let mut br = BitReader::new(data);
        let no_picture = DecodeStatus {
            picture: None,
            consumed: data.len(),
        };

        if !self.parse_headers(&mut br) {
            return Ok(no_picture);
        }
        if let Err(e) = self.prepare_frame_store() {
            self.sequence = None;
            return Err(e);
        }

        if self.picture.picture_structure != FRAME_PICTURE && !self.field_picture_reported {
            self.field_picture_reported = true;
            warn!(
                "不支持场图片 (picture_structure={}), 按帧图片解码",
                self.picture.picture_structure
            );
        }

        let picture_type = self.picture.picture_type;
        let target = self.store.begin_picture(picture_type);
        self.decode_slices(&mut br, target);

        let consumed = match next_code(&mut br) {
            Some(_) => br.byte_position(),
            None => data.len(),
        };
        self.ring.publish(FrameSlot {
            pts,
            buffer: target,
            generation: self.store.buffers[target].generation,
            byte_size: data.len(),
            picture_type,
        });
        trace!(
            "图片 {} 解码完成, pts={}, 处理 {} / {} 字节",
            picture_type.as_char(),
            pts,
            consumed,
            data.len()
        );
        Ok(DecodeStatus {
            picture: Some(picture_type),
            consumed,
        })
    }

    /// 处理起始码直到图片头及其扩展解析完毕
    ///
    /// 返回 true 时游标停在第一个片起始码之前; 数据耗尽返回 false.
    /// 尚未见到序列头时, 序列头之前的内容全部跳过.
    fn parse_headers(&mut self, br: &mut BitReader) -> bool {
        let mut in_picture = false;
        while let Some(code) = next_code(br) {
            if in_picture && is_slice_code(code) {
                return true;
            }
            br.consume(32);
            if self.sequence.is_none() && code != SEQUENCE_HEADER_CODE {
                continue;
            }
            match code {
                SEQUENCE_HEADER_CODE => {
                    self.sequence = Some(parse_sequence_header(br, &mut self.matrices));
                    in_picture = false;
                }
                EXTENSION_START_CODE => {
                    let target = match self.sequence.as_mut() {
                        Some(_) if in_picture => ExtensionTarget::Picture(&mut self.picture),
                        Some(seq) => ExtensionTarget::Sequence(seq),
                        None => continue,
                    };
                    parse_extension(br, target, &mut self.matrices);
                }
                PICTURE_START_CODE => match parse_picture_header(br) {
                    Some(pic) => {
                        self.picture = pic;
                        in_picture = true;
                    }
                    None => {
                        debug!("跳过不支持的图片编码类型");
                        in_picture = false;
                    }
                },
                GROUP_START_CODE => trace!("GOP 头"),
                SEQUENCE_END_CODE => debug!("序列结束"),
                USER_DATA_START_CODE => {}
                other => trace!("跳过起始码 0x{:08X}", other),
            }
        }
        false
    }

    /// 按序列头确认帧缓冲, 几何变化时重新分配
    fn prepare_frame_store(&mut self) -> M2vResult<()> {
        let seq = self
            .sequence
            .as_ref()
            .ok_or_else(|| M2vError::Internal("图片头之前缺少序列头".into()))?;
        let geometry = Geometry::from_sequence(seq)?;
        if self.store.is_allocated() && self.store.geometry == geometry {
            return Ok(());
        }
        if seq.pixel_format() != PixelFormat::Yuv420p {
            warn!("不支持 {} (chroma_format={}), 按 4:2:0 解码", seq.pixel_format(), seq.chroma_format);
        }
        self.store = FrameStore::allocate(geometry)?;
        self.ring.invalidate();
        Ok(())
    }

    /// 查找时间戳最接近的有效帧
    pub fn nearest_frame(&self, pts: i64) -> Option<FrameView<'_>> {
        self.ring
            .nearest(pts, &self.store)
            .and_then(|slot| self.store.view(slot))
    }

    /// 输出环中指定位置的槽位
    pub fn frame_slot(&self, index: usize) -> Option<&FrameSlot> {
        self.ring.slot(index)
    }

    /// 槽位是否仍指向未被改写的缓冲
    pub fn is_slot_valid(&self, slot: &FrameSlot) -> bool {
        OutputRing::is_valid(slot, &self.store)
    }

    /// 使全部槽位失效
    pub fn invalidate_frames(&mut self) {
        self.ring.invalidate();
    }

    /// 由最近发布的槽位构造输出帧
    fn latest_video_frame(&self, packet: &Packet) -> Option<VideoFrame> {
        let view = self.store.view(self.ring.latest())?;
        let seq = self.sequence.as_ref()?;

        let mut frame = VideoFrame::new(view.width as u32, view.height as u32, PixelFormat::Yuv420p);
        frame.data = view.planes.iter().map(|p| p.to_vec()).collect();
        frame.linesize = vec![view.luma_stride, view.chroma_stride, view.chroma_stride];
        let (dw, dh) = seq.display_dimensions();
        frame.display_width = dw.clamp(1, view.width as u32);
        frame.display_height = dh.clamp(1, view.height as u32);
        frame.pts = packet.pts;
        frame.time_base = if packet.time_base.is_valid() {
            packet.time_base
        } else {
            MPEG_TIME_BASE
        };
        frame.duration = packet.duration;
        frame.is_keyframe = view.picture_type == PictureType::I;
        frame.picture_type = view.picture_type;
        frame.sample_aspect_ratio = seq.sample_aspect_ratio();
        frame.frame_rate = seq.frame_rate();
        frame.color_space = seq.color_space;
        frame.color_range = ColorRange::Limited;
        Some(frame)
    }
}

impl Decoder for Mpeg2Decoder {
    fn codec_id(&self) -> CodecId {
        CodecId::Mpeg2Video
    }

    fn name(&self) -> &str {
        "mpeg2video"
    }

    fn open(&mut self, params: &CodecParameters) -> M2vResult<()> {
        let Some(video) = params.video() else {
            return Err(M2vError::InvalidArgument("MPEG-2 解码器需要视频参数".into()));
        };
        debug!(
            "打开 MPEG-2 解码器: 参数尺寸 {}x{}, extra_data {} 字节",
            video.width,
            video.height,
            params.extra_data.len()
        );
        if !params.extra_data.is_empty() {
            let mut br = BitReader::new(&params.extra_data);
            self.parse_headers(&mut br);
            if let Some(seq) = &self.sequence {
                debug!(
                    "extra_data 序列头: {}x{}",
                    seq.horizontal_size, seq.vertical_size
                );
            }
        }
        Ok(())
    }

    fn send_packet(&mut self, packet: &Packet) -> M2vResult<()> {
        if packet.is_empty() {
            debug!("收到刷新信号");
            self.draining = true;
            return Ok(());
        }

        // 槽位以 0 表示空, 缺少 PTS 时改用递增时间戳
        let key = if packet.pts > 0 {
            packet.pts
        } else {
            self.synthetic_pts += 1;
            self.synthetic_pts
        };

        let data = &packet.data[..];
        let mut offset = 0;
        while offset < data.len() {
            let status = self.decode_pes(&data[offset..], key)?;
            if !status.decoded() {
                break;
            }
            if let Some(frame) = self.latest_video_frame(packet) {
                self.frames.push_back(frame);
            }
            if status.consumed == 0 {
                break;
            }
            offset += status.consumed;
        }
        Ok(())
    }

    fn receive_frame(&mut self) -> M2vResult<Frame> {
        if let Some(frame) = self.frames.pop_front() {
            return Ok(Frame::Video(frame));
        }
        if self.draining {
            Err(M2vError::Eof)
        } else {
            Err(M2vError::NeedMoreData)
        }
    }

    fn flush(&mut self) {
        debug!("MPEG-2 解码器已刷新, 清空参考帧与输出环");
        self.frames.clear();
        self.ring.invalidate();
        self.sequence = None;
        self.store = FrameStore::default();
        self.draining = false;
    }
}

// ============================================================================
// 基本流切分
// ============================================================================

/// 将原始基本流切分为逐图片的数据单元
///
/// 每个单元从序列头、GOP 头或图片起始码开始, 恰好包含一张图片.
/// 第一个此类起始码之前的数据被丢弃.
pub fn split_pictures(data: &[u8]) -> Vec<&[u8]> {
    let mut units = Vec::new();
    let mut start: Option<usize> = None;
    let mut has_picture = false;

    let mut i = 0;
    while i + 3 < data.len() {
        if data[i] != 0 || data[i + 1] != 0 || data[i + 2] != 1 {
            i += 1;
            continue;
        }
        let code = data[i + 3];
        if matches!(code, 0xB3 | 0xB8 | 0x00) {
            match start {
                None => start = Some(i),
                Some(s) if has_picture => {
                    units.push(&data[s..i]);
                    start = Some(i);
                    has_picture = false;
                }
                Some(_) => {}
            }
            if code == 0x00 {
                has_picture = true;
            }
        }
        i += 4;
    }
    if let Some(s) = start {
        units.push(&data[s..]);
    }
    units
}
