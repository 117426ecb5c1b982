//! 解码器接口.

use m2v_core::M2vResult;

use crate::codec_id::CodecId;
use crate::codec_parameters::CodecParameters;
use crate::frame::Frame;
use crate::packet::Packet;

/// 推拉式解码器
///
/// `send_packet` 每解出一张图片就在内部排队一帧, `receive_frame` 按解码顺序取出.
/// 空包进入排空状态: 队列取尽后返回 `Eof` 而不是 `NeedMoreData`.
/// 码流错误尽量在内部消化, 只有参数或内存类错误才从 `send_packet` 返回.
pub trait Decoder: Send {
    fn codec_id(&self) -> CodecId;

    fn name(&self) -> &str;

    /// 用容器参数初始化, `extra_data` 中的序列头会被预先解析
    fn open(&mut self, _params: &CodecParameters) -> M2vResult<()> {
        Ok(())
    }

    fn send_packet(&mut self, packet: &Packet) -> M2vResult<()>;

    /// 取出一帧; 队列为空时返回 `NeedMoreData`, 排空后返回 `Eof`
    fn receive_frame(&mut self) -> M2vResult<Frame>;

    /// 丢弃参考帧、序列参数与待取的帧 (seek 后调用)
    fn flush(&mut self);
}
