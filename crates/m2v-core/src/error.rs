//! 错误类型.
//!
//! 码流损坏大多在解码器内部就地恢复 (丢弃块或片并记录 warn 日志),
//! 只有无法继续的情况才以 [`M2vError`] 返回给调用方.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum M2vError {
    /// 调用方传入的参数不可用
    #[error("无效参数: {0}")]
    InvalidArgument(String),

    /// 码流内容无法解释 (非法 VLC、非法几何等)
    #[error("无效数据: {0}")]
    InvalidData(String),

    /// 帧缓冲分配失败
    #[error("内存分配失败: {0}")]
    OutOfMemory(String),

    /// 解码器需要更多数据包才能产出帧
    #[error("需要更多输入")]
    NeedMoreData,

    /// 排空结束, 不再有帧输出
    #[error("已到达流末尾")]
    Eof,

    /// 注册表中没有对应的解码器
    #[error("未找到编解码器: {0}")]
    CodecNotFound(String),

    /// 内部状态不一致
    #[error("内部错误: {0}")]
    Internal(String),
}

pub type M2vResult<T> = Result<T, M2vError>;
