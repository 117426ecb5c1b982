//! 32 位窗口比特游标.
//!
//! MPEG-2 视频层的所有语法元素都通过它读取. 游标维护一个左对齐的 32 位窗口,
//! 每次消费后按字节补充, 保证窗口中至少有 25 个有效位, 因此任意 `peek(n)`
//! (n <= 24) 都不需要再访问缓冲区.
//!
//! 超过缓冲区末尾的读取不会越界, 而是补入 0 位. 调用方通过
//! [`BitReader::is_exhausted`] 判断数据是否已读完.

use log::trace;

/// 起始码前缀 `0x000001` 的 24 位值
pub const START_CODE_PREFIX: u32 = 0x00_0001;

/// 比特游标
///
/// 使用大端位序 (MSB first).
///
/// # 示例
/// ```
/// use m2v_core::bitreader::BitReader;
///
/// let data = [0b1011_0001, 0b0101_0101];
/// let mut br = BitReader::new(&data);
/// assert_eq!(br.peek(4), 0b1011);
/// assert_eq!(br.get_bits(4), 0b1011);
/// assert_eq!(br.get_bits(12), 0b0001_0101_0101);
/// assert!(br.is_exhausted());
/// ```
pub struct BitReader<'a> {
    /// 源数据
    data: &'a [u8],
    /// 下一个要装入窗口的字节索引 (可能超过 data.len(), 超出部分按 0 计)
    load_pos: usize,
    /// 左对齐的位窗口
    window: u32,
    /// 窗口中的有效位数
    count: u32,
    /// 是否已记录过耗尽日志
    exhausted_logged: bool,
}

impl<'a> BitReader<'a> {
    /// 创建新的比特游标, 并装满窗口
    pub fn new(data: &'a [u8]) -> Self {
        let mut br = Self {
            data,
            load_pos: 0,
            window: 0,
            count: 0,
            exhausted_logged: false,
        };
        br.refill();
        br
    }

    fn refill(&mut self) {
        while self.count <= 24 {
            let byte = match self.data.get(self.load_pos) {
                Some(&b) => u32::from(b),
                None => {
                    if !self.exhausted_logged {
                        self.exhausted_logged = true;
                        trace!(
                            "比特游标越过缓冲区末尾 ({} 字节), 之后补 0",
                            self.data.len()
                        );
                    }
                    0
                }
            };
            self.window |= byte << (24 - self.count);
            self.count += 8;
            self.load_pos += 1;
        }
    }

    /// 查看接下来的 n 位, 不移动游标
    ///
    /// n <= 24 总是有效; 更长的窗口只在字节对齐后有效.
    #[inline]
    pub fn peek(&self, n: u32) -> u32 {
        debug_assert!(n <= 32, "peek: n={} 超过 32 位", n);
        if n == 0 {
            return 0;
        }
        self.window >> (32 - n)
    }

    /// 消费 n 位 (0..=32)
    #[inline]
    pub fn consume(&mut self, n: u32) {
        debug_assert!(n <= 32, "consume: n={} 超过 32 位", n);
        if n > 24 {
            // 窗口只保证 25 个有效位
            self.consume(16);
            self.consume(n - 16);
            return;
        }
        self.window <<= n;
        self.count -= n;
        self.refill();
    }

    /// 读取 n 位 (0..=32) 并前移
    #[inline]
    pub fn get_bits(&mut self, n: u32) -> u32 {
        if n > 24 {
            let high = self.get_bits(16);
            return (high << (n - 16)) | self.get_bits(n - 16);
        }
        let v = self.peek(n);
        self.consume(n);
        v
    }

    /// 读取单个位, 返回布尔值
    #[inline]
    pub fn get_flag(&mut self) -> bool {
        self.get_bits(1) != 0
    }

    /// 对齐到字节边界
    pub fn align_to_byte(&mut self) {
        let pad = self.count & 7;
        self.consume(pad);
    }

    /// 对齐到字节边界, 然后逐字节前移, 直到窗口以起始码前缀开头或数据耗尽
    ///
    /// 返回窗口中的 32 位值 (未消费). 数据耗尽时返回值没有意义.
    pub fn next_start_code(&mut self) -> u32 {
        self.align_to_byte();
        while !self.is_exhausted() && (self.window >> 8) != START_CODE_PREFIX {
            self.consume(8);
        }
        self.window
    }

    /// 已消费的总位数
    pub fn bit_position(&self) -> usize {
        self.load_pos * 8 - self.count as usize
    }

    /// 已消费的字节数 (向下取整)
    pub fn byte_position(&self) -> usize {
        self.bit_position() / 8
    }

    /// 缓冲区中的真实数据是否已全部消费
    pub fn is_exhausted(&self) -> bool {
        self.bit_position() >= self.data.len() * 8
    }

    /// 源数据
    pub fn data(&self) -> &'a [u8] {
        self.data
    }
}
