//! 比特流写入器.
//!
//! 与 [`BitReader`](crate::bitreader::BitReader) 位序一致 (MSB first).
//! 解码器本身不写码流, 测试、基准与工具用它合成 MPEG-2 基本流.

/// 比特流写入器
///
/// 未满一字节的位暂存在累加器中, 起始码写入前以 0 补齐到字节边界.
///
/// # 示例
/// ```
/// use m2v_core::bitwriter::BitWriter;
///
/// let mut bw = BitWriter::new();
/// bw.write_bits(0b101, 3);
/// bw.write_start_code(0xB3);
/// assert_eq!(bw.finish(), vec![0xA0, 0x00, 0x00, 0x01, 0xB3]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct BitWriter {
    out: Vec<u8>,
    /// 低 `pending` 位有效
    acc: u64,
    pending: u32,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已写入的总位数
    pub fn bit_len(&self) -> usize {
        self.out.len() * 8 + self.pending as usize
    }

    /// 写入 `value` 的低 `n` 位 (n <= 32)
    pub fn write_bits(&mut self, value: u32, n: u32) {
        debug_assert!(n <= 32, "write_bits: n={} 超过 32 位", n);
        if n == 0 {
            return;
        }
        let masked = u64::from(value) & ((1u64 << n) - 1);
        self.acc = (self.acc << n) | masked;
        self.pending += n;
        while self.pending >= 8 {
            self.pending -= 8;
            self.out.push((self.acc >> self.pending) as u8);
        }
        self.acc &= (1u64 << self.pending) - 1;
    }

    pub fn write_flag(&mut self, flag: bool) {
        self.write_bits(u32::from(flag), 1);
    }

    /// 以 0 补齐到字节边界
    pub fn align_to_byte(&mut self) {
        if self.pending > 0 {
            let pad = 8 - self.pending;
            self.write_bits(0, pad);
        }
    }

    /// 对齐后写入 `0x000001` 前缀与 8 位码值
    pub fn write_start_code(&mut self, code: u8) {
        self.align_to_byte();
        self.out.extend_from_slice(&[0x00, 0x00, 0x01, code]);
    }

    /// 补齐并返回字节数据
    pub fn finish(mut self) -> Vec<u8> {
        self.align_to_byte();
        self.out
    }
}
