//! 集成测试与基准共用的码流合成工具.

#![allow(dead_code)]

use m2v::codec::PictureType;
use m2v::core::bitwriter::BitWriter;

/// 亮度 dc_size 码字 (size 0..=8)
const LUMA_DC: [(u32, u32); 9] = [
    (0b100, 3),
    (0b00, 2),
    (0b01, 2),
    (0b101, 3),
    (0b110, 3),
    (0b1110, 4),
    (0b11110, 5),
    (0b111110, 6),
    (0b1111110, 7),
];

/// MPEG-2 主档次基本流构造器
pub struct EsBuilder {
    bw: BitWriter,
}

impl EsBuilder {
    pub fn new() -> Self {
        Self {
            bw: BitWriter::new(),
        }
    }

    /// 序列头 + 序列扩展 (4:2:0, 逐行, 25 fps, 4:3)
    pub fn sequence(&mut self, width: u32, height: u32) -> &mut Self {
        let bw = &mut self.bw;
        bw.write_start_code(0xB3);
        bw.write_bits(width, 12);
        bw.write_bits(height, 12);
        bw.write_bits(2, 4);
        bw.write_bits(3, 4);
        bw.write_bits(20000, 18);
        bw.write_bits(1, 1);
        bw.write_bits(112, 10);
        bw.write_bits(0, 3);

        bw.write_start_code(0xB5);
        bw.write_bits(1, 4);
        bw.write_bits(0x48, 8);
        bw.write_bits(1, 1);
        bw.write_bits(1, 2);
        bw.write_bits(0, 4);
        bw.write_bits(0, 12);
        bw.write_bits(1, 1);
        bw.write_bits(0, 8);
        bw.write_bits(0, 8);
        self
    }

    pub fn gop(&mut self) -> &mut Self {
        self.bw.write_start_code(0xB8);
        self.bw.write_bits(0, 25);
        self.bw.write_bits(0b10, 2);
        self
    }

    /// 图片头 + 图片编码扩展 (帧图片, frame_pred_frame_dct = 1)
    pub fn picture(&mut self, picture_type: PictureType, temporal_reference: u32) -> &mut Self {
        let code = match picture_type {
            PictureType::P => 2,
            PictureType::B => 3,
            _ => 1,
        };
        let bw = &mut self.bw;
        bw.write_start_code(0x00);
        bw.write_bits(temporal_reference, 10);
        bw.write_bits(code, 3);
        bw.write_bits(0xFFFF, 16);
        if code >= 2 {
            bw.write_bits(0b0111, 4);
        }
        if code == 3 {
            bw.write_bits(0b0111, 4);
        }
        bw.write_bits(0, 1);

        bw.write_start_code(0xB5);
        bw.write_bits(8, 4);
        let f = |used: bool| if used { 1 } else { 15 };
        for v in [f(code >= 2), f(code >= 2), f(code == 3), f(code == 3)] {
            bw.write_bits(v, 4);
        }
        bw.write_bits(0, 2);
        bw.write_bits(3, 2);
        for bit in [0, 1, 0, 0, 0, 0, 0, 1, 1, 0] {
            bw.write_bits(bit, 1);
        }
        self
    }

    pub fn slice(&mut self, row: u8) -> &mut Self {
        self.bw.write_start_code(row + 1);
        self.bw.write_bits(4, 5);
        self.bw.write_bits(0, 1);
        self
    }

    fn dc(&mut self, diff: i32, luma: bool) {
        let size = 32 - diff.unsigned_abs().leading_zeros();
        if luma {
            let (code, len) = LUMA_DC[size as usize];
            self.bw.write_bits(code, len);
        } else {
            // 色度差值固定为 0
            self.bw.write_bits(0b00, 2);
        }
        if size > 0 {
            let v = if diff > 0 { diff } else { diff + (1 << size) - 1 };
            self.bw.write_bits(v as u32, size);
        }
    }

    /// 地址增量 1 的帧内宏块, 亮度直流差值 `luma_diff`, 色度不变
    pub fn intra_mb(&mut self, picture_type: PictureType, luma_diff: i32) -> &mut Self {
        self.bw.write_bits(1, 1);
        match picture_type {
            PictureType::I => self.bw.write_bits(0b1, 1),
            _ => self.bw.write_bits(0b00011, 5),
        }
        for comp in 0..6 {
            self.dc(if comp == 0 { luma_diff } else { 0 }, comp < 4);
            self.bw.write_bits(0b10, 2);
        }
        self
    }

    /// P 图片零向量前向预测宏块
    pub fn forward_mb(&mut self) -> &mut Self {
        self.bw.write_bits(0b1001, 4);
        self.bw.write_bits(0b11, 2);
        self
    }

    /// B 图片零向量双向预测宏块
    pub fn bidir_mb(&mut self) -> &mut Self {
        self.bw.write_bits(0b110, 3);
        self.bw.write_bits(0b1111, 4);
        self
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.bw.write_start_code(0xB7);
        self.bw.finish()
    }
}

/// 按图片类型序列 (如 "IPB") 生成完整基本流
///
/// I 图片亮度按宏块在 152 与 104 之间交替, P 图片整帧复制前向参考,
/// B 图片对两个参考取平均. 每个宏块行一个片.
pub fn synth_stream(width: u32, height: u32, pattern: &str) -> Vec<u8> {
    let mb_w = width.div_ceil(16);
    let mb_h = 2 * height.div_ceil(32);
    let mut es = EsBuilder::new();
    es.sequence(width, height).gop();
    for (n, c) in pattern.chars().enumerate() {
        let picture_type = match c {
            'P' => PictureType::P,
            'B' => PictureType::B,
            _ => PictureType::I,
        };
        es.picture(picture_type, n as u32);
        for row in 0..mb_h {
            es.slice(row as u8);
            for col in 0..mb_w {
                match picture_type {
                    PictureType::P => es.forward_mb(),
                    PictureType::B => es.bidir_mb(),
                    _ => {
                        let diff = match col {
                            0 => 24,
                            c if c % 2 == 1 => -48,
                            _ => 48,
                        };
                        es.intra_mb(PictureType::I, diff)
                    }
                };
            }
        }
    }
    es.finish()
}
