//! MPEG-2 视频 VLC 码表与常量表.
//!
//! 每个 VLC 表按固定宽度的预读值直接索引, 表项记录解码值与真实码长.
//! 码长为 0 (值为 -1) 的表项是哨兵, 表示非法码字.

/// VLC 表项: (解码值, 码长)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Vlc {
    pub val: i8,
    pub len: u8,
}

const fn v(val: i8, len: u8) -> Vlc {
    Vlc { val, len }
}

impl Vlc {
    /// 是否为非法码字哨兵
    pub const fn is_invalid(&self) -> bool {
        self.len == 0
    }
}

/// DCT 系数表项: (run, level, 码长)
///
/// run = 64 表示块结束 (EOB), run = 65 表示转义码.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct DctEntry {
    pub run: u8,
    pub level: u8,
    pub len: u8,
}

const fn d(run: u8, level: u8, len: u8) -> DctEntry {
    DctEntry { run, level, len }
}

/// 块结束伪 run 值
pub(super) const RUN_EOB: u8 = 64;
/// 转义伪 run 值
pub(super) const RUN_ESCAPE: u8 = 65;

// 宏块类型标志位 (与 MbFlags 的位定义一致)
const I: i8 = 1;
const PAT: i8 = 2;
const BWD: i8 = 4;
const FWD: i8 = 8;
const QNT: i8 = 16;

// ============================================================================
// 扫描顺序与量化
// ============================================================================

/// 扫描表: [0] 为 zig-zag, [1] 为交替扫描
pub(super) const SCAN: [[u8; 64]; 2] = [
    [
        0, 1, 8, 16, 9, 2, 3, 10, 17, 24, 32, 25, 18, 11, 4, 5, //
        12, 19, 26, 33, 40, 48, 41, 34, 27, 20, 13, 6, 7, 14, 21, 28, //
        35, 42, 49, 56, 57, 50, 43, 36, 29, 22, 15, 23, 30, 37, 44, 51, //
        58, 59, 52, 45, 38, 31, 39, 46, 53, 60, 61, 54, 47, 55, 62, 63,
    ],
    [
        0, 8, 16, 24, 1, 9, 2, 10, 17, 25, 32, 40, 48, 56, 57, 49, //
        41, 33, 26, 18, 3, 11, 4, 12, 19, 27, 34, 42, 50, 58, 35, 43, //
        51, 59, 20, 28, 5, 13, 6, 14, 21, 29, 36, 44, 52, 60, 37, 45, //
        53, 61, 22, 30, 7, 15, 23, 31, 38, 46, 54, 62, 39, 47, 55, 63,
    ],
];

/// 默认帧内量化矩阵 (光栅顺序)
pub(super) const DEFAULT_INTRA_MATRIX: [u8; 64] = [
    8, 16, 19, 22, 26, 27, 29, 34, //
    16, 16, 22, 24, 27, 29, 34, 37, //
    19, 22, 26, 27, 29, 34, 34, 38, //
    22, 22, 26, 27, 29, 34, 37, 40, //
    22, 26, 27, 29, 32, 35, 40, 48, //
    26, 27, 29, 32, 35, 40, 48, 58, //
    26, 27, 29, 34, 38, 46, 56, 69, //
    27, 29, 35, 38, 46, 56, 69, 83,
];

/// 默认非帧内量化矩阵 (全 16)
pub(super) const DEFAULT_NON_INTRA_MATRIX: [u8; 64] = [16; 64];

/// 非线性量化尺度表 (q_scale_type = 1)
pub(super) const NON_LINEAR_QUANTIZER_SCALE: [u8; 32] = [
    0, 1, 2, 3, 4, 5, 6, 7, //
    8, 10, 12, 14, 16, 18, 20, 22, //
    24, 28, 32, 36, 40, 44, 48, 52, //
    56, 64, 72, 80, 88, 96, 104, 112,
];

// ============================================================================
// 宏块类型 (表 B-2/B-3/B-4)
// ============================================================================

/// P 图片宏块类型, 码字 001..1xx (6 位预读 >> 3)
pub(super) const P_MB_TAB0: [Vlc; 8] = [
    v(-1, 0), v(FWD, 3), v(PAT, 2), v(PAT, 2),
    v(FWD | PAT, 1), v(FWD | PAT, 1), v(FWD | PAT, 1), v(FWD | PAT, 1),
];

/// P 图片宏块类型, 码字 000001..00011x
pub(super) const P_MB_TAB1: [Vlc; 8] = [
    v(-1, 0), v(QNT | I, 6), v(QNT | PAT, 5), v(QNT | PAT, 5),
    v(QNT | FWD | PAT, 5), v(QNT | FWD | PAT, 5), v(I, 5), v(I, 5),
];

/// B 图片宏块类型, 码字 0010..11xx (6 位预读 >> 2)
pub(super) const B_MB_TAB0: [Vlc; 16] = [
    v(-1, 0), v(-1, 0), v(FWD, 4), v(FWD | PAT, 4),
    v(BWD, 3), v(BWD, 3), v(BWD | PAT, 3), v(BWD | PAT, 3),
    v(FWD | BWD, 2), v(FWD | BWD, 2), v(FWD | BWD, 2), v(FWD | BWD, 2),
    v(FWD | BWD | PAT, 2), v(FWD | BWD | PAT, 2), v(FWD | BWD | PAT, 2), v(FWD | BWD | PAT, 2),
];

/// B 图片宏块类型, 码字 000001..00011x
pub(super) const B_MB_TAB1: [Vlc; 8] = [
    v(-1, 0), v(QNT | I, 6), v(QNT | BWD | PAT, 6), v(QNT | FWD | PAT, 6),
    v(QNT | FWD | BWD | PAT, 5), v(QNT | FWD | BWD | PAT, 5), v(I, 5), v(I, 5),
];

// ============================================================================
// 运动码 (表 B-10)
// ============================================================================

/// 码字 0001 ... 01xx
pub(super) const MV_TAB0: [Vlc; 8] = [
    v(-1, 0), v(3, 3), v(2, 2), v(2, 2), v(1, 1), v(1, 1), v(1, 1), v(1, 1),
];

/// 码字 0000011 ... 000011x
pub(super) const MV_TAB1: [Vlc; 8] = [
    v(-1, 0), v(-1, 0), v(-1, 0), v(7, 6), v(6, 6), v(5, 6), v(4, 5), v(4, 5),
];

/// 码字 0000001100 ... 000001011x
pub(super) const MV_TAB2: [Vlc; 12] = [
    v(16, 9), v(15, 9), v(14, 9), v(13, 9), v(12, 9), v(11, 9),
    v(10, 8), v(10, 8), v(9, 8), v(9, 8), v(8, 8), v(8, 8),
];

// ============================================================================
// 编码块模式 (表 B-9)
// ============================================================================

/// 码字 01000 ... 111xx
pub(super) const CBP_TAB0: [Vlc; 32] = [
    v(-1, 0), v(-1, 0), v(-1, 0), v(-1, 0), v(-1, 0), v(-1, 0), v(-1, 0), v(-1, 0),
    v(62, 5), v(2, 5), v(61, 5), v(1, 5), v(56, 5), v(52, 5), v(44, 5), v(28, 5),
    v(40, 5), v(20, 5), v(48, 5), v(12, 5), v(32, 4), v(32, 4), v(16, 4), v(16, 4),
    v(8, 4), v(8, 4), v(4, 4), v(4, 4), v(60, 3), v(60, 3), v(60, 3), v(60, 3),
];

/// 码字 00000100 ... 00111xxx
pub(super) const CBP_TAB1: [Vlc; 64] = [
    v(-1, 0), v(-1, 0), v(-1, 0), v(-1, 0), v(58, 8), v(54, 8), v(46, 8), v(30, 8),
    v(57, 8), v(53, 8), v(45, 8), v(29, 8), v(38, 8), v(26, 8), v(37, 8), v(25, 8),
    v(43, 8), v(23, 8), v(51, 8), v(15, 8), v(42, 8), v(22, 8), v(50, 8), v(14, 8),
    v(41, 8), v(21, 8), v(49, 8), v(13, 8), v(35, 8), v(19, 8), v(11, 8), v(7, 8),
    v(34, 7), v(34, 7), v(18, 7), v(18, 7), v(10, 7), v(10, 7), v(6, 7), v(6, 7),
    v(33, 7), v(33, 7), v(17, 7), v(17, 7), v(9, 7), v(9, 7), v(5, 7), v(5, 7),
    v(63, 6), v(63, 6), v(63, 6), v(63, 6), v(3, 6), v(3, 6), v(3, 6), v(3, 6),
    v(36, 6), v(36, 6), v(36, 6), v(36, 6), v(24, 6), v(24, 6), v(24, 6), v(24, 6),
];

/// 码字 000000001 ... 000000111
pub(super) const CBP_TAB2: [Vlc; 8] = [
    v(-1, 0), v(0, 9), v(39, 9), v(27, 9), v(59, 9), v(55, 9), v(47, 9), v(31, 9),
];

// ============================================================================
// 宏块地址增量 (表 B-1)
// ============================================================================

/// 码字 00010 ... 011xx
pub(super) const MBA_TAB1: [Vlc; 16] = [
    v(-1, 0), v(-1, 0), v(7, 5), v(6, 5), v(5, 4), v(5, 4), v(4, 4), v(4, 4),
    v(3, 3), v(3, 3), v(3, 3), v(3, 3), v(2, 3), v(2, 3), v(2, 3), v(2, 3),
];

/// 码字 00000011000 ... 0000111xxxx
pub(super) const MBA_TAB2: [Vlc; 104] = [
    v(33, 11), v(32, 11), v(31, 11), v(30, 11), v(29, 11), v(28, 11), v(27, 11), v(26, 11),
    v(25, 11), v(24, 11), v(23, 11), v(22, 11), v(21, 10), v(21, 10), v(20, 10), v(20, 10),
    v(19, 10), v(19, 10), v(18, 10), v(18, 10), v(17, 10), v(17, 10), v(16, 10), v(16, 10),
    v(15, 8), v(15, 8), v(15, 8), v(15, 8), v(15, 8), v(15, 8), v(15, 8), v(15, 8),
    v(14, 8), v(14, 8), v(14, 8), v(14, 8), v(14, 8), v(14, 8), v(14, 8), v(14, 8),
    v(13, 8), v(13, 8), v(13, 8), v(13, 8), v(13, 8), v(13, 8), v(13, 8), v(13, 8),
    v(12, 8), v(12, 8), v(12, 8), v(12, 8), v(12, 8), v(12, 8), v(12, 8), v(12, 8),
    v(11, 8), v(11, 8), v(11, 8), v(11, 8), v(11, 8), v(11, 8), v(11, 8), v(11, 8),
    v(10, 8), v(10, 8), v(10, 8), v(10, 8), v(10, 8), v(10, 8), v(10, 8), v(10, 8),
    v(9, 7), v(9, 7), v(9, 7), v(9, 7), v(9, 7), v(9, 7), v(9, 7), v(9, 7),
    v(9, 7), v(9, 7), v(9, 7), v(9, 7), v(9, 7), v(9, 7), v(9, 7), v(9, 7),
    v(8, 7), v(8, 7), v(8, 7), v(8, 7), v(8, 7), v(8, 7), v(8, 7), v(8, 7),
    v(8, 7), v(8, 7), v(8, 7), v(8, 7), v(8, 7), v(8, 7), v(8, 7), v(8, 7),
];

// ============================================================================
// DC 差值长度 (表 B-12/B-13)
// ============================================================================

/// 亮度, 码字 0xxxx ... 11110
pub(super) const DC_LUMA_TAB0: [Vlc; 32] = [
    v(1, 2), v(1, 2), v(1, 2), v(1, 2), v(1, 2), v(1, 2), v(1, 2), v(1, 2),
    v(2, 2), v(2, 2), v(2, 2), v(2, 2), v(2, 2), v(2, 2), v(2, 2), v(2, 2),
    v(0, 3), v(0, 3), v(0, 3), v(0, 3), v(3, 3), v(3, 3), v(3, 3), v(3, 3),
    v(4, 3), v(4, 3), v(4, 3), v(4, 3), v(5, 4), v(5, 4), v(6, 5), v(-1, 0),
];

/// 亮度, 码字 111110xxx ... 111111111
pub(super) const DC_LUMA_TAB1: [Vlc; 16] = [
    v(7, 6), v(7, 6), v(7, 6), v(7, 6), v(7, 6), v(7, 6), v(7, 6), v(7, 6),
    v(8, 7), v(8, 7), v(8, 7), v(8, 7), v(9, 8), v(9, 8), v(10, 9), v(11, 9),
];

/// 色度, 码字 0xxxx ... 11110
pub(super) const DC_CHROMA_TAB0: [Vlc; 32] = [
    v(0, 2), v(0, 2), v(0, 2), v(0, 2), v(0, 2), v(0, 2), v(0, 2), v(0, 2),
    v(1, 2), v(1, 2), v(1, 2), v(1, 2), v(1, 2), v(1, 2), v(1, 2), v(1, 2),
    v(2, 2), v(2, 2), v(2, 2), v(2, 2), v(2, 2), v(2, 2), v(2, 2), v(2, 2),
    v(3, 3), v(3, 3), v(3, 3), v(3, 3), v(4, 4), v(4, 4), v(5, 5), v(-1, 0),
];

/// 色度, 码字 111110xxxx ... 1111111111
pub(super) const DC_CHROMA_TAB1: [Vlc; 32] = [
    v(6, 6), v(6, 6), v(6, 6), v(6, 6), v(6, 6), v(6, 6), v(6, 6), v(6, 6),
    v(6, 6), v(6, 6), v(6, 6), v(6, 6), v(6, 6), v(6, 6), v(6, 6), v(6, 6),
    v(7, 7), v(7, 7), v(7, 7), v(7, 7), v(7, 7), v(7, 7), v(7, 7), v(7, 7),
    v(8, 8), v(8, 8), v(8, 8), v(8, 8), v(9, 9), v(9, 9), v(10, 10), v(11, 10),
];

// ============================================================================
// DCT 系数 (表 B-14/B-15)
// ============================================================================

/// 表 B-14 码字 0100 ... 1xxx, 仅用于非帧内块的第一个系数
pub(super) const DCT_TAB_FIRST: [DctEntry; 12] = [
    d(0, 2, 4), d(2, 1, 4), d(1, 1, 3), d(1, 1, 3),
    d(0, 1, 1), d(0, 1, 1), d(0, 1, 1), d(0, 1, 1),
    d(0, 1, 1), d(0, 1, 1), d(0, 1, 1), d(0, 1, 1),
];

/// 表 B-14 码字 0100 ... 1xxx, 用于其余系数
pub(super) const DCT_TAB_NEXT: [DctEntry; 12] = [
    d(0, 2, 4), d(2, 1, 4), d(1, 1, 3), d(1, 1, 3),
    d(64, 0, 2), d(64, 0, 2), d(64, 0, 2), d(64, 0, 2),
    d(0, 1, 2), d(0, 1, 2), d(0, 1, 2), d(0, 1, 2),
];

/// 表 B-14 码字 000001xx ... 00111xxx
pub(super) const DCT_TAB0: [DctEntry; 60] = [
    d(65, 0, 6), d(65, 0, 6), d(65, 0, 6), d(65, 0, 6),
    d(2, 2, 7), d(2, 2, 7), d(9, 1, 7), d(9, 1, 7),
    d(0, 4, 7), d(0, 4, 7), d(8, 1, 7), d(8, 1, 7),
    d(7, 1, 6), d(7, 1, 6), d(7, 1, 6), d(7, 1, 6),
    d(6, 1, 6), d(6, 1, 6), d(6, 1, 6), d(6, 1, 6),
    d(1, 2, 6), d(1, 2, 6), d(1, 2, 6), d(1, 2, 6),
    d(5, 1, 6), d(5, 1, 6), d(5, 1, 6), d(5, 1, 6),
    d(13, 1, 8), d(0, 6, 8), d(12, 1, 8), d(11, 1, 8),
    d(3, 2, 8), d(1, 3, 8), d(0, 5, 8), d(10, 1, 8),
    d(0, 3, 5), d(0, 3, 5), d(0, 3, 5), d(0, 3, 5),
    d(0, 3, 5), d(0, 3, 5), d(0, 3, 5), d(0, 3, 5),
    d(4, 1, 5), d(4, 1, 5), d(4, 1, 5), d(4, 1, 5),
    d(4, 1, 5), d(4, 1, 5), d(4, 1, 5), d(4, 1, 5),
    d(3, 1, 5), d(3, 1, 5), d(3, 1, 5), d(3, 1, 5),
    d(3, 1, 5), d(3, 1, 5), d(3, 1, 5), d(3, 1, 5),
];

/// 表 B-15 码字 000001xx ... 11111111
pub(super) const DCT_TAB0A: [DctEntry; 252] = [
    d(65, 0, 6), d(65, 0, 6), d(65, 0, 6), d(65, 0, 6),
    d(7, 1, 7), d(7, 1, 7), d(8, 1, 7), d(8, 1, 7),
    d(6, 1, 7), d(6, 1, 7), d(2, 2, 7), d(2, 2, 7),
    d(0, 7, 6), d(0, 7, 6), d(0, 7, 6), d(0, 7, 6),
    d(0, 6, 6), d(0, 6, 6), d(0, 6, 6), d(0, 6, 6),
    d(4, 1, 6), d(4, 1, 6), d(4, 1, 6), d(4, 1, 6),
    d(5, 1, 6), d(5, 1, 6), d(5, 1, 6), d(5, 1, 6),
    d(1, 5, 8), d(11, 1, 8), d(0, 11, 8), d(0, 10, 8),
    d(13, 1, 8), d(12, 1, 8), d(3, 2, 8), d(1, 4, 8),
    d(2, 1, 5), d(2, 1, 5), d(2, 1, 5), d(2, 1, 5),
    d(2, 1, 5), d(2, 1, 5), d(2, 1, 5), d(2, 1, 5),
    d(1, 2, 5), d(1, 2, 5), d(1, 2, 5), d(1, 2, 5),
    d(1, 2, 5), d(1, 2, 5), d(1, 2, 5), d(1, 2, 5),
    d(3, 1, 5), d(3, 1, 5), d(3, 1, 5), d(3, 1, 5),
    d(3, 1, 5), d(3, 1, 5), d(3, 1, 5), d(3, 1, 5),
    d(1, 1, 3), d(1, 1, 3), d(1, 1, 3), d(1, 1, 3),
    d(1, 1, 3), d(1, 1, 3), d(1, 1, 3), d(1, 1, 3),
    d(1, 1, 3), d(1, 1, 3), d(1, 1, 3), d(1, 1, 3),
    d(1, 1, 3), d(1, 1, 3), d(1, 1, 3), d(1, 1, 3),
    d(1, 1, 3), d(1, 1, 3), d(1, 1, 3), d(1, 1, 3),
    d(1, 1, 3), d(1, 1, 3), d(1, 1, 3), d(1, 1, 3),
    d(1, 1, 3), d(1, 1, 3), d(1, 1, 3), d(1, 1, 3),
    d(1, 1, 3), d(1, 1, 3), d(1, 1, 3), d(1, 1, 3),
    d(64, 0, 4), d(64, 0, 4), d(64, 0, 4), d(64, 0, 4),
    d(64, 0, 4), d(64, 0, 4), d(64, 0, 4), d(64, 0, 4),
    d(64, 0, 4), d(64, 0, 4), d(64, 0, 4), d(64, 0, 4),
    d(64, 0, 4), d(64, 0, 4), d(64, 0, 4), d(64, 0, 4),
    d(0, 3, 4), d(0, 3, 4), d(0, 3, 4), d(0, 3, 4),
    d(0, 3, 4), d(0, 3, 4), d(0, 3, 4), d(0, 3, 4),
    d(0, 3, 4), d(0, 3, 4), d(0, 3, 4), d(0, 3, 4),
    d(0, 3, 4), d(0, 3, 4), d(0, 3, 4), d(0, 3, 4),
    d(0, 1, 2), d(0, 1, 2), d(0, 1, 2), d(0, 1, 2),
    d(0, 1, 2), d(0, 1, 2), d(0, 1, 2), d(0, 1, 2),
    d(0, 1, 2), d(0, 1, 2), d(0, 1, 2), d(0, 1, 2),
    d(0, 1, 2), d(0, 1, 2), d(0, 1, 2), d(0, 1, 2),
    d(0, 1, 2), d(0, 1, 2), d(0, 1, 2), d(0, 1, 2),
    d(0, 1, 2), d(0, 1, 2), d(0, 1, 2), d(0, 1, 2),
    d(0, 1, 2), d(0, 1, 2), d(0, 1, 2), d(0, 1, 2),
    d(0, 1, 2), d(0, 1, 2), d(0, 1, 2), d(0, 1, 2),
    d(0, 1, 2), d(0, 1, 2), d(0, 1, 2), d(0, 1, 2),
    d(0, 1, 2), d(0, 1, 2), d(0, 1, 2), d(0, 1, 2),
    d(0, 1, 2), d(0, 1, 2), d(0, 1, 2), d(0, 1, 2),
    d(0, 1, 2), d(0, 1, 2), d(0, 1, 2), d(0, 1, 2),
    d(0, 1, 2), d(0, 1, 2), d(0, 1, 2), d(0, 1, 2),
    d(0, 1, 2), d(0, 1, 2), d(0, 1, 2), d(0, 1, 2),
    d(0, 1, 2), d(0, 1, 2), d(0, 1, 2), d(0, 1, 2),
    d(0, 1, 2), d(0, 1, 2), d(0, 1, 2), d(0, 1, 2),
    d(0, 2, 3), d(0, 2, 3), d(0, 2, 3), d(0, 2, 3),
    d(0, 2, 3), d(0, 2, 3), d(0, 2, 3), d(0, 2, 3),
    d(0, 2, 3), d(0, 2, 3), d(0, 2, 3), d(0, 2, 3),
    d(0, 2, 3), d(0, 2, 3), d(0, 2, 3), d(0, 2, 3),
    d(0, 2, 3), d(0, 2, 3), d(0, 2, 3), d(0, 2, 3),
    d(0, 2, 3), d(0, 2, 3), d(0, 2, 3), d(0, 2, 3),
    d(0, 2, 3), d(0, 2, 3), d(0, 2, 3), d(0, 2, 3),
    d(0, 2, 3), d(0, 2, 3), d(0, 2, 3), d(0, 2, 3),
    d(0, 4, 5), d(0, 4, 5), d(0, 4, 5), d(0, 4, 5),
    d(0, 4, 5), d(0, 4, 5), d(0, 4, 5), d(0, 4, 5),
    d(0, 5, 5), d(0, 5, 5), d(0, 5, 5), d(0, 5, 5),
    d(0, 5, 5), d(0, 5, 5), d(0, 5, 5), d(0, 5, 5),
    d(9, 1, 7), d(9, 1, 7), d(1, 3, 7), d(1, 3, 7),
    d(10, 1, 7), d(10, 1, 7), d(0, 8, 7), d(0, 8, 7),
    d(0, 9, 7), d(0, 9, 7), d(0, 12, 8), d(0, 13, 8),
    d(2, 3, 8), d(4, 2, 8), d(0, 14, 8), d(0, 15, 8),
];

/// 表 B-14 码字 0000001000 ... 0000001111
pub(super) const DCT_TAB1: [DctEntry; 8] = [
    d(16, 1, 10), d(5, 2, 10), d(0, 7, 10), d(2, 3, 10),
    d(1, 4, 10), d(15, 1, 10), d(14, 1, 10), d(4, 2, 10),
];

/// 表 B-15 码字 000000100x ... 000000111x
pub(super) const DCT_TAB1A: [DctEntry; 8] = [
    d(5, 2, 9), d(5, 2, 9), d(14, 1, 9), d(14, 1, 9),
    d(2, 4, 10), d(16, 1, 10), d(15, 1, 9), d(15, 1, 9),
];

/// 码字 000000010000 ... 000000011111
pub(super) const DCT_TAB2: [DctEntry; 16] = [
    d(0, 11, 12), d(8, 2, 12), d(4, 3, 12), d(0, 10, 12),
    d(2, 4, 12), d(7, 2, 12), d(21, 1, 12), d(20, 1, 12),
    d(0, 9, 12), d(19, 1, 12), d(18, 1, 12), d(1, 5, 12),
    d(3, 3, 12), d(0, 8, 12), d(6, 2, 12), d(17, 1, 12),
];

/// 码字 0000000010000 ... 0000000011111
pub(super) const DCT_TAB3: [DctEntry; 16] = [
    d(10, 2, 13), d(9, 2, 13), d(5, 3, 13), d(3, 4, 13),
    d(2, 5, 13), d(1, 7, 13), d(1, 6, 13), d(0, 15, 13),
    d(0, 14, 13), d(0, 13, 13), d(0, 12, 13), d(26, 1, 13),
    d(25, 1, 13), d(24, 1, 13), d(23, 1, 13), d(22, 1, 13),
];

/// 码字 00000000010000 ... 00000000011111
pub(super) const DCT_TAB4: [DctEntry; 16] = [
    d(0, 31, 14), d(0, 30, 14), d(0, 29, 14), d(0, 28, 14),
    d(0, 27, 14), d(0, 26, 14), d(0, 25, 14), d(0, 24, 14),
    d(0, 23, 14), d(0, 22, 14), d(0, 21, 14), d(0, 20, 14),
    d(0, 19, 14), d(0, 18, 14), d(0, 17, 14), d(0, 16, 14),
];

/// 码字 000000000010000 ... 000000000011111
pub(super) const DCT_TAB5: [DctEntry; 16] = [
    d(0, 40, 15), d(0, 39, 15), d(0, 38, 15), d(0, 37, 15),
    d(0, 36, 15), d(0, 35, 15), d(0, 34, 15), d(0, 33, 15),
    d(0, 32, 15), d(1, 14, 15), d(1, 13, 15), d(1, 12, 15),
    d(1, 11, 15), d(1, 10, 15), d(1, 9, 15), d(1, 8, 15),
];

/// 码字 0000000000010000 ... 0000000000011111
pub(super) const DCT_TAB6: [DctEntry; 16] = [
    d(1, 18, 16), d(1, 17, 16), d(1, 16, 16), d(1, 15, 16),
    d(6, 3, 16), d(16, 2, 16), d(15, 2, 16), d(14, 2, 16),
    d(13, 2, 16), d(12, 2, 16), d(11, 2, 16), d(31, 1, 16),
    d(30, 1, 16), d(29, 1, 16), d(28, 1, 16), d(27, 1, 16),
];

// ============================================================================
// 序列头相关
// ============================================================================

/// frame_rate_code 1..=8 对应的帧率 (分子, 分母)
pub(super) const FRAME_RATES: [(i32, i32); 8] = [
    (24000, 1001),
    (24, 1),
    (25, 1),
    (30000, 1001),
    (30, 1),
    (50, 1),
    (60000, 1001),
    (60, 1),
];
