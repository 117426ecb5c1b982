//! 序列头、图片头、扩展与片头解析.
//!
//! 头部字段按 ISO/IEC 13818-2 第 6.2 节的语法顺序读取.
//! 序列级参数决定帧几何, 图片级参数每张图片重置.

use log::{debug, trace};
use m2v_core::bitreader::BitReader;
use m2v_core::color::ColorSpace;
use m2v_core::{M2vError, M2vResult, PixelFormat, Rational};

use super::tables::{DEFAULT_INTRA_MATRIX, DEFAULT_NON_INTRA_MATRIX, FRAME_RATES, SCAN};
use crate::frame::PictureType;

// ============================================================================
// 起始码
// ============================================================================

pub(super) const PICTURE_START_CODE: u32 = 0x100;
pub(super) const SLICE_START_CODE_MIN: u32 = 0x101;
pub(super) const SLICE_START_CODE_MAX: u32 = 0x1AF;
pub(super) const USER_DATA_START_CODE: u32 = 0x1B2;
pub(super) const SEQUENCE_HEADER_CODE: u32 = 0x1B3;
pub(super) const EXTENSION_START_CODE: u32 = 0x1B5;
pub(super) const SEQUENCE_END_CODE: u32 = 0x1B7;
pub(super) const GROUP_START_CODE: u32 = 0x1B8;

const SEQUENCE_EXTENSION_ID: u32 = 1;
const SEQUENCE_DISPLAY_EXTENSION_ID: u32 = 2;
const QUANT_MATRIX_EXTENSION_ID: u32 = 3;
const PICTURE_CODING_EXTENSION_ID: u32 = 8;

/// 帧图片 (picture_structure = 3)
pub(super) const FRAME_PICTURE: u32 = 3;

/// 定位下一个完整的起始码 (未消费), 缓冲区剩余不足 4 字节时返回 None
pub(super) fn next_code(br: &mut BitReader) -> Option<u32> {
    let code = br.next_start_code();
    if br.is_exhausted() || br.byte_position() + 4 > br.data().len() {
        None
    } else {
        Some(code)
    }
}

pub(super) fn is_slice_code(code: u32) -> bool {
    (SLICE_START_CODE_MIN..=SLICE_START_CODE_MAX).contains(&code)
}

// ============================================================================
// 序列头
// ============================================================================

/// 序列头与序列级扩展中的参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceHeader {
    /// 水平尺寸 (含扩展位)
    pub horizontal_size: u32,
    /// 垂直尺寸 (含扩展位)
    pub vertical_size: u32,
    /// aspect_ratio_information
    pub aspect_ratio_code: u32,
    /// frame_rate_code
    pub frame_rate_code: u32,
    /// 码率 (400 bit/s 为单位, 含扩展位)
    pub bit_rate: u32,
    /// VBV 缓冲大小 (16 kbit 为单位, 含扩展位)
    pub vbv_buffer_size: u32,
    pub constrained_parameters: bool,
    /// 是否出现序列扩展 (MPEG-2 码流)
    pub mpeg2: bool,
    pub profile_and_level: u8,
    pub progressive_sequence: bool,
    /// chroma_format (1 = 4:2:0)
    pub chroma_format: u32,
    pub low_delay: bool,
    /// frame_rate_extension_n / _d
    pub frame_rate_extension: (u32, u32),
    pub video_format: u32,
    /// 矩阵系数对应的色彩空间
    pub color_space: ColorSpace,
    /// 显示扩展给出的显示尺寸
    pub display_size: Option<(u32, u32)>,
}

impl SequenceHeader {
    /// 帧率, frame_rate_code 非法时返回 UNDEFINED
    pub fn frame_rate(&self) -> Rational {
        let Some(&(num, den)) = (self.frame_rate_code as usize)
            .checked_sub(1)
            .and_then(|i| FRAME_RATES.get(i))
        else {
            return Rational::UNDEFINED;
        };
        let (n, d) = self.frame_rate_extension;
        Rational::new(num * (n as i32 + 1), den * (d as i32 + 1)).reduce()
    }

    /// 显示宽高比 (DAR), 码值 1 表示方形像素, 此时返回 None
    pub fn display_aspect_ratio(&self) -> Option<Rational> {
        match self.aspect_ratio_code {
            2 => Some(Rational::new(4, 3)),
            3 => Some(Rational::new(16, 9)),
            4 => Some(Rational::new(221, 100)),
            _ => None,
        }
    }

    /// 采样宽高比 (SAR = DAR * 高 / 宽)
    pub fn sample_aspect_ratio(&self) -> Rational {
        let (w, h) = self.display_dimensions();
        match self.display_aspect_ratio() {
            Some(dar) if w > 0 && h > 0 => (dar * Rational::new(h as i32, w as i32)).reduce(),
            _ => Rational::new(1, 1),
        }
    }

    /// 显示尺寸 (无显示扩展时等于序列尺寸)
    pub fn display_dimensions(&self) -> (u32, u32) {
        self.display_size
            .unwrap_or((self.horizontal_size, self.vertical_size))
    }

    pub fn pixel_format(&self) -> PixelFormat {
        PixelFormat::from_chroma_format(self.chroma_format)
    }
}

/// 帧几何 (宏块对齐)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(super) struct Geometry {
    pub width: usize,
    pub height: usize,
    pub chroma_width: usize,
    pub chroma_height: usize,
    pub mb_width: usize,
    pub mb_height: usize,
}

impl Geometry {
    pub(super) fn from_sequence(seq: &SequenceHeader) -> M2vResult<Self> {
        if seq.horizontal_size == 0 || seq.vertical_size == 0 {
            return Err(M2vError::InvalidData(format!(
                "序列尺寸非法: {}x{}",
                seq.horizontal_size, seq.vertical_size
            )));
        }
        let mb_width = (seq.horizontal_size as usize).div_ceil(16);
        let mb_height = 2 * (seq.vertical_size as usize).div_ceil(32);
        let width = mb_width * 16;
        let height = mb_height * 16;
        Ok(Self {
            width,
            height,
            chroma_width: width >> 1,
            chroma_height: height >> 1,
            mb_width,
            mb_height,
        })
    }

    pub(super) fn plane_size(&self, plane: usize) -> usize {
        if plane == 0 {
            self.width * self.height
        } else {
            self.chroma_width * self.chroma_height
        }
    }

    pub(super) fn mb_count(&self) -> usize {
        self.mb_width * self.mb_height
    }
}

/// 当前生效的量化矩阵 (光栅顺序)
#[derive(Debug, Clone)]
pub(super) struct QuantMatrices {
    pub intra: [u8; 64],
    pub non_intra: [u8; 64],
}

impl Default for QuantMatrices {
    fn default() -> Self {
        Self {
            intra: DEFAULT_INTRA_MATRIX,
            non_intra: DEFAULT_NON_INTRA_MATRIX,
        }
    }
}

/// 读取按之字形顺序传输的 64 字节矩阵
fn read_matrix(br: &mut BitReader, matrix: &mut [u8; 64]) {
    for &pos in &SCAN[0] {
        matrix[usize::from(pos)] = br.get_bits(8) as u8;
    }
}

/// 解析序列头 (起始码已消费), 同时更新量化矩阵
pub(super) fn parse_sequence_header(
    br: &mut BitReader,
    matrices: &mut QuantMatrices,
) -> SequenceHeader {
    let horizontal_size = br.get_bits(12);
    let vertical_size = br.get_bits(12);
    let aspect_ratio_code = br.get_bits(4);
    let frame_rate_code = br.get_bits(4);
    let bit_rate = br.get_bits(18);
    br.consume(1);
    let vbv_buffer_size = br.get_bits(10);
    let constrained_parameters = br.get_flag();

    if br.get_flag() {
        read_matrix(br, &mut matrices.intra);
    } else {
        matrices.intra = DEFAULT_INTRA_MATRIX;
    }
    if br.get_flag() {
        read_matrix(br, &mut matrices.non_intra);
    } else {
        matrices.non_intra = DEFAULT_NON_INTRA_MATRIX;
    }

    let seq = SequenceHeader {
        horizontal_size,
        vertical_size,
        aspect_ratio_code,
        frame_rate_code,
        bit_rate,
        vbv_buffer_size,
        constrained_parameters,
        mpeg2: false,
        profile_and_level: 0,
        progressive_sequence: true,
        chroma_format: 1,
        low_delay: false,
        frame_rate_extension: (0, 0),
        video_format: 5,
        color_space: ColorSpace::Unspecified,
        display_size: None,
    };
    debug!(
        "序列头: {}x{}, aspect={}, frame_rate_code={}, bit_rate={}",
        horizontal_size, vertical_size, aspect_ratio_code, frame_rate_code, bit_rate
    );
    seq
}

fn parse_sequence_extension(br: &mut BitReader, seq: &mut SequenceHeader) {
    seq.mpeg2 = true;
    seq.profile_and_level = br.get_bits(8) as u8;
    seq.progressive_sequence = br.get_flag();
    seq.chroma_format = br.get_bits(2);
    seq.horizontal_size = (seq.horizontal_size & 0xFFF) | (br.get_bits(2) << 12);
    seq.vertical_size = (seq.vertical_size & 0xFFF) | (br.get_bits(2) << 12);
    seq.bit_rate = (seq.bit_rate & 0x3FFFF) | (br.get_bits(12) << 18);
    br.consume(1);
    seq.vbv_buffer_size = (seq.vbv_buffer_size & 0x3FF) | (br.get_bits(8) << 10);
    seq.low_delay = br.get_flag();
    let n = br.get_bits(2);
    let d = br.get_bits(5);
    seq.frame_rate_extension = (n, d);
    debug!(
        "序列扩展: profile_level=0x{:02X}, progressive={}, chroma_format={}, {}x{}",
        seq.profile_and_level,
        seq.progressive_sequence,
        seq.chroma_format,
        seq.horizontal_size,
        seq.vertical_size
    );
}

fn parse_sequence_display_extension(br: &mut BitReader, seq: &mut SequenceHeader) {
    seq.video_format = br.get_bits(3);
    if br.get_flag() {
        let _colour_primaries = br.get_bits(8);
        let _transfer_characteristics = br.get_bits(8);
        seq.color_space = ColorSpace::from_matrix_coefficients(br.get_bits(8));
    }
    let w = br.get_bits(14);
    br.consume(1);
    let h = br.get_bits(14);
    seq.display_size = Some((w, h));
    debug!("显示扩展: {}x{}, color_space={:?}", w, h, seq.color_space);
}

fn parse_quant_matrix_extension(br: &mut BitReader, matrices: &mut QuantMatrices) {
    if br.get_flag() {
        read_matrix(br, &mut matrices.intra);
    }
    if br.get_flag() {
        read_matrix(br, &mut matrices.non_intra);
    }
    // 色度矩阵在 4:2:0 下不使用
    let mut chroma = [0u8; 64];
    for _ in 0..2 {
        if br.get_flag() {
            read_matrix(br, &mut chroma);
        }
    }
}

// ============================================================================
// 图片头
// ============================================================================

/// 图片级编码参数, 每张图片重置
#[derive(Debug, Clone)]
pub(super) struct PictureParams {
    pub temporal_reference: u32,
    pub picture_type: PictureType,
    /// full_pel_forward_vector / full_pel_backward_vector
    pub full_pel: [bool; 2],
    /// f_code[s][t]
    pub f_code: [[u8; 2]; 2],
    pub intra_dc_precision: u32,
    pub picture_structure: u32,
    pub frame_pred_frame_dct: bool,
    pub concealment_motion_vectors: bool,
    pub q_scale_type: bool,
    pub intra_vlc_format: bool,
    pub alternate_scan: bool,
}

impl Default for PictureParams {
    fn default() -> Self {
        Self {
            temporal_reference: 0,
            picture_type: PictureType::None,
            full_pel: [false; 2],
            f_code: [[1; 2]; 2],
            intra_dc_precision: 0,
            picture_structure: FRAME_PICTURE,
            frame_pred_frame_dct: true,
            concealment_motion_vectors: false,
            q_scale_type: false,
            intra_vlc_format: false,
            alternate_scan: false,
        }
    }
}

/// 解析图片头 (起始码已消费)
///
/// 先填入 MPEG-1 语义下的默认值, 随后的图片编码扩展会覆盖它们.
/// picture_coding_type 非 I/P/B 时返回 None.
pub(super) fn parse_picture_header(br: &mut BitReader) -> Option<PictureParams> {
    let mut pic = PictureParams {
        temporal_reference: br.get_bits(10),
        ..PictureParams::default()
    };
    let coding_type = br.get_bits(3);
    // vbv_delay
    br.consume(16);

    let picture_type = PictureType::from_coding_type(coding_type);
    if matches!(picture_type, Some(PictureType::P | PictureType::B)) {
        pic.full_pel[0] = br.get_flag();
        pic.f_code[0] = [br.get_bits(3) as u8; 2];
    }
    if picture_type == Some(PictureType::B) {
        pic.full_pel[1] = br.get_flag();
        pic.f_code[1] = [br.get_bits(3) as u8; 2];
    }
    while br.get_flag() {
        br.consume(8);
    }

    trace!(
        "图片头: temporal_reference={}, coding_type={}",
        pic.temporal_reference, coding_type
    );
    pic.picture_type = picture_type?;
    Some(pic)
}

fn parse_picture_coding_extension(br: &mut BitReader, pic: &mut PictureParams) {
    for s in 0..2 {
        for t in 0..2 {
            pic.f_code[s][t] = br.get_bits(4) as u8;
        }
    }
    pic.intra_dc_precision = br.get_bits(2);
    pic.picture_structure = br.get_bits(2);
    // top_field_first
    br.consume(1);
    pic.frame_pred_frame_dct = br.get_flag();
    pic.concealment_motion_vectors = br.get_flag();
    pic.q_scale_type = br.get_flag();
    pic.intra_vlc_format = br.get_flag();
    pic.alternate_scan = br.get_flag();
    // repeat_first_field, chroma_420_type, progressive_frame 只影响显示
    br.consume(3);
    if br.get_flag() {
        // composite_display 信息
        br.consume(20);
    }
    // MPEG-2 扩展中的 full_pel 标志固定为 0
    pic.full_pel = [false; 2];
}

// ============================================================================
// 扩展分派
// ============================================================================

/// 扩展所作用的目标
pub(super) enum ExtensionTarget<'a> {
    /// 序列头之后
    Sequence(&'a mut SequenceHeader),
    /// 图片头之后
    Picture(&'a mut PictureParams),
}

/// 解析一个扩展 (起始码已消费), 返回 extension_start_code_identifier
pub(super) fn parse_extension(
    br: &mut BitReader,
    target: ExtensionTarget,
    matrices: &mut QuantMatrices,
) -> u32 {
    let id = br.get_bits(4);
    match (id, target) {
        (SEQUENCE_EXTENSION_ID, ExtensionTarget::Sequence(seq)) => {
            parse_sequence_extension(br, seq)
        }
        (SEQUENCE_DISPLAY_EXTENSION_ID, ExtensionTarget::Sequence(seq)) => {
            parse_sequence_display_extension(br, seq)
        }
        (QUANT_MATRIX_EXTENSION_ID, _) => parse_quant_matrix_extension(br, matrices),
        (PICTURE_CODING_EXTENSION_ID, ExtensionTarget::Picture(pic)) => {
            parse_picture_coding_extension(br, pic)
        }
        (id, _) => trace!("跳过扩展 ID {}", id),
    }
    id
}

// ============================================================================
// 片头
// ============================================================================

/// 片头内容
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct SliceHeader {
    /// 片起始行 (宏块行, 从 0 开始)
    pub mb_row: usize,
    pub quantizer_scale_code: u32,
}

/// 解析片头 (起始码已消费), `code` 为完整起始码
pub(super) fn parse_slice_header(br: &mut BitReader, code: u32, vertical_size: u32) -> SliceHeader {
    let mut mb_row = ((code & 0xFF) as usize).saturating_sub(1);
    if vertical_size > 2800 {
        mb_row += (br.get_bits(3) as usize) << 7;
    }
    let quantizer_scale_code = br.get_bits(5);
    if br.get_flag() {
        // intra_slice, slice_picture_id_enable, slice_picture_id
        br.consume(8);
        while br.get_flag() {
            br.consume(8);
        }
    }
    SliceHeader {
        mb_row,
        quantizer_scale_code,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use m2v_core::bitwriter::BitWriter;

    fn sequence_bits(bw: &mut BitWriter, w: u32, h: u32, aspect: u32, rate: u32) {
        bw.write_bits(w, 12);
        bw.write_bits(h, 12);
        bw.write_bits(aspect, 4);
        bw.write_bits(rate, 4);
        bw.write_bits(5000, 18);
        bw.write_bits(1, 1);
        bw.write_bits(112, 10);
        bw.write_bits(0, 1);
    }

    #[test]
    fn test_序列头与几何() {
        let mut bw = BitWriter::new();
        sequence_bits(&mut bw, 720, 576, 3, 3);
        bw.write_bits(0, 2);
        bw.write_bits(0, 32);
        let data = bw.finish();
        let mut br = BitReader::new(&data);
        let mut m = QuantMatrices::default();
        let seq = parse_sequence_header(&mut br, &mut m);
        assert_eq!((seq.horizontal_size, seq.vertical_size), (720, 576));
        assert_eq!(seq.frame_rate(), Rational::new(25, 1));
        assert_eq!(seq.sample_aspect_ratio(), Rational::new(64, 45));

        let g = Geometry::from_sequence(&seq).unwrap();
        assert_eq!((g.mb_width, g.mb_height), (45, 36));
        assert_eq!((g.width, g.height), (720, 576));
        assert_eq!((g.chroma_width, g.chroma_height), (360, 288));
    }

    #[test]
    fn test_宏块高度按两场对齐() {
        let mut bw = BitWriter::new();
        sequence_bits(&mut bw, 1920, 1080, 3, 4);
        bw.write_bits(0, 2);
        bw.write_bits(0, 32);
        let data = bw.finish();
        let seq = parse_sequence_header(&mut BitReader::new(&data), &mut QuantMatrices::default());
        let g = Geometry::from_sequence(&seq).unwrap();
        assert_eq!(g.mb_height, 68);
        assert_eq!(g.height, 1088);
        assert_eq!(seq.frame_rate(), Rational::new(30000, 1001));
    }

    #[test]
    fn test_零尺寸被拒绝() {
        let mut bw = BitWriter::new();
        sequence_bits(&mut bw, 0, 16, 1, 3);
        bw.write_bits(0, 2);
        bw.write_bits(0, 32);
        let data = bw.finish();
        let seq = parse_sequence_header(&mut BitReader::new(&data), &mut QuantMatrices::default());
        assert!(matches!(
            Geometry::from_sequence(&seq),
            Err(M2vError::InvalidData(_))
        ));
    }

    #[test]
    fn test_加载量化矩阵按之字形写入() {
        let mut bw = BitWriter::new();
        sequence_bits(&mut bw, 16, 16, 1, 3);
        bw.write_bits(1, 1);
        for i in 0..64 {
            bw.write_bits(i + 1, 8);
        }
        bw.write_bits(0, 1);
        bw.write_bits(0, 32);
        let data = bw.finish();
        let mut m = QuantMatrices::default();
        m.non_intra = [3; 64];
        parse_sequence_header(&mut BitReader::new(&data), &mut m);
        // 之字形第 2 个位置对应光栅 8
        assert_eq!(m.intra[0], 1);
        assert_eq!(m.intra[1], 2);
        assert_eq!(m.intra[8], 3);
        assert_eq!(m.intra[63], 64);
        assert_eq!(m.non_intra, DEFAULT_NON_INTRA_MATRIX);
    }

    #[test]
    fn test_序列扩展与显示扩展() {
        let mut bw = BitWriter::new();
        sequence_bits(&mut bw, 720, 480, 2, 4);
        bw.write_bits(0, 2);
        let data = bw.finish();
        let mut seq =
            parse_sequence_header(&mut BitReader::new(&data), &mut QuantMatrices::default());

        let mut bw = BitWriter::new();
        bw.write_bits(SEQUENCE_EXTENSION_ID, 4);
        bw.write_bits(0x48, 8);
        bw.write_bits(0, 1);
        bw.write_bits(1, 2);
        bw.write_bits(0, 2);
        bw.write_bits(0, 2);
        bw.write_bits(0, 12);
        bw.write_bits(1, 1);
        bw.write_bits(0, 8);
        bw.write_bits(1, 1);
        bw.write_bits(0, 2);
        bw.write_bits(0, 5);
        bw.write_bits(0, 32);
        let data = bw.finish();
        let mut m = QuantMatrices::default();
        let id = parse_extension(
            &mut BitReader::new(&data),
            ExtensionTarget::Sequence(&mut seq),
            &mut m,
        );
        assert_eq!(id, 1);
        assert!(seq.mpeg2);
        assert!(seq.low_delay);
        assert!(!seq.progressive_sequence);
        assert_eq!(seq.profile_and_level, 0x48);

        let mut bw = BitWriter::new();
        bw.write_bits(SEQUENCE_DISPLAY_EXTENSION_ID, 4);
        bw.write_bits(2, 3);
        bw.write_bits(1, 1);
        bw.write_bits(6, 8);
        bw.write_bits(6, 8);
        bw.write_bits(6, 8);
        bw.write_bits(704, 14);
        bw.write_bits(1, 1);
        bw.write_bits(480, 14);
        bw.write_bits(0, 32);
        let data = bw.finish();
        parse_extension(
            &mut BitReader::new(&data),
            ExtensionTarget::Sequence(&mut seq),
            &mut m,
        );
        assert_eq!(seq.color_space, ColorSpace::Smpte170m);
        assert_eq!(seq.display_dimensions(), (704, 480));
        // 4:3 显示在 704x480 上: SAR = 4/3 * 480/704 = 10/11
        assert_eq!(seq.sample_aspect_ratio(), Rational::new(10, 11));
    }

    #[test]
    fn test_图片头与编码扩展() {
        let mut bw = BitWriter::new();
        bw.write_bits(7, 10);
        bw.write_bits(3, 3);
        bw.write_bits(0xFFFF, 16);
        bw.write_bits(0, 1);
        bw.write_bits(7, 3);
        bw.write_bits(1, 1);
        bw.write_bits(7, 3);
        // extra_bit_picture 链: 一个额外字节
        bw.write_bits(1, 1);
        bw.write_bits(0xAB, 8);
        bw.write_bits(0, 1);
        bw.write_bits(0, 32);
        let data = bw.finish();
        let pic = parse_picture_header(&mut BitReader::new(&data)).unwrap();
        assert_eq!(pic.picture_type, PictureType::B);
        assert_eq!(pic.temporal_reference, 7);
        assert_eq!(pic.f_code, [[7, 7], [7, 7]]);
        assert_eq!(pic.full_pel, [false, true]);
        assert!(pic.frame_pred_frame_dct);

        let mut pic = pic;
        let mut bw = BitWriter::new();
        bw.write_bits(PICTURE_CODING_EXTENSION_ID, 4);
        for f in [1, 2, 3, 4] {
            bw.write_bits(f, 4);
        }
        bw.write_bits(2, 2);
        bw.write_bits(3, 2);
        // top_field_first, frame_pred_frame_dct, concealment, q_scale_type,
        // intra_vlc_format, alternate_scan, repeat_first_field, chroma_420_type, progressive_frame
        for bit in [1, 0, 0, 1, 1, 1, 0, 1, 0] {
            bw.write_bits(bit, 1);
        }
        bw.write_bits(0, 1);
        bw.write_bits(0, 32);
        let data = bw.finish();
        let mut br = BitReader::new(&data);
        parse_extension(
            &mut br,
            ExtensionTarget::Picture(&mut pic),
            &mut QuantMatrices::default(),
        );
        assert_eq!(pic.f_code, [[1, 2], [3, 4]]);
        assert_eq!(pic.intra_dc_precision, 2);
        assert!(!pic.frame_pred_frame_dct);
        assert!(!pic.concealment_motion_vectors);
        assert!(pic.q_scale_type && pic.intra_vlc_format && pic.alternate_scan);
        assert_eq!(pic.full_pel, [false, false]);
        // 仅影响显示的标志被跳过, 游标停在扩展末尾
        assert_eq!(br.bit_position(), 4 + 16 + 4 + 10);
    }

    #[test]
    fn test_非法图片类型() {
        let mut bw = BitWriter::new();
        bw.write_bits(0, 10);
        bw.write_bits(4, 3);
        bw.write_bits(0, 16);
        bw.write_bits(0, 32);
        let data = bw.finish();
        assert!(parse_picture_header(&mut BitReader::new(&data)).is_none());
    }

    #[test]
    fn test_片头() {
        let mut bw = BitWriter::new();
        bw.write_bits(9, 5);
        bw.write_bits(1, 1);
        bw.write_bits(1, 1);
        bw.write_bits(0, 7);
        bw.write_bits(1, 1);
        bw.write_bits(0x55, 8);
        bw.write_bits(0, 1);
        bw.write_bits(0b101, 3);
        bw.write_bits(0, 32);
        let data = bw.finish();
        let mut br = BitReader::new(&data);
        let sh = parse_slice_header(&mut br, 0x103, 576);
        assert_eq!(sh.mb_row, 2);
        assert_eq!(sh.quantizer_scale_code, 9);
        assert_eq!(br.get_bits(3), 0b101);
    }

    #[test]
    fn test_残缺起始码不被识别() {
        let data = [0xFFu8, 0x00, 0x00, 0x01];
        let mut br = BitReader::new(&data[..3]);
        assert_eq!(next_code(&mut br), None);
        let mut br = BitReader::new(&data);
        assert_eq!(next_code(&mut br), None);
        let data = [0xFFu8, 0x00, 0x00, 0x01, 0xB3];
        let mut br = BitReader::new(&data);
        assert_eq!(next_code(&mut br), Some(SEQUENCE_HEADER_CODE));
    }
}
