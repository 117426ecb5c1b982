//! 基本流解码与汇总.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::Serialize;
use std::io::Write;

use m2v_codec::{Decoder, Frame, Mpeg2Config, Mpeg2Decoder, Packet, VideoFrame, split_pictures};
use m2v_core::M2vError;

/// 单张图片的汇总
#[derive(Debug, Clone, Serialize)]
pub struct PictureInfo {
    pub index: usize,
    pub picture_type: String,
    pub pts: i64,
    pub bytes: usize,
}

/// 整条基本流的汇总
#[derive(Debug, Clone, Default, Serialize)]
pub struct StreamSummary {
    pub input: String,
    pub width: u32,
    pub height: u32,
    pub display_width: u32,
    pub display_height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_rate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_aspect_ratio: Option<String>,
    pub i_pictures: usize,
    pub p_pictures: usize,
    pub b_pictures: usize,
    pub pictures: Vec<PictureInfo>,
}

impl StreamSummary {
    fn record(&mut self, frame: &VideoFrame, bytes: usize) {
        if self.pictures.is_empty() {
            self.width = frame.width;
            self.height = frame.height;
            self.display_width = frame.display_width;
            self.display_height = frame.display_height;
            self.frame_rate = frame
                .frame_rate
                .is_valid()
                .then(|| frame.frame_rate.to_string());
            self.sample_aspect_ratio = Some(frame.sample_aspect_ratio.to_string());
        }
        match frame.picture_type.as_char() {
            'I' => self.i_pictures += 1,
            'P' => self.p_pictures += 1,
            'B' => self.b_pictures += 1,
            _ => {}
        }
        self.pictures.push(PictureInfo {
            index: self.pictures.len(),
            picture_type: frame.picture_type.as_char().to_string(),
            pts: frame.pts,
            bytes,
        });
    }
}

/// 写出按显示尺寸裁剪的 Y/Cb/Cr 平面
pub fn write_yuv(frame: &VideoFrame, sink: &mut dyn Write) -> std::io::Result<()> {
    for plane in 0..3 {
        for row in frame.cropped_rows(plane) {
            sink.write_all(row)?;
        }
    }
    Ok(())
}

/// 解码一条原始基本流
///
/// 每个图片单元作为一个数据包送入解码器, 时间戳为单元序号 (从 1 开始).
pub fn decode_stream(
    data: &[u8],
    ring_capacity: usize,
    mut sink: Option<&mut dyn Write>,
) -> Result<StreamSummary> {
    let mut decoder = Mpeg2Decoder::with_config(Mpeg2Config { ring_capacity });
    let mut summary = StreamSummary::default();

    let units = split_pictures(data);
    debug!("基本流 {} 字节, 切分为 {} 个图片单元", data.len(), units.len());

    for (i, unit) in units.iter().enumerate() {
        let mut packet = Packet::from_data(unit.to_vec());
        packet.pts = i as i64 + 1;
        if let Err(e) = decoder.send_packet(&packet) {
            warn!("图片单元 {} 解码失败: {}", i, e);
            continue;
        }
        drain(&mut decoder, &mut summary, unit.len(), sink.as_deref_mut())?;
    }

    decoder.send_packet(&Packet::empty())?;
    drain(&mut decoder, &mut summary, 0, sink)?;

    info!(
        "解码完成: {} 张图片 (I {} / P {} / B {})",
        summary.pictures.len(),
        summary.i_pictures,
        summary.p_pictures,
        summary.b_pictures
    );
    Ok(summary)
}

fn drain(
    decoder: &mut Mpeg2Decoder,
    summary: &mut StreamSummary,
    bytes: usize,
    mut sink: Option<&mut (dyn Write + '_)>,
) -> Result<()> {
    loop {
        match decoder.receive_frame() {
            Ok(Frame::Video(frame)) => {
                if let Some(sink) = sink.as_deref_mut() {
                    write_yuv(&frame, sink).context("写出 YUV 失败")?;
                }
                summary.record(&frame, bytes);
            }
            // Frame 为 non_exhaustive, 其余帧类型忽略
            Ok(_) => {}
            Err(M2vError::NeedMoreData | M2vError::Eof) => return Ok(()),
            Err(e) => return Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use m2v_core::PixelFormat;
    use m2v_core::bitwriter::BitWriter;

    /// 16x32 的 I 图片, 两个直流为 0 的帧内宏块
    fn gray_stream() -> Vec<u8> {
        let mut bw = BitWriter::new();
        bw.write_start_code(0xB3);
        bw.write_bits(16, 12);
        bw.write_bits(32, 12);
        bw.write_bits(1, 4);
        bw.write_bits(3, 4);
        bw.write_bits(0x3FFFF, 18);
        bw.write_bits(1, 1);
        bw.write_bits(16, 10);
        bw.write_bits(0, 3);
        bw.write_start_code(0x00);
        bw.write_bits(0, 10);
        bw.write_bits(1, 3);
        bw.write_bits(0xFFFF, 16);
        bw.write_bits(0, 1);
        bw.write_start_code(0x01);
        bw.write_bits(8, 5);
        bw.write_bits(0, 1);
        for _ in 0..2 {
            // 地址增量 1, 帧内宏块类型
            bw.write_bits(0b11, 2);
            for comp in 0..6 {
                if comp < 4 {
                    bw.write_bits(0b100, 3);
                } else {
                    bw.write_bits(0b00, 2);
                }
                bw.write_bits(0b10, 2);
            }
        }
        bw.write_start_code(0xB7);
        bw.finish()
    }

    #[test]
    fn test_解码汇总与_yuv_输出() {
        let mut stream = gray_stream();
        stream.extend(gray_stream());
        let mut yuv = Vec::new();
        let summary = decode_stream(&stream, 4, Some(&mut yuv)).unwrap();

        assert_eq!(summary.pictures.len(), 2);
        assert_eq!(summary.i_pictures, 2);
        assert_eq!((summary.width, summary.height), (16, 32));
        assert_eq!(summary.frame_rate.as_deref(), Some("25/1"));
        assert_eq!(summary.pictures[1].pts, 2);
        assert!(summary.pictures[0].bytes > 0);
        assert_eq!(yuv.len(), 2 * PixelFormat::Yuv420p.frame_size(16, 32));
        assert!(yuv.iter().all(|&v| v == 128));

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"picture_type\":\"I\""));
    }

    #[test]
    fn test_空输入() {
        let summary = decode_stream(&[], 4, None).unwrap();
        assert!(summary.pictures.is_empty());
        assert!(summary.frame_rate.is_none());
    }
}
