//! DOCX 写入器 - 基础设施层
//!
//! 把有序的写入指令（文字段落 / 图片 / 分页）序列化为 DOCX 字节，
//! 不认识题目结构。

use crate::error::{AppError, AppResult};
use docx_rs::{BreakType, Docx, Paragraph, Pic, Run};
use std::io::Cursor;

/// 1 英寸对应的 EMU
const EMU_PER_INCH: f32 = 914_400.0;

/// 已校验、已转成 PNG 的图片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub png: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
}

/// 写入指令
#[derive(Debug, Clone, PartialEq)]
pub enum DocBlock {
    /// 一个文字段落
    Text(String),
    /// 一张独占段落的图片
    Image(ImageData),
    /// 分页
    PageBreak,
}

/// 按顺序写出所有指令并打包为 DOCX
///
/// # 参数
/// - `blocks`: 写入指令
/// - `image_width_inches`: 图片显示宽度，高度按原图比例缩放
pub fn write_docx(blocks: &[DocBlock], image_width_inches: f32) -> AppResult<Vec<u8>> {
    let mut docx = Docx::new();

    for block in blocks {
        let paragraph = match block {
            DocBlock::Text(text) => Paragraph::new().add_run(Run::new().add_text(text.as_str())),
            DocBlock::Image(image) => {
                let (width_emu, height_emu) = display_size_emu(image, image_width_inches);
                let pic = Pic::new_with_dimensions(image.png.clone(), image.width_px, image.height_px)
                    .size(width_emu, height_emu);
                Paragraph::new().add_run(Run::new().add_image(pic))
            }
            DocBlock::PageBreak => Paragraph::new().add_run(Run::new().add_break(BreakType::Page)),
        };
        docx = docx.add_paragraph(paragraph);
    }

    // 序列化为 DOCX 字节
    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| AppError::Document(e.to_string()))?;

    Ok(buf.into_inner())
}

/// 固定宽度，按比例计算高度（EMU）
fn display_size_emu(image: &ImageData, width_inches: f32) -> (u32, u32) {
    let width_emu = (width_inches * EMU_PER_INCH).round();
    let height_emu = if image.width_px == 0 {
        width_emu
    } else {
        (width_emu * image.height_px as f32 / image.width_px as f32).round()
    };
    (width_emu as u32, height_emu as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_size_keeps_aspect_ratio() {
        let image = ImageData {
            png: Vec::new(),
            width_px: 200,
            height_px: 100,
        };
        let (w, h) = display_size_emu(&image, 4.0);
        assert_eq!(w, 3_657_600);
        assert_eq!(h, 1_828_800);
    }

    #[test]
    fn test_write_docx_produces_zip_container() {
        let blocks = vec![
            DocBlock::Text("[Q] 1 + 1 = ?".to_string()),
            DocBlock::Text("(a) 2".to_string()),
            DocBlock::PageBreak,
        ];
        let bytes = write_docx(&blocks, 4.0).unwrap();

        // DOCX 是 zip 容器，以 PK 开头
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_write_docx_embeds_image_media() {
        let mut png = Vec::new();
        image::DynamicImage::new_rgb8(8, 4)
            .write_to(&mut Cursor::new(&mut png), image::ImageOutputFormat::Png)
            .unwrap();

        let blocks = vec![
            DocBlock::Text("[Q] 看图回答".to_string()),
            DocBlock::Image(ImageData {
                png,
                width_px: 8,
                height_px: 4,
            }),
            DocBlock::PageBreak,
        ];
        let bytes = write_docx(&blocks, 4.0).unwrap();

        assert!(bytes.starts_with(b"PK"));
        // zip 的文件名以明文存储
        assert!(bytes.windows(b"word/media/".len()).any(|w| w == b"word/media/"));
    }
}
