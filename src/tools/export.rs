use crate::tools::caption::CaptionEntry;
use anyhow::{Context, Result};
use image::RgbImage;
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// 縮圖編碼為 PNG 位元組
pub fn thumbnail_to_png_bytes(image: &RgbImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, image::ImageOutputFormat::Png)
        .context("PNG 編碼失敗")?;
    Ok(buffer.into_inner())
}

/// 縮圖存成 PNG 檔
pub fn save_thumbnail(image: &RgbImage, path: &Path) -> Result<()> {
    let bytes = thumbnail_to_png_bytes(image)?;
    fs::write(path, bytes).with_context(|| format!("無法寫入縮圖: {}", path.display()))?;
    Ok(())
}

/// 字幕輸出為 UTF-8 文字檔：標題一行（若有），之後依序每則字幕一行
pub fn write_caption_file(headline: &str, entries: &[CaptionEntry], path: &Path) -> Result<()> {
    let mut lines: Vec<&str> = Vec::with_capacity(entries.len() + 1);

    if !headline.trim().is_empty() {
        lines.push(headline);
    }
    lines.extend(entries.iter().map(|entry| entry.text.as_str()));

    let mut content = lines.join("\n");
    content.push('\n');

    fs::write(path, content).with_context(|| format!("無法寫入字幕檔: {}", path.display()))?;
    Ok(())
}
