//! 縮圖合成
//!
//! 流程：置中裁切到 16:9 → 下三分之一色板疊加（含點綴帶與漸層過渡）
//! → 標題/副標排版繪字。輸出永遠是獨立的新點陣圖，與輸入不共用緩衝。

use crate::tools::bitmap_font::{draw_text, line_height, text_width};
use crate::tools::palette::TextTone;
use crate::tools::style::{StyleConfig, TextAlignment};
use crate::tools::text_layout::{block_gap, layout_text_block};
use image::RgbImage;

/// 目標長寬比 16:9
pub const TARGET_ASPECT_W: u32 = 16;
pub const TARGET_ASPECT_H: u32 = 9;

/// 文字區左右留白（像素）
const TEXT_MARGIN: u32 = 32;
const TEXT_TOP_PAD: u32 = 10;
const TEXT_BOTTOM_PAD: u32 = 12;

/// 色板上緣（下三分之一的起點）
#[must_use]
pub const fn panel_top(height: u32) -> u32 {
    height - height / 3
}

/// 點綴帶高度
#[must_use]
pub const fn accent_band_height(height: u32) -> u32 {
    let band = height / 48;
    if band < 3 { 3 } else { band }
}

/// 漸層過渡區高度（色板上緣往上延伸）
#[must_use]
pub const fn gradient_ramp_height(height: u32) -> u32 {
    height / 12
}

/// 合成縮圖
///
/// 樣式在 `StyleConfig` 建構時已驗證完畢，此處不再失敗；
/// 文字一律以換行與縮字收斂，不因長度中止。
#[must_use]
pub fn compose(frame: &RgbImage, style: &StyleConfig) -> RgbImage {
    let mut canvas = center_crop_to_aspect(frame, TARGET_ASPECT_W, TARGET_ASPECT_H);
    apply_overlay(&mut canvas, style);
    draw_text_block(&mut canvas, style);
    canvas
}

/// 置中裁切到指定長寬比，只裁不縮放（永不拉伸）
#[must_use]
pub fn center_crop_to_aspect(frame: &RgbImage, aspect_w: u32, aspect_h: u32) -> RgbImage {
    let (width, height) = frame.dimensions();

    // 以交叉相乘比較比例，避免浮點誤差
    let (crop_w, crop_h) = if width * aspect_h > height * aspect_w {
        // 過寬：裁左右
        ((height * aspect_w / aspect_h).max(1), height)
    } else {
        // 過高：裁上下
        (width, (width * aspect_h / aspect_w).max(1))
    };

    let x = (width - crop_w) / 2;
    let y = (height - crop_h) / 2;

    image::imageops::crop_imm(frame, x, y, crop_w, crop_h).to_image()
}

/// 逐像素線性插值：`out = frame × (1 − α) + color × α`
fn blend_pixel(canvas: &mut RgbImage, x: u32, y: u32, color: [u8; 3], alpha: f32) {
    let pixel = canvas.get_pixel_mut(x, y);
    for (channel, c) in pixel.0.iter_mut().zip(color) {
        *channel = (f32::from(*channel) * (1.0 - alpha) + f32::from(c) * alpha).round() as u8;
    }
}

fn apply_overlay(canvas: &mut RgbImage, style: &StyleConfig) {
    let alpha = style.overlay_strength;
    if alpha <= 0.0 {
        // α = 0 為無操作
        return;
    }

    let (width, height) = canvas.dimensions();
    let panel_start = panel_top(height);
    let band_end = (panel_start + accent_band_height(height)).min(height);
    let primary = style.palette.primary();
    let secondary = style.palette.secondary();

    // 漸層過渡：色板上緣往上以平滑的 α 斜坡收掉硬邊
    if style.palette.has_gradient() {
        let ramp = gradient_ramp_height(height);
        let ramp_top = panel_start.saturating_sub(ramp);

        for y in ramp_top..panel_start {
            let t = (y - ramp_top + 1) as f32 / (panel_start - ramp_top + 1) as f32;
            let ramp_alpha = alpha * t;
            for x in 0..width {
                blend_pixel(canvas, x, y, primary, ramp_alpha);
            }
        }
    }

    // 色板本體：上緣一道輔色點綴帶，其餘為主色；每個像素只混色一次
    for y in panel_start..height {
        let color = if y < band_end { secondary } else { primary };
        for x in 0..width {
            blend_pixel(canvas, x, y, color, alpha);
        }
    }
}

fn draw_text_block(canvas: &mut RgbImage, style: &StyleConfig) {
    if style.headline.trim().is_empty() && style.subtitle.trim().is_empty() {
        return;
    }

    let (width, height) = canvas.dimensions();
    let margin = TEXT_MARGIN.min(width / 8);
    let avail_width = width.saturating_sub(2 * margin).max(1);

    let text_top = panel_top(height) + accent_band_height(height) + TEXT_TOP_PAD;
    let avail_height = height
        .saturating_sub(text_top)
        .saturating_sub(TEXT_BOTTOM_PAD)
        .max(1);

    // 初始標題字級取畫布高度的十二分之一，對應字型高度換算為縮放倍數
    let initial_scale = (height / 12 / 7).max(2);
    let block = layout_text_block(
        &style.headline,
        &style.subtitle,
        avail_width,
        avail_height,
        initial_scale,
    );

    // 對比規則：依色板主色亮度決定字色，與照片內容無關
    let (headline_color, subtitle_color) = match style.palette.text_tone() {
        TextTone::Light => ([245, 245, 245], [224, 224, 224]),
        TextTone::Dark => ([24, 24, 24], [60, 60, 60]),
    };

    let mut cursor_y = text_top;

    for line in &block.headline_lines {
        let x = line_x(style.alignment, line, block.headline_scale, width, margin);
        draw_text(canvas, line, x, cursor_y, block.headline_scale, headline_color);
        cursor_y += line_height(block.headline_scale);
    }

    if !block.headline_lines.is_empty() && !block.subtitle_lines.is_empty() {
        cursor_y += block_gap(block.headline_scale);
    }

    for line in &block.subtitle_lines {
        let x = line_x(style.alignment, line, block.subtitle_scale, width, margin);
        draw_text(canvas, line, x, cursor_y, block.subtitle_scale, subtitle_color);
        cursor_y += line_height(block.subtitle_scale);
    }
}

fn line_x(alignment: TextAlignment, line: &str, scale: u32, width: u32, margin: u32) -> u32 {
    match alignment {
        TextAlignment::Left => margin,
        TextAlignment::Center => {
            let line_width = text_width(line.chars().count(), scale);
            width.saturating_sub(line_width) / 2
        }
    }
}
