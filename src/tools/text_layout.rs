//! 文字排版：斷詞換行與逐步縮字
//!
//! 換行只在字詞邊界發生，永不折斷單字也不加連字號；
//! 單一字詞超過行寬時獨佔一行原樣輸出。
//! 排版結果超出可用高度時以固定步進縮小字級，合成不因文字長度失敗。

use crate::tools::bitmap_font::{char_advance, line_height};

/// 標題字級縮小的下限（縮放倍數）
pub const MIN_HEADLINE_SCALE: u32 = 2;

/// 排版完成的文字區塊
#[derive(Debug)]
pub struct TextBlock {
    pub headline_lines: Vec<String>,
    pub subtitle_lines: Vec<String>,
    pub headline_scale: u32,
    pub subtitle_scale: u32,
}

impl TextBlock {
    /// 區塊總高度（像素）
    #[must_use]
    pub fn height(&self) -> u32 {
        let headline_height = self.headline_lines.len() as u32 * line_height(self.headline_scale);
        let subtitle_height = self.subtitle_lines.len() as u32 * line_height(self.subtitle_scale);

        let gap = if !self.headline_lines.is_empty() && !self.subtitle_lines.is_empty() {
            block_gap(self.headline_scale)
        } else {
            0
        };

        headline_height + gap + subtitle_height
    }
}

/// 標題與副標之間的垂直間隔
#[must_use]
pub const fn block_gap(headline_scale: u32) -> u32 {
    2 * headline_scale
}

/// 副標字級由標題字級推導
#[must_use]
pub const fn subtitle_scale_for(headline_scale: u32) -> u32 {
    let scale = headline_scale / 2;
    if scale == 0 { 1 } else { scale }
}

/// 指定像素寬度下單行可容納的字元數（至少 1）
#[must_use]
pub fn max_chars_for_width(avail_width: u32, scale: u32) -> usize {
    let advance = char_advance(scale);
    let chars = ((avail_width + scale) / advance) as usize;
    chars.max(1)
}

/// 貪婪斷詞換行
///
/// 每行由輸入的完整字詞依原順序以單一空格連接而成；
/// 超過 `max_chars` 的單一字詞獨佔一行，不折斷。
#[must_use]
pub fn wrap_words(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();

        if current.is_empty() {
            current.push_str(word);
            current_chars = word_chars;
        } else if current_chars + 1 + word_chars <= max_chars {
            current.push(' ');
            current.push_str(word);
            current_chars += 1 + word_chars;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_chars = word_chars;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// 在限定寬高內排版標題與副標
///
/// 從 `initial_scale` 起逐步縮小標題字級重新換行，
/// 直到區塊放得進 `avail_height` 或到達字級下限；
/// 下限仍放不下時照常回傳，繪製階段以裁切收尾。
#[must_use]
pub fn layout_text_block(
    headline: &str,
    subtitle: &str,
    avail_width: u32,
    avail_height: u32,
    initial_scale: u32,
) -> TextBlock {
    let mut scale = initial_scale.max(MIN_HEADLINE_SCALE);

    loop {
        let block = build_block(headline, subtitle, avail_width, scale);

        if block.height() <= avail_height || scale <= MIN_HEADLINE_SCALE {
            return block;
        }
        scale -= 1;
    }
}

fn build_block(headline: &str, subtitle: &str, avail_width: u32, headline_scale: u32) -> TextBlock {
    let subtitle_scale = subtitle_scale_for(headline_scale);

    TextBlock {
        headline_lines: wrap_words(headline, max_chars_for_width(avail_width, headline_scale)),
        subtitle_lines: wrap_words(subtitle, max_chars_for_width(avail_width, subtitle_scale)),
        headline_scale,
        subtitle_scale,
    }
}
