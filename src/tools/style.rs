use crate::error::StudioError;
use crate::tools::palette::Palette;

/// 標題與副標的長度上限（字元數）
pub const MAX_HEADLINE_CHARS: usize = 80;
pub const MAX_SUBTITLE_CHARS: usize = 120;

/// 文字對齊方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlignment {
    Left,
    Center,
}

/// 單次合成使用的樣式設定
///
/// 建構時一次驗證完畢，`compose` 只接受已驗證的樣式，
/// 渲染階段不會再出現 `InvalidStyle`。
#[derive(Debug, Clone)]
pub struct StyleConfig {
    pub palette: Palette,
    pub overlay_strength: f32,
    pub headline: String,
    pub subtitle: String,
    pub alignment: TextAlignment,
}

impl StyleConfig {
    pub fn new(
        palette: Palette,
        overlay_strength: f32,
        headline: &str,
        subtitle: &str,
        alignment: TextAlignment,
    ) -> Result<Self, StudioError> {
        if !overlay_strength.is_finite() || !(0.0..=1.0).contains(&overlay_strength) {
            return Err(StudioError::InvalidStyle(format!(
                "疊加強度必須在 0.0 到 1.0 之間: {overlay_strength}"
            )));
        }

        let headline_chars = headline.chars().count();
        if headline_chars > MAX_HEADLINE_CHARS {
            return Err(StudioError::InvalidStyle(format!(
                "標題過長: {headline_chars} 字元（上限 {MAX_HEADLINE_CHARS}）"
            )));
        }

        let subtitle_chars = subtitle.chars().count();
        if subtitle_chars > MAX_SUBTITLE_CHARS {
            return Err(StudioError::InvalidStyle(format!(
                "副標過長: {subtitle_chars} 字元（上限 {MAX_SUBTITLE_CHARS}）"
            )));
        }

        Ok(Self {
            palette,
            overlay_strength,
            headline: headline.to_string(),
            subtitle: subtitle.to_string(),
            alignment,
        })
    }
}
