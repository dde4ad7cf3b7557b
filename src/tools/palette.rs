use crate::error::StudioError;

/// 疊加層文字色調：依調色盤主色亮度決定，與照片內容無關
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTone {
    Light,
    Dark,
}

/// 品牌調色盤：封閉列舉，未知名稱在建構時即拒絕
///
/// 每個調色盤帶主色（面板）、輔色（點綴帶）與是否使用漸層過渡
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    VibrantCoral,
    CreatorNeon,
    MinimalSlate,
    FreshMint,
}

impl Palette {
    pub const ALL: [Self; 4] = [
        Self::VibrantCoral,
        Self::CreatorNeon,
        Self::MinimalSlate,
        Self::FreshMint,
    ];

    /// 依名稱解析，大小寫不敏感；未知名稱回報 `InvalidStyle`
    pub fn from_name(name: &str) -> Result<Self, StudioError> {
        let normalized = name.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.name().to_lowercase() == normalized)
            .ok_or_else(|| StudioError::InvalidStyle(format!("未知調色盤: {name}")))
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::VibrantCoral => "Vibrant coral",
            Self::CreatorNeon => "Creator neon",
            Self::MinimalSlate => "Minimal slate",
            Self::FreshMint => "Fresh mint",
        }
    }

    /// 面板主色
    #[must_use]
    pub const fn primary(&self) -> [u8; 3] {
        match self {
            Self::VibrantCoral => [255, 94, 98],
            Self::CreatorNeon => [58, 12, 163],
            Self::MinimalSlate => [26, 26, 36],
            Self::FreshMint => [0, 150, 136],
        }
    }

    /// 點綴帶輔色
    #[must_use]
    pub const fn secondary(&self) -> [u8; 3] {
        match self {
            Self::VibrantCoral => [255, 138, 101],
            Self::CreatorNeon => [90, 24, 220],
            Self::MinimalSlate => [64, 64, 80],
            Self::FreshMint => [0, 191, 165],
        }
    }

    /// 面板上緣是否鋪設漸層過渡（Minimal slate 維持平面風格）
    #[must_use]
    pub const fn has_gradient(&self) -> bool {
        !matches!(self, Self::MinimalSlate)
    }

    /// 主色相對亮度（Rec.601，0.0–1.0）
    #[must_use]
    pub fn primary_luminance(&self) -> f32 {
        let [r, g, b] = self.primary();
        (0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b)) / 255.0
    }

    /// 文字色調規則：主色亮度 > 0.5 用深色字，否則用淺色字
    #[must_use]
    pub fn text_tone(&self) -> TextTone {
        if self.primary_luminance() > 0.5 {
            TextTone::Dark
        } else {
            TextTone::Light
        }
    }
}
