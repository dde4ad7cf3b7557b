use crate::config::types::{Config, MediaTypeTable, UserSettings};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// 編譯時嵌入的媒體類型設定（不需要外部檔案）
const MEDIA_TYPE_TABLE_JSON: &str = include_str!("../data/media_type_table.json");

impl Config {
    pub fn new() -> Result<Self> {
        let media_type_table = Self::load_embedded_media_type_table()?;
        let settings = Self::load_settings().unwrap_or_default();

        Ok(Self {
            media_type_table,
            settings,
        })
    }

    fn load_settings() -> Result<UserSettings> {
        let path = Path::new("settings.json");
        if !path.exists() {
            return Ok(UserSettings::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("無法讀取設定檔: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("無法解析設定檔: {}", path.display()))
    }

    /// 從編譯時嵌入的 JSON 載入媒體類型表
    fn load_embedded_media_type_table() -> Result<MediaTypeTable> {
        serde_json::from_str(MEDIA_TYPE_TABLE_JSON).context("無法解析嵌入的媒體類型設定")
    }
}
