use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// 最近使用路徑的保留數量上限
pub const MAX_RECENT_PATHS: usize = 5;

/// 支援的媒體副檔名表（編譯時嵌入）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaTypeTable {
    #[serde(rename = "VIDEO_FILE")]
    pub video_file: Vec<String>,
    #[serde(rename = "IMAGE_FILE")]
    pub image_file: Vec<String>,
}

impl MediaTypeTable {
    fn extension_set(list: &[String]) -> HashSet<String> {
        list.iter().map(|ext| ext.to_lowercase()).collect()
    }

    fn matches(list: &[String], path: &Path) -> bool {
        let extensions = Self::extension_set(list);
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.contains(&format!(".{}", ext.to_lowercase())))
    }

    #[must_use]
    pub fn is_video_file(&self, path: &Path) -> bool {
        Self::matches(&self.video_file, path)
    }

    #[must_use]
    pub fn is_image_file(&self, path: &Path) -> bool {
        Self::matches(&self.image_file, path)
    }
}

/// 使用者偏好設定，持久化於工作目錄的 settings.json
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// 預設調色盤名稱
    pub palette: String,
    /// 預設疊加強度
    pub overlay_strength: f32,
    /// 預設取樣間隔（秒）
    pub sample_interval_seconds: f64,
    /// 預設字幕張數（不超過候選幀上限）
    pub caption_count: usize,
    /// 字幕外部命令；未設定時跳過字幕階段
    pub caption_command: Option<String>,
    /// 最近使用的輸入路徑
    pub recent_paths: Vec<String>,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            palette: "Vibrant coral".to_string(),
            overlay_strength: 0.65,
            sample_interval_seconds: 2.0,
            caption_count: 3,
            caption_command: None,
            recent_paths: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub media_type_table: MediaTypeTable,
    pub settings: UserSettings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn table() -> MediaTypeTable {
        MediaTypeTable {
            video_file: vec![".mp4".to_string(), ".mkv".to_string()],
            image_file: vec![".jpg".to_string(), ".png".to_string()],
        }
    }

    #[test]
    fn test_video_classification_case_insensitive() {
        let table = table();
        assert!(table.is_video_file(&PathBuf::from("clip.mp4")));
        assert!(table.is_video_file(&PathBuf::from("CLIP.MKV")));
        assert!(!table.is_video_file(&PathBuf::from("photo.jpg")));
        assert!(!table.is_video_file(&PathBuf::from("noext")));
    }

    #[test]
    fn test_image_classification() {
        let table = table();
        assert!(table.is_image_file(&PathBuf::from("photo.PNG")));
        assert!(!table.is_image_file(&PathBuf::from("clip.mp4")));
    }

    #[test]
    fn test_default_settings() {
        let settings = UserSettings::default();
        assert_eq!(settings.palette, "Vibrant coral");
        assert!((settings.overlay_strength - 0.65).abs() < f32::EPSILON);
        assert!((settings.sample_interval_seconds - 2.0).abs() < f64::EPSILON);
        assert_eq!(settings.caption_count, 3);
        assert!(settings.caption_command.is_none());
    }
}
