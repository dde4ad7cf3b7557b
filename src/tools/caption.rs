//! 字幕管線
//!
//! 字幕模型是外部協作者，以單一方法能力介面注入；
//! 核心只負責限制送出的幀數、維持輸出順序，
//! 並把個別失敗轉為佔位字串而不中止整批。

use crate::tools::frame_sampler::Frame;
use anyhow::{Context, Result, bail};
use image::RgbImage;
use log::{debug, warn};
use std::fs;
use std::process::Command;
use std::sync::atomic::{AtomicU64, Ordering};

/// 個別字幕失敗時的佔位字串前綴（穩定，供呼叫端辨識）
pub const CAPTION_FAILURE_PREFIX: &str = "（字幕產生失敗";

/// 字幕能力介面：影像 → 短文字，任何模型（本地或遠端）皆可替換
pub trait Captioner {
    fn caption(&self, image: &RgbImage) -> Result<String>;
}

/// 一則字幕：幀索引（在候選集合內的位置）與文字
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionEntry {
    pub frame_index: usize,
    pub text: String,
}

/// 對候選幀批次產生字幕
///
/// 最多送出 `limit` 張；輸出與輸入同序同長。
/// 單張失敗以佔位字串記錄後繼續，整批不中止。
pub fn run_caption_pipeline(
    captioner: &dyn Captioner,
    frames: &[Frame],
    limit: usize,
) -> Vec<CaptionEntry> {
    frames
        .iter()
        .take(limit)
        .enumerate()
        .map(|(index, frame)| {
            let text = match captioner.caption(&frame.image) {
                Ok(text) => text,
                Err(e) => {
                    warn!("第 {index} 張字幕產生失敗: {e:#}");
                    format!("{CAPTION_FAILURE_PREFIX}: {e}）")
                }
            };

            CaptionEntry {
                frame_index: index,
                text,
            }
        })
        .collect()
}

/// 以外部命令產生字幕
///
/// 幀先寫成暫存 PNG，再以 `command <png 路徑>` 呼叫；
/// 命令的 stdout（去除前後空白）即為字幕。
/// 命令字串以空白切分，第一段為程式，其餘為前置參數。
pub struct CommandCaptioner {
    program: String,
    args: Vec<String>,
    sequence: AtomicU64,
}

impl CommandCaptioner {
    #[must_use]
    pub fn new(command: &str) -> Self {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().unwrap_or_default();

        Self {
            program,
            args: parts.collect(),
            sequence: AtomicU64::new(0),
        }
    }
}

impl Captioner for CommandCaptioner {
    fn caption(&self, image: &RgbImage) -> Result<String> {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst);
        let temp_path = std::env::temp_dir().join(format!(
            "thumbnail_studio_caption_{}_{sequence}.png",
            std::process::id()
        ));

        image
            .save(&temp_path)
            .with_context(|| format!("無法寫入暫存幀: {}", temp_path.display()))?;

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(&temp_path)
            .output()
            .with_context(|| format!("無法執行字幕命令: {}", self.program));

        // 暫存檔用完即刪，刪除失敗不影響結果
        if fs::remove_file(&temp_path).is_err() {
            warn!("無法清理暫存幀: {}", temp_path.display());
        }

        let output = output?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("字幕命令執行失敗: {}", stderr.trim());
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if text.is_empty() {
            bail!("字幕命令沒有輸出");
        }

        debug!("字幕 #{sequence}: {text}");
        Ok(text)
    }
}
