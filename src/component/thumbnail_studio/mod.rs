//! 縮圖工作室元件
//!
//! 六階段流程：
//! A. 取得影片資訊（ffprobe）
//! B. 依取樣間隔擷取候選幀（單一 ffmpeg 串流）
//! C. 產生字幕（外部命令，可跳過）
//! D. 選擇主視覺幀
//! E. 設定樣式與文案
//! F. 合成縮圖並輸出 PNG 與字幕檔

mod main;

pub use main::{StudioResult, ThumbnailStudio};
