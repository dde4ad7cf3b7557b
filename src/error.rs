//! 管線錯誤分類
//!
//! 所有核心操作回傳的錯誤都屬於這個封閉列舉，
//! 呼叫端可依變體決定是中止還是重新詢問使用者。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StudioError {
    /// 影片容器無法開啟或解碼失敗（致命，不重試）
    #[error("無法解碼影片: {0}")]
    Decode(String),

    /// 影片時長或幀數為零（致命）
    #[error("影片沒有內容（時長或幀數為零）")]
    EmptyVideo,

    /// 取樣間隔必須為正數
    #[error("取樣間隔無效: {0} 秒（必須為正數）")]
    InvalidInterval(f64),

    /// 主視覺幀索引超出候選範圍（可恢復，重新詢問）
    #[error("主視覺幀索引 {index} 超出範圍（候選幀共 {len} 張）")]
    IndexOutOfRange { index: usize, len: usize },

    /// 樣式設定無效：未知調色盤、疊加強度超出範圍或文字過長（可恢復）
    #[error("樣式設定無效: {0}")]
    InvalidStyle(String),
}
