use crate::error::StudioError;
use crate::tools::ffprobe_info::{VideoInfo, get_video_info};
use image::RgbImage;
use log::{debug, warn};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};

/// 取樣間隔（秒），建構時驗證為正數
#[derive(Debug, Clone, Copy)]
pub struct SampleInterval(f64);

impl SampleInterval {
    pub fn from_seconds(seconds: f64) -> Result<Self, StudioError> {
        if !seconds.is_finite() || seconds <= 0.0 {
            return Err(StudioError::InvalidInterval(seconds));
        }
        Ok(Self(seconds))
    }

    #[must_use]
    pub const fn seconds(&self) -> f64 {
        self.0
    }
}

/// 單一取樣幀：解碼幀索引、時間戳與像素資料
///
/// 一旦產出即歸呼叫端所有，下游合成一律產生新的點陣圖
pub struct Frame {
    pub frame_index: u64,
    pub timestamp: f64,
    pub image: RgbImage,
}

/// 取樣計畫：純函數計算的 (幀索引, 時間戳) 序列
///
/// 對應規則：`frame_index = round(timestamp × fps)`，夾限在
/// `[0, total_frames - 1]`；間隔小於單幀週期時產生的重複索引會被抑制，
/// 每一幀最多產出一次。計畫與實際解碼分離，時間運算不需 ffmpeg 即可測試。
#[derive(Debug)]
pub struct SamplePlan {
    entries: Vec<(u64, f64)>,
}

impl SamplePlan {
    #[must_use]
    pub fn build(info: &VideoInfo, interval: SampleInterval) -> Self {
        let max_index = info.total_frames.saturating_sub(1);
        let mut entries: Vec<(u64, f64)> = Vec::new();

        // 即使間隔超過影片長度，第一幀（k = 0）一定產出
        let mut k: u64 = 0;
        loop {
            let timestamp = k as f64 * interval.seconds();
            if k > 0 && timestamp >= info.duration_seconds {
                break;
            }

            let index = ((timestamp * info.frame_rate).round() as u64).min(max_index);
            if entries.last().is_none_or(|(last, _)| index > *last) {
                entries.push((index, timestamp));
            }

            k += 1;
        }

        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[(u64, f64)] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 已開啟並探測完成的影片來源
pub struct VideoSource {
    path: PathBuf,
    info: VideoInfo,
}

impl VideoSource {
    /// 開啟影片：探測失敗回報 `Decode`，零時長或零幀回報 `EmptyVideo`
    pub fn open(path: &Path) -> Result<Self, StudioError> {
        let info = get_video_info(path).map_err(|e| StudioError::Decode(format!("{e:#}")))?;

        if info.duration_seconds <= 0.0 || info.total_frames == 0 || info.frame_rate <= 0.0 {
            return Err(StudioError::EmptyVideo);
        }

        Ok(Self {
            path: path.to_path_buf(),
            info,
        })
    }

    #[must_use]
    pub const fn info(&self) -> &VideoInfo {
        &self.info
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 依取樣計畫建立惰性幀序列
    ///
    /// 單一 ffmpeg 子程序循序解碼整條串流到 stdout（rgb24 rawvideo），
    /// 迭代器邊讀邊丟棄不在計畫內的幀。序列有限且不可重啟；
    /// 解碼把手在序列耗盡、明確關閉或 drop 時釋放。
    pub fn sample(&self, interval: SampleInterval) -> Result<FrameIter, StudioError> {
        let plan = SamplePlan::build(&self.info, interval);

        let mut child = Command::new("ffmpeg")
            .args(["-hide_banner", "-loglevel", "error", "-i"])
            .arg(&self.path)
            .args(["-an", "-sn", "-dn", "-f", "rawvideo", "-pix_fmt", "rgb24", "-"])
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| StudioError::Decode(format!("無法啟動 ffmpeg: {e}")))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| StudioError::Decode("無法取得 ffmpeg 輸出管線".to_string()))?;

        debug!(
            "開始取樣: {} ({} 幀計畫，間隔 {:.2}s)",
            self.path.display(),
            plan.len(),
            interval.seconds()
        );

        Ok(FrameIter {
            child,
            stdout,
            width: self.info.width,
            height: self.info.height,
            frame_size: self.info.width as usize * self.info.height as usize * 3,
            planned_total: plan.len(),
            plan: plan.entries.into_iter(),
            next_decode_index: 0,
            finished: false,
        })
    }
}

/// 惰性幀迭代器，持有解碼子程序直到序列結束
pub struct FrameIter {
    child: Child,
    stdout: ChildStdout,
    width: u32,
    height: u32,
    frame_size: usize,
    planned_total: usize,
    plan: std::vec::IntoIter<(u64, f64)>,
    next_decode_index: u64,
    finished: bool,
}

impl FrameIter {
    /// 計畫產出的幀數（實際可能因解碼缺口而較少）
    #[must_use]
    pub const fn planned_total(&self) -> usize {
        self.planned_total
    }

    /// 明確關閉，提前釋放解碼子程序
    pub fn close(mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        if !self.finished {
            self.finished = true;
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

impl Iterator for FrameIter {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.finished {
            return None;
        }

        let Some((target_index, timestamp)) = self.plan.next() else {
            self.finish();
            return None;
        };

        // 循序讀取直到目標幀；中途的幀直接覆寫丟棄
        let mut buf = vec![0u8; self.frame_size];
        while self.next_decode_index <= target_index {
            if let Err(e) = self.stdout.read_exact(&mut buf) {
                // 串流提前結束：記錄缺口後終止，不以空白幀替代
                warn!(
                    "解碼串流在第 {} 幀結束（目標第 {} 幀）: {e}",
                    self.next_decode_index, target_index
                );
                self.finish();
                return None;
            }
            self.next_decode_index += 1;
        }

        let image = RgbImage::from_raw(self.width, self.height, buf)?;

        Some(Frame {
            frame_index: target_index,
            timestamp,
            image,
        })
    }
}

impl Drop for FrameIter {
    fn drop(&mut self) {
        self.finish();
    }
}
