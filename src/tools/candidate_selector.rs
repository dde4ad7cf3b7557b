use crate::error::StudioError;
use crate::tools::frame_sampler::Frame;

/// 候選幀上限：預覽最多提供五張
pub const MAX_CANDIDATES: usize = 5;

/// 依時間順序排列、數量受限的候選幀集合
pub struct CandidateSet {
    frames: Vec<Frame>,
}

impl CandidateSet {
    /// 從取樣序列收集候選幀
    ///
    /// 最多消耗 `max` 個項目，不強迫解碼其餘部分；
    /// 長影片的解碼成本因此有上界。序列在此處被丟棄時，
    /// 迭代器的 Drop 會釋放解碼子程序。
    #[must_use]
    pub fn collect(frames: impl Iterator<Item = Frame>, max: usize) -> Self {
        Self {
            frames: frames.take(max).collect(),
        }
    }

    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// 取得主視覺幀
    ///
    /// 未指定偏好時預設第一張（索引 0）；
    /// 偏好索引超出 `[0, len)` 回報 `IndexOutOfRange`，由呼叫端重新詢問。
    pub fn hero(&self, preferred: Option<usize>) -> Result<&Frame, StudioError> {
        let index = preferred.unwrap_or(0);

        self.frames
            .get(index)
            .ok_or(StudioError::IndexOutOfRange {
                index,
                len: self.frames.len(),
            })
    }
}
