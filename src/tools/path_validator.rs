use anyhow::{Result, bail};
use std::path::Path;

/// 驗證輸入檔存在且為一般檔案
pub fn validate_input_file(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("檔案不存在: {}", path.display());
    }
    if !path.is_file() {
        bail!("路徑不是檔案: {}", path.display());
    }
    Ok(())
}

/// 確保輸出資料夾存在，必要時建立
pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    if !path.is_dir() {
        bail!("路徑不是資料夾: {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("clip.mp4");

        assert!(validate_input_file(&file).is_err());

        std::fs::write(&file, b"x").unwrap();
        assert!(validate_input_file(&file).is_ok());

        // 資料夾不是合法輸入
        assert!(validate_input_file(dir.path()).is_err());
    }

    #[test]
    fn test_ensure_directory_creates_missing() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c");

        ensure_directory_exists(&nested).unwrap();
        assert!(nested.is_dir());

        // 再次呼叫為無操作
        ensure_directory_exists(&nested).unwrap();
    }
}
