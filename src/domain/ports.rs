use crate::utils::error::Result;

/// 匯出檔案的落地位置
pub trait Storage {
    fn write_file(&self, path: &str, data: &[u8]) -> Result<String>;
}
