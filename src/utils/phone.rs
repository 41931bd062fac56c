use crate::error::{AppError, AppResult};
use regex::Regex;

/// 验证巴基斯坦手机号格式（11 位数字，03 开头）
pub fn validate_pk_mobile(mobile: &str) -> AppResult<()> {
    let mobile_regex = Regex::new(r"^03[0-9]{9}$").unwrap();

    if !mobile_regex.is_match(mobile) {
        return Err(AppError::ValidationError(
            "Invalid Mobile: Use Pakistan format (03XXXXXXXXX).".to_string(),
        ));
    }

    Ok(())
}
