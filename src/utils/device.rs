use crate::models::DeviceType;
use regex::Regex;

/// 从 User-Agent 推断设备类型
pub fn detect_device_type(user_agent: &str) -> DeviceType {
    let mobile_regex = Regex::new(r"(?i)iPhone|iPad|iPod|Android").unwrap();

    if mobile_regex.is_match(user_agent) {
        DeviceType::Mobile
    } else {
        DeviceType::Desktop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_device_type() {
        assert_eq!(
            detect_device_type("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)"),
            DeviceType::Mobile
        );
        assert_eq!(
            detect_device_type("Mozilla/5.0 (Linux; android 14; SM-G991B)"),
            DeviceType::Mobile
        );
        assert_eq!(
            detect_device_type("Mozilla/5.0 (Windows NT 10.0; Win64; x64)"),
            DeviceType::Desktop
        );
        assert_eq!(detect_device_type(""), DeviceType::Desktop);
    }
}
