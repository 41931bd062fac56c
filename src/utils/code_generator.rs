use rand::Rng;

const ID_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// 生成面向用户的票号：固定前缀 + 随机 5 位数字
pub fn generate_ticket_number() -> String {
    let mut rng = rand::thread_rng();
    format!("VIP-{}", rng.gen_range(10000..=99999))
}

/// 生成存储内 9 位随机 id
pub fn generate_entry_id() -> String {
    random_chars(9)
}

/// id 冲突时追加的 4 位消歧后缀
pub fn generate_id_suffix() -> String {
    random_chars(4)
}

fn random_chars(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| ID_CHARS[rng.gen_range(0..ID_CHARS.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_ticket_number_format() {
        let number = generate_ticket_number();
        assert!(number.starts_with("VIP-"));
        let digits = &number[4..];
        assert_eq!(digits.len(), 5);
        assert!(digits.chars().all(|c| c.is_ascii_digit()));

        let n: u32 = digits.parse().unwrap();
        assert!((10000..=99999).contains(&n));
    }

    #[test]
    fn test_generate_entry_id_shape() {
        let id = generate_entry_id();
        assert_eq!(id.len(), 9);
        assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_generate_id_suffix_shape() {
        let suffix = generate_id_suffix();
        assert_eq!(suffix.len(), 4);
        assert!(suffix.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }
}
