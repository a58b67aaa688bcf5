//! Small shared helpers

use rand::Rng;

/// Fixed prefix for synthesized inventory numbers.
pub const INVENTORY_NUMBER_PREFIX: &str = "OEA-";

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate an inventory number: fixed prefix plus a zero-padded
/// 4-digit random decimal suffix (`OEA-0000` .. `OEA-9999`).
pub fn generate_inventory_number() -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..10_000);
    format!("{}{:04}", INVENTORY_NUMBER_PREFIX, suffix)
}

/// Whether an RFC 3339 `updated_at` stamp falls within the last
/// `minutes` minutes. Unparseable or missing stamps count as stale.
pub fn recently_updated(updated_at: Option<&str>, minutes: i64) -> bool {
    let Some(stamp) = updated_at else {
        return false;
    };
    let Ok(parsed) = chrono::DateTime::parse_from_rfc3339(stamp) else {
        return false;
    };
    let diff_ms = now_millis() - parsed.timestamp_millis();
    diff_ms <= minutes * 60 * 1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_number_format() {
        for _ in 0..100 {
            let number = generate_inventory_number();
            assert_eq!(number.len(), 8, "unexpected length: {}", number);
            let (prefix, digits) = number.split_at(INVENTORY_NUMBER_PREFIX.len());
            assert_eq!(prefix, INVENTORY_NUMBER_PREFIX);
            assert!(digits.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_recently_updated() {
        let fresh = chrono::Utc::now().to_rfc3339();
        assert!(recently_updated(Some(&fresh), 5));

        let stale = (chrono::Utc::now() - chrono::Duration::minutes(10)).to_rfc3339();
        assert!(!recently_updated(Some(&stale), 5));

        assert!(!recently_updated(None, 5));
        assert!(!recently_updated(Some("not a date"), 5));
    }
}
