//! 单据编号生成
//!
//! 收据、证书和准考证编号由存储层在写入前生成，序号取当年同类单据的最大编号 + 1。

/// 缴费收据编号，例如 `RCP-2025-000042`
pub fn receipt_number(prefix: &str, year: i32, seq: u64) -> String {
    format!("{prefix}-{year}-{seq:06}")
}

/// 证书编号，例如 `TC/2025/00007`
pub fn certificate_number(prefix: &str, year: i32, seq: u64) -> String {
    format!("{prefix}/{year}/{seq:05}")
}

/// 准考证编号，例如 `HT-0003-ADM-2025-001`
///
/// 学号原样保留，学号唯一即编号唯一。
pub fn hall_ticket_number(exam_id: i64, admission_number: &str) -> String {
    format!("HT-{exam_id:04}-{admission_number}")
}

/// 已有编号中以 `stem` 开头的最大序号 + 1，序号按数值比较
pub fn next_sequence<S: AsRef<str>>(numbers: &[S], stem: &str) -> u64 {
    numbers
        .iter()
        .filter_map(|n| n.as_ref().strip_prefix(stem))
        .filter_map(|seq| seq.parse::<u64>().ok())
        .max()
        .unwrap_or(0)
        + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_number() {
        assert_eq!(receipt_number("RCP", 2025, 42), "RCP-2025-000042");
    }

    #[test]
    fn test_certificate_number() {
        assert_eq!(certificate_number("TC", 2025, 7), "TC/2025/00007");
        assert_eq!(certificate_number("CON", 2024, 123456), "CON/2024/123456");
    }

    #[test]
    fn test_hall_ticket_number_keeps_admission() {
        assert_eq!(hall_ticket_number(3, "adm/2025-001"), "HT-0003-adm/2025-001");
        assert_eq!(hall_ticket_number(12345, "A1"), "HT-12345-A1");
        assert_ne!(hall_ticket_number(3, "ADM-100"), hall_ticket_number(3, "ADM100"));
        assert_ne!(hall_ticket_number(3, "adm1"), hall_ticket_number(3, "ADM1"));
    }

    #[test]
    fn test_next_sequence() {
        let none: [&str; 0] = [];
        assert_eq!(next_sequence(&none, "RCP-2025-"), 1);

        let numbers = ["SCH_RCP-2025-000001", "SCH_RCP-2025-000002", "SCHXRCP-2025-000009"];
        assert_eq!(next_sequence(&numbers, "SCH_RCP-2025-"), 3);

        // 超过六位后仍按数值取最大
        let numbers = ["RCP-2025-999999", "RCP-2025-1000000", "RCP-2024-2000000"];
        assert_eq!(next_sequence(&numbers, "RCP-2025-"), 1_000_001);

        let numbers = ["TC/2025/00007".to_string(), "TC/2025/bad".to_string()];
        assert_eq!(next_sequence(&numbers, "TC/2025/"), 8);
    }
}
