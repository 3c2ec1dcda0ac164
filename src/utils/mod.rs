pub mod dates;
pub mod extractor;
pub mod jwt;
pub mod numbering;
pub mod parameter_error_handler;
pub mod password;
pub mod sql;
pub mod validate;

pub use dates::{parse_date, today};
pub use extractor::{SafeIDI64, SafeSubIDI64};
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
pub use sql::escape_like_pattern;

/// 金额/百分比保留两位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 两个金额四舍五入到分后相等（差值小于半分）
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 0.005 + f64::EPSILON
}

/// 分项合计与目标值相差不超过 0.01
pub fn within_cent(sum: f64, target: f64) -> bool {
    (round2(sum) - round2(target)).abs() <= 0.01 + 1e-9
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(10.005_1), 10.01);
        assert_eq!(round2(33.333), 33.33);
        assert_eq!(round2(-0.0), 0.0);
    }

    #[test]
    fn test_approx_eq() {
        assert!(approx_eq(0.1 + 0.2, 0.3));
        assert!(approx_eq(100.0, 100.004));
        assert!(!approx_eq(100.0, 100.01));
    }

    #[test]
    fn test_within_cent() {
        assert!(within_cent(99.99, 100.0));
        assert!(within_cent(100.01, 100.0));
        assert!(within_cent(33.33 + 33.33 + 33.33, 100.0));
        assert!(!within_cent(99.98, 100.0));
        assert!(!within_cent(5000.02, 5000.0));
    }
}
