//! 费用派生字段计算
//!
//! 每次写入费用记录前重新计算余额和缴费状态，读取列表时也会按当天日期刷新状态。

use chrono::NaiveDate;
use std::collections::HashSet;

use super::entities::{FeeComponent, PaymentStatus};
use crate::utils::{approx_eq, round2, within_cent};

/// 费用原始金额
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeeFigures {
    pub amount: f64,
    pub discount: f64,
    pub fine: f64,
    pub paid: f64,
}

impl FeeFigures {
    pub fn new(amount: f64, paid: f64) -> Self {
        Self {
            amount,
            discount: 0.0,
            fine: 0.0,
            paid,
        }
    }

    /// 应缴净额 = 金额 - 减免 + 罚金
    pub fn net(&self) -> f64 {
        round2(self.amount - self.discount + self.fine)
    }
}

/// 计算余额与缴费状态
///
/// 状态优先级：已结清 > 逾期 > 部分缴纳 > 待缴。
pub fn derive_fee(
    figures: FeeFigures,
    due_date: NaiveDate,
    today: NaiveDate,
) -> Result<(f64, PaymentStatus), String> {
    if !figures.amount.is_finite() || figures.amount <= 0.0 {
        return Err("amount must be greater than 0".to_string());
    }
    if figures.discount < 0.0 || figures.fine < 0.0 || figures.paid < 0.0 {
        return Err("discount, fine and paid amount cannot be negative".to_string());
    }
    if figures.discount > figures.amount {
        return Err("discount cannot exceed amount".to_string());
    }

    let net = figures.net();
    if figures.paid > net && !approx_eq(figures.paid, net) {
        return Err(format!(
            "paid amount {:.2} exceeds payable amount {:.2}",
            figures.paid, net
        ));
    }

    let balance = round2(net - figures.paid).max(0.0);
    let status = if approx_eq(balance, 0.0) {
        PaymentStatus::Paid
    } else if due_date < today {
        PaymentStatus::Overdue
    } else if figures.paid > 0.0 {
        PaymentStatus::Partial
    } else {
        PaymentStatus::Pending
    };

    Ok((balance, status))
}

/// 校验收费标准构成：至少一项、金额为正、名称不重复、合计等于总额
pub fn validate_components(total: f64, components: &[FeeComponent]) -> Result<(), String> {
    if !total.is_finite() || total <= 0.0 {
        return Err("total_amount must be greater than 0".to_string());
    }
    if components.is_empty() {
        return Err("fee structure needs at least one component".to_string());
    }

    let mut names = HashSet::new();
    for component in components {
        let name = component.name.trim();
        if name.is_empty() {
            return Err("component name must not be empty".to_string());
        }
        if component.amount <= 0.0 {
            return Err(format!("component '{name}' amount must be greater than 0"));
        }
        if !names.insert(name.to_lowercase()) {
            return Err(format!("duplicate component '{name}'"));
        }
    }

    let sum: f64 = components.iter().map(|c| c.amount).sum();
    if !within_cent(sum, total) {
        return Err(format!(
            "component amounts must sum to total ({:.2} != {:.2})",
            sum, total
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const TODAY: (i32, u32, u32) = (2025, 6, 15);

    fn today() -> NaiveDate {
        date(TODAY.0, TODAY.1, TODAY.2)
    }

    #[test]
    fn test_balance_is_amount_minus_paid() {
        let (balance, status) =
            derive_fee(FeeFigures::new(5000.0, 1250.5), date(2025, 7, 1), today()).unwrap();
        assert_eq!(balance, 3749.5);
        assert_eq!(status, PaymentStatus::Partial);
    }

    #[test]
    fn test_unpaid_before_due_is_pending() {
        let (balance, status) =
            derive_fee(FeeFigures::new(1200.0, 0.0), date(2025, 6, 15), today()).unwrap();
        assert_eq!(balance, 1200.0);
        assert_eq!(status, PaymentStatus::Pending);
    }

    #[test]
    fn test_past_due_is_overdue_even_when_partial() {
        let (_, status) =
            derive_fee(FeeFigures::new(1200.0, 200.0), date(2025, 6, 14), today()).unwrap();
        assert_eq!(status, PaymentStatus::Overdue);
    }

    #[test]
    fn test_fully_paid_after_due_is_paid() {
        let (balance, status) =
            derive_fee(FeeFigures::new(1200.0, 1200.0), date(2025, 1, 1), today()).unwrap();
        assert_eq!(balance, 0.0);
        assert_eq!(status, PaymentStatus::Paid);
    }

    #[test]
    fn test_discount_and_fine_adjust_net() {
        let figures = FeeFigures {
            amount: 1000.0,
            discount: 100.0,
            fine: 25.0,
            paid: 500.0,
        };
        assert_eq!(figures.net(), 925.0);
        let (balance, _) = derive_fee(figures, date(2025, 7, 1), today()).unwrap();
        assert_eq!(balance, 425.0);
    }

    #[test]
    fn test_rejects_invalid_amounts() {
        let due = date(2025, 7, 1);
        assert!(derive_fee(FeeFigures::new(0.0, 0.0), due, today()).is_err());
        assert!(derive_fee(FeeFigures::new(100.0, -1.0), due, today()).is_err());
        assert!(derive_fee(FeeFigures::new(100.0, 100.5), due, today()).is_err());
        let over_discount = FeeFigures {
            amount: 100.0,
            discount: 150.0,
            fine: 0.0,
            paid: 0.0,
        };
        assert!(derive_fee(over_discount, due, today()).is_err());
    }

    fn component(name: &str, amount: f64) -> FeeComponent {
        FeeComponent {
            name: name.to_string(),
            amount,
        }
    }

    #[test]
    fn test_components_must_sum_to_total() {
        let components = vec![component("Tuition", 4000.0), component("Lab", 1000.0)];
        assert!(validate_components(5000.0, &components).is_ok());
        assert!(validate_components(5000.01, &components).is_ok());
        assert!(validate_components(5000.02, &components).is_err());
        let err = validate_components(5500.0, &components).unwrap_err();
        assert!(err.contains("must sum to total"));
    }

    #[test]
    fn test_components_tolerate_float_noise() {
        let components = vec![
            component("Tuition", 0.1),
            component("Library", 0.2),
        ];
        assert!(validate_components(0.3, &components).is_ok());
    }

    #[test]
    fn test_components_reject_empty_duplicate_and_non_positive() {
        assert!(validate_components(100.0, &[]).is_err());
        assert!(
            validate_components(100.0, &[component("A", 50.0), component("a", 50.0)]).is_err()
        );
        assert!(validate_components(100.0, &[component("A", 100.0), component("B", 0.0)]).is_err());
        assert!(validate_components(100.0, &[component(" ", 100.0)]).is_err());
    }
}
