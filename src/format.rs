use rust_decimal::{Decimal, RoundingStrategy};

fn format_with_commas(digits: &str) -> String {
    let s = digits.chars().rev().collect::<Vec<char>>();
    let mut out = Vec::new();
    for (i, ch) in s.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    out.into_iter().rev().collect()
}

/// `-₹ 1,234.50` style, always two decimals.
pub fn format_currency(amount: Decimal, symbol: &str) -> String {
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    let mut rounded = amount
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    let text = rounded.to_string();
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{}{} {}.{}", sign, symbol, format_with_commas(whole), cents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(raw: &str) -> Decimal {
        Decimal::from_str(raw).unwrap()
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(format_currency(dec("1234567"), "₹"), "₹ 1,234,567.00");
        assert_eq!(format_currency(dec("999"), "₹"), "₹ 999.00");
    }

    #[test]
    fn keeps_two_decimals() {
        assert_eq!(format_currency(dec("12.5"), "₹"), "₹ 12.50");
        assert_eq!(format_currency(dec("0.005"), "$"), "$ 0.01");
    }

    #[test]
    fn negative_balance_has_leading_minus() {
        assert_eq!(format_currency(dec("-2500.75"), "₹"), "-₹ 2,500.75");
        assert_eq!(format_currency(Decimal::ZERO, "₹"), "₹ 0.00");
    }
}
