//! Currency formatting, es-AR conventions: `.` groups thousands, `,` starts
//! the decimal part.
//!
//! The storefront, the admin panel and the quote PDF all display amounts
//! through this function so the three surfaces can never drift apart.

use bigdecimal::{BigDecimal, RoundingMode};

/// Format a monetary amount: `1580` → `"1.580"`, `1050.5` → `"1.050,5"`.
///
/// Amounts are rounded to two decimals; trailing zeros in the decimal part
/// are dropped, and integral amounts render with no decimal part at all.
pub fn format_currency(amount: &BigDecimal) -> String {
    let rounded = amount.with_scale_round(2, RoundingMode::HalfUp);
    let repr = rounded.to_string();

    let (sign, unsigned) = match repr.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", repr.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let grouped = group_thousands(int_part);
    let frac = frac_part.trim_end_matches('0');
    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped},{frac}")
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn fmt(s: &str) -> String {
        format_currency(&BigDecimal::from_str(s).expect("valid decimal"))
    }

    #[test]
    fn integral_amounts_have_no_decimal_part() {
        assert_eq!(fmt("0"), "0");
        assert_eq!(fmt("999"), "999");
        assert_eq!(fmt("1000"), "1.000");
        assert_eq!(fmt("1580.00"), "1.580");
    }

    #[test]
    fn thousands_are_grouped_with_dots() {
        assert_eq!(fmt("2500000"), "2.500.000");
        assert_eq!(fmt("123456789"), "123.456.789");
    }

    #[test]
    fn decimal_part_uses_comma_and_trims_zeros() {
        assert_eq!(fmt("1050.5"), "1.050,5");
        assert_eq!(fmt("1050.50"), "1.050,5");
        assert_eq!(fmt("12.34"), "12,34");
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(fmt("1.005"), "1,01");
        assert_eq!(fmt("419.999"), "420");
    }

    #[test]
    fn negative_amounts_keep_the_sign_in_front() {
        assert_eq!(fmt("-1234.5"), "-1.234,5");
    }
}
