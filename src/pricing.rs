//! Tax breakdown of an order total.
//!
//! Totals are stored tax-inclusive; the quote document derives the subtotal
//! and the tax portion from them at render time.

use bigdecimal::BigDecimal;

/// Fixed VAT rate applied to every quote, in percent.
pub const TAX_RATE_PERCENT: u32 = 21;

#[derive(Debug, Clone, PartialEq)]
pub struct TotalBreakdown {
    pub subtotal: BigDecimal,
    pub tax: BigDecimal,
}

/// Split a tax-inclusive total into subtotal and tax.
///
/// `tax = total * 0.21`, `subtotal = total - tax`, computed exactly; rounding
/// happens only when the amounts are formatted for display.
pub fn split_total(total: &BigDecimal) -> TotalBreakdown {
    let rate = BigDecimal::from(TAX_RATE_PERCENT) / BigDecimal::from(100u32);
    let tax = total * &rate;
    let subtotal = total - &tax;
    TotalBreakdown { subtotal, tax }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).expect("valid decimal")
    }

    #[test]
    fn splits_a_round_total_exactly() {
        let breakdown = split_total(&dec("2000"));
        assert_eq!(breakdown.tax, dec("420"));
        assert_eq!(breakdown.subtotal, dec("1580"));
    }

    #[test]
    fn subtotal_plus_tax_equals_total() {
        for total in ["0", "1", "999.99", "2000", "1050.50", "123456789.12"] {
            let total = dec(total);
            let breakdown = split_total(&total);
            assert_eq!(breakdown.subtotal + breakdown.tax, total);
        }
    }

    #[test]
    fn zero_total_splits_to_zero() {
        let breakdown = split_total(&dec("0"));
        assert_eq!(breakdown.subtotal, dec("0"));
        assert_eq!(breakdown.tax, dec("0"));
    }
}
