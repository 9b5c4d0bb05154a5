use rust_decimal::prelude::*;

/// Decimal places used to display a price: sub-dollar assets always get 6
pub fn price_precision(price: f64, default_dp: u32) -> u32 {
    if price < 1.0 {
        6
    } else {
        default_dp
    }
}

/// Round half away from zero to exactly `dp` decimal places.
///
/// Non-finite input maps to zero.
pub fn to_fixed(value: f64, dp: u32) -> Decimal {
    let mut fixed = Decimal::from_f64(value)
        .unwrap_or(Decimal::ZERO)
        .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    fixed.rescale(dp);
    fixed
}

/// Compact form for large amounts: `1.30B`, `28.00M`, `5.90K`
pub fn format_compact(num: f64) -> String {
    if num >= 1_000_000_000.0 {
        format!("{:.2}B", num / 1_000_000_000.0)
    } else if num >= 1_000_000.0 {
        format!("{:.2}M", num / 1_000_000.0)
    } else if num >= 1_000.0 {
        format!("{:.2}K", num / 1_000.0)
    } else {
        num.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_by_magnitude() {
        assert_eq!(price_precision(0.55, 4), 6);
        assert_eq!(price_precision(1.0, 4), 4);
        assert_eq!(price_precision(69_420.0, 2), 2);
    }

    #[test]
    fn test_to_fixed_pads_and_rounds() {
        assert_eq!(to_fixed(57.49999999999999, 4).to_string(), "57.5000");
        assert_eq!(to_fixed(47.5, 2).to_string(), "47.50");
        assert_eq!(to_fixed(0.0089, 6).to_string(), "0.008900");
        assert_eq!(to_fixed(f64::NAN, 2), Decimal::ZERO);
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(1_300_000_000_000.0), "1300.00B");
        assert_eq!(format_compact(28_000_000.0), "28.00M");
        assert_eq!(format_compact(5_900.0), "5.90K");
        assert_eq!(format_compact(999.0), "999");
    }
}
