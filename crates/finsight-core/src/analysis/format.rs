//! Currency and percentage rendering
//!
//! Amounts stay in minor units through every computation. These helpers
//! are the only place they become major units, and only for display.

/// Minor units per major unit (paise per rupee)
pub const MINOR_PER_MAJOR: i64 = 100;

/// Currency symbol used in rendered text
pub const CURRENCY_SYMBOL: &str = "₹";

/// Round minor units to the nearest whole major unit, halves toward +∞
pub fn round_minor_to_major(amount_minor: i64) -> i64 {
    amount_minor
        .saturating_add(MINOR_PER_MAJOR / 2)
        .div_euclid(MINOR_PER_MAJOR)
}

/// Render a minor-unit amount as whole rupees with Indian digit grouping
///
/// `1234567_00` becomes `₹12,34,567`; negatives carry a leading minus
/// (`-₹5,000`).
pub fn minor_to_display_currency(amount_minor: i64) -> String {
    let major = round_minor_to_major(amount_minor);
    let digits = group_indian(major.unsigned_abs());
    if major < 0 {
        format!("-{}{}", CURRENCY_SYMBOL, digits)
    } else {
        format!("{}{}", CURRENCY_SYMBOL, digits)
    }
}

/// Group digits the Indian way: last three, then pairs (12,34,567)
pub fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// A ratio as a whole percentage, halves toward +∞ (0.125 -> 13)
pub fn percent(ratio: f64) -> i64 {
    (ratio * 100.0 + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_minor_to_major() {
        assert_eq!(round_minor_to_major(0), 0);
        assert_eq!(round_minor_to_major(49), 0);
        assert_eq!(round_minor_to_major(50), 1);
        assert_eq!(round_minor_to_major(149), 1);
        assert_eq!(round_minor_to_major(150), 2);
        assert_eq!(round_minor_to_major(-150), -1);
        assert_eq!(round_minor_to_major(-151), -2);
        assert_eq!(round_minor_to_major(-5_000), -50);
    }

    #[test]
    fn test_group_indian() {
        assert_eq!(group_indian(0), "0");
        assert_eq!(group_indian(999), "999");
        assert_eq!(group_indian(1_000), "1,000");
        assert_eq!(group_indian(70_000), "70,000");
        assert_eq!(group_indian(123_456), "1,23,456");
        assert_eq!(group_indian(1_234_567), "12,34,567");
        assert_eq!(group_indian(123_456_789), "12,34,56,789");
    }

    #[test]
    fn test_minor_to_display_currency() {
        assert_eq!(minor_to_display_currency(0), "₹0");
        assert_eq!(minor_to_display_currency(700_000), "₹7,000");
        assert_eq!(minor_to_display_currency(123_456_789), "₹12,34,568");
        assert_eq!(minor_to_display_currency(-500_000), "-₹5,000");
        assert_eq!(minor_to_display_currency(-5_000), "-₹50");
        assert_eq!(minor_to_display_currency(40), "₹0");
    }

    #[test]
    fn test_minor_to_display_currency_extremes() {
        // Must not panic at the edges of the type
        assert!(minor_to_display_currency(i64::MAX).starts_with('₹'));
        assert!(minor_to_display_currency(i64::MIN).starts_with("-₹"));
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(0.0), 0);
        assert_eq!(percent(0.5), 50);
        assert_eq!(percent(0.125), 13);
        assert_eq!(percent(0.333), 33);
        assert_eq!(percent(1.0), 100);
    }
}
