//! Range filtering

use crate::models::{AnalysisWindow, Transaction};

/// Transactions dated inside the window, bounds included
///
/// Input order is preserved, though nothing downstream depends on it.
pub fn filter_in_window<'a>(
    transactions: &'a [Transaction],
    window: &AnalysisWindow,
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|tx| window.contains(tx.date))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
    }

    fn window() -> AnalysisWindow {
        AnalysisWindow {
            start: day(5),
            end: day(20),
        }
    }

    #[test]
    fn test_filter_bounds() {
        let ms = Duration::milliseconds(1);
        let txns = vec![
            Transaction::inflow(day(5), 1),
            Transaction::inflow(day(5) - ms, 2),
            Transaction::outflow(day(12), 3),
            Transaction::outflow(day(20), 4),
            Transaction::outflow(day(20) + ms, 5),
        ];

        let kept: Vec<u64> = filter_in_window(&txns, &window())
            .into_iter()
            .map(|t| t.amount_minor)
            .collect();
        assert_eq!(kept, vec![1, 3, 4]);
    }

    #[test]
    fn test_filter_empty_input() {
        assert!(filter_in_window(&[], &window()).is_empty());
    }

    #[test]
    fn test_filter_nothing_in_range() {
        let txns = vec![Transaction::inflow(day(1), 1), Transaction::inflow(day(25), 1)];
        assert!(filter_in_window(&txns, &window()).is_empty());
    }

    #[test]
    fn test_filter_inverted_window() {
        let inverted = AnalysisWindow {
            start: day(20),
            end: day(5),
        };
        let txns = vec![Transaction::inflow(day(10), 1), Transaction::inflow(day(20), 1)];
        assert!(filter_in_window(&txns, &inverted).is_empty());
    }
}
