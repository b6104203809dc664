//! Window resolution

use chrono::{DateTime, Duration, Utc};

use crate::clock::Clock;
use crate::models::AnalysisWindow;

/// Length of the default window when no start is given
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Resolve optional bounds into a concrete window
///
/// A missing end is "now" according to `clock`; a missing start is
/// [`DEFAULT_WINDOW_DAYS`] before the end. `start > end` is accepted as-is and
/// simply selects nothing downstream.
pub fn resolve_window(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    clock: &dyn Clock,
) -> AnalysisWindow {
    let end = end.unwrap_or_else(|| clock.now());
    let start = start.unwrap_or_else(|| {
        end.checked_sub_signed(Duration::days(DEFAULT_WINDOW_DAYS))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    });
    AnalysisWindow { start, end }
}

impl AnalysisWindow {
    /// Inclusive on both ends
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Whole days spanned, rounded up; negative for an inverted window
    pub fn days_spanned(&self) -> i64 {
        let millis = (self.end - self.start).num_milliseconds();
        let days = millis.div_euclid(MILLIS_PER_DAY);
        if millis.rem_euclid(MILLIS_PER_DAY) == 0 {
            days
        } else {
            days + 1
        }
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 31, 18, 30, 0).unwrap()
    }

    #[test]
    fn test_defaults_from_clock() {
        let window = resolve_window(None, None, &FixedClock::new(now()));
        assert_eq!(window.end, now());
        assert_eq!(window.start, now() - Duration::days(30));
        assert_eq!(window.days_spanned(), 30);
    }

    #[test]
    fn test_explicit_end_ignores_clock() {
        let end = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();
        let window = resolve_window(None, Some(end), &FixedClock::new(now()));
        assert_eq!(window.end, end);
        assert_eq!(window.start, end - Duration::days(30));
    }

    #[test]
    fn test_explicit_bounds() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        let window = resolve_window(Some(start), Some(end), &FixedClock::new(now()));
        assert_eq!(window, AnalysisWindow { start, end });
        // 9.5 days rounds up
        assert_eq!(window.days_spanned(), 10);
    }

    #[test]
    fn test_inverted_window_is_kept() {
        let start = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let window = resolve_window(Some(start), Some(end), &FixedClock::new(now()));
        assert!(window.is_inverted());
        assert_eq!(window.days_spanned(), -31);
        assert!(!window.contains(start));
        assert!(!window.contains(end));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();
        let window = AnalysisWindow { start, end };
        let ms = Duration::milliseconds(1);

        assert!(window.contains(start));
        assert!(window.contains(end));
        assert!(!window.contains(start - ms));
        assert!(!window.contains(end + ms));
    }

    #[test]
    fn test_zero_length_window() {
        let window = AnalysisWindow {
            start: now(),
            end: now(),
        };
        assert_eq!(window.days_spanned(), 0);
        assert!(window.contains(now()));
    }
}
