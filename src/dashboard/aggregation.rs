//! Pure arithmetic for the dashboard report.

/// The share of `total` made up by `part`, as a whole-number percentage.
///
/// A zero `total` yields 0 rather than a division-by-zero NaN, so an empty
/// month reports every share as 0.
pub(super) fn percentage(part: i64, total: i64) -> i64 {
    if total == 0 {
        return 0;
    }

    (part as f64 / total as f64 * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::percentage;

    #[test]
    fn splits_whole_into_shares() {
        assert_eq!(percentage(1000, 1500), 67);
        assert_eq!(percentage(200, 1500), 13);
        assert_eq!(percentage(300, 1500), 20);
    }

    #[test]
    fn zero_total_yields_zero() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(100, 0), 0);
    }

    #[test]
    fn full_share_is_one_hundred() {
        assert_eq!(percentage(250, 250), 100);
    }

    #[test]
    fn zero_part_is_zero() {
        assert_eq!(percentage(0, 1234), 0);
    }

    #[test]
    fn rounds_half_up() {
        // 1/8 = 12.5%
        assert_eq!(percentage(1, 8), 13);
    }
}
