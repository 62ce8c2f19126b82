//! Date-range helpers for selecting a calendar month of transactions.

use std::ops::RangeInclusive;

use time::{Date, Month};

/// The inclusive date range covering the whole of `month` in `year`.
///
/// The end of the range is the actual last day of the month, so February ends
/// on the 28th or 29th and April on the 30th. Building the range from the
/// calendar instead of assuming 31 days keeps the upper bound a real date and
/// avoids silently spilling into the next month.
pub fn month_bounds(year: i32, month: Month) -> RangeInclusive<Date> {
    let start = Date::from_calendar_date(year, month, 1).expect("invalid month start date");
    let end = Date::from_calendar_date(year, month, last_day_of_month(year, month))
        .expect("invalid month end date");

    start..=end
}

/// The number of the last day of `month` in `year`.
pub fn last_day_of_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

#[cfg(test)]
mod tests {
    use time::{Month, macros::date};

    use super::{last_day_of_month, month_bounds};

    #[test]
    fn month_bounds_covers_whole_month() {
        let range = month_bounds(2024, Month::January);

        assert_eq!(*range.start(), date!(2024 - 01 - 01));
        assert_eq!(*range.end(), date!(2024 - 01 - 31));
    }

    #[test]
    fn month_bounds_ends_on_thirtieth_for_short_months() {
        let range = month_bounds(2024, Month::April);

        assert_eq!(*range.end(), date!(2024 - 04 - 30));
    }

    #[test]
    fn month_bounds_handles_leap_year_february() {
        let range = month_bounds(2024, Month::February);

        assert_eq!(*range.end(), date!(2024 - 02 - 29));
    }

    #[test]
    fn month_bounds_handles_non_leap_year_february() {
        let range = month_bounds(2023, Month::February);

        assert_eq!(*range.end(), date!(2023 - 02 - 28));
    }

    #[test]
    fn century_years_are_not_leap_years_unless_divisible_by_400() {
        assert_eq!(last_day_of_month(1900, Month::February), 28);
        assert_eq!(last_day_of_month(2000, Month::February), 29);
    }
}
