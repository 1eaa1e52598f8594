//! Resolves month names, e.g. "March", to calendar months.
//!
//! Month filtering ignores the year, so a month name always resolves to the
//! same [Month] no matter when the lookup happens.

use time::Month;

use crate::Error;

/// The full English month names in calendar order.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Resolve a full month name to a [Month].
///
/// Matching ignores case and surrounding whitespace.
///
/// # Errors
/// Returns [Error::InvalidMonth] if `name` is not one of [MONTH_NAMES].
pub fn parse_month(name: &str) -> Result<Month, Error> {
    let trimmed = name.trim();

    MONTH_NAMES
        .iter()
        .zip(MONTHS)
        .find(|(month_name, _)| month_name.eq_ignore_ascii_case(trimmed))
        .map(|(_, month)| month)
        .ok_or_else(|| Error::InvalidMonth(name.to_owned()))
}

/// The canonical, capitalised name of `month`.
pub fn month_name(month: Month) -> &'static str {
    MONTH_NAMES[usize::from(u8::from(month)) - 1]
}
