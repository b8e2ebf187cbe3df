//! Month-end evaluation calendars.

use chrono::Datelike;
use rotor_traits::{Date, Universe};

/// The last calendar day of `date`'s month.
#[must_use]
pub fn month_end(date: Date) -> Date {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    Date::from_ymd_opt(year, month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(date)
}

/// Every calendar month end in `[start, end]`, ascending.
#[must_use]
pub fn month_ends(start: Date, end: Date) -> Vec<Date> {
    let mut dates = Vec::new();
    let mut current = month_end(start);
    while current <= end {
        dates.push(current);
        match current.succ_opt() {
            Some(next) => current = month_end(next),
            None => break,
        }
    }
    dates
}

/// Month ends from `start` through the latest observation in `universe`.
///
/// A month whose end falls after every series' last observation is
/// incomplete and is left out.
#[must_use]
pub fn evaluation_dates(universe: &Universe, start: Date) -> Vec<Date> {
    universe
        .latest_date()
        .map(|latest| month_ends(start, latest))
        .unwrap_or_default()
}
