//! Month and weekday names
//!
//! Names are looked up in fixed English tables and then passed through a
//! [`Translate`] implementation, so a host with message catalogs can swap
//! them for localized ones.

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Sunday first, matching `day_of_week` numbering
const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Abbreviated month name for `month` in 1..=12, empty otherwise.
pub fn month_abbrev(month: u8) -> &'static str {
    usize::from(month)
        .checked_sub(1)
        .and_then(|i| MONTHS.get(i))
        .copied()
        .unwrap_or("")
}

/// Abbreviated weekday name for `day_of_week` in 0..=6 (Sunday = 0), empty otherwise.
pub fn weekday_abbrev(day_of_week: u8) -> &'static str {
    WEEKDAYS.get(usize::from(day_of_week)).copied().unwrap_or("")
}

/// Message translation hook.
pub trait Translate {
    /// Translate a message id, returning it unchanged when there is no entry.
    fn translate(&self, msgid: &'static str) -> &'static str;

    /// Called when the system language changes.
    fn set_language(&mut self, _language: &str) {}
}

/// Identity translation
#[derive(Debug, Default, Clone, Copy)]
pub struct Untranslated;

impl Translate for Untranslated {
    fn translate(&self, msgid: &'static str) -> &'static str {
        msgid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_month_has_its_name() {
        let expected = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        for (month, name) in (1..=12).zip(expected) {
            assert_eq!(month_abbrev(month), name);
        }
    }

    #[test]
    fn sunday_is_day_zero() {
        assert_eq!(weekday_abbrev(0), "Sun");
        assert_eq!(weekday_abbrev(1), "Mon");
        assert_eq!(weekday_abbrev(6), "Sat");
    }

    #[test]
    fn out_of_range_lookups_are_empty() {
        assert_eq!(month_abbrev(0), "");
        assert_eq!(month_abbrev(13), "");
        assert_eq!(weekday_abbrev(7), "");
        assert_eq!(weekday_abbrev(u8::MAX), "");
    }
}
