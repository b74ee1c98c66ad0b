// Utility functions
use chrono::{Local, NaiveDate};

/// Today's date in the local timezone, as used by the menu pages.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_day(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// Menu page for one cafeteria and day.
pub fn menu_url(base_url: &str, day: NaiveDate) -> String {
    format!("{}{}.html", base_url, format_day(day))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_url_appends_date() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 7).unwrap();
        assert_eq!(
            menu_url("https://example.org/hauptmensa/tag/", day),
            "https://example.org/hauptmensa/tag/2024-05-07.html"
        );
    }
}
