//! Display formatting for the form's date strings (`YYYY-MM` or `YYYY-MM-DD`).

use chrono::NaiveDate;

pub const PRESENT: &str = "Present";

/// Formats a date field as `"Jan 2020"`. Unparseable text is returned trimmed.
pub fn format_month_year(raw: &str) -> String {
    let s = raw.trim();
    if s.is_empty() {
        return String::new();
    }
    parse_date(s)
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|| s.to_string())
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d"))
        .ok()
}

/// `"{start} - {end}"`, with `Present` standing in for an empty end.
pub fn format_date_range(start: &str, end: &str) -> String {
    let start = format_month_year(start);
    let end = format_month_year(end);
    let end = if end.is_empty() { PRESENT.to_string() } else { end };
    if start.is_empty() {
        end
    } else {
        format!("{start} - {end}")
    }
}

/// Projects show `start` alone when there is no end date.
pub fn format_project_dates(start: &str, end: Option<&str>) -> String {
    let start = format_month_year(start);
    let end = end.map(format_month_year).unwrap_or_default();
    match (start.is_empty(), end.is_empty()) {
        (false, false) => format!("{start} - {end}"),
        (false, true) => start,
        (true, _) => end,
    }
}

/// Certifications show the issue date alone when they do not expire.
pub fn format_certification_dates(issued: &str, expires: Option<&str>) -> String {
    format_project_dates(issued, expires)
}
