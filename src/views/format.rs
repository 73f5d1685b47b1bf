// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! pt-BR text formatting for dates, sizes and percentages.

use chrono::{DateTime, Datelike, Local, TimeZone, Timelike, Utc};

const MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Lowercase pt-BR month name (1-based month).
pub fn month_name(month: u32) -> &'static str {
    MONTHS[(month.clamp(1, 12) - 1) as usize]
}

/// `09 de novembro de 2025 às 10:00`, rendered in `tz`.
pub fn format_date_in<Tz: TimeZone>(date: &DateTime<Utc>, tz: &Tz) -> String {
    let local = date.with_timezone(tz);
    format!(
        "{:02} de {} de {} às {:02}:{:02}",
        local.day(),
        month_name(local.month()),
        local.year(),
        local.hour(),
        local.minute()
    )
}

/// Long date in the machine's local time zone.
pub fn format_date(date: &DateTime<Utc>) -> String {
    format_date_in(date, &Local)
}

/// Attachment size as `12.34 KB`.
pub fn format_size_kb(bytes: u64) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}

/// Rate with one decimal: `66.7%`.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Signed difference in percentage points: `+12.50 pontos percentuais`.
pub fn format_points(difference: f64) -> String {
    let sign = if difference >= 0.0 { "+" } else { "" };
    format!("{}{:.2} pontos percentuais", sign, difference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_format_date_in_manaus() {
        let date: DateTime<Utc> = "2025-11-09T14:05:00Z".parse().unwrap();
        let manaus = FixedOffset::west_opt(4 * 3600).unwrap();
        assert_eq!(
            format_date_in(&date, &manaus),
            "09 de novembro de 2025 às 10:05"
        );
        assert_eq!(format_date_in(&date, &Utc), "09 de novembro de 2025 às 14:05");
    }

    #[test]
    fn test_numbers() {
        assert_eq!(format_size_kb(2048), "2.00 KB");
        assert_eq!(format_size_kb(1500), "1.46 KB");
        assert_eq!(format_percent(66.666), "66.7%");
        assert_eq!(format_points(12.5), "+12.50 pontos percentuais");
        assert_eq!(format_points(0.0), "+0.00 pontos percentuais");
        assert_eq!(format_points(-3.25), "-3.25 pontos percentuais");
    }
}
