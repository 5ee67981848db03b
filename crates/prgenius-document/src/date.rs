// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Long-form German dates ("18. Oktober 2026").

use chrono::{Datelike, NaiveDate};

const MONTHS_DE: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

/// Format as day, month name, year in German.
pub fn format_long_de(date: NaiveDate) -> String {
    let month = MONTHS_DE[date.month0() as usize];
    format!("{}. {} {}", date.day(), month, date.year())
}
