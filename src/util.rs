// Utility helpers for parsing, ranking and number formatting.
//
// This module centralizes all the "dirty" CSV/number handling so the rest
// of the code can assume clean, typed values.
use num_format::{Locale, ToFormattedString};
use std::collections::HashMap;

/// Parse a string-like value into `f64` while being forgiving about
/// formatting issues that are common in CSV exports (commas, spaces, text).
///
/// - Accepts `Option<&str>` so callers can pass through optional fields.
/// - Trims whitespace.
/// - Rejects values that contain alphabetic characters (`NaN`, `n/a`, ...),
///   except for an exponent marker.
/// - Strips thousands separators like `","` before parsing.
/// - Returns `None` for anything that cannot be safely parsed.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return None;
    }
    let s = s.replace(',', "");
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn parse_i32_safe(s: Option<&str>) -> Option<i32> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<i32>().ok()
}

/// Trimmed text, or `fallback` when the cell is absent or blank.
pub fn text_or(s: Option<String>, fallback: &str) -> String {
    match s {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => fallback.to_string(),
    }
}

/// ISO-8859-1 maps every byte to the code point of the same value.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Frequency of each distinct value, most frequent first. Ties keep the
/// order in which values were first seen so the ranking is deterministic.
pub fn value_counts<'a, I>(values: I) -> Vec<(String, u64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut order: Vec<(String, u64)> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    for v in values {
        match index.get(v) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(v, order.len());
                order.push((v.to_string(), 1));
            }
        }
    }
    // `sort_by` is stable, so equal counts stay in first-seen order.
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order
}

/// Sum of `value` per key, largest first, ties in first-seen order.
pub fn ranked_sums<'a, I>(pairs: I) -> Vec<(String, f64)>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut order: Vec<(String, f64)> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    for (key, value) in pairs {
        match index.get(key) {
            Some(&i) => order[i].1 += value,
            None => {
                index.insert(key, order.len());
                order.push((key.to_string(), value));
            }
        }
    }
    order.sort_by(|a, b| b.1.total_cmp(&a.1));
    order
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Format a floating-point value with:
    // - a fixed number of decimal places, and
    // - locale-aware thousands separators (e.g., `1,234,567.89`).
    let neg = n.is_sign_negative() && n != 0.0;
    let abs_n = n.abs();
    let s = format!("{:.*}", decimals, abs_n);
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        if decimals > 0 {
            res.push('.');
            res.push_str(frac);
        }
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

/// Gaps render as an empty cell rather than `0`.
pub fn format_optional(v: &Option<f64>) -> String {
    match v {
        Some(v) => format_number(*v, 2),
        None => String::new(),
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Thin wrapper around `num-format` for integer-like values. This is used
    // for counts in console messages (e.g., `181,691 rows loaded`).
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_forgiving_numbers() {
        assert_eq!(parse_f64_safe(Some(" 1,234.5 ")), Some(1234.5));
        assert_eq!(parse_f64_safe(Some("1.2e3")), Some(1200.0));
        assert_eq!(parse_f64_safe(Some("")), None);
        assert_eq!(parse_f64_safe(Some("n/a")), None);
        assert_eq!(parse_f64_safe(Some("NaN")), None);
        assert_eq!(parse_f64_safe(None), None);
        assert_eq!(parse_i32_safe(Some("2014")), Some(2014));
        assert_eq!(parse_i32_safe(Some("20x4")), None);
    }

    #[test]
    fn latin1_decodes_high_bytes() {
        assert_eq!(decode_latin1(b"C\xf4te d'Ivoire"), "C\u{f4}te d'Ivoire");
    }

    #[test]
    fn value_counts_break_ties_by_first_appearance() {
        let counts = value_counts(["b", "a", "a", "c", "b", "d"]);
        let names: Vec<_> = counts.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c", "d"]);
        assert_eq!(counts[0].1, 2);
        assert_eq!(counts[3].1, 1);
    }

    #[test]
    fn ranked_sums_order_descending() {
        let sums = ranked_sums([("x", 1.0), ("y", 5.0), ("x", 3.0), ("z", 4.0)]);
        assert_eq!(
            sums,
            vec![
                ("y".to_string(), 5.0),
                ("x".to_string(), 4.0),
                ("z".to_string(), 4.0)
            ]
        );
    }

    #[test]
    fn formats_numbers_with_separators() {
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(-42.0, 0), "-42");
        assert_eq!(format_optional(&None), "");
        assert_eq!(format_int(181691u64), "181,691");
    }
}
