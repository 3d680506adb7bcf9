//! Number formatting for display cells

/// Maximum fraction digits kept in display strings
const MAX_FRACTION_DIGITS: usize = 3;

/// Format a number the way an en-US locale would show it.
///
/// Thousands are separated with `,`, at most three fraction digits are
/// kept and trailing zeros are dropped.
///
/// # Examples
///
/// ```
/// use actboard_core::format::format_number;
///
/// assert_eq!(format_number(1234567.0), "1,234,567");
/// assert_eq!(format_number(-1500.25), "-1,500.25");
/// assert_eq!(format_number(0.1234), "0.123");
/// ```
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let grouped = group_thousands(int_part);
    let is_zero = int_part.bytes().all(|b| b == b'0') && frac.is_empty();

    let mut out = String::with_capacity(grouped.len() + frac.len() + 2);
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
