//! Rounding and currency formatting.
//!
//! Aggregators keep raw `f64` sums and call [`round2`] exactly once, when the
//! result struct is built.

/// Round to 2 decimals, half away from zero.
///
/// `f64::round` rounds ties away from zero, so `0.125` becomes `0.13` where a
/// banker's rounding would give `0.12`. Values that are not exactly
/// representable round by their binary value.
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    // Avoid "-0.00" in output.
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// `100 * part / whole`, rounded. Zero unless `whole` is positive.
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        round2(part / whole * 100.0)
    } else {
        0.0
    }
}

/// `total / count`, rounded. Zero for an empty group.
pub fn average(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        round2(total / count as f64)
    }
}

/// Two decimals with thousands separators: `1234567.891` → `1,234,567.89`.
pub fn format_money(value: f64) -> String {
    let fixed = format!("{:.2}", round2(value).abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if round2(value) < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

/// [`format_money`] prefixed with a currency symbol.
pub fn format_currency(symbol: &str, value: f64) -> String {
    format!("{symbol}{}", format_money(value))
}
