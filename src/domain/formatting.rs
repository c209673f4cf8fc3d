/// Em dash constant for use as a placeholder when a value is absent.
pub const EM_DASH: &str = "\u{2014}";

/// Group digits in threes: `1234567` becomes `"1,234,567"`.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a yen amount for display, e.g. `"¥3,500"`.
pub fn format_yen(amount: u64) -> String {
    format!("¥{}", format_thousands(amount))
}

/// Format a fractional average price, rounded to the nearest yen.
pub fn format_yen_avg(amount: f64) -> String {
    if !amount.is_finite() || amount < 0.0 {
        return EM_DASH.to_string();
    }
    format_yen(amount.round() as u64)
}

/// Format a ratio in `0.0..=1.0` as a whole percentage; absent ratios render as an em dash.
pub fn format_percent(ratio: Option<f64>) -> String {
    match ratio {
        Some(r) if r.is_finite() => format!("{}%", (r * 100.0).round() as i64),
        _ => EM_DASH.to_string(),
    }
}

/// Format an average rating to one decimal place; absent ratings render as an em dash.
pub fn format_rating(rating: Option<f64>) -> String {
    match rating {
        Some(r) if r.is_finite() => format!("{r:.1}"),
        _ => EM_DASH.to_string(),
    }
}

/// Display label for a category; the empty label is shown as an em dash.
pub fn category_label(name: &str) -> &str {
    if name.is_empty() { EM_DASH } else { name }
}
