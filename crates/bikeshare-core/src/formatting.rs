/// Format a number with thousands separators and a fixed number of decimals.
///
/// # Examples
///
/// ```
/// use bikeshare_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5, 1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.prec$}", value.abs(), prec = decimals);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    if value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Format a count with thousands separators.
///
/// ```
/// use bikeshare_core::formatting::format_count;
///
/// assert_eq!(format_count(238_889), "238,889");
/// ```
pub fn format_count(n: usize) -> String {
    group_thousands(&n.to_string())
}

/// Render a number of seconds as `"1d 2h 3m 4s"`, dropping zero leading units.
///
/// Fractional seconds are rounded to the nearest whole second.
///
/// ```
/// use bikeshare_core::formatting::format_duration;
///
/// assert_eq!(format_duration(45.0), "45s");
/// assert_eq!(format_duration(3_725.0), "1h 2m 5s");
/// assert_eq!(format_duration(90_061.0), "1d 1h 1m 1s");
/// ```
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let secs = total % 60;

    let mut parts = Vec::with_capacity(4);
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if days > 0 || hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if days > 0 || hours > 0 || minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    parts.push(format!("{}s", secs));
    parts.join(" ")
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of a digit string.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// ── Tests ──────────────────────────────────────────────────────────────────────
