pub const MINUTE: f64 = 60.0;
pub const HOUR: f64 = MINUTE * 60.0;

/// Quick-adjust offsets in seconds, in panel order (keys 1-8)
pub const QUICK_ADJUSTMENTS: [f64; 8] = [
    -MINUTE,
    -MINUTE * 5.0,
    -MINUTE * 30.0,
    -HOUR,
    MINUTE,
    MINUTE * 5.0,
    MINUTE * 30.0,
    HOUR,
];

/// Render elapsed seconds as `HH:MM:SS`, or `MM:SS` under an hour unless
/// `always_show_hours` is set. Fractions are floored; hours are not capped.
pub fn format_time(elapsed: f64, always_show_hours: bool) -> String {
    let total = if elapsed.is_finite() && elapsed > 0.0 {
        elapsed.floor() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = (total / 60) % 60;
    let seconds = total % 60;

    if hours == 0 && !always_show_hours {
        format!("{:02}:{:02}", minutes, seconds)
    } else {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

/// Button label for a quick adjustment, e.g. `+5` or `-30` (whole minutes)
pub fn adjustment_label(delta: f64) -> String {
    let minutes = (delta / MINUTE).trunc() as i64;
    if delta >= 0.0 {
        format!("+{}", minutes)
    } else {
        format!("{}", minutes)
    }
}
