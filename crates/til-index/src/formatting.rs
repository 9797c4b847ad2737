//! Formatting utilities for display

use std::time::Duration;

/// Note counts with `,` between groups of three digits
pub(crate) fn format_number(n: usize) -> String {
    let digits = n.to_string();
    let lead = match digits.len() % 3 {
        0 => 3,
        r => r,
    };

    let mut groups = vec![&digits[..lead]];
    groups.extend((lead..digits.len()).step_by(3).map(|i| &digits[i..i + 3]));
    groups.join(",")
}

/// Formats a duration in human-readable format
pub(crate) fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();

    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
