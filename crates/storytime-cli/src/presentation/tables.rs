//! Table formatting utilities for CLI output.

/// Truncates a string to at most `max_chars` characters, adding "..." if needed.
///
/// Counts characters rather than bytes, so accented names are never split.
///
/// # Examples
///
/// ```rust
/// use storytime_cli::presentation::truncate_string;
///
/// assert_eq!(truncate_string("Hello", 10), "Hello");
/// assert_eq!(truncate_string("Hello World", 8), "Hello...");
/// ```
pub fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Print a horizontal separator line.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// Playback speed as shown to the listener, e.g. `1.25x` or `1x`.
pub fn format_rate(rate: f32) -> String {
    format!("{rate}x")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate_string("Leo", 10), "Leo");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate_string("Sofía", 5), "Sofía");
        assert_eq!(truncate_string("Mágico Cuentista", 8), "Mágic...");
    }

    #[test]
    fn rates_print_without_trailing_zeros() {
        assert_eq!(format_rate(1.0), "1x");
        assert_eq!(format_rate(0.75), "0.75x");
        assert_eq!(format_rate(1.25), "1.25x");
    }
}
