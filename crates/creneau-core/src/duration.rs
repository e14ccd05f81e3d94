//! Human-readable duration codec.
//!
//! Parses compact French-style duration text ("1h30", "45min") into
//! seconds and renders seconds back into the same shape. Pure
//! functions, no state.

use regex::Regex;
use std::sync::OnceLock;

fn hours_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // "1h30", "1h 30", "1h30m", "1h 30 min", "1h"
        Regex::new(r"(?P<h>\d+)\s*h(?:\s*(?P<m>\d{1,2})\s*(?:m(?:in)?)?)?")
            .unwrap_or_else(|e| panic!("invalid hours regex: {e}"))
    })
}

fn minutes_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // "30min", "30 min", "30m"
        Regex::new(r"\b(?P<m>\d{1,3})\s*m(?:in)?\b")
            .unwrap_or_else(|e| panic!("invalid minutes regex: {e}"))
    })
}

/// Parse duration text into seconds.
///
/// Recognizes `<N>h[<MM>[m|min]]` and `<N>m|min`, case-insensitive
/// and whitespace-tolerant. Anything else parses to 0.
pub fn parse(text: &str) -> i64 {
    let text = text.trim().to_lowercase();

    if let Some(caps) = hours_re().captures(&text) {
        let hours: i64 = caps["h"].parse().unwrap_or(0);
        let minutes: i64 = caps
            .name("m")
            .map(|m| m.as_str().parse().unwrap_or(0))
            .unwrap_or(0);
        return hours * 3600 + minutes * 60;
    }

    if let Some(caps) = minutes_re().captures(&text) {
        let minutes: i64 = caps["m"].parse().unwrap_or(0);
        return minutes * 60;
    }

    0
}

/// Render seconds as duration text.
///
/// Hours render as `Nh`, minutes as a two-digit suffix, and the
/// literal `min` suffix is appended when there are no hours:
/// 5400 → "1h30", 3600 → "1h", 1800 → "30min".
pub fn format(seconds: i64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if minutes > 0 {
        out.push_str(&format!("{minutes:02}"));
    }
    if hours == 0 {
        out.push_str("min");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_hour_forms() {
        assert_eq!(parse("1h30"), 5400);
        assert_eq!(parse("1h 30"), 5400);
        assert_eq!(parse("1h30m"), 5400);
        assert_eq!(parse("1h 30 min"), 5400);
        assert_eq!(parse("1h"), 3600);
        assert_eq!(parse("2H05"), 7500);
    }

    #[test]
    fn parse_minute_forms() {
        assert_eq!(parse("30min"), 1800);
        assert_eq!(parse("30 min"), 1800);
        assert_eq!(parse("30m"), 1800);
        assert_eq!(parse(" 45MIN "), 2700);
    }

    #[test]
    fn parse_unrecognized_is_zero() {
        assert_eq!(parse(""), 0);
        assert_eq!(parse("0"), 0);
        assert_eq!(parse("soon"), 0);
        assert_eq!(parse("90"), 0);
    }

    #[test]
    fn format_renders_expected_shapes() {
        assert_eq!(format(5400), "1h30");
        assert_eq!(format(3600), "1h");
        assert_eq!(format(1800), "30min");
        assert_eq!(format(7500), "2h05");
        assert_eq!(format(60), "01min");
    }

    proptest! {
        #[test]
        fn roundtrip_whole_minutes(minutes in 0i64..6000) {
            let seconds = minutes * 60;
            prop_assert_eq!(parse(&format(seconds)), seconds);
        }
    }
}
