use std::time::Duration;

/// `MM:SS.mmm`, rounded to the millisecond.
pub fn format_elapsed(elapsed: Duration) -> String {
    let millis = (elapsed.as_secs_f64() * 1000.0).round() as u64;
    let minutes = millis / 60_000;
    let seconds = (millis % 60_000) / 1000;
    let millis = millis % 1000;

    format!("{minutes:02}:{seconds:02}.{millis:03}")
}

/// Accuracy fraction as a percentage with two decimals.
pub fn format_percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed_zero() {
        assert_eq!(format_elapsed(Duration::ZERO), "00:00.000");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_millis(83_456)), "01:23.456");
    }

    #[test]
    fn test_format_elapsed_rounds_to_millis() {
        assert_eq!(format_elapsed(Duration::from_micros(1_999_600)), "00:02.000");
    }

    #[test]
    fn test_format_elapsed_past_an_hour() {
        assert_eq!(format_elapsed(Duration::from_secs(3_725)), "62:05.000");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(2.0 / 3.0), "66.67%");
        assert_eq!(format_percent(1.0), "100.00%");
    }
}
