//! Time formatting for sox position arguments.

/// Format `seconds` as a sox time specification `0:0:<seconds>`, keeping at
/// most two fractional digits and dropping trailing zeros.
///
/// ```
/// use soxshell_sox::format_time_period;
///
/// assert_eq!(format_time_period(1.5), "0:0:1.5");
/// assert_eq!(format_time_period(3.14159), "0:0:3.14");
/// assert_eq!(format_time_period(2.0), "0:0:2");
/// ```
pub fn format_time_period(seconds: f64) -> String {
    let rounded = format!("{seconds:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("0:0:{trimmed}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_seconds() {
        assert_eq!(format_time_period(0.0), "0:0:0");
        assert_eq!(format_time_period(10.0), "0:0:10");
        assert_eq!(format_time_period(120.0), "0:0:120");
    }

    #[test]
    fn fractional_seconds() {
        assert_eq!(format_time_period(0.25), "0:0:0.25");
        assert_eq!(format_time_period(7.1), "0:0:7.1");
        assert_eq!(format_time_period(12.339), "0:0:12.34");
    }

    #[test]
    fn rounds_up_into_whole_number() {
        assert_eq!(format_time_period(1.999), "0:0:2");
    }
}
