use thiserror::Error;

const FORMS_HINT: &str = "use seconds (300), MM:SS (05:30) or HH:MM:SS (01:05:30)";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DurationError {
    /// The text is not one of the accepted forms, or a clock field is out of its range
    #[error("Invalid duration format: {0}")]
    InvalidFormat(String),
    /// A well-formed duration that cannot be used as a split point
    #[error("Duration out of range: {0}")]
    OutOfRange(String),
}

/// Parse a duration given as plain seconds, `MM:SS` or `HH:MM:SS`.
///
/// The result is always finite and positive. Whether it fits inside a particular file is
/// checked separately by [`check_within`], since the total length is usually only
/// known after probing.
pub fn parse_duration(text: &str) -> Result<f64, DurationError> {
    let text = text.trim();

    let seconds = if is_numeral(text, true) {
        parse_finite(text, text)?
    } else {
        parse_clock(text)?
    };

    if seconds <= 0.0 {
        return Err(DurationError::OutOfRange(format!(
            "duration must be positive, got {}",
            seconds
        )));
    }

    Ok(seconds)
}

/// Parse and validate a split point for a file that is `total_duration` seconds long.
pub fn parse_split_point(text: &str, total_duration: f64) -> Result<f64, DurationError> {
    let seconds = parse_duration(text)?;
    check_within(seconds, total_duration)
}

/// A split point at or past the end would leave the second part empty.
pub fn check_within(seconds: f64, total_duration: f64) -> Result<f64, DurationError> {
    if seconds >= total_duration {
        return Err(DurationError::OutOfRange(format!(
            "split point {} ({:.2}s) is not before the end of the media ({:.2}s)",
            format_timestamp(seconds),
            seconds,
            total_duration
        )));
    }
    Ok(seconds)
}

/// Format seconds as `HH:MM:SS`, keeping any fractional part on the seconds field.
pub fn format_timestamp(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let whole = seconds.trunc();
    let fraction = seconds - whole;
    let whole = whole as u64;

    let hours = whole / 3600;
    let minutes = (whole % 3600) / 60;
    let secs = (whole % 60) as f64 + fraction;

    let secs_text = if fraction == 0.0 {
        format!("{:02}", whole % 60)
    } else if secs < 10.0 {
        format!("0{}", secs)
    } else {
        format!("{}", secs)
    };

    format!("{:02}:{:02}:{}", hours, minutes, secs_text)
}

fn invalid_format(text: &str) -> DurationError {
    DurationError::InvalidFormat(format!("'{}', {}", text, FORMS_HINT))
}

// Digits with at most one decimal point, like "300", "300.5", ".5" or "5."
fn is_numeral(text: &str, signed: bool) -> bool {
    let unsigned = if signed {
        text.strip_prefix(&['-', '+'][..]).unwrap_or(text)
    } else {
        text
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

    match unsigned.split_once('.') {
        Some((whole, fraction)) => {
            !(whole.is_empty() && fraction.is_empty()) && all_digits(whole) && all_digits(fraction)
        }
        None => !unsigned.is_empty() && all_digits(unsigned),
    }
}

fn parse_clock(text: &str) -> Result<f64, DurationError> {
    let fields: Vec<&str> = text.split(':').collect();

    let (hours, minutes, seconds) = match fields.as_slice() {
        [minutes, seconds] => (0, parse_whole(minutes, text)?, parse_seconds(seconds, text)?),
        [hours, minutes, seconds] => {
            let minutes = parse_whole(minutes, text)?;
            if minutes >= 60 {
                return Err(DurationError::InvalidFormat(format!(
                    "'{}', minutes must be below 60, got {}",
                    text, minutes
                )));
            }
            (parse_whole(hours, text)?, minutes, parse_seconds(seconds, text)?)
        }
        _ => return Err(invalid_format(text)),
    };

    if seconds >= 60.0 {
        return Err(DurationError::InvalidFormat(format!(
            "'{}', seconds must be below 60, got {}",
            text, seconds
        )));
    }

    Ok(hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds)
}

fn parse_whole(field: &str, text: &str) -> Result<u64, DurationError> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid_format(text));
    }
    field.parse::<u64>().map_err(|_| {
        DurationError::InvalidFormat(format!("'{}', field {} is too large", text, field))
    })
}

fn parse_seconds(field: &str, text: &str) -> Result<f64, DurationError> {
    if !is_numeral(field, false) {
        return Err(invalid_format(text));
    }
    parse_finite(field, text)
}

// Overlong numerals parse to infinity
fn parse_finite(field: &str, text: &str) -> Result<f64, DurationError> {
    let value = field.parse::<f64>().map_err(|_| invalid_format(text))?;
    if !value.is_finite() {
        return Err(DurationError::InvalidFormat(format!(
            "'{}', value is too large",
            text
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_invalid_format(result: Result<f64, DurationError>) -> bool {
        matches!(result, Err(DurationError::InvalidFormat(_)))
    }

    fn is_out_of_range(result: Result<f64, DurationError>) -> bool {
        matches!(result, Err(DurationError::OutOfRange(_)))
    }

    #[test]
    fn test_plain_seconds() {
        assert_eq!(parse_duration("300"), Ok(300.0));
        assert_eq!(parse_duration("1"), Ok(1.0));
        assert_eq!(parse_duration("300.5"), Ok(300.5));
        assert_eq!(parse_duration("1.25"), Ok(1.25));
        assert_eq!(parse_duration(".5"), Ok(0.5));
        assert_eq!(parse_duration("+12"), Ok(12.0));
    }

    #[test]
    fn test_plain_seconds_are_exact() {
        for value in [0.001, 0.1, 1.0, 59.999, 300.5, 3600.0, 123456.789] {
            assert_eq!(parse_duration(&value.to_string()), Ok(value));
        }
    }

    #[test]
    fn test_minutes_seconds() {
        assert_eq!(parse_duration("05:30"), Ok(330.0));
        assert_eq!(parse_duration("01:00"), Ok(60.0));
        assert_eq!(parse_duration("00:30"), Ok(30.0));
        assert_eq!(parse_duration("10:15"), Ok(615.0));
        // Minutes are unbounded without an hours field
        assert_eq!(parse_duration("90:00"), Ok(5400.0));
        assert_eq!(parse_duration("00:59"), Ok(59.0));
    }

    #[test]
    fn test_hours_minutes_seconds() {
        assert_eq!(parse_duration("01:05:30"), Ok(3930.0));
        assert_eq!(parse_duration("00:01:00"), Ok(60.0));
        assert_eq!(parse_duration("02:00:00"), Ok(7200.0));
        assert_eq!(parse_duration("00:59:59"), Ok(3599.0));
        assert_eq!(parse_duration("01:05:30.5"), Ok(3930.5));
    }

    #[test]
    fn test_whitespace_is_ignored() {
        assert_eq!(parse_duration("  300  "), Ok(300.0));
        assert_eq!(parse_duration(" 05:30 "), Ok(330.0));
    }

    #[test]
    fn test_clock_fields_out_of_range() {
        assert!(is_invalid_format(parse_duration("00:60")));
        assert!(is_invalid_format(parse_duration("05:75")));
        assert!(is_invalid_format(parse_duration("00:61:00")));
        assert!(is_invalid_format(parse_duration("01:60:00")));
        assert!(is_invalid_format(parse_duration("01:00:60")));
    }

    #[test]
    fn test_malformed_input() {
        for text in [
            "", "   ", "abc", "abc:def", "1:2:3:4", ":30", "05:", "5:-3", "-05:30", "1e3",
            "inf", "NaN", "1.2.3", ".", "05:30s", "01:02.5:03",
        ] {
            assert!(is_invalid_format(parse_duration(text)), "{:?}", text);
        }
    }

    #[test]
    fn test_overlong_numerals_are_rejected() {
        let huge = format!("1{}", "0".repeat(400));
        let err = parse_duration(&huge).unwrap_err();
        assert!(matches!(err, DurationError::InvalidFormat(_)));
        assert!(err.to_string().contains("too large"));
        assert!(is_invalid_format(parse_split_point(&huge, 400.0)));

        assert!(is_invalid_format(parse_duration(&format!("00:{}", huge))));
    }

    #[test]
    fn test_overflowing_clock_field() {
        let err = parse_duration("99999999999999999999:00").unwrap_err();
        assert!(matches!(err, DurationError::InvalidFormat(_)));
        assert!(err.to_string().contains("field 99999999999999999999 is too large"));

        let err = parse_duration("99999999999999999999:00:00").unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_non_positive() {
        assert!(is_out_of_range(parse_duration("-10")));
        assert!(is_out_of_range(parse_duration("0")));
        assert!(is_out_of_range(parse_duration("0.0")));
        assert!(is_out_of_range(parse_duration("-0")));
        assert!(is_out_of_range(parse_duration("00:00")));
        assert!(is_out_of_range(parse_duration("00:00:00")));
    }

    #[test]
    fn test_split_point_against_total() {
        assert_eq!(parse_split_point("05:30", 400.0), Ok(330.0));
        assert_eq!(parse_split_point("300.5", 400.0), Ok(300.5));
        assert!(is_out_of_range(parse_split_point("01:30:00", 3000.0)));
        assert!(is_out_of_range(parse_split_point("400", 400.0)));
        assert!(is_out_of_range(parse_split_point("500", 400.0)));
        assert_eq!(parse_split_point("399.999", 400.0), Ok(399.999));
        assert!(check_within(400.0 - 0.001, 400.0).is_ok());
    }

    #[test]
    fn test_format_errors_come_before_range_errors() {
        assert!(is_invalid_format(parse_split_point("05:75", 10.0)));
        assert!(is_invalid_format(parse_split_point("abc", 10.0)));
        assert!(is_out_of_range(parse_split_point("-10", 10.0)));
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "00:00:00");
        assert_eq!(format_timestamp(330.0), "00:05:30");
        assert_eq!(format_timestamp(3930.0), "01:05:30");
        assert_eq!(format_timestamp(3930.5), "01:05:30.5");
        assert_eq!(format_timestamp(65.25), "00:01:05.25");
        assert_eq!(format_timestamp(360000.0), "100:00:00");
    }

    #[test]
    fn test_timestamp_round_trip() {
        for value in [0.5, 1.0, 59.25, 330.0, 3930.5, 7199.999, 86399.75, 123456.125] {
            let parsed = parse_duration(&format_timestamp(value)).unwrap();
            assert!((parsed - value).abs() < 1e-6, "{} -> {}", value, parsed);
        }
    }

    #[test]
    fn test_error_messages_name_the_rule() {
        let err = parse_duration("05:75").unwrap_err();
        assert!(err.to_string().contains("seconds must be below 60"));
        let err = parse_split_point("500", 400.0).unwrap_err();
        assert!(err.to_string().contains("not before the end"));
    }
}
