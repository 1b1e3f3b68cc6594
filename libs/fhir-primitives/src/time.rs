//! Time-of-day codec
//!
//! The document model keeps `time` values as text; the wire model keeps
//! microseconds since midnight plus a [`TimePrecision`] code.

use chrono::{NaiveTime, Timelike};

use crate::error::{Error, Result};
use crate::precision::TimePrecision;

pub const MICROS_PER_SECOND: i64 = 1_000_000;
pub const MICROS_PER_DAY: i64 = 86_400 * MICROS_PER_SECOND;

/// Literal lengths that imply a precision: `HH:MM:SS`, `HH:MM:SS.ff` and `HH:MM:SS.fff`.
const SECOND_LITERAL_LEN: usize = 8;
const CENTISECOND_LITERAL_LEN: usize = 11;
const MILLISECOND_LITERAL_LEN: usize = 12;

/// A parsed clock reading, shared with the dateTime literal parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ClockTime {
    pub time: NaiveTime,
    pub has_seconds: bool,
    pub has_fraction: bool,
}

/// Strict `HH:MM[:SS[.f{1,9}]]` parser.
pub(crate) fn parse_clock(input: &str) -> std::result::Result<ClockTime, &'static str> {
    const SHAPE: &str = "expected HH:MM[:SS[.fraction]]";

    let bytes = input.as_bytes();
    if bytes.len() < 5 || bytes[2] != b':' {
        return Err(SHAPE);
    }
    let hour = two_digits(&bytes[0..2]).ok_or(SHAPE)?;
    let minute = two_digits(&bytes[3..5]).ok_or(SHAPE)?;

    let (second, has_seconds) = match bytes.len() {
        5 => (0, false),
        len if len >= 8 && bytes[5] == b':' => (two_digits(&bytes[6..8]).ok_or(SHAPE)?, true),
        _ => return Err(SHAPE),
    };

    let (nanos, has_fraction) = match bytes.get(8) {
        None => (0, false),
        Some(b'.') => {
            let digits = &bytes[9..];
            if digits.is_empty() || digits.len() > 9 || !digits.iter().all(u8::is_ascii_digit) {
                return Err("fraction must have 1 to 9 digits");
            }
            let mut nanos = 0u32;
            for i in 0..9 {
                let digit = digits.get(i).map_or(0, |d| u32::from(d - b'0'));
                nanos = nanos * 10 + digit;
            }
            (nanos, true)
        }
        Some(_) => return Err(SHAPE),
    };

    if hour > 23 {
        return Err("hour out of range");
    }
    if minute > 59 {
        return Err("minute out of range");
    }
    if second > 59 {
        return Err("second out of range");
    }

    let time = NaiveTime::from_hms_nano_opt(hour, minute, second, nanos).ok_or(SHAPE)?;
    Ok(ClockTime {
        time,
        has_seconds,
        has_fraction,
    })
}

fn two_digits(bytes: &[u8]) -> Option<u32> {
    match bytes {
        [a, b] if a.is_ascii_digit() && b.is_ascii_digit() => {
            Some(u32::from(a - b'0') * 10 + u32::from(b - b'0'))
        }
        _ => None,
    }
}

/// Parse a time literal into microseconds since midnight and a precision code.
///
/// The precision is inferred from the literal's length only: `HH:MM:SS` is
/// [`TimePrecision::Second`], `HH:MM:SS.ff` and `HH:MM:SS.fff` are
/// [`TimePrecision::Millisecond`], and every other length is
/// [`TimePrecision::Unspecified`]. Digits finer than a microsecond are truncated.
pub fn parse_time_literal(literal: &str) -> Result<(i64, TimePrecision)> {
    let clock = parse_clock(literal).map_err(|reason| Error::MalformedTimeLiteral {
        literal: literal.to_string(),
        reason,
    })?;

    let micros = i64::from(clock.time.num_seconds_from_midnight()) * MICROS_PER_SECOND
        + i64::from(clock.time.nanosecond() / 1_000);

    // Fragile for other ISO lengths (e.g. `HH:MM:SS.f` or six fraction digits).
    let precision = match literal.len() {
        SECOND_LITERAL_LEN => TimePrecision::Second,
        CENTISECOND_LITERAL_LEN | MILLISECOND_LITERAL_LEN => TimePrecision::Millisecond,
        _ => TimePrecision::Unspecified,
    };

    Ok((micros, precision))
}

/// Format microseconds since midnight as `HH:MM:SS[.fraction]`.
///
/// The fraction is omitted when zero and otherwise printed without trailing
/// zeros, so the original literal's precision is not reproduced.
pub fn format_time_of_day(micros: i64) -> Result<String> {
    if !(0..MICROS_PER_DAY).contains(&micros) {
        return Err(Error::TimeOfDayOutOfRange(micros));
    }

    let secs = (micros / MICROS_PER_SECOND) as u32;
    let frac = (micros % MICROS_PER_SECOND) as u32;
    let time = NaiveTime::from_num_seconds_from_midnight_opt(secs, frac * 1_000)
        .ok_or(Error::TimeOfDayOutOfRange(micros))?;

    let mut out = time.format("%H:%M:%S").to_string();
    if frac != 0 {
        let digits = format!("{:06}", frac);
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_literal_infers_second_precision() {
        let (micros, precision) = parse_time_literal("10:00:00").unwrap();
        assert_eq!(micros, 10 * 3_600 * MICROS_PER_SECOND);
        assert_eq!(precision, TimePrecision::Second);
    }

    #[test]
    fn millisecond_literal_infers_millisecond_precision() {
        let (micros, precision) = parse_time_literal("10:00:00.000").unwrap();
        assert_eq!(micros, 10 * 3_600 * MICROS_PER_SECOND);
        assert_eq!(precision, TimePrecision::Millisecond);
    }

    #[test]
    fn two_digit_fraction_infers_millisecond_precision() {
        assert_eq!(
            parse_time_literal("10:00:00.25").unwrap(),
            (36_000_250_000, TimePrecision::Millisecond)
        );
        assert_eq!(
            parse_time_literal("08:15:30.125").unwrap(),
            (29_730_125_000, TimePrecision::Millisecond)
        );
    }

    #[test]
    fn other_lengths_fall_back_to_unspecified() {
        assert_eq!(
            parse_time_literal("10:00").unwrap().1,
            TimePrecision::Unspecified
        );
        assert_eq!(
            parse_time_literal("10:00:00.5").unwrap(),
            (36_000_500_000, TimePrecision::Unspecified)
        );
        assert_eq!(
            parse_time_literal("23:59:59.999999").unwrap(),
            (MICROS_PER_DAY - 1, TimePrecision::Unspecified)
        );
    }

    #[test]
    fn sub_microsecond_digits_are_truncated() {
        let (micros, _) = parse_time_literal("00:00:00.123456789").unwrap();
        assert_eq!(micros, 123_456);
    }

    #[test]
    fn malformed_literals_are_rejected() {
        for literal in [
            "", "10", "1:00:00", "10:0:00", "10:00:0", "24:00:00", "10:60:00", "10:00:60",
            "10:00:00.", "10:00:00,5", "10:00:00Z", " 10:00:00", "10:00:00.1234567890", "aa:bb:cc",
        ] {
            match parse_time_literal(literal) {
                Err(Error::MalformedTimeLiteral { literal: l, .. }) => assert_eq!(l, literal),
                other => panic!("expected MalformedTimeLiteral for {literal:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn formats_fixed_width_fields() {
        assert_eq!(format_time_of_day(0).unwrap(), "00:00:00");
        assert_eq!(
            format_time_of_day(9 * 3_600 * MICROS_PER_SECOND + 5 * 60 * MICROS_PER_SECOND + 7 * MICROS_PER_SECOND).unwrap(),
            "09:05:07"
        );
    }

    #[test]
    fn formats_fraction_without_trailing_zeros() {
        assert_eq!(format_time_of_day(36_000_500_000).unwrap(), "10:00:00.5");
        assert_eq!(format_time_of_day(36_000_123_000).unwrap(), "10:00:00.123");
        assert_eq!(format_time_of_day(MICROS_PER_DAY - 1).unwrap(), "23:59:59.999999");
    }

    #[test]
    fn rejects_out_of_range_micros() {
        assert_eq!(
            format_time_of_day(MICROS_PER_DAY),
            Err(Error::TimeOfDayOutOfRange(MICROS_PER_DAY))
        );
        assert_eq!(format_time_of_day(-1), Err(Error::TimeOfDayOutOfRange(-1)));
    }
}
