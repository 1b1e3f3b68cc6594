//! Precision enumerations and their wire codes
//!
//! Document values carry a [`Precision`]; the wire model stores an integer code.
//! Date and dateTime use the general codes `0..=5`. The wire enumeration for
//! instant starts at seconds, so its codes are the general codes shifted down by
//! [`INSTANT_CODE_SHIFT`].

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::kind::TemporalKind;

/// Shift between general precision codes and the instant wire enumeration.
pub const INSTANT_CODE_SHIFT: i32 = 3;

/// Granularity of a temporal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum Precision {
    Unspecified = 0,
    Year = 1,
    Month = 2,
    Day = 3,
    Second = 4,
    Millisecond = 5,
}

impl Precision {
    /// General code, independent of the temporal kind.
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Precision> {
        match code {
            0 => Some(Precision::Unspecified),
            1 => Some(Precision::Year),
            2 => Some(Precision::Month),
            3 => Some(Precision::Day),
            4 => Some(Precision::Second),
            5 => Some(Precision::Millisecond),
            _ => None,
        }
    }

    pub fn is_valid_for(self, kind: TemporalKind) -> bool {
        match kind {
            TemporalKind::Date => self <= Precision::Day,
            TemporalKind::DateTime => true,
            TemporalKind::Instant => matches!(self, Precision::Second | Precision::Millisecond),
        }
    }

    /// Wire code for this precision on a value of `kind`.
    pub fn to_wire_code(self, kind: TemporalKind) -> Result<i32> {
        if !self.is_valid_for(kind) {
            return Err(Error::UnsupportedPrecision {
                kind,
                precision: self,
            });
        }
        Ok(match kind {
            TemporalKind::Instant => self.code() - INSTANT_CODE_SHIFT,
            TemporalKind::Date | TemporalKind::DateTime => self.code(),
        })
    }

    /// Inverse of [`Precision::to_wire_code`].
    pub fn from_wire_code(code: i32, kind: TemporalKind) -> Result<Precision> {
        let general = match kind {
            TemporalKind::Instant => code.checked_add(INSTANT_CODE_SHIFT),
            TemporalKind::Date | TemporalKind::DateTime => Some(code),
        };
        let precision = general
            .and_then(Precision::from_code)
            .ok_or(Error::InvalidPrecisionCode { kind, code })?;
        if !precision.is_valid_for(kind) {
            return Err(Error::UnsupportedPrecision { kind, precision });
        }
        Ok(precision)
    }
}

/// Wire precision enumeration for time-of-day values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum TimePrecision {
    Unspecified = 0,
    Second = 1,
    Millisecond = 2,
}

impl TimePrecision {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<TimePrecision> {
        match code {
            0 => Some(TimePrecision::Unspecified),
            1 => Some(TimePrecision::Second),
            2 => Some(TimePrecision::Millisecond),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_codes_for_date_time() {
        let expected = [
            (Precision::Unspecified, 0),
            (Precision::Year, 1),
            (Precision::Month, 2),
            (Precision::Day, 3),
            (Precision::Second, 4),
            (Precision::Millisecond, 5),
        ];
        for (precision, code) in expected {
            assert_eq!(precision.to_wire_code(TemporalKind::DateTime), Ok(code));
            assert_eq!(
                Precision::from_wire_code(code, TemporalKind::DateTime),
                Ok(precision)
            );
        }
    }

    #[test]
    fn instant_codes_are_shifted() {
        assert_eq!(Precision::Second.to_wire_code(TemporalKind::Instant), Ok(1));
        assert_eq!(
            Precision::Millisecond.to_wire_code(TemporalKind::Instant),
            Ok(2)
        );
        assert_eq!(
            Precision::from_wire_code(1, TemporalKind::Instant),
            Ok(Precision::Second)
        );
        assert_eq!(
            Precision::from_wire_code(2, TemporalKind::Instant),
            Ok(Precision::Millisecond)
        );
    }

    #[test]
    fn instant_rejects_coarse_precision_both_ways() {
        for precision in [
            Precision::Unspecified,
            Precision::Year,
            Precision::Month,
            Precision::Day,
        ] {
            assert_eq!(
                precision.to_wire_code(TemporalKind::Instant),
                Err(Error::UnsupportedPrecision {
                    kind: TemporalKind::Instant,
                    precision
                })
            );
        }
        // Year on the general scale, shifted into the instant enumeration.
        assert_eq!(
            Precision::from_wire_code(1 - INSTANT_CODE_SHIFT, TemporalKind::Instant),
            Err(Error::UnsupportedPrecision {
                kind: TemporalKind::Instant,
                precision: Precision::Year
            })
        );
        assert_eq!(
            Precision::from_wire_code(0, TemporalKind::Instant),
            Err(Error::UnsupportedPrecision {
                kind: TemporalKind::Instant,
                precision: Precision::Day
            })
        );
    }

    #[test]
    fn date_stops_at_day() {
        assert!(Precision::Day.is_valid_for(TemporalKind::Date));
        assert!(Precision::Second.to_wire_code(TemporalKind::Date).is_err());
        assert!(Precision::from_wire_code(5, TemporalKind::Date).is_err());
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert_eq!(
            Precision::from_wire_code(6, TemporalKind::DateTime),
            Err(Error::InvalidPrecisionCode {
                kind: TemporalKind::DateTime,
                code: 6
            })
        );
        assert!(Precision::from_wire_code(i32::MAX, TemporalKind::Instant).is_err());
        assert!(Precision::from_wire_code(-1, TemporalKind::Date).is_err());
    }

    #[test]
    fn time_precision_codes() {
        assert_eq!(TimePrecision::Second.code(), 1);
        assert_eq!(TimePrecision::from_code(2), Some(TimePrecision::Millisecond));
        assert_eq!(TimePrecision::from_code(3), None);
    }
}
