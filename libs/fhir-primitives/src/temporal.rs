//! Document-side temporal values (date, dateTime, instant)
//!
//! A [`TemporalValue`] is an absolute instant with the precision it was specified
//! to and the timezone it was written in. FHIR literals such as `2020-03`,
//! `2020-03-14T09:26:53+01:00` or `2020-03-14T09:26:53.589Z` parse into and format
//! from this representation.

use std::fmt;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::kind::TemporalKind;
use crate::precision::Precision;
use crate::time::parse_clock;

/// Timezone attached to a temporal value.
///
/// Region identifiers such as `America/New_York` are kept verbatim but carry no
/// offset information; literals for such values are rendered in UTC.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimeZoneId(Zone);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Zone {
    Utc,
    Offset(FixedOffset),
    Named(String),
}

impl TimeZoneId {
    pub fn utc() -> Self {
        TimeZoneId(Zone::Utc)
    }

    pub fn offset(offset: FixedOffset) -> Self {
        TimeZoneId(Zone::Offset(offset))
    }

    /// Canonicalise a timezone identifier. Returns `None` for an empty string.
    pub fn parse(id: &str) -> Option<TimeZoneId> {
        let id = id.trim();
        if id.is_empty() {
            return None;
        }
        if matches!(id, "Z" | "UTC" | "GMT") {
            return Some(TimeZoneId::utc());
        }
        let bare = id
            .strip_prefix("GMT")
            .or_else(|| id.strip_prefix("UTC"))
            .unwrap_or(id);
        if let Some(offset) = parse_offset(bare) {
            return Some(TimeZoneId::offset(offset));
        }
        Some(TimeZoneId(Zone::Named(id.to_string())))
    }

    /// The identifier copied onto the wire. `TimeZoneId::parse` inverts it.
    pub fn canonical_id(&self) -> String {
        match &self.0 {
            Zone::Utc => "UTC".to_string(),
            Zone::Offset(offset) => format_offset(*offset),
            Zone::Named(name) => name.clone(),
        }
    }

    /// Fixed offset from UTC, when known.
    pub fn fixed_offset(&self) -> Option<FixedOffset> {
        match &self.0 {
            Zone::Utc => FixedOffset::east_opt(0),
            Zone::Offset(offset) => Some(*offset),
            Zone::Named(_) => None,
        }
    }

    pub fn is_utc(&self) -> bool {
        matches!(self.0, Zone::Utc)
    }

    fn literal_suffix(&self) -> String {
        match &self.0 {
            Zone::Offset(offset) => format_offset(*offset),
            Zone::Utc | Zone::Named(_) => "Z".to_string(),
        }
    }
}

impl fmt::Display for TimeZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_id())
    }
}

impl Serialize for TimeZoneId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical_id())
    }
}

impl<'de> Deserialize<'de> for TimeZoneId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let id = String::deserialize(deserializer)?;
        TimeZoneId::parse(&id).ok_or_else(|| serde::de::Error::custom("empty timezone identifier"))
    }
}

/// `+hh:mm`, `-hh:mm` or `+hhmm`.
fn parse_offset(s: &str) -> Option<FixedOffset> {
    let sign = match s.as_bytes().first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let rest = &s[1..];
    if !rest.is_ascii() {
        return None;
    }
    let (hours, minutes) = match rest.len() {
        5 if rest.as_bytes()[2] == b':' => (&rest[0..2], &rest[3..5]),
        4 => (&rest[0..2], &rest[2..4]),
        _ => return None,
    };
    if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

fn format_offset(offset: FixedOffset) -> String {
    let secs = offset.local_minus_utc();
    let sign = if secs < 0 { '-' } else { '+' };
    let secs = secs.abs();
    format!("{}{:02}:{:02}", sign, secs / 3600, (secs % 3600) / 60)
}

/// An absolute point in time with its precision and optional timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporalValue {
    instant: DateTime<Utc>,
    precision: Precision,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timezone: Option<TimeZoneId>,
}

impl TemporalValue {
    /// The instant is truncated to whole microseconds, the finest unit on the wire.
    pub fn new(instant: DateTime<Utc>, precision: Precision, timezone: Option<TimeZoneId>) -> Self {
        Self {
            instant: instant.trunc_subsecs(6),
            precision,
            timezone,
        }
    }

    pub fn from_epoch_micros(
        micros: i64,
        precision: Precision,
        timezone: Option<TimeZoneId>,
    ) -> Result<Self> {
        let instant =
            DateTime::<Utc>::from_timestamp_micros(micros).ok_or(Error::TimestampOutOfRange(micros))?;
        Ok(Self::new(instant, precision, timezone))
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn timezone(&self) -> Option<&TimeZoneId> {
        self.timezone.as_ref()
    }

    pub fn epoch_micros(&self) -> i64 {
        self.instant.timestamp_micros()
    }

    /// Parse a FHIR `date`, `dateTime` or `instant` literal.
    pub fn parse(kind: TemporalKind, literal: &str) -> Result<Self> {
        parse_literal(kind, literal).ok_or_else(|| Error::MalformedTemporalLiteral {
            kind,
            literal: literal.to_string(),
        })
    }

    /// Render as a FHIR literal at this value's precision, in its timezone.
    pub fn to_literal(&self, kind: TemporalKind) -> Result<String> {
        if !self.precision.is_valid_for(kind) {
            return Err(Error::UnsupportedPrecision {
                kind,
                precision: self.precision,
            });
        }

        let local = match self.timezone.as_ref().and_then(TimeZoneId::fixed_offset) {
            Some(offset) => self.instant.with_timezone(&offset).naive_local(),
            None => self.instant.naive_utc(),
        };
        // FHIR literals carry exactly four year digits.
        if !(0..=9999).contains(&local.year()) {
            return Err(Error::TimestampOutOfRange(self.epoch_micros()));
        }
        let suffix = match (&self.timezone, kind) {
            (Some(tz), _) => tz.literal_suffix(),
            (None, TemporalKind::Instant) => "Z".to_string(),
            (None, _) => String::new(),
        };

        let precision = match (self.precision, kind) {
            (Precision::Unspecified, TemporalKind::Date) => Precision::Day,
            (Precision::Unspecified, _) if self.instant.timestamp_subsec_micros() != 0 => {
                Precision::Millisecond
            }
            (Precision::Unspecified, _) => Precision::Second,
            (precision, _) => precision,
        };

        let literal = match precision {
            Precision::Year => local.format("%Y").to_string(),
            Precision::Month => local.format("%Y-%m").to_string(),
            Precision::Day | Precision::Unspecified => local.format("%Y-%m-%d").to_string(),
            Precision::Second => format!("{}{}", local.format("%Y-%m-%dT%H:%M:%S"), suffix),
            Precision::Millisecond => {
                format!("{}{}", local.format("%Y-%m-%dT%H:%M:%S%.3f"), suffix)
            }
        };
        Ok(literal)
    }
}

fn parse_literal(kind: TemporalKind, literal: &str) -> Option<TemporalValue> {
    let (date_part, rest) = match literal.split_once('T') {
        Some((date, rest)) => (date, Some(rest)),
        None => (literal, None),
    };
    let (date, date_precision) = parse_date_part(date_part)?;

    let Some(rest) = rest else {
        // Date-only forms are valid for date and dateTime, never for instant.
        if kind == TemporalKind::Instant {
            return None;
        }
        let instant = Utc.from_utc_datetime(&date.and_time(NaiveTime::from_hms_opt(0, 0, 0)?));
        return Some(TemporalValue::new(instant, date_precision, None));
    };

    if kind == TemporalKind::Date || date_precision != Precision::Day {
        return None;
    }

    let (clock_part, timezone) = split_timezone(rest)?;
    if kind == TemporalKind::Instant && timezone.is_none() {
        return None;
    }
    let clock = parse_clock(clock_part).ok()?;
    if !clock.has_seconds {
        return None;
    }
    let precision = if clock.has_fraction {
        Precision::Millisecond
    } else {
        Precision::Second
    };

    let local = NaiveDateTime::new(date, clock.time);
    let instant = match timezone.as_ref().and_then(TimeZoneId::fixed_offset) {
        Some(offset) => offset.from_local_datetime(&local).single()?.with_timezone(&Utc),
        None => Utc.from_utc_datetime(&local),
    };
    Some(TemporalValue::new(instant, precision, timezone))
}

/// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
fn parse_date_part(s: &str) -> Option<(NaiveDate, Precision)> {
    let bytes = s.as_bytes();
    let digits = |range: std::ops::Range<usize>| bytes[range].iter().all(u8::is_ascii_digit);
    let (year, month, day, precision) = match bytes.len() {
        4 if digits(0..4) => (&s[0..4], "01", "01", Precision::Year),
        7 if digits(0..4) && bytes[4] == b'-' && digits(5..7) => {
            (&s[0..4], &s[5..7], "01", Precision::Month)
        }
        10 if digits(0..4)
            && bytes[4] == b'-'
            && digits(5..7)
            && bytes[7] == b'-'
            && digits(8..10) =>
        {
            (&s[0..4], &s[5..7], &s[8..10], Precision::Day)
        }
        _ => return None,
    };
    let date = NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)?;
    Some((date, precision))
}

fn split_timezone(rest: &str) -> Option<(&str, Option<TimeZoneId>)> {
    if let Some(clock) = rest.strip_suffix('Z') {
        return Some((clock, Some(TimeZoneId::utc())));
    }
    if let Some(pos) = rest.rfind(['+', '-']) {
        let (clock, tz) = rest.split_at(pos);
        let offset = parse_offset(tz)?;
        return Some((clock, Some(TimeZoneId::offset(offset))));
    }
    Some((rest, None))
}
