//! Scalar codecs bridging the two generations of the Teamwork wire format.
//!
//! Modern v3 endpoints speak JSON-native scalars (`YYYY-MM-DD` dates, real
//! numbers); the legacy v1 endpoints that still back milestones, teams and
//! people creation use compact `YYYYMMDD` dates, string-encoded integers and
//! comma-joined numeric lists. Every type here implements both the serde
//! traits and `Display`/`FromStr` so it can round-trip through JSON values
//! and through plain text (e.g. as a JSON map key).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";
const LEGACY_DATE_FORMAT: &str = "%Y%m%d";

/// Calendar date in the modern `YYYY-MM-DD` encoding.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(pub NaiveDate);

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for Date {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, DATE_FORMAT).map(Date)
    }
}

/// Clock time in the `HH:MM:SS` encoding.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(pub NaiveTime);

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIME_FORMAT))
    }
}

impl FromStr for Time {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s, TIME_FORMAT).map(Time)
    }
}

/// Calendar date in the legacy compact `YYYYMMDD` encoding.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LegacyDate(pub NaiveDate);

impl fmt::Display for LegacyDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(LEGACY_DATE_FORMAT))
    }
}

impl FromStr for LegacyDate {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, LEGACY_DATE_FORMAT).map(LegacyDate)
    }
}

macro_rules! string_codec {
    ($($ty:ident),+ $(,)?) => {$(
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(de::Error::custom)
            }
        }
    )+};
}

string_codec!(Date, Time, LegacyDate);

/// int64 that the legacy API serializes as a JSON string. Decoding accepts
/// both the string and the plain number form.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LegacyNumber(pub i64);

impl fmt::Display for LegacyNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LegacyNumber {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(LegacyNumber)
    }
}

impl Serialize for LegacyNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LegacyNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NumberVisitor;

        impl Visitor<'_> for NumberVisitor {
            type Value = LegacyNumber;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an integer or a string-encoded integer")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(LegacyNumber(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                i64::try_from(v)
                    .map(LegacyNumber)
                    .map_err(|_| E::custom("integer out of range"))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(NumberVisitor)
    }
}

/// List of int64 serialized as a single comma-joined JSON string.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LegacyNumericList(pub Vec<i64>);

impl fmt::Display for LegacyNumericList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for v in &self.0 {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{v}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for LegacyNumericList {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut values = Vec::new();
        for token in s.split(',') {
            if token.is_empty() {
                continue;
            }
            values.push(token.parse()?);
        }
        Ok(LegacyNumericList(values))
    }
}

string_codec!(LegacyNumericList);

/// Timestamp that may arrive as an ISO date-time, an empty string or JSON
/// null. The empty string and null both normalize to "unset"; output is
/// always the ISO form.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OptionalDateTime(pub Option<DateTime<Utc>>);

impl fmt::Display for OptionalDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(ts) => f.write_str(&ts.to_rfc3339_opts(SecondsFormat::Secs, true)),
            None => Ok(()),
        }
    }
}

impl FromStr for OptionalDateTime {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(OptionalDateTime(None));
        }
        DateTime::parse_from_rfc3339(s).map(|ts| OptionalDateTime(Some(ts.with_timezone(&Utc))))
    }
}

impl Serialize for OptionalDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some(_) => serializer.collect_str(self),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for OptionalDateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value: Option<String> = Option::deserialize(deserializer)?;
        match value {
            None => Ok(OptionalDateTime(None)),
            Some(s) => s.parse().map_err(de::Error::custom),
        }
    }
}

/// Fixed-point money amount stored in hundredths of the currency unit.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Stores `value` whole units as hundredths.
    pub fn set(value: i64) -> Self {
        Money(value * 100)
    }

    /// Whole units, discarding the fractional part.
    pub fn value(&self) -> i64 {
        self.0 / 100
    }

    pub fn hundredths(&self) -> i64 {
        self.0
    }
}
