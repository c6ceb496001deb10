//! Capability groups shared across sentence kinds.
//!
//! The wire format repeats the same clusters of fields (position, time,
//! altitude, poll target) across many sentence kinds; each kind embeds
//! the groups it carries, and [`crate::view`] can project any of them
//! back out of a parsed sentence.

use arrayvec::ArrayString;
use chrono::NaiveTime;

use crate::field::{Field, parse_char_in, parse_f32};
use crate::sentences::utils::{check_time_format, deg_min_to_dec_deg, str_field};

/// `hhmmss.ss` length on the wire.
pub const TIME_STR_LEN: usize = 9;

/// Capacity for the short free-text fields (datum, position mode, poll
/// target).
pub const SHORT_STR_LEN: usize = 8;

/// Latitude/longitude with their hemisphere indicators.
///
/// Coordinates are stored in decimal degrees, unsigned; the sign is
/// applied from the hemisphere on [`Position::latitude`] /
/// [`Position::longitude`].
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub lat: Field<f32>,
    pub ns: Field<char>,
    pub lon: Field<f32>,
    pub ew: Field<char>,
}

impl Position {
    pub(crate) fn parse(lat: &str, ns: &str, lon: &str, ew: &str) -> Self {
        let mut lat = parse_f32(lat);
        lat.apply(deg_min_to_dec_deg);
        let mut lon = parse_f32(lon);
        lon.apply(deg_min_to_dec_deg);

        Position {
            lat,
            ns: parse_char_in(ns, &['N', 'S']),
            lon,
            ew: parse_char_in(ew, &['E', 'W']),
        }
    }

    pub(crate) fn is_valid(&self) -> bool {
        (self.ns == 'N' || self.ns == 'S') && (self.ew == 'E' || self.ew == 'W')
    }

    /// Latitude in decimal degrees, negative in the southern hemisphere.
    pub fn latitude(&self) -> Field<f32> {
        let mut lat = self.lat;
        if lat.is_valid() && self.ns.is_valid() {
            let sign = if self.ns == 'N' { 1.0 } else { -1.0 };
            lat.set(*self.lat.raw() * sign, true);
        }
        lat
    }

    /// Longitude in decimal degrees, negative in the western hemisphere.
    pub fn longitude(&self) -> Field<f32> {
        let mut lon = self.lon;
        if lon.is_valid() && self.ew.is_valid() {
            let sign = if self.ew == 'E' { 1.0 } else { -1.0 };
            lon.set(*self.lon.raw() * sign, true);
        }
        lon
    }
}

/// Altitude above mean sea level, metres.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Altitude {
    pub alt: Field<f32>,
}

impl Altitude {
    pub(crate) fn parse(alt: &str) -> Self {
        Altitude {
            alt: parse_f32(alt),
        }
    }

    pub fn altitude(&self) -> Field<f32> {
        self.alt
    }
}

/// Position plus altitude.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position3d {
    pub position: Position,
    pub altitude: Altitude,
}

impl Position3d {
    pub(crate) fn parse(lat: &str, ns: &str, lon: &str, ew: &str, alt: &str) -> Self {
        Position3d {
            position: Position::parse(lat, ns, lon, ew),
            altitude: Altitude::parse(alt),
        }
    }

    pub(crate) fn is_valid(&self) -> bool {
        // An absent altitude stays an invalid field, not an invalid
        // sentence.
        self.position.is_valid()
    }
}

/// UTC time of day as transmitted: an `hhmmss.ss` string.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UtcTime {
    #[cfg_attr(feature = "defmt", defmt(Debug2Format))]
    pub time: Field<ArrayString<TIME_STR_LEN>>,
}

impl UtcTime {
    pub(crate) fn parse(s: &str) -> Self {
        let mut time = str_field::<TIME_STR_LEN>(s);
        if !check_time_format(s) {
            time = Field::invalid();
        }
        UtcTime { time }
    }

    /// The raw `hhmmss.ss` text, when present and well-formed.
    pub fn as_str(&self) -> Option<&str> {
        self.time.get().map(|s| s.as_str())
    }

    /// The time of day as a [`NaiveTime`], centisecond resolution.
    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        let raw = self.as_str()?;
        let b = raw.as_bytes();
        let two = |i: usize| (b[i] - b'0') as u32 * 10 + (b[i + 1] - b'0') as u32;

        let (hour, minute, sec) = (two(0), two(2), two(4));
        let millis = two(7) * 10;
        NaiveTime::from_hms_milli_opt(hour, minute, sec, millis)
    }
}

/// Target message id of a standard poll request (`GAQ`/`GBQ`/`GLQ`/
/// `GNQ`/`GPQ`).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MsgPoll {
    #[cfg_attr(feature = "defmt", defmt(Debug2Format))]
    pub msg_id: Field<ArrayString<SHORT_STR_LEN>>,
}

impl MsgPoll {
    pub(crate) fn parse(s: &str) -> Self {
        let mut msg_id = str_field::<SHORT_STR_LEN>(s);
        if s.is_empty() {
            msg_id = Field::invalid();
        }
        MsgPoll { msg_id }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn position_signs_follow_hemisphere() {
        let pos = Position::parse("4916.45", "N", "12311.12", "W");
        assert!(pos.is_valid());
        assert_relative_eq!(*pos.latitude().get().unwrap(), 49.0 + 16.45 / 60.0, epsilon = 1e-4);
        assert_relative_eq!(*pos.longitude().get().unwrap(), -(123.0 + 11.12 / 60.0), epsilon = 1e-4);

        let south = Position::parse("4916.45", "S", "12311.12", "E");
        assert_relative_eq!(*south.latitude().get().unwrap(), -(49.0 + 16.45 / 60.0), epsilon = 1e-4);
        assert_relative_eq!(*south.longitude().get().unwrap(), 123.0 + 11.12 / 60.0, epsilon = 1e-4);
    }

    #[test]
    fn position_rejects_bad_hemisphere() {
        assert!(!Position::parse("4916.45", "Q", "12311.12", "W").is_valid());
        assert!(!Position::parse("4916.45", "N", "12311.12", "").is_valid());
    }

    #[test]
    fn empty_coordinates_stay_absent() {
        let pos = Position::parse("", "N", "", "E");
        assert!(pos.latitude().get().is_none());
        assert!(pos.longitude().get().is_none());
    }

    #[test]
    fn utc_time_round_trips_through_chrono() {
        let time = UtcTime::parse("225444.25");
        assert_eq!(time.as_str(), Some("225444.25"));
        assert_eq!(
            time.to_naive_time(),
            NaiveTime::from_hms_milli_opt(22, 54, 44, 250)
        );

        assert_eq!(UtcTime::parse("2254").as_str(), None);
        assert_eq!(UtcTime::parse("").to_naive_time(), None);
    }

    #[test]
    fn msg_poll_requires_a_target() {
        assert!(MsgPoll::parse("RMC").msg_id.is_valid());
        assert!(!MsgPoll::parse("").msg_id.is_valid());
    }
}
