use arrayvec::ArrayString;
use chrono::NaiveDate;

use crate::Error;
use crate::field::{Field, parse_char, parse_char_in, parse_f32};
use crate::parse::{NmeaSentence, SentenceType};
use crate::sentences::constellation::Constellation;
use crate::sentences::gga::FixQuality;
use crate::sentences::groups::{Position, UtcTime};
use crate::sentences::utils::str_field;

/// `ddmmyy` length on the wire.
pub const DATE_STR_LEN: usize = 6;

/// RMC - Recommended minimum data
///
/// ```text
/// $GPRMC,083559.00,A,4717.11437,N,00833.91522,E,0.004,77.52,091202,,,A,V*2D
///        time      A lat        N lon         E spd   cog   date   mv mvEW posMode navStatus
/// ```
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RmcData {
    pub constellation: Constellation,
    pub time: UtcTime,
    pub status: Field<char>,
    pub position: Position,
    pub speed_over_ground: Field<f32>,
    pub course_over_ground: Field<f32>,
    #[cfg_attr(feature = "defmt", defmt(Debug2Format))]
    pub date: Field<ArrayString<DATE_STR_LEN>>,
    pub magnetic_variation: Field<f32>,
    pub magnetic_variation_dir: Field<char>,
    pub pos_mode: Field<char>,
    pub nav_status: Field<char>,
}

impl RmcData {
    /// Requires an `A` status, a position mode other than "no fix" and
    /// the fixed `V` navigation status.
    pub fn is_valid(&self) -> bool {
        self.constellation != Constellation::Invalid
            && self.position.is_valid()
            && self.status == 'A'
            && !(self.pos_mode == 'N')
            && self.nav_status == 'V'
    }

    /// The fix quality derived from the position mode letter.
    pub fn fix_quality(&self) -> Option<FixQuality> {
        FixQuality::from_indicator(*self.pos_mode.get()?)
    }

    /// The fix date as a [`NaiveDate`]. Two-digit years from 83 upwards
    /// are read as 19xx (NMEA 0183 was released in 1983), the rest as
    /// 20xx.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        let raw = self.date.get()?;
        let b = raw.as_bytes();
        if b.len() != DATE_STR_LEN || !raw.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let two = |i: usize| ((b[i] - b'0') as i32) * 10 + (b[i + 1] - b'0') as i32;

        let (day, month, year) = (two(0), two(2), two(4));
        let year = if (83..=99).contains(&year) {
            1900 + year
        } else {
            2000 + year
        };
        NaiveDate::from_ymd_opt(year, month as u32, day as u32)
    }
}

pub fn parse_rmc<'a>(sentence: &NmeaSentence<'a>) -> Result<RmcData, Error<'a>> {
    if sentence.message_id != SentenceType::RMC {
        return Err(Error::WrongSentenceHeader {
            expected: SentenceType::RMC.mask(),
            found: sentence.message_id,
        });
    }
    let fields = sentence.fields()?;

    Ok(RmcData {
        constellation: sentence.constellation(),
        time: UtcTime::parse(fields[1]),
        status: parse_char(fields[2]),
        position: Position::parse(fields[3], fields[4], fields[5], fields[6]),
        speed_over_ground: parse_f32(fields[7]),
        course_over_ground: parse_f32(fields[8]),
        date: str_field(fields[9]),
        magnetic_variation: parse_f32(fields[10]),
        magnetic_variation_dir: parse_char_in(fields[11], &['E', 'W']),
        pos_mode: parse_char(fields[12]),
        nav_status: parse_char(fields[13]),
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::parse::parse_nmea_sentence;

    #[test]
    fn test_parse_rmc_full() {
        let sentence = parse_nmea_sentence(
            "$GPRMC,083559.00,A,4717.11437,N,00833.91522,E,0.004,77.52,091202,,,A,V*2D",
        )
        .unwrap();
        assert_eq!(sentence.checksum, sentence.calc_checksum());

        let data = parse_rmc(&sentence).unwrap();
        assert!(data.is_valid());
        assert_eq!(data.time.as_str(), Some("083559.00"));
        assert!(data.status == 'A');
        assert_relative_eq!(
            *data.position.latitude().get().unwrap(),
            47.0 + 17.11437 / 60.0
        , epsilon = 1e-4);
        assert!(data.speed_over_ground == 0.004);
        assert!(data.course_over_ground == 77.52);
        assert_eq!(
            data.to_naive_date(),
            NaiveDate::from_ymd_opt(2002, 12, 9)
        );
        assert!(!data.magnetic_variation.is_valid());
        assert!(data.pos_mode == 'A');
        assert_eq!(data.fix_quality(), Some(FixQuality::Autonomous));
    }

    #[test]
    fn test_rmc_void_status_is_invalid() {
        let sentence = parse_nmea_sentence(
            "$GPRMC,083559.00,V,4717.11437,N,00833.91522,E,0.004,77.52,091202,,,A,V*3A",
        )
        .unwrap();
        let data = parse_rmc(&sentence).unwrap();
        assert!(!data.is_valid());
    }

    #[test]
    fn test_rmc_no_fix_pos_mode_is_invalid() {
        let sentence = parse_nmea_sentence(
            "$GPRMC,083559.00,A,4717.11437,N,00833.91522,E,0.004,77.52,091202,,,N,V*22",
        )
        .unwrap();
        let data = parse_rmc(&sentence).unwrap();
        assert!(!data.is_valid());
    }

    #[test]
    fn test_rmc_date_windowing() {
        let sentence = parse_nmea_sentence(
            "$GPRMC,083559.00,A,4717.11437,N,00833.91522,E,0.004,77.52,191194,,,A,V*20",
        )
        .unwrap();
        let data = parse_rmc(&sentence).unwrap();
        assert_eq!(
            data.to_naive_date(),
            NaiveDate::from_ymd_opt(1994, 11, 19)
        );
    }
}
