use arrayvec::ArrayString;

use crate::Error;
use crate::field::{Field, parse_char, parse_f32, parse_u8, parse_u16};
use crate::parse::{NmeaSentence, SentenceType};
use crate::sentences::constellation::Constellation;
use crate::sentences::groups::{Position3d, SHORT_STR_LEN, UtcTime};
use crate::sentences::utils::str_field;

/// GNS - GNSS fix data
///
/// ```text
/// $GNGNS,103600.01,5114.51176,N,00012.29380,W,ANNN,07,1.18,111.5,45.6,,,V*00
///        time      lat        N lon         W mode n  hdop alt   sep  age stn navStatus
/// ```
///
/// The position mode field carries one character per constellation in the
/// solution, GPS first.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GnsData {
    pub constellation: Constellation,
    pub time: UtcTime,
    pub position: Position3d,
    #[cfg_attr(feature = "defmt", defmt(Debug2Format))]
    pub pos_mode: Field<ArrayString<SHORT_STR_LEN>>,
    pub num_satellites: Field<u8>,
    pub hdop: Field<f32>,
    pub geoid_separation: Field<f32>,
    pub diff_age: Field<u16>,
    pub diff_station: Field<u16>,
    pub nav_status: Field<char>,
}

impl GnsData {
    /// The navigation status is a fixed field: the receiver hardware
    /// provides no nav-status information and always emits `V`.
    pub fn is_valid(&self) -> bool {
        self.constellation != Constellation::Invalid
            && self.position.is_valid()
            && self.nav_status == 'V'
    }
}

pub fn parse_gns<'a>(sentence: &NmeaSentence<'a>) -> Result<GnsData, Error<'a>> {
    if sentence.message_id != SentenceType::GNS {
        return Err(Error::WrongSentenceHeader {
            expected: SentenceType::GNS.mask(),
            found: sentence.message_id,
        });
    }
    let fields = sentence.fields()?;

    Ok(GnsData {
        constellation: sentence.constellation(),
        time: UtcTime::parse(fields[1]),
        position: Position3d::parse(fields[2], fields[3], fields[4], fields[5], fields[9]),
        pos_mode: str_field(fields[6]),
        num_satellites: parse_u8(fields[7]),
        hdop: parse_f32(fields[8]),
        geoid_separation: parse_f32(fields[10]),
        diff_age: parse_u16(fields[11]),
        diff_station: parse_u16(fields[12]),
        nav_status: parse_char(fields[13]),
    })
}
