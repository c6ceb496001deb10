use crate::Error;
use crate::field::{Field, parse_char_in, parse_f32, parse_u8, parse_u16};
use crate::parse::{NmeaSentence, SentenceType};
use crate::sentences::constellation::Constellation;
use crate::sentences::groups::{Position3d, UtcTime};

/// Fix quality, shared between the GGA quality digit and the
/// single-letter position mode carried by RMC/GLL/VTG.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixQuality {
    NoFix,
    Autonomous,
    Differential,
    RtkFixed,
    RtkFloat,
    Estimated,
}

impl FixQuality {
    /// Maps either encoding of the indicator; unknown characters yield
    /// `None`.
    pub fn from_indicator(c: char) -> Option<Self> {
        match c {
            '0' | 'N' => Some(FixQuality::NoFix),
            '1' | 'A' => Some(FixQuality::Autonomous),
            '2' | 'D' => Some(FixQuality::Differential),
            '4' | 'R' => Some(FixQuality::RtkFixed),
            '5' | 'F' => Some(FixQuality::RtkFloat),
            '6' | 'E' => Some(FixQuality::Estimated),
            _ => None,
        }
    }
}

/// GGA - Global Positioning System fix data
///
/// ```text
/// $GPGGA,092725.00,4717.11399,N,00833.91590,E,1,08,1.01,499.6,M,48.0,M,,*5B
///        time      lat        N lon         E q n  hdop alt   M sep  M age station
/// ```
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GgaData {
    pub constellation: Constellation,
    pub time: UtcTime,
    pub position: Position3d,
    pub quality: Field<u8>,
    pub num_satellites: Field<u8>,
    pub hdop: Field<f32>,
    pub altitude_unit: Field<char>,
    pub geoid_separation: Field<f32>,
    pub separation_unit: Field<char>,
    pub diff_age: Field<u16>,
    pub diff_station: Field<u16>,
}

impl GgaData {
    /// Quality 0 means no fix; both unit fields are fixed to metres.
    pub fn is_valid(&self) -> bool {
        self.constellation != Constellation::Invalid
            && self.position.is_valid()
            && !(self.quality == 0)
            && self.altitude_unit == 'M'
            && self.separation_unit == 'M'
    }

    pub fn fix_quality(&self) -> Option<FixQuality> {
        let digit = (b'0' + *self.quality.get()?) as char;
        FixQuality::from_indicator(digit)
    }
}

pub fn parse_gga<'a>(sentence: &NmeaSentence<'a>) -> Result<GgaData, Error<'a>> {
    if sentence.message_id != SentenceType::GGA {
        return Err(Error::WrongSentenceHeader {
            expected: SentenceType::GGA.mask(),
            found: sentence.message_id,
        });
    }
    let fields = sentence.fields()?;

    Ok(GgaData {
        constellation: sentence.constellation(),
        time: UtcTime::parse(fields[1]),
        position: Position3d::parse(fields[2], fields[3], fields[4], fields[5], fields[9]),
        quality: parse_u8(fields[6]),
        num_satellites: parse_u8(fields[7]),
        hdop: parse_f32(fields[8]),
        altitude_unit: parse_char_in(fields[10], &['M']),
        geoid_separation: parse_f32(fields[11]),
        separation_unit: parse_char_in(fields[12], &['M']),
        diff_age: parse_u16(fields[13]),
        diff_station: parse_u16(fields[14]),
    })
}
