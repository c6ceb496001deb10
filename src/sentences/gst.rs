use crate::Error;
use crate::field::{Field, parse_f32};
use crate::parse::{NmeaSentence, SentenceType};
use crate::sentences::constellation::Constellation;
use crate::sentences::groups::UtcTime;

/// GST - GNSS pseudorange error statistics
///
/// ```text
/// $GPGST,082356.00,1.8,,,,1.7,1.3,2.2*7E
///        time      rms maj min ori stdLat stdLon stdAlt
/// ```
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GstData {
    pub constellation: Constellation,
    pub time: UtcTime,
    pub range_rms: Field<f32>,
    pub std_major: Field<f32>,
    pub std_minor: Field<f32>,
    pub orientation: Field<f32>,
    pub std_latitude: Field<f32>,
    pub std_longitude: Field<f32>,
    pub std_altitude: Field<f32>,
}

impl GstData {
    pub fn is_valid(&self) -> bool {
        self.constellation != Constellation::Invalid
    }
}

pub fn parse_gst<'a>(sentence: &NmeaSentence<'a>) -> Result<GstData, Error<'a>> {
    if sentence.message_id != SentenceType::GST {
        return Err(Error::WrongSentenceHeader {
            expected: SentenceType::GST.mask(),
            found: sentence.message_id,
        });
    }
    let fields = sentence.fields()?;

    Ok(GstData {
        constellation: sentence.constellation(),
        time: UtcTime::parse(fields[1]),
        range_rms: parse_f32(fields[2]),
        std_major: parse_f32(fields[3]),
        std_minor: parse_f32(fields[4]),
        orientation: parse_f32(fields[5]),
        std_latitude: parse_f32(fields[6]),
        std_longitude: parse_f32(fields[7]),
        std_altitude: parse_f32(fields[8]),
    })
}
