use crate::Error;
use crate::field::{Field, parse_f32, parse_u8};
use crate::parse::{NmeaSentence, SentenceType};
use crate::sentences::constellation::Constellation;
use crate::sentences::groups::UtcTime;

/// GBS - GNSS satellite fault detection
///
/// ```text
/// $GPGBS,235503.00,1.6,1.4,3.2,,,,,,*40
///        time      errLat errLon errAlt svid prob bias stddev systemId signalId
/// ```
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GbsData {
    pub constellation: Constellation,
    pub time: UtcTime,
    pub err_latitude: Field<f32>,
    pub err_longitude: Field<f32>,
    pub err_altitude: Field<f32>,
    pub svid: Field<u8>,
    /// Missed-detection probability. The receiver never populates it;
    /// the field is carried, permanently invalid.
    pub prob: Field<u8>,
    pub bias: Field<f32>,
    pub stddev: Field<f32>,
    pub system_id: Field<u8>,
    pub signal_id: Field<u8>,
}

impl GbsData {
    pub fn is_valid(&self) -> bool {
        self.constellation != Constellation::Invalid
    }
}

pub fn parse_gbs<'a>(sentence: &NmeaSentence<'a>) -> Result<GbsData, Error<'a>> {
    if sentence.message_id != SentenceType::GBS {
        return Err(Error::WrongSentenceHeader {
            expected: SentenceType::GBS.mask(),
            found: sentence.message_id,
        });
    }
    let fields = sentence.fields()?;

    Ok(GbsData {
        constellation: sentence.constellation(),
        time: UtcTime::parse(fields[1]),
        err_latitude: parse_f32(fields[2]),
        err_longitude: parse_f32(fields[3]),
        err_altitude: parse_f32(fields[4]),
        svid: parse_u8(fields[5]),
        prob: Field::new(u8::MAX, false),
        bias: parse_f32(fields[7]),
        stddev: parse_f32(fields[8]),
        system_id: parse_u8(fields[9]),
        signal_id: parse_u8(fields[10]),
    })
}
