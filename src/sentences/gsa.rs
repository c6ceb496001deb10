use crate::Error;
use crate::field::{Field, parse_char_in, parse_f32, parse_u8};
use crate::parse::{NmeaSentence, SentenceType};
use crate::sentences::constellation::Constellation;

/// Active satellite slots carried by one GSA sentence.
pub const GSA_SATELLITE_SLOTS: usize = 12;

/// GSA - GNSS DOP and active satellites
///
/// ```text
/// $GPGSA,A,3,23,29,07,08,09,18,26,28,,,,,1.94,1.18,1.54,1*10
///        op nav <12 svid slots>            pdop hdop vdop systemId
/// ```
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GsaData {
    pub constellation: Constellation,
    pub op_mode: Field<char>,
    pub nav_mode: Field<u8>,
    pub satellites: [Field<u8>; GSA_SATELLITE_SLOTS],
    pub pdop: Field<f32>,
    pub hdop: Field<f32>,
    pub vdop: Field<f32>,
    pub system_id: Field<u8>,
}

impl GsaData {
    /// Nav mode 1 means no fix was available for this solution.
    pub fn is_valid(&self) -> bool {
        self.constellation != Constellation::Invalid && !(self.nav_mode == 1)
    }
}

pub fn parse_gsa<'a>(sentence: &NmeaSentence<'a>) -> Result<GsaData, Error<'a>> {
    if sentence.message_id != SentenceType::GSA {
        return Err(Error::WrongSentenceHeader {
            expected: SentenceType::GSA.mask(),
            found: sentence.message_id,
        });
    }
    let fields = sentence.fields()?;

    let mut satellites = [Field::invalid(); GSA_SATELLITE_SLOTS];
    for (slot, satellite) in satellites.iter_mut().enumerate() {
        *satellite = parse_u8(fields[3 + slot]);
    }

    Ok(GsaData {
        constellation: sentence.constellation(),
        op_mode: parse_char_in(fields[1], &['M', 'A']),
        nav_mode: parse_u8(fields[2]),
        satellites,
        pdop: parse_f32(fields[15]),
        hdop: parse_f32(fields[16]),
        vdop: parse_f32(fields[17]),
        system_id: parse_u8(fields[18]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_nmea_sentence;

    #[test]
    fn test_parse_gsa_full() {
        let sentence = parse_nmea_sentence(
            "$GPGSA,A,3,23,29,07,08,09,18,26,28,,,,,1.94,1.18,1.54,1*10",
        )
        .unwrap();
        assert_eq!(sentence.checksum, sentence.calc_checksum());

        let data = parse_gsa(&sentence).unwrap();
        assert!(data.is_valid());
        assert!(data.op_mode == 'A');
        assert!(data.nav_mode == 3);
        assert!(data.satellites[0] == 23);
        assert!(data.satellites[7] == 28);
        assert!(!data.satellites[8].is_valid());
        assert!(data.pdop == 1.94);
        assert!(data.hdop == 1.18);
        assert!(data.vdop == 1.54);
        assert!(data.system_id == 1);
    }

    #[test]
    fn test_gsa_no_fix_is_invalid() {
        let sentence = parse_nmea_sentence(
            "$GNGSA,A,1,,,,,,,,,,,,,99.99,99.99,99.99,1*33",
        )
        .unwrap();
        let data = parse_gsa(&sentence).unwrap();
        assert!(!data.is_valid());
        assert!(!data.pdop.is_valid() || data.pdop == 99.99);
    }
}
