use crate::Error;
use crate::field::{Field, parse_char_in, parse_f32};
use crate::parse::{NmeaSentence, SentenceType};
use crate::sentences::constellation::Constellation;

/// VLW - Dual ground/water distance
///
/// ```text
/// $GPVLW,,N,,N,15.8,N,1.2,N*65
///        twd N wd N tgd N gd N
/// ```
///
/// The water-distance fields are fixed null on this receiver; only the
/// ground distances carry data. All unit fields are fixed to nautical
/// miles.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct VlwData {
    pub constellation: Constellation,
    /// Total water distance: fixed null.
    pub total_water_distance: Field<u8>,
    pub total_water_distance_unit: Field<char>,
    /// Water distance since reset: fixed null.
    pub water_distance: Field<u8>,
    pub water_distance_unit: Field<char>,
    pub total_ground_distance: Field<f32>,
    pub total_ground_distance_unit: Field<char>,
    pub ground_distance: Field<f32>,
    pub ground_distance_unit: Field<char>,
}

impl VlwData {
    pub fn is_valid(&self) -> bool {
        self.constellation != Constellation::Invalid
            && self.total_water_distance_unit == 'N'
            && self.water_distance_unit == 'N'
            && self.total_ground_distance_unit == 'N'
            && self.ground_distance_unit == 'N'
    }
}

pub fn parse_vlw<'a>(sentence: &NmeaSentence<'a>) -> Result<VlwData, Error<'a>> {
    if sentence.message_id != SentenceType::VLW {
        return Err(Error::WrongSentenceHeader {
            expected: SentenceType::VLW.mask(),
            found: sentence.message_id,
        });
    }
    let fields = sentence.fields()?;

    Ok(VlwData {
        constellation: sentence.constellation(),
        total_water_distance: Field::new(u8::MAX, false),
        total_water_distance_unit: parse_char_in(fields[2], &['N']),
        water_distance: Field::new(u8::MAX, false),
        water_distance_unit: parse_char_in(fields[4], &['N']),
        total_ground_distance: parse_f32(fields[5]),
        total_ground_distance_unit: parse_char_in(fields[6], &['N']),
        ground_distance: parse_f32(fields[7]),
        ground_distance_unit: parse_char_in(fields[8], &['N']),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_nmea_sentence;

    #[test]
    fn test_parse_vlw_full() {
        let sentence = parse_nmea_sentence("$GPVLW,,N,,N,15.8,N,1.2,N*65").unwrap();
        assert_eq!(sentence.checksum, sentence.calc_checksum());

        let data = parse_vlw(&sentence).unwrap();
        assert!(data.is_valid());
        assert!(!data.total_water_distance.is_valid());
        assert!(!data.water_distance.is_valid());
        assert!(data.total_ground_distance == 15.8);
        assert!(data.ground_distance == 1.2);
    }

    #[test]
    fn test_vlw_wrong_unit_is_invalid() {
        let sentence = parse_nmea_sentence("$GPVLW,,N,,N,15.8,K,1.2,N*60").unwrap();
        let data = parse_vlw(&sentence).unwrap();
        assert!(!data.is_valid());
    }
}
