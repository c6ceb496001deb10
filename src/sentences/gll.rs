use crate::Error;
use crate::field::{Field, parse_char};
use crate::parse::{NmeaSentence, SentenceType};
use crate::sentences::constellation::Constellation;
use crate::sentences::groups::{Position, UtcTime};

/// GLL - Latitude and longitude, with time of position fix and status
///
/// ```text
/// $GPGLL,4717.11364,N,00833.91565,E,092321.00,A,A*60
///        lat        N lon         E time      status posMode
/// ```
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GllData {
    pub constellation: Constellation,
    pub position: Position,
    pub time: UtcTime,
    pub status: Field<char>,
    pub pos_mode: Field<char>,
}

impl GllData {
    /// A missing or non-`A` status invalidates the whole sentence, not
    /// just the status field.
    pub fn is_valid(&self) -> bool {
        self.constellation != Constellation::Invalid
            && self.position.is_valid()
            && self.status == 'A'
    }
}

pub fn parse_gll<'a>(sentence: &NmeaSentence<'a>) -> Result<GllData, Error<'a>> {
    if sentence.message_id != SentenceType::GLL {
        return Err(Error::WrongSentenceHeader {
            expected: SentenceType::GLL.mask(),
            found: sentence.message_id,
        });
    }
    let fields = sentence.fields()?;

    Ok(GllData {
        constellation: sentence.constellation(),
        position: Position::parse(fields[1], fields[2], fields[3], fields[4]),
        time: UtcTime::parse(fields[5]),
        status: parse_char(fields[6]),
        pos_mode: parse_char(fields[7]),
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::parse::parse_nmea_sentence;

    #[test]
    fn test_parse_gll_full() {
        let sentence =
            parse_nmea_sentence("$GPGLL,4717.11364,N,00833.91565,E,092321.00,A,A*60").unwrap();
        assert_eq!(sentence.checksum, sentence.calc_checksum());

        let data = parse_gll(&sentence).unwrap();
        assert!(data.is_valid());
        assert_relative_eq!(
            *data.position.latitude().get().unwrap(),
            47.0 + 17.11364 / 60.0
        , epsilon = 1e-4);
        assert_relative_eq!(
            *data.position.longitude().get().unwrap(),
            8.0 + 33.91565 / 60.0
        , epsilon = 1e-4);
        assert_eq!(data.time.as_str(), Some("092321.00"));
        assert!(data.status == 'A');
        assert!(data.pos_mode == 'A');
    }

    #[test]
    fn test_gll_data_invalid_status() {
        let sentence =
            parse_nmea_sentence("$GPGLL,4717.11364,N,00833.91565,E,092321.00,V,A*77").unwrap();
        let data = parse_gll(&sentence).unwrap();
        assert!(!data.is_valid());
    }

    #[test]
    fn test_gll_west_is_negative() {
        let sentence =
            parse_nmea_sentence("$GNGLL,4916.45,N,12311.12,W,225444.00,A,A*6C").unwrap();
        let data = parse_gll(&sentence).unwrap();
        assert!(data.is_valid());
        assert_relative_eq!(
            *data.position.longitude().get().unwrap(),
            -(123.0 + 11.12 / 60.0)
        , epsilon = 1e-4);
    }
}
