use crate::Error;
use crate::field::{Field, parse_char, parse_u64_radix};
use crate::parse::{NmeaSentence, SentenceType};
use crate::sentences::constellation::Constellation;
use crate::sentences::groups::UtcTime;

/// RLM - Return link message (Galileo SAR)
///
/// ```text
/// $GPRLM,4B00450000000000,084600.00,1,213E4*67
///        beacon           time      code body
/// ```
///
/// Beacon id and message body are hex-encoded on the wire.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RlmData {
    pub constellation: Constellation,
    pub beacon: Field<u64>,
    pub time: UtcTime,
    pub code: Field<char>,
    pub body: Field<u64>,
}

impl RlmData {
    pub fn is_valid(&self) -> bool {
        self.constellation != Constellation::Invalid
    }
}

pub fn parse_rlm<'a>(sentence: &NmeaSentence<'a>) -> Result<RlmData, Error<'a>> {
    if sentence.message_id != SentenceType::RLM {
        return Err(Error::WrongSentenceHeader {
            expected: SentenceType::RLM.mask(),
            found: sentence.message_id,
        });
    }
    let fields = sentence.fields()?;

    Ok(RlmData {
        constellation: sentence.constellation(),
        beacon: parse_u64_radix(fields[1], 16),
        time: UtcTime::parse(fields[2]),
        code: parse_char(fields[3]),
        body: parse_u64_radix(fields[4], 16),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_nmea_sentence;

    #[test]
    fn test_parse_rlm_full() {
        let sentence =
            parse_nmea_sentence("$GPRLM,4B00450000000000,084600.00,1,213E4*67").unwrap();
        assert_eq!(sentence.checksum, sentence.calc_checksum());

        let data = parse_rlm(&sentence).unwrap();
        assert!(data.is_valid());
        assert!(data.beacon == 0x4B00_4500_0000_0000);
        assert_eq!(data.time.as_str(), Some("084600.00"));
        assert!(data.code == '1');
        assert!(data.body == 0x213E4);
    }

    #[test]
    fn test_rlm_non_hex_body_stays_absent() {
        let sentence =
            parse_nmea_sentence("$GPRLM,4B00450000000000,084600.00,1,213EG*14").unwrap();
        let data = parse_rlm(&sentence).unwrap();
        assert!(data.beacon.is_valid());
        assert!(!data.body.is_valid());
    }
}
