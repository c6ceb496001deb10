use crate::Error;
use crate::parse::{NmeaSentence, SentenceType};
use crate::sentences::constellation::Constellation;
use crate::sentences::groups::MsgPoll;

/// GAQ/GBQ/GLQ/GNQ/GPQ - Poll a standard message
///
/// ```text
/// $GNGNQ,RMC*21
///        msgId
/// ```
///
/// One kind per talker family; the five differ only in which talker they
/// address, so they share this data type. [`PollData::kind`] records
/// which one matched.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PollData {
    pub constellation: Constellation,
    pub kind: SentenceType,
    pub poll: MsgPoll,
}

impl PollData {
    pub fn is_valid(&self) -> bool {
        self.constellation != Constellation::Invalid
    }
}

pub fn parse_poll<'a>(
    sentence: &NmeaSentence<'a>,
    expected: SentenceType,
) -> Result<PollData, Error<'a>> {
    if sentence.message_id != expected {
        return Err(Error::WrongSentenceHeader {
            expected: expected.mask(),
            found: sentence.message_id,
        });
    }
    let fields = sentence.fields()?;

    Ok(PollData {
        constellation: sentence.constellation(),
        kind: expected,
        poll: MsgPoll::parse(fields[1]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_nmea_sentence;

    fn poll(line: &str, kind: SentenceType) -> PollData {
        let sentence = parse_nmea_sentence(line).unwrap();
        assert_eq!(sentence.checksum, sentence.calc_checksum());
        parse_poll(&sentence, kind).unwrap()
    }

    #[test]
    fn test_parse_poll_kinds() {
        let gnq = poll("$GNGNQ,RMC*21", SentenceType::GNQ);
        assert!(gnq.is_valid());
        assert_eq!(gnq.poll.msg_id.get().map(|s| s.as_str()), Some("RMC"));

        let gaq = poll("$GAGAQ,GBS*2B", SentenceType::GAQ);
        assert_eq!(gaq.constellation, Constellation::Galileo);

        let gpq = poll("$GPGPQ,RMC*21", SentenceType::GPQ);
        assert_eq!(gpq.constellation, Constellation::Gps);

        let gbq = poll("$GBGBQ,DTM*20", SentenceType::GBQ);
        assert_eq!(gbq.constellation, Constellation::Beidou);

        let glq = poll("$GLGLQ,GSV*3F", SentenceType::GLQ);
        assert_eq!(glq.constellation, Constellation::Glonass);
    }

    #[test]
    fn test_poll_wrong_kind_rejected() {
        let sentence = parse_nmea_sentence("$GNGNQ,RMC*21").unwrap();
        assert!(matches!(
            parse_poll(&sentence, SentenceType::GPQ),
            Err(Error::WrongSentenceHeader { .. })
        ));
    }
}
