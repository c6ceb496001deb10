use crate::Error;
use crate::field::{Field, parse_u8, parse_u16};
use crate::parse::{NmeaSentence, SentenceType};
use crate::sentences::constellation::Constellation;
use crate::sentences::groups::UtcTime;

/// ZDA - Time and date
///
/// ```text
/// $GPZDA,082710.00,16,09,2002,00,00*64
///        time      day month year ltzh ltzn
/// ```
///
/// The local time zone fields are fixed to 00 on this receiver.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ZdaData {
    pub constellation: Constellation,
    pub time: UtcTime,
    pub day: Field<u8>,
    pub month: Field<u8>,
    pub year: Field<u16>,
    pub local_tz_hours: Field<u8>,
    pub local_tz_minutes: Field<u8>,
}

impl ZdaData {
    pub fn is_valid(&self) -> bool {
        self.constellation != Constellation::Invalid
            && (1..=31).contains(self.day.raw())
            && (1..=12).contains(self.month.raw())
            && self.local_tz_hours == 0
            && self.local_tz_minutes == 0
    }
}

pub fn parse_zda<'a>(sentence: &NmeaSentence<'a>) -> Result<ZdaData, Error<'a>> {
    if sentence.message_id != SentenceType::ZDA {
        return Err(Error::WrongSentenceHeader {
            expected: SentenceType::ZDA.mask(),
            found: sentence.message_id,
        });
    }
    let fields = sentence.fields()?;

    Ok(ZdaData {
        constellation: sentence.constellation(),
        time: UtcTime::parse(fields[1]),
        day: parse_u8(fields[2]),
        month: parse_u8(fields[3]),
        year: parse_u16(fields[4]),
        local_tz_hours: parse_u8(fields[5]),
        local_tz_minutes: parse_u8(fields[6]),
    })
}
