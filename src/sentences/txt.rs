use arrayvec::ArrayString;

use crate::Error;
use crate::field::{Field, parse_u8};
use crate::parse::{NmeaSentence, SentenceType};
use crate::sentences::constellation::Constellation;
use crate::sentences::utils::str_field;

/// Longest free text carried by one TXT sentence.
pub const TEXT_STR_LEN: usize = 64;

/// TXT - Text transmission
///
/// ```text
/// $GPTXT,01,01,02,u-blox ag - www.u-blox.com*50
///        n  m  type text
/// ```
///
/// Message type: 0 error, 1 warning, 2 notice, 7 user.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TxtData {
    pub constellation: Constellation,
    pub num_messages: Field<u8>,
    pub message_num: Field<u8>,
    pub message_type: Field<u8>,
    #[cfg_attr(feature = "defmt", defmt(Debug2Format))]
    pub text: Field<ArrayString<TEXT_STR_LEN>>,
}

impl TxtData {
    pub fn is_valid(&self) -> bool {
        self.constellation != Constellation::Invalid
    }
}

pub fn parse_txt<'a>(sentence: &NmeaSentence<'a>) -> Result<TxtData, Error<'a>> {
    if sentence.message_id != SentenceType::TXT {
        return Err(Error::WrongSentenceHeader {
            expected: SentenceType::TXT.mask(),
            found: sentence.message_id,
        });
    }
    let fields = sentence.fields()?;

    Ok(TxtData {
        constellation: sentence.constellation(),
        num_messages: parse_u8(fields[1]),
        message_num: parse_u8(fields[2]),
        message_type: parse_u8(fields[3]),
        text: str_field(fields[4]),
    })
}
