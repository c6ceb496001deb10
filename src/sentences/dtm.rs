use arrayvec::ArrayString;

use crate::Error;
use crate::field::Field;
use crate::parse::{NmeaSentence, SentenceType};
use crate::sentences::constellation::Constellation;
use crate::sentences::groups::{Position3d, SHORT_STR_LEN};
use crate::sentences::utils::str_field;

/// DTM - Datum reference
///
/// ```text
/// $GPDTM,W84,,0.0,N,0.0,E,0.0,W84*6F
///        datum sub latOfs N lonOfs E altOfs refDatum
/// ```
///
/// The offsets are relative to the reference datum, in the usual
/// degrees-minutes form for latitude/longitude and metres for altitude.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct DtmData {
    pub constellation: Constellation,
    #[cfg_attr(feature = "defmt", defmt(Debug2Format))]
    pub datum: Field<ArrayString<SHORT_STR_LEN>>,
    #[cfg_attr(feature = "defmt", defmt(Debug2Format))]
    pub sub_datum: Field<ArrayString<SHORT_STR_LEN>>,
    pub position: Position3d,
    #[cfg_attr(feature = "defmt", defmt(Debug2Format))]
    pub ref_datum: Field<ArrayString<SHORT_STR_LEN>>,
}

impl DtmData {
    /// Only WGS-84 referenced datums are meaningful to the consumer.
    pub fn is_valid(&self) -> bool {
        self.constellation != Constellation::Invalid
            && self.position.is_valid()
            && self
                .ref_datum
                .get()
                .is_some_and(|datum| datum.as_str() == "W84")
    }
}

pub fn parse_dtm<'a>(sentence: &NmeaSentence<'a>) -> Result<DtmData, Error<'a>> {
    if sentence.message_id != SentenceType::DTM {
        return Err(Error::WrongSentenceHeader {
            expected: SentenceType::DTM.mask(),
            found: sentence.message_id,
        });
    }
    let fields = sentence.fields()?;

    Ok(DtmData {
        constellation: sentence.constellation(),
        datum: str_field(fields[1]),
        sub_datum: str_field(fields[2]),
        position: Position3d::parse(fields[3], fields[4], fields[5], fields[6], fields[7]),
        ref_datum: str_field(fields[8]),
    })
}
