use crate::Error;
use crate::field::{Field, parse_f32, parse_u8};
use crate::parse::{NmeaSentence, SentenceType};
use crate::sentences::constellation::Constellation;
use crate::sentences::groups::UtcTime;

/// Residual slots carried by one GRS sentence.
pub const GRS_RESIDUAL_SLOTS: usize = 12;

/// GRS - GNSS range residuals
///
/// ```text
/// $GNGRS,104148.00,1,2.6,2.2,-1.6,-1.1,-1.7,-1.5,5.8,1.7,,,,,1,1*52
///        time      mode <12 residual slots>              systemId signalId
/// ```
///
/// Residual slots line up with the satellite slots of the matching GSA
/// sentence.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GrsData {
    pub constellation: Constellation,
    pub time: UtcTime,
    /// Residual computation method: 0 used in the fix, 1 computed after
    /// the fix.
    pub mode: Field<u8>,
    pub residuals: [Field<f32>; GRS_RESIDUAL_SLOTS],
    pub system_id: Field<u8>,
    pub signal_id: Field<u8>,
}

impl GrsData {
    pub fn is_valid(&self) -> bool {
        self.constellation != Constellation::Invalid
    }
}

pub fn parse_grs<'a>(sentence: &NmeaSentence<'a>) -> Result<GrsData, Error<'a>> {
    if sentence.message_id != SentenceType::GRS {
        return Err(Error::WrongSentenceHeader {
            expected: SentenceType::GRS.mask(),
            found: sentence.message_id,
        });
    }
    let fields = sentence.fields()?;

    let mut residuals = [Field::invalid(); GRS_RESIDUAL_SLOTS];
    for (slot, residual) in residuals.iter_mut().enumerate() {
        *residual = parse_f32(fields[3 + slot]);
    }

    Ok(GrsData {
        constellation: sentence.constellation(),
        time: UtcTime::parse(fields[1]),
        mode: parse_u8(fields[2]),
        residuals,
        system_id: parse_u8(fields[15]),
        signal_id: parse_u8(fields[16]),
    })
}
