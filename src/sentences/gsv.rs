use heapless::Vec;

use crate::Error;
use crate::field::{Field, parse_u8, parse_u16};
use crate::parse::{NmeaSentence, SentenceType};
use crate::sentences::constellation::Constellation;

/// Satellite groups carried by one GSV sentence, at most four.
pub const GSV_MAX_GROUPS: usize = 4;

/// One repeated satellite group of a GSV sentence.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SatInfo {
    /// Satellite id
    pub svid: u8,
    /// Elevation, degrees
    pub elevation: u8,
    /// Azimuth, degrees
    pub azimuth: u16,
    /// Carrier-to-noise ratio, dBHz
    pub cno: u8,
}

/// GSV - GNSS satellites in view
///
/// ```text
/// $GPGSV,3,1,09,09,,,17,10,,,40,12,,,49,13,,,35,1*6F
///        n m sv {svid elv az cno} x1..4      signalId
/// ```
///
/// Between one and four satellite groups per sentence; a group with any
/// unparsable member is carried as one invalid [`Field`].
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GsvData {
    pub constellation: Constellation,
    pub num_messages: Field<u8>,
    pub message_num: Field<u8>,
    pub num_satellites: Field<u8>,
    pub satellites: Vec<Field<SatInfo>, GSV_MAX_GROUPS>,
    pub signal_id: Field<u8>,
}

impl GsvData {
    pub fn is_valid(&self) -> bool {
        self.constellation != Constellation::Invalid
    }
}

pub fn parse_gsv<'a>(sentence: &NmeaSentence<'a>) -> Result<GsvData, Error<'a>> {
    if sentence.message_id != SentenceType::GSV {
        return Err(Error::WrongSentenceHeader {
            expected: SentenceType::GSV.mask(),
            found: sentence.message_id,
        });
    }
    let fields = sentence.fields()?;

    // Repeated groups = (total field count - fixed fields) / group width,
    // with the checksum and terminator counting into the total.
    let num_groups = (fields.len() + 2 - 6) / 4;

    let mut satellites: Vec<Field<SatInfo>, GSV_MAX_GROUPS> = Vec::new();
    for group in 0..num_groups.min(GSV_MAX_GROUPS) {
        let svid = parse_u8(fields[4 + 4 * group]);
        let elevation = parse_u8(fields[5 + 4 * group]);
        let azimuth = parse_u16(fields[6 + 4 * group]);
        let cno = parse_u8(fields[7 + 4 * group]);

        let valid = svid.is_valid() && elevation.is_valid() && azimuth.is_valid() && cno.is_valid();
        let info = SatInfo {
            svid: *svid.raw(),
            elevation: *elevation.raw(),
            azimuth: *azimuth.raw(),
            cno: *cno.raw(),
        };
        // Capacity bounded by the loop range.
        let _ = satellites.push(Field::new(info, valid));
    }

    let signal_id = fields
        .get(4 + 4 * num_groups)
        .copied()
        .map(parse_u8)
        .unwrap_or_default();

    Ok(GsvData {
        constellation: sentence.constellation(),
        num_messages: parse_u8(fields[1]),
        message_num: parse_u8(fields[2]),
        num_satellites: parse_u8(fields[3]),
        satellites,
        signal_id,
    })
}
