use crate::Error;
use crate::field::{Field, parse_char, parse_char_in, parse_f32};
use crate::parse::{NmeaSentence, SentenceType};
use crate::sentences::constellation::Constellation;

/// VTG - Course over ground and ground speed
///
/// ```text
/// $GPVTG,77.52,T,,M,0.004,N,0.008,K,A*06
///        cogt T cogm M sogn N sogk K posMode
/// ```
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct VtgData {
    pub constellation: Constellation,
    pub course_over_ground_true: Field<f32>,
    pub course_true_unit: Field<char>,
    pub course_over_ground_magnetic: Field<f32>,
    pub course_magnetic_unit: Field<char>,
    pub speed_over_ground_knots: Field<f32>,
    pub speed_knots_unit: Field<char>,
    pub speed_over_ground_kmh: Field<f32>,
    pub speed_kmh_unit: Field<char>,
    pub pos_mode: Field<char>,
}

impl VtgData {
    /// The four unit fields are fixed (`T`/`M`/`N`/`K`); an `N` position
    /// mode means no fix.
    pub fn is_valid(&self) -> bool {
        self.constellation != Constellation::Invalid
            && !(self.pos_mode == 'N')
            && self.course_true_unit == 'T'
            && self.course_magnetic_unit == 'M'
            && self.speed_knots_unit == 'N'
            && self.speed_kmh_unit == 'K'
    }
}

pub fn parse_vtg<'a>(sentence: &NmeaSentence<'a>) -> Result<VtgData, Error<'a>> {
    if sentence.message_id != SentenceType::VTG {
        return Err(Error::WrongSentenceHeader {
            expected: SentenceType::VTG.mask(),
            found: sentence.message_id,
        });
    }
    let fields = sentence.fields()?;

    Ok(VtgData {
        constellation: sentence.constellation(),
        course_over_ground_true: parse_f32(fields[1]),
        course_true_unit: parse_char_in(fields[2], &['T']),
        course_over_ground_magnetic: parse_f32(fields[3]),
        course_magnetic_unit: parse_char_in(fields[4], &['M']),
        speed_over_ground_knots: parse_f32(fields[5]),
        speed_knots_unit: parse_char_in(fields[6], &['N']),
        speed_over_ground_kmh: parse_f32(fields[7]),
        speed_kmh_unit: parse_char_in(fields[8], &['K']),
        pos_mode: parse_char(fields[9]),
    })
}
