//! NMEA 0183 sentence framing: format grammar, checksum, field split and
//! dispatch to the kind-specific parsers.

use core::fmt;

use nom::{
    IResult, Parser as _,
    bytes::complete::{tag, take_until, take_while_m_n},
    character::complete::char,
    combinator::{eof, map_res, opt, peek},
};

use crate::Error;
use crate::sentences::{
    Constellation, parse_dtm, parse_gbs, parse_gga, parse_gll, parse_gns, parse_grs, parse_gsa,
    parse_gst, parse_gsv, parse_poll, parse_rlm, parse_rmc, parse_txt, parse_vlw, parse_vtg,
    parse_zda,
};
use crate::sentences::{
    DtmData, GbsData, GgaData, GllData, GnsData, GrsData, GsaData, GstData, GsvData, PollData,
    RlmData, RmcData, TxtData, VlwData, VtgData, ZdaData,
};

/// Maximum accepted sentence length. NMEA 0183 caps lines at 82
/// characters but u-blox receivers stretch past that on some sentences.
pub const SENTENCE_MAX_LEN: usize = 102;

pub(crate) const MAX_FIELDS: usize = 24;

pub(crate) type FieldVec<'a> = heapless::Vec<&'a str, MAX_FIELDS>;

/// XOR checksum over the bytes between `$` and `*`, exclusive.
pub fn checksum<'a, I: Iterator<Item = &'a u8>>(bytes: I) -> u8 {
    bytes.fold(0, |c, x| c ^ x)
}

/// The three-letter sentence formatter codes understood by this crate.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SentenceType {
    DTM,
    GAQ,
    GBQ,
    GBS,
    GGA,
    GLL,
    GLQ,
    GNQ,
    GNS,
    GPQ,
    GRS,
    GSA,
    GST,
    GSV,
    RLM,
    RMC,
    TXT,
    VLW,
    VTG,
    ZDA,
}

impl SentenceType {
    pub const ALL: [SentenceType; 20] = [
        SentenceType::DTM,
        SentenceType::GAQ,
        SentenceType::GBQ,
        SentenceType::GBS,
        SentenceType::GGA,
        SentenceType::GLL,
        SentenceType::GLQ,
        SentenceType::GNQ,
        SentenceType::GNS,
        SentenceType::GPQ,
        SentenceType::GRS,
        SentenceType::GSA,
        SentenceType::GST,
        SentenceType::GSV,
        SentenceType::RLM,
        SentenceType::RMC,
        SentenceType::TXT,
        SentenceType::VLW,
        SentenceType::VTG,
        SentenceType::ZDA,
    ];

    pub fn from_formatter(s: &str) -> Option<Self> {
        let found = match s {
            "DTM" => SentenceType::DTM,
            "GAQ" => SentenceType::GAQ,
            "GBQ" => SentenceType::GBQ,
            "GBS" => SentenceType::GBS,
            "GGA" => SentenceType::GGA,
            "GLL" => SentenceType::GLL,
            "GLQ" => SentenceType::GLQ,
            "GNQ" => SentenceType::GNQ,
            "GNS" => SentenceType::GNS,
            "GPQ" => SentenceType::GPQ,
            "GRS" => SentenceType::GRS,
            "GSA" => SentenceType::GSA,
            "GST" => SentenceType::GST,
            "GSV" => SentenceType::GSV,
            "RLM" => SentenceType::RLM,
            "RMC" => SentenceType::RMC,
            "TXT" => SentenceType::TXT,
            "VLW" => SentenceType::VLW,
            "VTG" => SentenceType::VTG,
            "ZDA" => SentenceType::ZDA,
            _ => return None,
        };
        Some(found)
    }

    /// Acceptable comma-separated field count for the kind, counting the
    /// checksum and terminator as two extra fields. Kinds with repeated
    /// groups (GSV) are the only ones where the bounds differ.
    pub(crate) fn field_bounds(self) -> (usize, usize) {
        match self {
            SentenceType::DTM => (11, 11),
            SentenceType::GAQ
            | SentenceType::GBQ
            | SentenceType::GLQ
            | SentenceType::GNQ
            | SentenceType::GPQ => (4, 4),
            SentenceType::GBS => (13, 13),
            SentenceType::GGA => (17, 17),
            SentenceType::GLL => (10, 10),
            SentenceType::GNS => (16, 16),
            SentenceType::GRS => (19, 19),
            SentenceType::GSA => (21, 21),
            SentenceType::GST => (11, 11),
            SentenceType::GSV => (11, 23),
            SentenceType::RLM => (7, 7),
            SentenceType::RMC => (16, 16),
            SentenceType::TXT => (7, 7),
            SentenceType::VLW => (11, 11),
            SentenceType::VTG => (12, 12),
            SentenceType::ZDA => (9, 9),
        }
    }

    /// The singleton mask for this kind.
    pub const fn mask(self) -> SentenceMask {
        SentenceMask {
            mask: 1 << self as u8,
        }
    }
}

impl fmt::Display for SentenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A set of sentence kinds, used for the accepted-type sets of parsers
/// and views.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SentenceMask {
    mask: u32,
}

impl SentenceMask {
    pub const fn of(types: &[SentenceType]) -> Self {
        let mut mask = 0u32;
        let mut i = 0;
        while i < types.len() {
            mask |= 1 << types[i] as u8;
            i += 1;
        }
        SentenceMask { mask }
    }

    pub fn contains(self, sentence_type: SentenceType) -> bool {
        self.mask & sentence_type.mask().mask != 0
    }
}

impl fmt::Display for SentenceMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for sentence_type in SentenceType::ALL {
            if self.contains(sentence_type) {
                if !first {
                    write!(f, "|")?;
                }
                write!(f, "{}", sentence_type)?;
                first = false;
            }
        }
        if first {
            write!(f, "none")?;
        }
        Ok(())
    }
}

/// A sentence that passed the format check, split into its talker,
/// formatter and body. The checksum is carried but not yet verified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NmeaSentence<'a> {
    pub talker: &'a str,
    pub message_id: SentenceType,
    /// Everything between `$` and `*`, header field included.
    pub body: &'a str,
    pub checksum: u8,
}

impl<'a> NmeaSentence<'a> {
    pub fn calc_checksum(&self) -> u8 {
        checksum(self.body.as_bytes().iter())
    }

    pub fn constellation(&self) -> Constellation {
        Constellation::from_talker(self.talker)
    }

    /// Splits the body on `,` after verifying the kind's field-count
    /// bounds; the kind parsers index into the result without further
    /// checks, so the bounds run first.
    pub(crate) fn fields(&self) -> Result<FieldVec<'a>, Error<'a>> {
        let (min, max) = self.message_id.field_bounds();
        let found = self.body.split(',').count() + 2;
        if found < min || found > max {
            return Err(Error::FieldCount {
                kind: self.message_id,
                min,
                max,
                found,
            });
        }

        let mut fields = FieldVec::new();
        for part in self.body.split(',') {
            // The bounds check above caps the count below the capacity.
            let _ = fields.push(part);
        }
        Ok(fields)
    }
}

fn is_header_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit()
}

fn do_parse_sentence(i: &str) -> IResult<&str, (&str, u8)> {
    let (i, _) = char('$').parse(i)?;
    let (i, body) = take_until("*").parse(i)?;
    let (i, _) = char('*').parse(i)?;
    let (i, checksum) = map_res(
        take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()),
        |hex: &str| u8::from_str_radix(hex, 16),
    )
    .parse(i)?;
    let (i, _) = opt(tag("\r\n")).parse(i)?;
    let (i, _) = eof(i)?;
    Ok((i, (body, checksum)))
}

fn do_parse_header(body: &str) -> IResult<&str, (&str, &str)> {
    let (rest, talker) = take_while_m_n(2, 2, is_header_char).parse(body)?;
    let (rest, formatter) = take_while_m_n(3, 3, is_header_char).parse(rest)?;
    let (rest, _) = peek(char(',')).parse(rest)?;
    Ok((rest, (talker, formatter)))
}

/// Runs the format check on one line and splits out talker, formatter,
/// body and checksum. Equivalent to the grammar
/// `^\$[A-Z0-9]{2}[A-Z0-9]{3},.*\*[0-9A-Fa-f]{2}(\r\n)?$`.
///
/// The checksum is extracted but not verified here; [`parse_str`]
/// verifies it before dispatching.
pub fn parse_nmea_sentence(line: &str) -> Result<NmeaSentence<'_>, Error<'_>> {
    if line.len() > SENTENCE_MAX_LEN {
        return Err(Error::SentenceLength(line.len()));
    }
    let (_, (body, checksum)) = do_parse_sentence(line)?;
    let (_, (talker, formatter)) = do_parse_header(body)?;
    let message_id = SentenceType::from_formatter(formatter).ok_or(Error::Unknown(formatter))?;

    Ok(NmeaSentence {
        talker,
        message_id,
        body,
        checksum,
    })
}

/// The outcome of parsing one sentence of any supported kind.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::large_enum_variant)]
pub enum ParseResult {
    DTM(DtmData),
    GAQ(PollData),
    GBQ(PollData),
    GBS(GbsData),
    GGA(GgaData),
    GLL(GllData),
    GLQ(PollData),
    GNQ(PollData),
    GNS(GnsData),
    GPQ(PollData),
    GRS(GrsData),
    GSA(GsaData),
    GST(GstData),
    GSV(GsvData),
    RLM(RlmData),
    RMC(RmcData),
    TXT(TxtData),
    VLW(VlwData),
    VTG(VtgData),
    ZDA(ZdaData),
}

impl ParseResult {
    pub fn sentence_type(&self) -> SentenceType {
        match self {
            ParseResult::DTM(_) => SentenceType::DTM,
            ParseResult::GAQ(_) => SentenceType::GAQ,
            ParseResult::GBQ(_) => SentenceType::GBQ,
            ParseResult::GBS(_) => SentenceType::GBS,
            ParseResult::GGA(_) => SentenceType::GGA,
            ParseResult::GLL(_) => SentenceType::GLL,
            ParseResult::GLQ(_) => SentenceType::GLQ,
            ParseResult::GNQ(_) => SentenceType::GNQ,
            ParseResult::GNS(_) => SentenceType::GNS,
            ParseResult::GPQ(_) => SentenceType::GPQ,
            ParseResult::GRS(_) => SentenceType::GRS,
            ParseResult::GSA(_) => SentenceType::GSA,
            ParseResult::GST(_) => SentenceType::GST,
            ParseResult::GSV(_) => SentenceType::GSV,
            ParseResult::RLM(_) => SentenceType::RLM,
            ParseResult::RMC(_) => SentenceType::RMC,
            ParseResult::TXT(_) => SentenceType::TXT,
            ParseResult::VLW(_) => SentenceType::VLW,
            ParseResult::VTG(_) => SentenceType::VTG,
            ParseResult::ZDA(_) => SentenceType::ZDA,
        }
    }

    /// The kind-specific validity predicate of the contained sentence.
    pub fn is_valid(&self) -> bool {
        match self {
            ParseResult::DTM(data) => data.is_valid(),
            ParseResult::GAQ(data)
            | ParseResult::GBQ(data)
            | ParseResult::GLQ(data)
            | ParseResult::GNQ(data)
            | ParseResult::GPQ(data) => data.is_valid(),
            ParseResult::GBS(data) => data.is_valid(),
            ParseResult::GGA(data) => data.is_valid(),
            ParseResult::GLL(data) => data.is_valid(),
            ParseResult::GNS(data) => data.is_valid(),
            ParseResult::GRS(data) => data.is_valid(),
            ParseResult::GSA(data) => data.is_valid(),
            ParseResult::GST(data) => data.is_valid(),
            ParseResult::GSV(data) => data.is_valid(),
            ParseResult::RLM(data) => data.is_valid(),
            ParseResult::RMC(data) => data.is_valid(),
            ParseResult::TXT(data) => data.is_valid(),
            ParseResult::VLW(data) => data.is_valid(),
            ParseResult::VTG(data) => data.is_valid(),
            ParseResult::ZDA(data) => data.is_valid(),
        }
    }
}

pub(crate) fn dispatch_sentence<'a>(sentence: &NmeaSentence<'a>) -> Result<ParseResult, Error<'a>> {
    match sentence.message_id {
        SentenceType::DTM => parse_dtm(sentence).map(ParseResult::DTM),
        SentenceType::GAQ => parse_poll(sentence, SentenceType::GAQ).map(ParseResult::GAQ),
        SentenceType::GBQ => parse_poll(sentence, SentenceType::GBQ).map(ParseResult::GBQ),
        SentenceType::GBS => parse_gbs(sentence).map(ParseResult::GBS),
        SentenceType::GGA => parse_gga(sentence).map(ParseResult::GGA),
        SentenceType::GLL => parse_gll(sentence).map(ParseResult::GLL),
        SentenceType::GLQ => parse_poll(sentence, SentenceType::GLQ).map(ParseResult::GLQ),
        SentenceType::GNQ => parse_poll(sentence, SentenceType::GNQ).map(ParseResult::GNQ),
        SentenceType::GNS => parse_gns(sentence).map(ParseResult::GNS),
        SentenceType::GPQ => parse_poll(sentence, SentenceType::GPQ).map(ParseResult::GPQ),
        SentenceType::GRS => parse_grs(sentence).map(ParseResult::GRS),
        SentenceType::GSA => parse_gsa(sentence).map(ParseResult::GSA),
        SentenceType::GST => parse_gst(sentence).map(ParseResult::GST),
        SentenceType::GSV => parse_gsv(sentence).map(ParseResult::GSV),
        SentenceType::RLM => parse_rlm(sentence).map(ParseResult::RLM),
        SentenceType::RMC => parse_rmc(sentence).map(ParseResult::RMC),
        SentenceType::TXT => parse_txt(sentence).map(ParseResult::TXT),
        SentenceType::VLW => parse_vlw(sentence).map(ParseResult::VLW),
        SentenceType::VTG => parse_vtg(sentence).map(ParseResult::VTG),
        SentenceType::ZDA => parse_zda(sentence).map(ParseResult::ZDA),
    }
}

/// Parses one complete sentence: format check, checksum verification,
/// then dispatch to the kind parser. Validity is NOT enforced here;
/// callers inspect [`ParseResult::is_valid`] or go through
/// [`crate::view::parse_view`].
pub fn parse_str(line: &str) -> Result<ParseResult, Error<'_>> {
    let sentence = parse_nmea_sentence(line)?;
    let calculated = sentence.calc_checksum();
    if calculated != sentence.checksum {
        return Err(Error::ChecksumMismatch {
            calculated,
            found: sentence.checksum,
        });
    }
    dispatch_sentence(&sentence)
}

/// [`parse_str`] over raw bytes; non-UTF-8 input is rejected up front.
pub fn parse_bytes(line: &[u8]) -> Result<ParseResult, Error<'_>> {
    let line = core::str::from_utf8(line).map_err(|_| Error::Utf8Decoding)?;
    parse_str(line)
}
