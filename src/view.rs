//! Typed views over parsed sentences.
//!
//! A caller asks for either a concrete sentence kind or a capability
//! group (position, 3-D position, altitude, time, poll target) and
//! receives the view only when the line's formatter belongs to the
//! view's accepted set AND the sentence passes format, checksum, bounds
//! and validity checks. Group views are projected out of whichever
//! concrete kind matched, so "give me a position" works identically for
//! GLL, GGA, RMC, GNS and DTM lines.

use crate::Error;
use crate::parse::{ParseResult, SentenceMask, SentenceType, dispatch_sentence, parse_nmea_sentence};
use crate::sentences::{
    Altitude, DtmData, GbsData, GgaData, GllData, GnsData, GrsData, GsaData, GstData, GsvData,
    MsgPoll, PollData, Position, Position3d, RlmData, RmcData, TxtData, UtcTime, VlwData, VtgData,
    ZdaData,
};

/// A typed view extractable from a parsed sentence.
pub trait SentenceView: Sized {
    /// The sentence kinds this view can be built from.
    const ACCEPTED: SentenceMask;

    /// Projects the view out of a successfully parsed sentence whose
    /// kind is in [`Self::ACCEPTED`].
    fn from_result(result: &ParseResult) -> Option<Self>;
}

/// Parses a line into the requested view.
///
/// Steps, in order: format check, accepted-set check, checksum, field
/// bounds, kind parse, validity predicate, projection. Any failure
/// surfaces as an error; callers that only care about presence treat
/// `Err` as absent.
pub fn parse_view<T: SentenceView>(line: &str) -> Result<T, Error<'_>> {
    let sentence = parse_nmea_sentence(line)?;
    if !T::ACCEPTED.contains(sentence.message_id) {
        return Err(Error::WrongSentenceHeader {
            expected: T::ACCEPTED,
            found: sentence.message_id,
        });
    }
    let calculated = sentence.calc_checksum();
    if calculated != sentence.checksum {
        return Err(Error::ChecksumMismatch {
            calculated,
            found: sentence.checksum,
        });
    }
    let result = dispatch_sentence(&sentence)?;
    if !result.is_valid() {
        return Err(Error::InvalidSentence(result.sentence_type()));
    }
    T::from_result(&result).ok_or(Error::WrongSentenceHeader {
        expected: T::ACCEPTED,
        found: sentence.message_id,
    })
}

macro_rules! concrete_views {
    ($($Data:ty => $Variant:ident),* $(,)*) => {
        $(
        impl SentenceView for $Data {
            const ACCEPTED: SentenceMask = SentenceType::$Variant.mask();

            fn from_result(result: &ParseResult) -> Option<Self> {
                match result {
                    ParseResult::$Variant(data) => Some(data.clone()),
                    _ => None,
                }
            }
        }
        )*
    };
}

concrete_views!(
    DtmData => DTM,
    GbsData => GBS,
    GgaData => GGA,
    GllData => GLL,
    GnsData => GNS,
    GrsData => GRS,
    GsaData => GSA,
    GstData => GST,
    GsvData => GSV,
    RlmData => RLM,
    RmcData => RMC,
    TxtData => TXT,
    VlwData => VLW,
    VtgData => VTG,
    ZdaData => ZDA,
);

impl SentenceView for PollData {
    const ACCEPTED: SentenceMask = SentenceMask::of(&[
        SentenceType::GAQ,
        SentenceType::GBQ,
        SentenceType::GLQ,
        SentenceType::GNQ,
        SentenceType::GPQ,
    ]);

    fn from_result(result: &ParseResult) -> Option<Self> {
        match result {
            ParseResult::GAQ(data)
            | ParseResult::GBQ(data)
            | ParseResult::GLQ(data)
            | ParseResult::GNQ(data)
            | ParseResult::GPQ(data) => Some(data.clone()),
            _ => None,
        }
    }
}

impl SentenceView for Position {
    const ACCEPTED: SentenceMask = SentenceMask::of(&[
        SentenceType::DTM,
        SentenceType::GGA,
        SentenceType::GLL,
        SentenceType::GNS,
        SentenceType::RMC,
    ]);

    fn from_result(result: &ParseResult) -> Option<Self> {
        match result {
            ParseResult::DTM(data) => Some(data.position.position),
            ParseResult::GGA(data) => Some(data.position.position),
            ParseResult::GLL(data) => Some(data.position),
            ParseResult::GNS(data) => Some(data.position.position),
            ParseResult::RMC(data) => Some(data.position),
            _ => None,
        }
    }
}

impl SentenceView for Position3d {
    const ACCEPTED: SentenceMask = SentenceMask::of(&[
        SentenceType::DTM,
        SentenceType::GGA,
        SentenceType::GNS,
    ]);

    fn from_result(result: &ParseResult) -> Option<Self> {
        match result {
            ParseResult::DTM(data) => Some(data.position),
            ParseResult::GGA(data) => Some(data.position),
            ParseResult::GNS(data) => Some(data.position),
            _ => None,
        }
    }
}

impl SentenceView for Altitude {
    const ACCEPTED: SentenceMask = SentenceMask::of(&[
        SentenceType::DTM,
        SentenceType::GGA,
        SentenceType::GNS,
    ]);

    fn from_result(result: &ParseResult) -> Option<Self> {
        match result {
            ParseResult::DTM(data) => Some(data.position.altitude),
            ParseResult::GGA(data) => Some(data.position.altitude),
            ParseResult::GNS(data) => Some(data.position.altitude),
            _ => None,
        }
    }
}

impl SentenceView for UtcTime {
    const ACCEPTED: SentenceMask = SentenceMask::of(&[
        SentenceType::GBS,
        SentenceType::GGA,
        SentenceType::GLL,
        SentenceType::GNS,
        SentenceType::GRS,
        SentenceType::GST,
        SentenceType::RLM,
        SentenceType::RMC,
        SentenceType::ZDA,
    ]);

    fn from_result(result: &ParseResult) -> Option<Self> {
        match result {
            ParseResult::GBS(data) => Some(data.time),
            ParseResult::GGA(data) => Some(data.time),
            ParseResult::GLL(data) => Some(data.time),
            ParseResult::GNS(data) => Some(data.time),
            ParseResult::GRS(data) => Some(data.time),
            ParseResult::GST(data) => Some(data.time),
            ParseResult::RLM(data) => Some(data.time),
            ParseResult::RMC(data) => Some(data.time),
            ParseResult::ZDA(data) => Some(data.time),
            _ => None,
        }
    }
}

impl SentenceView for MsgPoll {
    const ACCEPTED: SentenceMask = PollData::ACCEPTED;

    fn from_result(result: &ParseResult) -> Option<Self> {
        PollData::from_result(result).map(|data| data.poll)
    }
}
