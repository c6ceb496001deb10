use core::fmt;

use crate::parse::{SentenceMask, SentenceType};

/// Errors raised while framing and parsing NMEA sentences.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq)]
pub enum Error<'a> {
    /// The provided input was not a proper UTF-8 string
    Utf8Decoding,
    /// The checksum of the sentence was corrupt or wrong
    ChecksumMismatch { calculated: u8, found: u8 },
    /// The sentence kind is outside the accepted set of the requested
    /// parser or view
    WrongSentenceHeader {
        expected: SentenceMask,
        found: SentenceType,
    },
    /// The sentence could not be parsed because its format was invalid.
    ParsingError(
        #[cfg_attr(feature = "defmt", defmt(Debug2Format))] nom::Err<nom::error::Error<&'a str>>,
    ),
    /// The sentence was too long to be parsed, our current limit is
    /// `SENTENCE_MAX_LEN` characters.
    SentenceLength(usize),
    /// The comma-separated field count lies outside the sentence kind's
    /// bounds (checksum and terminator count as two).
    FieldCount {
        kind: SentenceType,
        min: usize,
        max: usize,
        found: usize,
    },
    /// The sentence parsed but its validity predicate failed (no fix,
    /// wrong fixed field, bad constellation, ...).
    InvalidSentence(SentenceType),
    /// The sentence formatter is unknown to this crate.
    Unknown(&'a str),
    /// A complete line has not yet been delivered by the producer.
    Incomplete,
}

impl<'a> From<nom::Err<nom::error::Error<&'a str>>> for Error<'a> {
    fn from(error: nom::Err<nom::error::Error<&'a str>>) -> Self {
        Self::ParsingError(error)
    }
}

impl fmt::Display for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Utf8Decoding => {
                write!(f, "The provided input was not a valid UTF-8 string")
            }
            Error::ChecksumMismatch { calculated, found } => write!(
                f,
                "Checksum Mismatch(calculated = {:02X}, found = {:02X})",
                calculated, found
            ),
            Error::WrongSentenceHeader { expected, found } => write!(
                f,
                "Wrong Sentence Header (expected one of '{}', found = '{}')",
                expected, found
            ),
            Error::ParsingError(e) => write!(f, "Parse error: {}", e),
            Error::SentenceLength(size) => write!(
                f,
                "The sentence was too long to be parsed, current limit is {} characters",
                size
            ),
            Error::FieldCount {
                kind,
                min,
                max,
                found,
            } => write!(
                f,
                "{} field count out of bounds (expected {}..={}, found {})",
                kind, min, max, found
            ),
            Error::InvalidSentence(kind) => {
                write!(f, "{} sentence failed its validity check", kind)
            }
            Error::Unknown(sentence) => {
                write!(f, "Unknown for the crate NMEA sentence '{}'", sentence)
            }
            Error::Incomplete => write!(f, "No complete sentence in the buffer yet"),
        }
    }
}

impl core::error::Error for Error<'_> {}

/// Errors raised by the UBX binary frame codec.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UbxError {
    /// The buffer does not begin with the `B5 62` preamble.
    BadPreamble,
    /// Fewer bytes available than the frame header or declared length
    /// requires.
    Truncated { expected: usize, found: usize },
    /// The Fletcher checksum over class..payload does not match.
    ChecksumMismatch {
        calculated: [u8; 2],
        found: [u8; 2],
    },
    /// The payload does not fit the frame assembly buffer.
    Overflow { capacity: usize },
}

impl fmt::Display for UbxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UbxError::BadPreamble => write!(f, "UBX preamble not found"),
            UbxError::Truncated { expected, found } => {
                write!(f, "UBX frame truncated (need {}, have {})", expected, found)
            }
            UbxError::ChecksumMismatch { calculated, found } => write!(
                f,
                "UBX checksum mismatch (calculated = {:02X}{:02X}, found = {:02X}{:02X})",
                calculated[0], calculated[1], found[0], found[1]
            ),
            UbxError::Overflow { capacity } => {
                write!(f, "UBX payload exceeds the {}-byte frame buffer", capacity)
            }
        }
    }
}

impl core::error::Error for UbxError {}

/// Errors raised while decoding CFG key/value pairs.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CfgError {
    /// The key's width nibble is not one of the recognised encodings; the
    /// remainder of the payload is unaligned.
    UnalignedValue { key: u32 },
    /// The payload ends mid-key or mid-value.
    ShortPayload { needed: usize, found: usize },
    /// The value width does not match the key's embedded width nibble.
    WidthMismatch { key: u32 },
    /// More pairs than the decoder's fixed capacity.
    TooManyPairs,
}

impl fmt::Display for CfgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CfgError::UnalignedValue { key } => {
                write!(f, "CFG key {:08X} carries an unknown width nibble", key)
            }
            CfgError::ShortPayload { needed, found } => {
                write!(f, "CFG payload too short (need {}, have {})", needed, found)
            }
            CfgError::WidthMismatch { key } => {
                write!(f, "CFG value width disagrees with key {:08X}", key)
            }
            CfgError::TooManyPairs => write!(f, "CFG pair list exceeds capacity"),
        }
    }
}

impl core::error::Error for CfgError {}

/// Errors raised by the configuration request/response protocol.
#[derive(Debug, PartialEq)]
pub enum ProtocolError<E> {
    /// The UART adapter failed to transmit.
    Transport(E),
    /// No matching reply arrived within the timeout.
    Timeout,
    /// The command was not acknowledged. NAK and timeout are deliberately
    /// conflated, matching the module's observable behaviour.
    NotAcknowledged,
    /// The reply frame failed to parse.
    Frame(UbxError),
    /// The reply payload carried malformed configuration data.
    Cfg(CfgError),
}

impl<E> From<UbxError> for ProtocolError<E> {
    fn from(error: UbxError) -> Self {
        ProtocolError::Frame(error)
    }
}

impl<E> From<CfgError> for ProtocolError<E> {
    fn from(error: CfgError) -> Self {
        ProtocolError::Cfg(error)
    }
}

impl<E: fmt::Debug> fmt::Display for ProtocolError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::Transport(e) => write!(f, "transport failure: {:?}", e),
            ProtocolError::Timeout => write!(f, "timed out waiting for the reply"),
            ProtocolError::NotAcknowledged => write!(f, "command was not acknowledged"),
            ProtocolError::Frame(e) => write!(f, "reply frame invalid: {}", e),
            ProtocolError::Cfg(e) => write!(f, "reply configuration data invalid: {}", e),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for ProtocolError<E> {}
