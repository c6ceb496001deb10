//! Host-side protocol core for u-blox NEO-M9N GNSS receivers.
//!
//! Two wire protocols share one serial stream: textual NMEA 0183
//! sentences and binary UBX frames. This crate provides the pieces the
//! host needs between the UART/DMA adapter and the application:
//!
//! - [`buffer::RingBuffer`]: the DMA-fed circular receive buffer with
//!   wrap-aware search and split
//! - [`stream::Receiver`]: CRLF line extraction with producer
//!   backpressure
//! - [`parse_str`]/[`parse_bytes`]: NMEA framing, checksum and dispatch
//!   over the twenty supported sentence kinds
//! - [`view::parse_view`]: typed views, by concrete kind or by
//!   capability group (position, altitude, time, poll)
//! - [`ubx`]: UBX frame codec, CFG key/value store and the
//!   VALGET/VALSET configuration transactions
//!
//! # Example
//!
//! ```
//! use neom9n::{Position, parse_view};
//!
//! let line = "$GNGLL,4916.45,N,12311.12,W,225444.00,A,A*6C";
//! let position: Position = parse_view(line).unwrap();
//!
//! assert!((position.latitude().get().unwrap() - 49.274166).abs() < 1e-4);
//! assert!((position.longitude().get().unwrap() + 123.185333).abs() < 1e-4);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod buffer;
mod error;
pub mod field;
mod parse;
pub mod sentences;
pub mod stream;
pub mod ubx;
pub mod view;

pub use error::{CfgError, Error, ProtocolError, UbxError};
pub use field::Field;
pub use parse::{
    NmeaSentence, ParseResult, SENTENCE_MAX_LEN, SentenceMask, SentenceType, checksum, parse_bytes,
    parse_nmea_sentence, parse_str,
};
pub use sentences::{
    Altitude, Constellation, DtmData, FixQuality, GbsData, GgaData, GllData, GnsData, GrsData,
    GsaData,
    GstData, GsvData, MsgPoll, PollData, Position, Position3d, RlmData, RmcData, SatInfo, TxtData,
    UtcTime, VlwData, VtgData, ZdaData, deg_min_to_dec_deg,
};
pub use view::{SentenceView, parse_view};
