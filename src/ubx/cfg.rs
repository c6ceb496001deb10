//! Configuration key/value store.
//!
//! Keys are 32-bit identifiers whose bits 30..28 encode the width of the
//! attached value. On the wire the key travels big-endian while the
//! value (and everything else in UBX payloads) travels little-endian, so
//! both byte orders meet in this module.

use core::fmt;

use heapless::Vec;

use crate::CfgError;

/// Largest pair list accepted in one message, per the interface
/// description.
pub const MAX_CFG_PAIRS: usize = 64;

/// Well-known configuration keys.
pub mod keys {
    use super::CfgKey;

    /// Dynamic platform model selector.
    pub const NAVSPG_DYNMODEL: CfgKey = CfgKey(0x2011_0021);
}

/// Dynamic platform models accepted by `NAVSPG-DYNMODEL`.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DynModel {
    Portable = 0,
    Stationary = 2,
    Pedestrian = 3,
    Automotive = 4,
    Sea = 5,
    /// Airborne, under 1g acceleration
    Air1 = 6,
    /// Airborne, under 2g acceleration
    Air2 = 7,
    /// Airborne, under 4g acceleration
    Air4 = 8,
    Wrist = 9,
    Bike = 10,
    Mower = 11,
    Escooter = 12,
}

/// Configuration storage layers on the module.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CfgLayer {
    Ram = 0,
    /// Battery-backed RAM
    Bbr = 1,
    Flash = 2,
    Default = 7,
}

impl CfgLayer {
    pub fn from_u8(layer: u8) -> Self {
        match layer {
            0 => CfgLayer::Ram,
            1 => CfgLayer::Bbr,
            2 => CfgLayer::Flash,
            _ => CfgLayer::Default,
        }
    }
}

/// Write-target bitmask for CFG-VALSET: RAM bit 0, BBR bit 1, FLASH
/// bit 2.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CfgLayers(u8);

impl CfgLayers {
    pub const RAM: CfgLayers = CfgLayers(1 << 0);
    pub const BBR: CfgLayers = CfgLayers(1 << 1);
    pub const FLASH: CfgLayers = CfgLayers(1 << 2);

    pub const fn union(self, other: CfgLayers) -> CfgLayers {
        CfgLayers(self.0 | other.0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl From<CfgLayer> for CfgLayers {
    /// Read-layer to write-mask mapping; the DEFAULT layer has no
    /// writable bit and falls back to RAM.
    fn from(layer: CfgLayer) -> Self {
        match layer {
            CfgLayer::Ram | CfgLayer::Default => CfgLayers::RAM,
            CfgLayer::Bbr => CfgLayers::BBR,
            CfgLayer::Flash => CfgLayers::FLASH,
        }
    }
}

/// A 32-bit configuration key with the value width encoded in bits
/// 30..28.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CfgKey(pub u32);

impl CfgKey {
    /// The value width in bytes encoded in the key, or `None` for an
    /// unrecognised width nibble.
    pub const fn value_width(self) -> Option<usize> {
        match (self.0 >> 28) & 0x7 {
            0x1 | 0x2 => Some(1),
            0x3 => Some(2),
            0x4 => Some(4),
            0x5 => Some(8),
            _ => None,
        }
    }

    /// Keys travel big-endian on the wire, unlike the rest of a UBX
    /// payload.
    pub(crate) fn to_wire(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    pub(crate) fn from_wire(bytes: [u8; 4]) -> Self {
        CfgKey(u32::from_be_bytes(bytes))
    }
}

impl fmt::Display for CfgKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

/// A configuration value in one of the four wire widths.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CfgValue {
    U1(u8),
    U2(u16),
    U4(u32),
    U8(u64),
}

impl CfgValue {
    pub const fn width(self) -> usize {
        match self {
            CfgValue::U1(_) => 1,
            CfgValue::U2(_) => 2,
            CfgValue::U4(_) => 4,
            CfgValue::U8(_) => 8,
        }
    }

    /// The value widened to u64 regardless of wire width.
    pub const fn as_u64(self) -> u64 {
        match self {
            CfgValue::U1(v) => v as u64,
            CfgValue::U2(v) => v as u64,
            CfgValue::U4(v) => v as u64,
            CfgValue::U8(v) => v,
        }
    }
}

/// One key/value pair of a CFG message.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CfgPair {
    pub key: CfgKey,
    pub value: CfgValue,
}

impl CfgPair {
    /// Builds a pair, enforcing that the value width matches the key's
    /// embedded width nibble.
    pub fn new(key: CfgKey, value: CfgValue) -> Result<Self, CfgError> {
        match key.value_width() {
            Some(width) if width == value.width() => Ok(CfgPair { key, value }),
            Some(_) => Err(CfgError::WidthMismatch { key: key.0 }),
            None => Err(CfgError::UnalignedValue { key: key.0 }),
        }
    }
}

/// Encodes a pair list: big-endian key, little-endian value, width from
/// the key, concatenated.
pub fn encode_pairs<const CAP: usize>(
    pairs: &[CfgPair],
    out: &mut Vec<u8, CAP>,
) -> Result<(), CfgError> {
    for pair in pairs {
        let width = pair.value.width();
        let le = pair.value.as_u64().to_le_bytes();
        if out.extend_from_slice(&pair.key.to_wire()).is_err()
            || out.extend_from_slice(&le[..width]).is_err()
        {
            return Err(CfgError::TooManyPairs);
        }
    }
    Ok(())
}

/// Decodes pairs from the trailing portion of a CFG-VALGET response
/// payload.
///
/// Pairs decoded before an error are left in `out`: an unrecognised
/// width nibble makes the remainder of the payload unaligned, so
/// decoding aborts there and the caller decides whether the prefix is
/// usable.
pub fn decode_pairs(
    mut bytes: &[u8],
    out: &mut Vec<CfgPair, MAX_CFG_PAIRS>,
) -> Result<(), CfgError> {
    while !bytes.is_empty() {
        if bytes.len() < 4 {
            return Err(CfgError::ShortPayload {
                needed: 4,
                found: bytes.len(),
            });
        }
        let key = CfgKey::from_wire([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let width = key
            .value_width()
            .ok_or(CfgError::UnalignedValue { key: key.0 })?;
        if bytes.len() < 4 + width {
            return Err(CfgError::ShortPayload {
                needed: 4 + width,
                found: bytes.len(),
            });
        }

        let mut le = [0u8; 8];
        le[..width].copy_from_slice(&bytes[4..4 + width]);
        let raw = u64::from_le_bytes(le);
        let value = match width {
            1 => CfgValue::U1(raw as u8),
            2 => CfgValue::U2(raw as u16),
            4 => CfgValue::U4(raw as u32),
            _ => CfgValue::U8(raw),
        };

        if out.push(CfgPair { key, value }).is_err() {
            return Err(CfgError::TooManyPairs);
        }
        bytes = &bytes[4 + width..];
    }
    Ok(())
}
