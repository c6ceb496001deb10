//! UBX binary protocol: frame codec, configuration key/value store and
//! the request/response transactions.
//!
//! Frame layout: `B5 62 | class | id | len (LE) | payload | ck_a ck_b`,
//! with the two checksum bytes produced by the 8-bit Fletcher recurrence
//! over class through the last payload byte.

pub mod cfg;
pub mod protocol;

use heapless::Vec;

use crate::UbxError;
use crate::buffer::RingBuffer;

/// Frame boundary marker.
pub const PREAMBLE: [u8; 2] = [0xB5, 0x62];

/// Largest payload the frame assembly buffer accepts. A full 64-pair
/// CFG-VALGET response stays well below this.
pub const MAX_PAYLOAD: usize = 1024;

/// Frame bytes outside the payload: preamble, class, id, length,
/// checksum.
pub const FRAME_OVERHEAD: usize = 8;

/// Assembled frame capacity.
pub const MAX_FRAME: usize = MAX_PAYLOAD + FRAME_OVERHEAD;

pub const CLASS_ACK: u8 = 0x05;
pub const ID_ACK_NAK: u8 = 0x00;
pub const ID_ACK_ACK: u8 = 0x01;

pub const CLASS_CFG: u8 = 0x06;
pub const ID_CFG_VALSET: u8 = 0x8A;
pub const ID_CFG_VALGET: u8 = 0x8B;

/// 8-bit Fletcher checksum over the given region:
/// `A += byte; B += A`, both wrapping.
pub fn fletcher_checksum(region: &[u8]) -> (u8, u8) {
    let mut ck_a: u8 = 0;
    let mut ck_b: u8 = 0;
    for &byte in region {
        ck_a = ck_a.wrapping_add(byte);
        ck_b = ck_b.wrapping_add(ck_a);
    }
    (ck_a, ck_b)
}

/// A parsed frame borrowing its payload from the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UbxFrame<'a> {
    pub class: u8,
    pub id: u8,
    pub payload: &'a [u8],
}

/// Builds a complete frame around the payload.
pub fn build_frame(class: u8, id: u8, payload: &[u8]) -> Result<Vec<u8, MAX_FRAME>, UbxError> {
    if payload.len() > MAX_PAYLOAD {
        return Err(UbxError::Overflow {
            capacity: MAX_PAYLOAD,
        });
    }
    let mut frame: Vec<u8, MAX_FRAME> = Vec::new();
    let _ = frame.extend_from_slice(&PREAMBLE);
    let _ = frame.push(class);
    let _ = frame.push(id);
    let _ = frame.extend_from_slice(&(payload.len() as u16).to_le_bytes());
    let _ = frame.extend_from_slice(payload);

    let (ck_a, ck_b) = fletcher_checksum(&frame[2..]);
    let _ = frame.push(ck_a);
    let _ = frame.push(ck_b);
    Ok(frame)
}

/// Parses a frame that starts at offset 0 of `buf`. Trailing bytes
/// beyond the frame are ignored.
pub fn parse_frame(buf: &[u8]) -> Result<UbxFrame<'_>, UbxError> {
    if buf.len() < FRAME_OVERHEAD {
        return Err(UbxError::Truncated {
            expected: FRAME_OVERHEAD,
            found: buf.len(),
        });
    }
    if buf[..2] != PREAMBLE {
        return Err(UbxError::BadPreamble);
    }
    let length = u16::from_le_bytes([buf[4], buf[5]]) as usize;
    let total = length + FRAME_OVERHEAD;
    if buf.len() < total {
        return Err(UbxError::Truncated {
            expected: total,
            found: buf.len(),
        });
    }

    let (ck_a, ck_b) = fletcher_checksum(&buf[2..6 + length]);
    let found = [buf[6 + length], buf[7 + length]];
    if [ck_a, ck_b] != found {
        return Err(UbxError::ChecksumMismatch {
            calculated: [ck_a, ck_b],
            found,
        });
    }

    Ok(UbxFrame {
        class: buf[2],
        id: buf[3],
        payload: &buf[6..6 + length],
    })
}

/// Wrap-aware scan for the next frame with the given class/id in the
/// ring, starting at `start`. Returns the absolute ring index of the
/// preamble.
pub fn find_frame<const N: usize>(
    ring: &RingBuffer<N>,
    class: u8,
    id: u8,
    start: usize,
) -> Option<usize> {
    ring.find(&[PREAMBLE[0], PREAMBLE[1], class, id], start)
}

/// Reads the little-endian payload length of a frame located at `at`,
/// unwrapping across the seam (the two length bytes may straddle it).
pub fn frame_length_at<const N: usize>(ring: &RingBuffer<N>, at: usize) -> usize {
    u16::from_le_bytes([ring.byte_at(at + 4), ring.byte_at(at + 5)]) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fletcher_checksum() {
        // CFG-VALSET header region: class, id, length 9.
        let (ck_a, ck_b) = fletcher_checksum(&[0x06, 0x8A, 0x09, 0x00]);
        assert_eq!(ck_a, 0x99);
        assert_eq!(ck_b, 0xC8);
    }

    #[test]
    fn test_build_parse_round_trip() {
        let payload = [0x01, 0x02, 0x00, 0x00, 0x20, 0x11, 0x00, 0x21, 0x08];
        let frame = build_frame(CLASS_CFG, ID_CFG_VALSET, &payload).unwrap();
        assert_eq!(frame.len(), payload.len() + FRAME_OVERHEAD);
        assert_eq!(&frame[..2], &PREAMBLE);
        assert_eq!(frame[4], payload.len() as u8);
        assert_eq!(frame[5], 0);

        let parsed = parse_frame(&frame).unwrap();
        assert_eq!(parsed.class, CLASS_CFG);
        assert_eq!(parsed.id, ID_CFG_VALSET);
        assert_eq!(parsed.payload, &payload[..]);

        // Pre-image: rebuilding from the parsed pieces yields the frame.
        let rebuilt = build_frame(parsed.class, parsed.id, parsed.payload).unwrap();
        assert_eq!(rebuilt, frame);
    }

    #[test]
    fn test_parse_frame_errors() {
        assert_eq!(
            parse_frame(&[0xB5]),
            Err(UbxError::Truncated {
                expected: 8,
                found: 1
            })
        );
        assert_eq!(
            parse_frame(&[0x00; 8]),
            Err(UbxError::BadPreamble)
        );

        let mut frame = build_frame(CLASS_ACK, ID_ACK_ACK, &[0x06, 0x8A]).unwrap();
        let valid = frame.clone();
        assert!(parse_frame(&valid).is_ok());

        // Flip one payload byte: checksum must catch it.
        frame[6] ^= 0xFF;
        assert!(matches!(
            parse_frame(&frame),
            Err(UbxError::ChecksumMismatch { .. })
        ));

        // Declared length larger than the available bytes.
        let short = &valid[..valid.len() - 3];
        assert!(matches!(
            parse_frame(short),
            Err(UbxError::Truncated { .. })
        ));
    }

    #[test]
    fn test_find_frame_across_seam() {
        let mut ring: RingBuffer<32> = RingBuffer::new();
        let frame = build_frame(CLASS_CFG, ID_CFG_VALGET, &[0x01, 0x00, 0x00, 0x00]).unwrap();

        ring.write(&[0u8; 30]);
        ring.write(&frame); // preamble lands at 30..32 boundary

        let at = find_frame(&ring, CLASS_CFG, ID_CFG_VALGET, ring.write_index()).unwrap();
        assert_eq!(at, 30);
        // Length read spans the seam too.
        assert_eq!(frame_length_at(&ring, at), 4);

        let mut linear = [0u8; 12];
        ring.read_unwrapped(at, &mut linear);
        assert_eq!(&linear[..], frame.as_slice());
    }
}
