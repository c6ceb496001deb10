//! Configuration request/response transactions.
//!
//! The module shares the receive ring with the NMEA stream: replies are
//! located by scanning the ring for the expected frame header, so a
//! transaction tolerates NMEA lines interleaved around its reply at any
//! byte boundary.

use heapless::Vec;

use crate::buffer::RingBuffer;
use crate::error::{CfgError, ProtocolError};
use crate::ubx::cfg::{
    CfgKey, CfgLayer, CfgLayers, CfgPair, CfgValue, DynModel, MAX_CFG_PAIRS, decode_pairs,
    encode_pairs, keys,
};
use crate::ubx::{
    CLASS_ACK, CLASS_CFG, FRAME_OVERHEAD, ID_ACK_ACK, ID_CFG_VALGET, ID_CFG_VALSET, MAX_FRAME,
    MAX_PAYLOAD, build_frame, find_frame, frame_length_at, parse_frame,
};

/// Default wait for a CFG-VALGET reply.
pub const VAL_GET_TIMEOUT_MS: u32 = 3000;

/// Default wait for a CFG-VALSET acknowledgement.
pub const VAL_SET_TIMEOUT_MS: u32 = 1000;

/// Byte transport to the receiver.
///
/// `drain` models the DMA/ISR producer: it moves whatever the link has
/// received into the ring and is called on every poll iteration of a
/// transaction.
pub trait GnssPort {
    type Error;

    /// Transmits one complete frame, blocking with the adapter's own
    /// bounded timeout.
    fn send(&mut self, frame: &[u8]) -> Result<(), Self::Error>;

    /// Moves pending received bytes into the ring; returns how many.
    fn drain<const N: usize>(&mut self, ring: &mut RingBuffer<N>) -> usize;
}

/// Monotonic millisecond clock for transaction timeouts.
pub trait Monotonic {
    fn now_ms(&self) -> u32;
}

/// Sends CFG-VALGET for `keys` in `layer` and awaits the decoded reply.
///
/// Request payload: `version(0x00) | layer | position LE | key BE × N`.
/// The reply is located by scanning the ring for `B5 62 06 8B`; its
/// length bytes may straddle the ring seam, so the frame is linearised
/// before parsing. Polling repeats until the checksum verifies or the
/// timeout elapses.
pub fn val_get<P: GnssPort, C: Monotonic, const N: usize>(
    port: &mut P,
    clock: &C,
    ring: &mut RingBuffer<N>,
    layer: CfgLayer,
    position: u16,
    keys: &[CfgKey],
    timeout_ms: u32,
) -> Result<Vec<CfgPair, MAX_CFG_PAIRS>, ProtocolError<P::Error>> {
    let mut payload: Vec<u8, MAX_PAYLOAD> = Vec::new();
    let _ = payload.push(0x00);
    let _ = payload.push(layer as u8);
    let _ = payload.extend_from_slice(&position.to_le_bytes());
    for key in keys {
        if payload.extend_from_slice(&key.to_wire()).is_err() {
            return Err(ProtocolError::Cfg(CfgError::TooManyPairs));
        }
    }

    let frame = build_frame(CLASS_CFG, ID_CFG_VALGET, &payload)?;
    port.send(&frame).map_err(ProtocolError::Transport)?;

    let started = clock.now_ms();
    loop {
        port.drain(ring);

        if let Some(at) = find_frame(ring, CLASS_CFG, ID_CFG_VALGET, ring.write_index()) {
            let length = frame_length_at(ring, at);
            if length <= MAX_PAYLOAD {
                let mut raw: Vec<u8, MAX_FRAME> = Vec::new();
                let _ = raw.resize(length + FRAME_OVERHEAD, 0);
                ring.read_unwrapped(at, &mut raw);

                if let Ok(reply) = parse_frame(&raw) {
                    // Reply payload: version(0x01) | layer | position LE,
                    // then the encoded pairs.
                    if reply.payload.len() < 4 {
                        return Err(ProtocolError::Cfg(CfgError::ShortPayload {
                            needed: 4,
                            found: reply.payload.len(),
                        }));
                    }
                    let mut pairs: Vec<CfgPair, MAX_CFG_PAIRS> = Vec::new();
                    decode_pairs(&reply.payload[4..], &mut pairs)?;
                    return Ok(pairs);
                }
            }
        }

        if clock.now_ms().wrapping_sub(started) >= timeout_ms {
            return Err(ProtocolError::Timeout);
        }
    }
}

/// Sends CFG-VALSET writing `pairs` to the `layers` targets and awaits
/// the acknowledgement.
///
/// Request payload: `version(0x00) | layers | reserved(2) | pair bytes`.
/// Success requires the exact ACK-ACK frame
/// `B5 62 05 01 02 00 06 8A ck_a ck_b` to appear in the ring before the
/// timeout; a NAK and a silent timeout are both reported as
/// [`ProtocolError::NotAcknowledged`].
pub fn val_set<P: GnssPort, C: Monotonic, const N: usize>(
    port: &mut P,
    clock: &C,
    ring: &mut RingBuffer<N>,
    layers: CfgLayers,
    pairs: &[CfgPair],
    timeout_ms: u32,
) -> Result<(), ProtocolError<P::Error>> {
    let mut payload: Vec<u8, MAX_PAYLOAD> = Vec::new();
    let _ = payload.push(0x00);
    let _ = payload.push(layers.bits());
    let _ = payload.extend_from_slice(&[0x00, 0x00]);
    encode_pairs(pairs, &mut payload)?;

    let frame = build_frame(CLASS_CFG, ID_CFG_VALSET, &payload)?;
    port.send(&frame).map_err(ProtocolError::Transport)?;

    let ack = build_frame(CLASS_ACK, ID_ACK_ACK, &[CLASS_CFG, ID_CFG_VALSET])?;

    let started = clock.now_ms();
    loop {
        port.drain(ring);

        if ring.find(&ack, ring.write_index()).is_some() {
            return Ok(());
        }
        if clock.now_ms().wrapping_sub(started) >= timeout_ms {
            return Err(ProtocolError::NotAcknowledged);
        }
    }
}

/// Boot-time configuration check for the dynamic platform model.
///
/// Reads `NAVSPG-DYNMODEL` from the FLASH layer; when it already holds
/// `model` nothing is written and `Ok(false)` is returned. Otherwise the
/// pair is written to FLASH and RAM (in that order) and `Ok(true)`
/// reports the rewrite. A failed read counts as "not configured".
pub fn ensure_dyn_model<P: GnssPort, C: Monotonic, const N: usize>(
    port: &mut P,
    clock: &C,
    ring: &mut RingBuffer<N>,
    model: DynModel,
) -> Result<bool, ProtocolError<P::Error>> {
    let wanted = CfgValue::U1(model as u8);

    let configured = val_get(
        port,
        clock,
        ring,
        CfgLayer::Flash,
        0,
        &[keys::NAVSPG_DYNMODEL],
        VAL_GET_TIMEOUT_MS,
    )
    .map(|pairs| {
        pairs
            .iter()
            .any(|pair| pair.key == keys::NAVSPG_DYNMODEL && pair.value == wanted)
    })
    .unwrap_or(false);

    if configured {
        return Ok(false);
    }

    let pair = CfgPair::new(keys::NAVSPG_DYNMODEL, wanted)?;
    val_set(
        port,
        clock,
        ring,
        CfgLayers::FLASH,
        &[pair],
        VAL_SET_TIMEOUT_MS,
    )?;
    val_set(
        port,
        clock,
        ring,
        CfgLayers::RAM,
        &[pair],
        VAL_SET_TIMEOUT_MS,
    )?;
    Ok(true)
}
