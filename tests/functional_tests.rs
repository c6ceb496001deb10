//! End-to-end scenarios across the framer, the views, the ring and the
//! configuration protocol.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use approx::assert_relative_eq;
use quickcheck::{QuickCheck, TestResult};

use neom9n::buffer::RingBuffer;
use neom9n::ubx::cfg::{
    CfgLayer, CfgLayers, CfgPair, CfgValue, DynModel, MAX_CFG_PAIRS, decode_pairs, encode_pairs,
    keys,
};
use neom9n::ubx::protocol::{GnssPort, Monotonic, val_get, val_set};
use neom9n::ubx::{CLASS_CFG, ID_CFG_VALGET, build_frame};
use neom9n::{Error, GgaData, Position, ProtocolError, checksum, parse_str, parse_view};

const GLL_LINE: &str = "$GNGLL,4916.45,N,12311.12,W,225444.00,A,A*6C";

#[test]
fn scenario_1_gll_as_position() {
    let position: Position = parse_view(GLL_LINE).unwrap();
    assert_relative_eq!(
        *position.latitude().get().unwrap(),
        49.274166,
        epsilon = 1e-4
    );
    assert_relative_eq!(
        *position.longitude().get().unwrap(),
        -123.185333,
        epsilon = 1e-4
    );
}

#[test]
fn scenario_2_gll_as_gga_is_absent() {
    let result: Result<GgaData, _> = parse_view(GLL_LINE);
    assert!(matches!(result, Err(Error::WrongSentenceHeader { .. })));
}

#[test]
fn scenario_3_corrupted_checksum() {
    let corrupted = "$GPRMC,091144.00,A,4724.114,N,01123.456,E,0.55,123.4,160325,,,A,V*00";
    assert!(matches!(
        parse_str(corrupted),
        Err(Error::ChecksumMismatch { .. })
    ));
    let view: Result<Position, _> = parse_view(corrupted);
    assert!(view.is_err());
}

// ---------------------------------------------------------------------
// Protocol scenarios share a minimal transport/clock double.

struct MockPort {
    sent: Vec<Vec<u8>>,
    replies: RefCell<VecDeque<Vec<u8>>>,
}

impl MockPort {
    fn new() -> Self {
        MockPort {
            sent: Vec::new(),
            replies: RefCell::new(VecDeque::new()),
        }
    }
}

impl GnssPort for MockPort {
    type Error = ();

    fn send(&mut self, frame: &[u8]) -> Result<(), ()> {
        self.sent.push(frame.to_vec());
        Ok(())
    }

    fn drain<const N: usize>(&mut self, ring: &mut RingBuffer<N>) -> usize {
        match self.replies.borrow_mut().pop_front() {
            Some(bytes) => {
                ring.write(&bytes);
                bytes.len()
            }
            None => 0,
        }
    }
}

struct StepClock(Cell<u32>);

impl Monotonic for StepClock {
    fn now_ms(&self) -> u32 {
        let now = self.0.get();
        self.0.set(now + 100);
        now
    }
}

#[test]
fn scenario_4_valget_air4_round_trip() {
    let pair = CfgPair::new(keys::NAVSPG_DYNMODEL, CfgValue::U1(DynModel::Air4 as u8)).unwrap();

    // Pair codec round trip.
    let mut wire: heapless::Vec<u8, 64> = heapless::Vec::new();
    encode_pairs(&[pair], &mut wire).unwrap();
    let mut decoded: heapless::Vec<CfgPair, MAX_CFG_PAIRS> = heapless::Vec::new();
    decode_pairs(&wire, &mut decoded).unwrap();
    assert_eq!(decoded.as_slice(), &[pair]);

    // Full transaction: the module answers with version 0x01, the
    // echoed layer/position and the encoded pair.
    let mut reply_payload = vec![0x01, CfgLayer::Flash as u8, 0x00, 0x00];
    reply_payload.extend_from_slice(&wire);
    let reply = build_frame(CLASS_CFG, ID_CFG_VALGET, &reply_payload).unwrap();

    let mut port = MockPort::new();
    port.replies.borrow_mut().push_back(reply.to_vec());
    let clock = StepClock(Cell::new(0));
    let mut ring: RingBuffer<2048> = RingBuffer::new();

    let pairs = val_get(
        &mut port,
        &clock,
        &mut ring,
        CfgLayer::Flash,
        0,
        &[keys::NAVSPG_DYNMODEL],
        1000,
    )
    .unwrap();
    assert_eq!(pairs.as_slice(), &[pair]);

    // The request went out with the expected header.
    assert_eq!(&port.sent[0][..4], &[0xB5, 0x62, 0x06, 0x8B]);
}

#[test]
fn scenario_5_valset_without_ack_times_out() {
    let pair = CfgPair::new(keys::NAVSPG_DYNMODEL, CfgValue::U1(DynModel::Air4 as u8)).unwrap();

    let mut port = MockPort::new();
    let clock = StepClock(Cell::new(0));
    let mut ring: RingBuffer<2048> = RingBuffer::new();

    let result = val_set(
        &mut port,
        &clock,
        &mut ring,
        CfgLayers::RAM.union(CfgLayers::FLASH),
        &[pair],
        1000,
    );
    assert_eq!(result, Err(ProtocolError::NotAcknowledged));
}

#[test]
fn scenario_6_sentence_completed_across_the_seam() {
    const N: usize = 2048;
    let line = format!("{}\r\n", GLL_LINE); // 46 bytes
    let mut ring: RingBuffer<N> = RingBuffer::new();

    // 44 complete lines plus a 16-byte partial: 2040 bytes.
    for _ in 0..44 {
        ring.write(line.as_bytes());
    }
    ring.write(&line.as_bytes()[..16]);
    assert_eq!(ring.write_index(), 2040);

    // The completion crosses the seam.
    ring.write(&line.as_bytes()[16..]);
    assert_eq!(ring.wrap_count(), 1);
    assert_eq!(ring.write_index(), (2040 + 30) % N);

    // Splitting from the start of the straddling sentence yields it as
    // one unwrapped slice, parseable as-is.
    let mut scratch = [0u8; N];
    let first = ring.split(b"\r\n", 44 * 46, &mut scratch).next().unwrap();
    assert_eq!(first, GLL_LINE.as_bytes());
    assert!(parse_str(core::str::from_utf8(first).unwrap()).is_ok());
}

#[test]
fn parsing_lat_lon_in_gga_round_trips() {
    fn property(lat: f64, lon: f64) -> TestResult {
        if !lat.is_finite() || !lon.is_finite() {
            return TestResult::discard();
        }
        let lat = lat % 90.0;
        let lon = lon % 180.0;
        let lat_min = (lat.abs() * 60.0) % 60.0;
        let lon_min = (lon.abs() * 60.0) % 60.0;

        let mut s = format!(
            "$GPGGA,092750.00,{lat_deg:02}{lat_min:09.6},{lat_dir},\
             {lon_deg:03}{lon_min:09.6},{lon_dir},1,8,1.03,61.7,M,55.2,M,,*",
            lat_deg = lat.abs().floor() as u8,
            lon_deg = lon.abs().floor() as u16,
            lat_min = lat_min,
            lon_min = lon_min,
            lat_dir = if lat.is_sign_positive() { 'N' } else { 'S' },
            lon_dir = if lon.is_sign_positive() { 'E' } else { 'W' },
        );
        let cs = checksum(s.as_bytes()[1..s.len() - 1].iter());
        s.push_str(&format!("{:02X}", cs));

        let position: Position = match parse_view(&s) {
            Ok(position) => position,
            Err(_) => return TestResult::failed(),
        };
        let new_lat = *position.latitude().get().unwrap() as f64;
        let new_lon = *position.longitude().get().unwrap() as f64;

        const MAX_COOR_DIFF: f64 = 1e-3;
        TestResult::from_bool(
            (new_lat - lat).abs() < MAX_COOR_DIFF && (new_lon - lon).abs() < MAX_COOR_DIFF,
        )
    }

    // Regressions first, then the random sweep.
    assert!(!property(0.0, 57.89528).is_failure());
    assert!(!property(0.0, -43.33031).is_failure());
    QuickCheck::new()
        .tests(10_000)
        .quickcheck(property as fn(f64, f64) -> TestResult);
}

#[test]
fn interleaved_ubx_and_nmea_share_the_stream() {
    // A UBX reply wedged between two NMEA lines is still located by the
    // wrap-aware scan, and the lines still parse.
    let mut ring: RingBuffer<512> = RingBuffer::new();
    ring.write(GLL_LINE.as_bytes());
    ring.write(b"\r\n");

    let frame = build_frame(CLASS_CFG, ID_CFG_VALGET, &[0x01, 0x00, 0x00, 0x00]).unwrap();
    ring.write(&frame);
    ring.write(b"$GPGST,082356.00,1.8,,,,1.7,1.3,2.2*7E\r\n");

    let at = neom9n::ubx::find_frame(&ring, CLASS_CFG, ID_CFG_VALGET, ring.write_index()).unwrap();
    assert_eq!(at, 46);
    assert_eq!(neom9n::ubx::frame_length_at(&ring, at), 4);
}
