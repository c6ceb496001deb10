//! Line extraction from the DMA-fed ring.
//!
//! The receiver owns the ring plus a read cursor and hands out complete
//! CRLF-terminated lines. It never advances past data the producer has
//! not yet deposited: before consuming a span it compares the producer's
//! running byte total against the span length, which guards against
//! reading a line whose bytes are still being overwritten after a wrap.

use crate::Error;
use crate::buffer::{RingBuffer, Segments};

/// Ring capacity of the stock driver configuration.
pub const RING_CAPACITY: usize = 2048;

/// DMA chunk size of the stock driver configuration; must divide the
/// ring capacity.
pub const READ_CHUNK: usize = 16;

const CRLF: &[u8] = b"\r\n";

/// Pulls complete NMEA lines out of a [`RingBuffer`].
#[derive(Debug)]
pub struct Receiver<const N: usize> {
    ring: RingBuffer<N>,
    read_at: usize,
    consumed_marker: u64,
}

impl<const N: usize> Default for Receiver<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Receiver<N> {
    pub const fn new() -> Self {
        Receiver {
            ring: RingBuffer::new(),
            read_at: 0,
            consumed_marker: 0,
        }
    }

    /// The underlying ring, for wrap-aware scans (UBX replies share the
    /// stream).
    pub fn ring(&self) -> &RingBuffer<N> {
        &self.ring
    }

    pub fn ring_mut(&mut self) -> &mut RingBuffer<N> {
        &mut self.ring
    }

    /// Producer entry point: appends one received chunk.
    pub fn feed(&mut self, chunk: &[u8]) {
        self.ring.write(chunk);
    }

    /// Current read cursor, `0..N`.
    pub fn read_index(&self) -> usize {
        self.read_at
    }

    /// Extracts all complete lines currently in the ring.
    ///
    /// The ring is rotated into `scratch` and split on CRLF; every
    /// segment but the last is a complete line, and the read cursor
    /// advances to the start of that final (incomplete) segment. When
    /// the producer has deposited fewer bytes than the span about to be
    /// consumed, nothing advances and `Incomplete` is returned.
    pub fn poll_lines<'s>(
        &mut self,
        scratch: &'s mut [u8; N],
    ) -> Result<Lines<'s>, Error<'static>> {
        let segments = self.ring.split(CRLF, self.read_at, scratch);

        let mut complete = 0usize;
        let mut last_len = 0usize;
        for segment in segments.clone() {
            complete += 1;
            last_len = segment.len();
        }
        if complete == 0 {
            return Err(Error::Incomplete);
        }
        complete -= 1;

        // Distance from the read cursor to the start of the trailing
        // partial segment. A trailing delimiter at the rotation end
        // means the whole ring span is being consumed, so no modulo:
        // a zero span here would let stale data replay.
        let span = N - last_len;
        let deposited = self.ring.total_written() - self.consumed_marker;
        if deposited < span as u64 {
            return Err(Error::Incomplete);
        }

        self.consumed_marker = self.ring.total_written();
        self.read_at = (self.read_at + span) % N;

        Ok(Lines {
            segments,
            remaining: complete,
        })
    }
}

/// Iterator over the complete lines of one poll; the trailing partial
/// segment is withheld.
#[derive(Debug)]
pub struct Lines<'s> {
    segments: Segments<'s, 'static>,
    remaining: usize,
}

impl<'s> Iterator for Lines<'s> {
    type Item = &'s [u8];

    fn next(&mut self) -> Option<&'s [u8]> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.segments.next()
    }
}
