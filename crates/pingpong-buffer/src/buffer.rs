//! Swap-on-Full Double Buffer Implementation

use crate::error::BufferError;

/// Default capacity per region (128 bytes = one UART rx buffer)
pub const DEFAULT_CAPACITY: usize = 128;

/// Identifies one of the two half-buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Ping,
    Pong,
}

impl Region {
    /// The complement of this region
    pub fn other(self) -> Self {
        match self {
            Region::Ping => Region::Pong,
            Region::Pong => Region::Ping,
        }
    }
}

/// Outcome of a successful write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    /// Byte stored; the active region still has space
    Written,
    /// Byte filled the active region; the regions swapped and the cursor
    /// reset, so the completed region is ready to be drained
    Switched,
}

/// Double buffer with two equal-sized byte regions.
///
/// Writes always land in the active region. The write that fills the last
/// slot swaps the regions and resets the cursor in the same call, exposing
/// the completed region through [`completed`](PingPongBuffer::completed).
/// All operations are O(1) and non-blocking, so the writer side is safe to
/// drive from an interrupt or callback context.
#[derive(Debug)]
pub struct PingPongBuffer {
    /// First half-buffer
    ping: Box<[u8]>,
    /// Second half-buffer
    pong: Box<[u8]>,
    /// Bytes per region, fixed at construction
    capacity: usize,
    /// Region currently accepting writes
    active: Region,
    /// Offset of the next write within the active region
    cursor: usize,
}

impl PingPongBuffer {
    /// Create a buffer with `capacity` bytes per region.
    ///
    /// Region memory is reserved fallibly, so an allocation failure is
    /// reported instead of aborting; nothing is leaked on that path.
    pub fn new(capacity: usize) -> Result<Self, BufferError> {
        if capacity == 0 {
            return Err(BufferError::ZeroCapacity);
        }
        Ok(Self {
            ping: alloc_region(capacity)?,
            pong: alloc_region(capacity)?,
            capacity,
            active: Region::Ping,
            cursor: 0,
        })
    }

    /// Create a buffer with the default per-region capacity (128 bytes)
    pub fn with_default_capacity() -> Result<Self, BufferError> {
        Self::new(DEFAULT_CAPACITY)
    }

    /// Append one byte to the active region.
    ///
    /// Returns [`WriteStatus::Switched`] when the byte fills the region:
    /// the cursor resets and the active region flips within this call, so
    /// a full region always reports `Switched`, never `Written`. Returns
    /// [`BufferError::CapacityExceeded`] if the region is already full
    /// before the write; the byte is rejected and no state changes. That
    /// is a backpressure signal, not a fatal condition.
    pub fn write(&mut self, byte: u8) -> Result<WriteStatus, BufferError> {
        if self.cursor >= self.capacity {
            return Err(BufferError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        let region = match self.active {
            Region::Ping => &mut self.ping,
            Region::Pong => &mut self.pong,
        };
        region[self.cursor] = byte;
        self.cursor += 1;

        if self.cursor == self.capacity {
            self.cursor = 0;
            self.active = self.active.other();
            return Ok(WriteStatus::Switched);
        }
        Ok(WriteStatus::Written)
    }

    /// Borrow the completed (inactive) region without copying or clearing.
    ///
    /// The slice is always `capacity` bytes. Before the first switch its
    /// contents are unspecified, since that region has never been
    /// written. The borrow must end before the next switch makes this
    /// region the write target again; the borrow checker enforces that,
    /// because `write` needs `&mut self`.
    pub fn completed(&self) -> &[u8] {
        match self.active {
            Region::Ping => &self.pong,
            Region::Pong => &self.ping,
        }
    }

    /// Return to the initial state: Ping active, cursor at zero.
    ///
    /// Byte contents of both regions are left untouched; stale data
    /// remains until overwritten. Idempotent.
    pub fn reset(&mut self) {
        self.active = Region::Ping;
        self.cursor = 0;
    }

    /// Bytes per region
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes written to the active region since the last switch or reset
    pub fn len(&self) -> usize {
        self.cursor
    }

    /// Check if the active region has no pending bytes
    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    /// Region currently accepting writes
    pub fn active_region(&self) -> Region {
        self.active
    }
}

fn alloc_region(capacity: usize) -> Result<Box<[u8]>, BufferError> {
    let mut region: Vec<u8> = Vec::new();
    region
        .try_reserve_exact(capacity)
        .map_err(|_| BufferError::AllocationFailed { bytes: capacity })?;
    region.resize(capacity, 0);
    Ok(region.into_boxed_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fill_sequence_statuses() {
        let mut buffer = PingPongBuffer::new(4).unwrap();

        let statuses: Vec<_> = [0x11, 0x22, 0x33, 0x44]
            .iter()
            .map(|&b| buffer.write(b).unwrap())
            .collect();

        assert_eq!(
            statuses,
            vec![
                WriteStatus::Written,
                WriteStatus::Written,
                WriteStatus::Written,
                WriteStatus::Switched,
            ]
        );
        assert_eq!(buffer.completed(), &[0x11, 0x22, 0x33, 0x44]);
        assert_eq!(buffer.active_region(), Region::Pong);
        assert_eq!(buffer.len(), 0);
    }

    #[test]
    fn test_capacity_one_switches_every_write() {
        let mut buffer = PingPongBuffer::new(1).unwrap();

        for i in 0..5u8 {
            assert_eq!(buffer.write(i).unwrap(), WriteStatus::Switched);
            assert_eq!(buffer.completed(), &[i]);
        }
        // 5 switches from Ping-active: odd count lands on Pong
        assert_eq!(buffer.active_region(), Region::Pong);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(
            PingPongBuffer::new(0).unwrap_err(),
            BufferError::ZeroCapacity
        );
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut buffer = PingPongBuffer::new(8).unwrap();
        for i in 0..11u8 {
            buffer.write(i).unwrap();
        }
        assert_eq!(buffer.active_region(), Region::Pong);
        assert_eq!(buffer.len(), 3);

        buffer.reset();
        assert_eq!(buffer.active_region(), Region::Ping);
        assert_eq!(buffer.len(), 0);

        buffer.reset();
        assert_eq!(buffer.active_region(), Region::Ping);
        assert_eq!(buffer.len(), 0);
    }

    #[test]
    fn test_reset_keeps_contents() {
        let mut buffer = PingPongBuffer::new(2).unwrap();
        buffer.write(0xAA).unwrap();
        buffer.write(0xBB).unwrap(); // switch, Ping completed
        buffer.reset();

        // Ping is active again, so completed() views the never-written
        // Pong; only its length is part of the contract
        assert_eq!(buffer.completed().len(), 2);
        // One more full fill swaps Ping out with its stale bytes replaced
        buffer.write(0x01).unwrap();
        buffer.write(0x02).unwrap();
        assert_eq!(buffer.completed(), &[0x01, 0x02]);
    }

    #[test]
    fn test_completed_is_complement_of_active() {
        let mut buffer = PingPongBuffer::new(3).unwrap();
        for round in 0..4u8 {
            let before = buffer.active_region();
            for i in 0..3u8 {
                buffer.write(round * 10 + i).unwrap();
            }
            assert_eq!(buffer.active_region(), before.other());
            // The just-filled region is now the inactive, readable one
            assert_eq!(buffer.completed()[0], round * 10);
        }
    }

    #[test]
    fn test_full_fill_parity() {
        let capacity = 16;
        let mut buffer = PingPongBuffer::new(capacity).unwrap();

        for fills in 1..=6 {
            for _ in 0..capacity {
                buffer.write(0).unwrap();
            }
            let expected = if fills % 2 == 0 {
                Region::Ping
            } else {
                Region::Pong
            };
            assert_eq!(buffer.active_region(), expected);
            assert_eq!(buffer.len(), 0);
        }
    }

    #[test]
    fn test_alternating_regions_hold_distinct_data() {
        let mut buffer = PingPongBuffer::new(2).unwrap();

        buffer.write(1).unwrap();
        buffer.write(2).unwrap();
        assert_eq!(buffer.completed(), &[1, 2]);

        buffer.write(3).unwrap();
        buffer.write(4).unwrap();
        assert_eq!(buffer.completed(), &[3, 4]);

        // The first region is the write target again
        buffer.write(5).unwrap();
        buffer.write(6).unwrap();
        assert_eq!(buffer.completed(), &[5, 6]);
    }

    #[test]
    fn test_debug_formatting() {
        let buffer = PingPongBuffer::new(2).unwrap();
        let rendered = format!("{:?}", buffer);
        assert!(rendered.contains("PingPongBuffer"));
        assert!(rendered.contains("Ping"));
    }

    #[test]
    fn test_drop_in_any_state() {
        let buffer = PingPongBuffer::new(4).unwrap();
        drop(buffer);

        let mut buffer = PingPongBuffer::new(4).unwrap();
        buffer.write(0xFF).unwrap();
        drop(buffer);
    }

    proptest! {
        /// The capacity-th write always switches, with the cursor back at
        /// zero and the active region flipped.
        #[test]
        fn prop_exact_fill_switches(capacity in 1usize..512) {
            let mut buffer = PingPongBuffer::new(capacity).unwrap();
            let before = buffer.active_region();

            for k in 0..capacity {
                let status = buffer.write(k as u8).unwrap();
                if k + 1 < capacity {
                    prop_assert_eq!(status, WriteStatus::Written);
                } else {
                    prop_assert_eq!(status, WriteStatus::Switched);
                }
            }

            prop_assert_eq!(buffer.len(), 0);
            prop_assert_eq!(buffer.active_region(), before.other());
        }

        /// Exactly capacity writes occur between switches, never more.
        #[test]
        fn prop_switch_cadence(capacity in 1usize..128, total in 1usize..1024) {
            let mut buffer = PingPongBuffer::new(capacity).unwrap();
            let mut switches = 0usize;

            for i in 0..total {
                match buffer.write(i as u8).unwrap() {
                    WriteStatus::Switched => {
                        switches += 1;
                        prop_assert_eq!((i + 1) % capacity, 0);
                    }
                    WriteStatus::Written => {}
                }
            }

            prop_assert_eq!(switches, total / capacity);
            prop_assert_eq!(buffer.len(), total % capacity);
        }

        /// A completed region is returned intact on the switch that
        /// produced it.
        #[test]
        fn prop_completed_round_trip(data in proptest::collection::vec(any::<u8>(), 1..256)) {
            let mut buffer = PingPongBuffer::new(data.len()).unwrap();
            for &b in &data {
                buffer.write(b).unwrap();
            }
            prop_assert_eq!(buffer.completed(), data.as_slice());
        }
    }
}
