//! Staged dequantization of packed sample words
//!
//! Sample values are pulled from the payload in fixed groups of four. Delta
//! groups hold one word per value; absolute groups append a second word of
//! high bits per value for 20/22-bit precision. Events then consume staged
//! values one at a time in stream order.

use crate::header::AxisMap;
use crate::reader::WordReader;
use crate::{BATCH_LEN, DecodeError};

/// Split a sample word into its `[z:11][y:11][x:10]` fixed-point fields
#[inline]
pub(crate) fn unpack_fields(word: u32) -> [u32; 3] {
    [word & 0x3FF, (word >> 10) & 0x7FF, (word >> 21) & 0x7FF]
}

/// A queue of up to four pending dequantized values for one (kind, mode) pair
///
/// Either fully consumed (needs refill) or partially consumed (safe to
/// serve); refills happen exactly when a take finds the queue empty.
#[derive(Debug, Clone)]
pub(crate) struct StagingBatch {
    values: [[f32; 3]; BATCH_LEN],
    next: usize,
}

impl StagingBatch {
    pub fn new() -> Self {
        Self {
            values: [[0.0; 3]; BATCH_LEN],
            next: BATCH_LEN,
        }
    }

    pub fn reset(&mut self) {
        self.next = BATCH_LEN;
    }

    /// Serve the next staged value, refilling from the payload when empty
    ///
    /// `wide` selects the absolute-sample group shape (two words per value).
    pub fn take(
        &mut self,
        map: &AxisMap,
        wide: bool,
        payload: &mut WordReader<'_>,
    ) -> Result<[f32; 3], DecodeError> {
        if self.next == BATCH_LEN {
            self.refill(map, wide, payload)?;
        }
        let value = self.values[self.next];
        self.next += 1;
        Ok(value)
    }

    fn refill(
        &mut self,
        map: &AxisMap,
        wide: bool,
        payload: &mut WordReader<'_>,
    ) -> Result<(), DecodeError> {
        let mut low = [0u32; BATCH_LEN];
        for slot in &mut low {
            *slot = payload.next_u32()?;
        }

        if wide {
            for i in 0..BATCH_LEN {
                let lo = unpack_fields(low[i]);
                let hi = unpack_fields(payload.next_u32()?);
                self.values[i] = map.dequantize([
                    (hi[0] << 10) | lo[0],
                    (hi[1] << 11) | lo[1],
                    (hi[2] << 11) | lo[2],
                ]);
            }
        } else {
            for i in 0..BATCH_LEN {
                self.values[i] = map.dequantize(unpack_fields(low[i]));
            }
        }

        self.next = 0;
        Ok(())
    }
}
