//! Bounds-checked little-endian word reader
//!
//! Every read is an explicit fallible operation; the reader never touches
//! bytes outside the region it was constructed over.

use crate::DecodeError;

/// Sequential `u32` reader over one region of the blob
///
/// The byte position survives across [`DecodeSession::advance_to`] calls by
/// reconstructing the reader at a saved offset.
///
/// [`DecodeSession::advance_to`]: crate::DecodeSession::advance_to
pub(crate) struct WordReader<'a> {
    region: &'a [u8],
    pos: usize,
}

impl<'a> WordReader<'a> {
    pub fn new(region: &'a [u8], pos: usize) -> Self {
        Self { region, pos }
    }

    /// Byte position within the region
    pub fn position(&self) -> usize {
        self.pos
    }

    /// True once every whole byte of the region has been consumed
    pub fn is_empty(&self) -> bool {
        self.pos >= self.region.len()
    }

    /// Read the next word without consuming it
    pub fn peek_u32(&self) -> Result<u32, DecodeError> {
        let end = self.pos.checked_add(4).unwrap_or(usize::MAX);
        if end > self.region.len() {
            return Err(DecodeError::TruncatedStream {
                offset: self.pos,
                len: self.region.len(),
            });
        }
        Ok(u32::from_le_bytes([
            self.region[self.pos],
            self.region[self.pos + 1],
            self.region[self.pos + 2],
            self.region[self.pos + 3],
        ]))
    }

    /// Read and consume the next word
    pub fn next_u32(&mut self) -> Result<u32, DecodeError> {
        let word = self.peek_u32()?;
        self.pos += 4;
        Ok(word)
    }
}
