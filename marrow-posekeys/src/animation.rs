//! Parsed pose-key blob
//!
//! Owns the compressed bytes and the parsed header, and carves the blob into
//! its three regions: sample payload, bone symbol table, and control words.
//! Read-only after parse; safe to share across decode sessions.

use crate::header::PoseKeysHeader;
use crate::DecodeError;

/// One compressed animation clip
#[derive(Debug, Clone)]
pub struct Animation {
    header: PoseKeysHeader,
    blob: Vec<u8>,
}

impl Animation {
    /// Parse a pose-key blob
    ///
    /// # Errors
    /// Returns [`DecodeError`] if the header is malformed or the declared
    /// regions overrun the blob.
    pub fn from_blob(blob: Vec<u8>) -> Result<Self, DecodeError> {
        let header = PoseKeysHeader::from_bytes(&blob)?;
        Ok(Self { header, blob })
    }

    pub fn header(&self) -> &PoseKeysHeader {
        &self.header
    }

    /// Number of animation channels
    pub fn channel_count(&self) -> usize {
        self.header.bone_count as usize
    }

    /// Content hash correlating channel `channel` with a skeleton bone
    ///
    /// # Panics
    /// Panics if `channel >= channel_count()`.
    pub fn channel_symbol(&self, channel: usize) -> u64 {
        let table = self.symbol_table();
        let offset = channel * 8;
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&table[offset..offset + 8]);
        u64::from_le_bytes(bytes)
    }

    /// Iterate all channel symbols in channel order
    pub fn channel_symbols(&self) -> impl Iterator<Item = u64> + '_ {
        (0..self.channel_count()).map(|channel| self.channel_symbol(channel))
    }

    /// Quantized sample payload region
    pub(crate) fn sample_payload(&self) -> &[u8] {
        let start = PoseKeysHeader::DATA_OFFSET;
        &self.blob[start..start + self.header.sample_data_size as usize]
    }

    fn symbol_table(&self) -> &[u8] {
        let start = PoseKeysHeader::DATA_OFFSET + self.header.sample_data_size as usize;
        &self.blob[start..start + self.channel_count() * 8]
    }

    /// Control word region (sample payload and symbol table through blob end)
    pub(crate) fn control_words(&self) -> &[u8] {
        let start = PoseKeysHeader::DATA_OFFSET
            + self.header.sample_data_size as usize
            + self.channel_count() * 8;
        &self.blob[start..]
    }
}
