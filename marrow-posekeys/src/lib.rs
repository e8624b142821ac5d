//! Marrow-PoseKeys: compressed pose-key codec for Marrow
//!
//! Decodes the bit-packed pose-key blobs that Marrow animation assets carry:
//! quantized, delta- and absolute-encoded rotation/translation samples keyed
//! by animation channel and time. **This is a pure codec** - it operates on
//! the opaque byte blob the asset loader already extracted and produces
//! per-channel samples. Mapping channels onto a skeleton is handled by the
//! caller (marrow-rig).
//!
//! # Layout
//! ```text
//! Header (84 bytes):
//! 0x00: min_delta_vector   [f32; 3] LE
//! 0x0C: range_delta_vector [f32; 3] LE
//! 0x18: min_delta_rotation   [f32; 3] LE
//! 0x24: range_delta_rotation [f32; 3] LE
//! 0x30: min_vector         [f32; 3] LE
//! 0x3C: range_vector       [f32; 3] LE
//! 0x48: range_time         f32 LE
//! 0x4C: bone_count         u32 LE   (animation channels, max 4096)
//! 0x50: sample_data_size   u32 LE   (bytes of quantized sample payload)
//!
//! 0x54: reserved u64               (serialized type hash; ignored on decode)
//! 0x5C: sample payload             (sample_data_size bytes of u32 words)
//! then: bone symbol table          (bone_count x u64 content hashes)
//! then: control words              (u32 each, through end of blob)
//! ```
//!
//! Sample words pack three fixed-point fields as `[z:11][y:11][x:10]` (x in
//! the low bits). Delta samples use one word per value; absolute samples use
//! a second word of high bits for 20/22-bit precision. Quaternions transmit
//! three components and reconstruct the fourth from the unit constraint.
//!
//! Control words encode `[mode:1][kind:1][axis:2][channel:12][time:16]`:
//! sign bit set = delta sample, bit 30 = rotation track, bits 28-29 select
//! the omitted component of absolute rotation samples.
//!
//! # Usage
//!
//! ```no_run
//! use marrow_posekeys::{Animation, DecodeSession};
//!
//! let blob: Vec<u8> = std::fs::read("clip.mwpose").unwrap();
//! let animation = Animation::from_blob(blob).unwrap();
//! let mut session = DecodeSession::new(&animation);
//! session.advance_to(&animation, 0.25).unwrap();
//! for channel in session.channels() {
//!     let _ = channel.translation();
//!     let _ = channel.rotation();
//! }
//! ```

mod animation;
mod batch;
mod event;
mod header;
mod reader;
mod session;

pub use animation::Animation;
pub use event::{DecodeEvent, SampleMode, TrackKind};
pub use header::{AxisMap, PoseKeysHeader};
pub use session::{ChannelState, DecodeSession, TimedSample};

// =============================================================================
// Constants
// =============================================================================

/// Upper bound on the declared channel count (sanity check on untrusted input)
pub const MAX_CHANNELS: u32 = 4096;

/// Values staged per batch refill
pub const BATCH_LEN: usize = 4;

/// Dequantization step for 16-bit time values (1/65535)
pub const TIME_STEP: f32 = 1.525902e-5;

/// Step for the 10-bit x field of delta samples (1/1023)
pub const DELTA_STEP_X: f32 = 9.775171e-4;

/// Step for the 11-bit y/z fields of delta samples (1/2047)
pub const DELTA_STEP_YZ: f32 = 4.885198e-4;

/// Step for the 20-bit x field of absolute samples (1/1048575)
pub const ABSOLUTE_STEP_X: f32 = 9.536752e-7;

/// Step for the 22-bit y/z fields of absolute samples (1/4194303)
pub const ABSOLUTE_STEP_YZ: f32 = 2.384186e-7;

// =============================================================================
// Error Type
// =============================================================================

/// Errors that can occur while parsing or decoding a pose-key blob
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Blob is shorter than the fixed header
    #[error("blob too small for pose-key header ({len} bytes)")]
    HeaderTooSmall { len: usize },

    /// Declared channel count exceeds the sanity bound
    #[error("declared bone count {bone_count} exceeds limit 4096")]
    BoneCountOutOfRange { bone_count: u32 },

    /// Declared sample payload + symbol table exceed the blob
    #[error("declared regions need {required} bytes but blob has {len}")]
    RegionsOutOfRange { required: usize, len: usize },

    /// A control word or batch refill would read past its region
    #[error("truncated stream: read at offset {offset} past region of {len} bytes")]
    TruncatedStream { offset: usize, len: usize },

    /// A control word addressed a channel beyond the declared count
    #[error("channel {channel} out of range (bone count {bone_count})")]
    ChannelOutOfRange { channel: usize, bone_count: u32 },
}
