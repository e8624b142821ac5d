//! Pose-key header parsing and derived dequantization maps

use crate::{
    ABSOLUTE_STEP_X, ABSOLUTE_STEP_YZ, DELTA_STEP_X, DELTA_STEP_YZ, DecodeError, MAX_CHANNELS,
    TIME_STEP,
};

/// Per-axis affine dequantization map (`raw * scale + min`)
///
/// The per-bit-width steps are folded into `scale` at header parse so decode
/// multiplies once per component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisMap {
    pub scale: [f32; 3],
    pub min: [f32; 3],
}

impl AxisMap {
    /// Absolute rotation components ignore the header ranges and use a fixed
    /// ±1/√2 range (smallest-three encoding bounds the transmitted values).
    pub const ABSOLUTE_ROTATION: Self = Self {
        scale: [1.3487e-6, 3.371749e-7, 3.371749e-7],
        min: [-0.7071068; 3],
    };

    /// Dequantize three raw fixed-point fields
    #[inline]
    pub fn dequantize(&self, raw: [u32; 3]) -> [f32; 3] {
        [
            raw[0] as f32 * self.scale[0] + self.min[0],
            raw[1] as f32 * self.scale[1] + self.min[1],
            raw[2] as f32 * self.scale[2] + self.min[2],
        ]
    }

    fn folded(min: [f32; 3], range: [f32; 3], steps: [f32; 3]) -> Self {
        Self {
            scale: [
                range[0] * steps[0],
                range[1] * steps[1],
                range[2] * steps[2],
            ],
            min,
        }
    }
}

/// Pose-key header (84 bytes) with derived scale factors folded in
///
/// Immutable once parsed; owned by the decode session's [`Animation`].
///
/// [`Animation`]: crate::Animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseKeysHeader {
    /// Number of animation channels (max 4096)
    pub bone_count: u32,
    /// Byte size of the quantized sample payload
    pub sample_data_size: u32,
    /// Seconds per raw 16-bit time unit (`range_time` folded with the step)
    pub time_scale: f32,
    /// Dequantization map for absolute vector samples
    pub vector: AxisMap,
    /// Dequantization map for delta vector samples
    pub delta_vector: AxisMap,
    /// Dequantization map for delta rotation samples
    pub delta_rotation: AxisMap,
}

impl PoseKeysHeader {
    pub const SIZE: usize = 84;

    /// Offset of the sample payload (header + reserved type hash)
    pub const DATA_OFFSET: usize = Self::SIZE + 8;

    /// Parse the header from the start of a blob and validate the declared
    /// regions against the blob length
    ///
    /// # Errors
    /// Returns [`DecodeError`] if the blob is shorter than the fixed header,
    /// the declared channel count exceeds the sanity bound, or the declared
    /// payload and symbol table regions overrun the blob.
    pub fn from_bytes(blob: &[u8]) -> Result<Self, DecodeError> {
        if blob.len() < Self::SIZE {
            return Err(DecodeError::HeaderTooSmall { len: blob.len() });
        }

        let min_delta_vector = read_vec3(blob, 0x00);
        let range_delta_vector = read_vec3(blob, 0x0C);
        let min_delta_rotation = read_vec3(blob, 0x18);
        let range_delta_rotation = read_vec3(blob, 0x24);
        let min_vector = read_vec3(blob, 0x30);
        let range_vector = read_vec3(blob, 0x3C);
        let range_time = read_f32(blob, 0x48);
        let bone_count = read_u32(blob, 0x4C);
        let sample_data_size = read_u32(blob, 0x50);

        if bone_count > MAX_CHANNELS {
            return Err(DecodeError::BoneCountOutOfRange { bone_count });
        }

        let required = Self::DATA_OFFSET + sample_data_size as usize + bone_count as usize * 8;
        if required > blob.len() {
            return Err(DecodeError::RegionsOutOfRange {
                required,
                len: blob.len(),
            });
        }

        let delta_steps = [DELTA_STEP_X, DELTA_STEP_YZ, DELTA_STEP_YZ];
        Ok(Self {
            bone_count,
            sample_data_size,
            time_scale: range_time * TIME_STEP,
            vector: AxisMap::folded(
                min_vector,
                range_vector,
                [ABSOLUTE_STEP_X, ABSOLUTE_STEP_YZ, ABSOLUTE_STEP_YZ],
            ),
            delta_vector: AxisMap::folded(min_delta_vector, range_delta_vector, delta_steps),
            delta_rotation: AxisMap::folded(min_delta_rotation, range_delta_rotation, delta_steps),
        })
    }
}

#[inline]
fn read_f32(bytes: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

#[inline]
fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

#[inline]
fn read_vec3(bytes: &[u8], offset: usize) -> [f32; 3] {
    [
        read_f32(bytes, offset),
        read_f32(bytes, offset + 4),
        read_f32(bytes, offset + 8),
    ]
}
