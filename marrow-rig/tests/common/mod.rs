//! Test-only pose-key blob builder (absolute samples only)

#![allow(dead_code)]

use marrow_posekeys::{PoseKeysHeader, SampleMode, TrackKind};

/// Fixed dequantization maps for absolute rotation components
pub const ROT_SCALE_X: f32 = 1.3487e-6;
pub const ROT_SCALE_YZ: f32 = 3.371749e-7;
pub const ROT_MIN: f32 = -0.7071068;

/// Pack three fixed-point fields into a sample word (`[z:11][y:11][x:10]`)
pub fn pack_fields(raw: [u32; 3]) -> u32 {
    assert!(raw[0] < 1 << 10 && raw[1] < 1 << 11 && raw[2] < 1 << 11);
    (raw[2] << 21) | (raw[1] << 10) | raw[0]
}

/// Quantize a value against a folded (scale, min) axis map
pub fn quantize(value: f32, min: f32, scale: f32) -> u32 {
    ((value - min) / scale).round() as u32
}

/// Quantize identity-adjacent absolute rotation fields
pub fn rot_raw(value: [f32; 3]) -> [u32; 3] {
    [
        quantize(value[0], ROT_MIN, ROT_SCALE_X),
        quantize(value[1], ROT_MIN, ROT_SCALE_YZ),
        quantize(value[2], ROT_MIN, ROT_SCALE_YZ),
    ]
}

pub struct BlobBuilder {
    min_vector: [f32; 3],
    range_vector: [f32; 3],
    range_time: f32,
    bone_count: u32,
    symbols: Vec<u64>,
    payload: Vec<u32>,
    control: Vec<u32>,
}

impl BlobBuilder {
    pub fn new(bone_count: u32) -> Self {
        Self {
            min_vector: [0.0; 3],
            range_vector: [1.0; 3],
            range_time: 65535.0,
            bone_count,
            symbols: vec![0; bone_count as usize],
            payload: Vec::new(),
            control: Vec::new(),
        }
    }

    pub fn vector_range(&mut self, min: [f32; 3], range: [f32; 3]) -> &mut Self {
        self.min_vector = min;
        self.range_vector = range;
        self
    }

    pub fn symbols(&mut self, symbols: &[u64]) -> &mut Self {
        assert_eq!(symbols.len(), self.bone_count as usize);
        self.symbols = symbols.to_vec();
        self
    }

    /// Append an absolute sample group (8 words: 4 low, then 4 high)
    pub fn absolute_group(&mut self, raws: [[u32; 3]; 4]) -> &mut Self {
        for raw in raws {
            assert!(raw[0] < 1 << 20 && raw[1] < 1 << 22 && raw[2] < 1 << 22);
            self.payload
                .push(pack_fields([raw[0] & 0x3FF, raw[1] & 0x7FF, raw[2] & 0x7FF]));
        }
        for raw in raws {
            self.payload
                .push(pack_fields([raw[0] >> 10, raw[1] >> 11, raw[2] >> 11]));
        }
        self
    }

    pub fn event(
        &mut self,
        channel: u32,
        raw_time: u16,
        kind: TrackKind,
        mode: SampleMode,
        axis: u8,
    ) -> &mut Self {
        let mut word = raw_time as u32 | (channel << 16) | ((axis as u32) << 28);
        if kind == TrackKind::Rotation {
            word |= 1 << 30;
        }
        if mode == SampleMode::Delta {
            word |= 1 << 31;
        }
        self.control.push(word);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut blob = vec![0u8; PoseKeysHeader::SIZE];
        write_vec3(&mut blob, 0x30, self.min_vector);
        write_vec3(&mut blob, 0x3C, self.range_vector);
        blob[0x48..0x4C].copy_from_slice(&self.range_time.to_le_bytes());
        blob[0x4C..0x50].copy_from_slice(&self.bone_count.to_le_bytes());
        let sample_data_size = (self.payload.len() * 4) as u32;
        blob[0x50..0x54].copy_from_slice(&sample_data_size.to_le_bytes());

        blob.extend_from_slice(&0u64.to_le_bytes()); // reserved type hash
        for word in &self.payload {
            blob.extend_from_slice(&word.to_le_bytes());
        }
        for symbol in &self.symbols {
            blob.extend_from_slice(&symbol.to_le_bytes());
        }
        for word in &self.control {
            blob.extend_from_slice(&word.to_le_bytes());
        }
        blob
    }
}

fn write_vec3(blob: &mut [u8], offset: usize, value: [f32; 3]) {
    for (i, component) in value.iter().enumerate() {
        blob[offset + i * 4..offset + i * 4 + 4].copy_from_slice(&component.to_le_bytes());
    }
}
