//! Resolved pose output

use glam::Mat4;

use crate::skeleton::Skeleton;

/// One resolved frame: world-space transforms for every bone
///
/// Produced fresh by each resolve and owned by the caller; the renderer
/// copies [`as_bytes`](Self::as_bytes) verbatim into a uniform buffer slot.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseFrame {
    matrices: Vec<Mat4>,
}

impl PoseFrame {
    pub(crate) fn new(matrices: Vec<Mat4>) -> Self {
        Self { matrices }
    }

    /// World-space transform per bone, in bone order
    pub fn matrices(&self) -> &[Mat4] {
        &self.matrices
    }

    pub fn bone_count(&self) -> usize {
        self.matrices.len()
    }

    /// Raw little-endian byte view for the GPU upload copy
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.matrices)
    }

    /// Skinning matrix palette: `global * inverse_bind` per bone
    ///
    /// # Panics
    /// Panics if `skeleton` has a different bone count than this frame.
    pub fn skinning_matrices(&self, skeleton: &Skeleton) -> Vec<Mat4> {
        assert_eq!(self.matrices.len(), skeleton.bone_count());
        self.matrices
            .iter()
            .zip(skeleton.inverse_binds())
            .map(|(global, inverse_bind)| *global * *inverse_bind)
            .collect()
    }
}
