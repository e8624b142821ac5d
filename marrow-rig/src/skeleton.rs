//! Skeleton model: bone hierarchy and bind pose
//!
//! Bones are stored parents-first (`parent(i) < i`), validated at
//! construction. That ordering lets every hierarchy walk be a single forward
//! pass with no recursion or cycle detection.

use glam::{Mat4, Quat, Vec3};

use crate::SkeletonError;
use crate::pose::PoseFrame;

/// One bone of a skeleton
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bone {
    /// Index of the parent bone, `None` for roots
    pub parent: Option<usize>,
    /// Bind-pose local position
    pub bind_position: Vec3,
    /// Bind-pose local rotation
    pub bind_rotation: Quat,
    /// Stable content hash correlating this bone with animation channels
    pub symbol: u64,
}

impl Bone {
    /// Bind-pose local transform (`translate * rotate`)
    pub fn bind_local(&self) -> Mat4 {
        Mat4::from_translation(self.bind_position) * Mat4::from_quat(self.bind_rotation)
    }
}

/// An ordered bone list with precomputed bind-pose products
///
/// Immutable after construction and safe to share across threads; decode
/// sessions carry all per-playback state.
#[derive(Debug, Clone)]
pub struct Skeleton {
    bones: Vec<Bone>,
    bind_globals: Vec<Mat4>,
    inverse_binds: Vec<Mat4>,
}

impl Skeleton {
    /// Build a skeleton, validating the parents-first ordering
    ///
    /// # Errors
    /// Returns [`SkeletonError::ParentOutOfOrder`] if any bone's parent index
    /// does not precede the bone itself.
    pub fn new(bones: Vec<Bone>) -> Result<Self, SkeletonError> {
        for (index, bone) in bones.iter().enumerate() {
            if let Some(parent) = bone.parent
                && parent >= index
            {
                return Err(SkeletonError::ParentOutOfOrder {
                    bone: index,
                    parent,
                });
            }
        }

        let mut bind_globals = Vec::with_capacity(bones.len());
        for bone in &bones {
            let local = bone.bind_local();
            let global = match bone.parent {
                Some(parent) => bind_globals[parent] * local,
                None => local,
            };
            bind_globals.push(global);
        }
        let inverse_binds = bind_globals.iter().map(Mat4::inverse).collect();

        Ok(Self {
            bones,
            bind_globals,
            inverse_binds,
        })
    }

    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    /// World-space bind-pose frame (the unanimated hierarchy)
    pub fn bind_pose(&self) -> PoseFrame {
        PoseFrame::new(self.bind_globals.clone())
    }

    /// Per-bone inverse bind matrices (world bind pose inverted)
    pub fn inverse_binds(&self) -> &[Mat4] {
        &self.inverse_binds
    }
}
