//! Marrow-Rig: skeleton model and pose resolution
//!
//! Turns decoded pose-key samples into world-space bone matrices. A
//! [`Skeleton`] carries the bone hierarchy and bind pose; an [`Animator`]
//! drives a `marrow-posekeys` decode session through looping playback and
//! resolves a [`PoseFrame`] per frame. The frame's byte view is what the
//! renderer copies into a GPU-visible uniform buffer - nothing in this crate
//! touches GPU resources.
//!
//! Channels correlate with bones by 64-bit content hash ([`bone_symbol`]);
//! bones without a matching channel keep their bind-pose local transform, so
//! partial-body clips resolve cleanly.
//!
//! # Usage
//!
//! ```no_run
//! use marrow_posekeys::Animation;
//! use marrow_rig::{Animator, Bone, Skeleton, bone_symbol};
//! use glam::{Quat, Vec3};
//!
//! let skeleton = Skeleton::new(vec![Bone {
//!     parent: None,
//!     bind_position: Vec3::ZERO,
//!     bind_rotation: Quat::IDENTITY,
//!     symbol: bone_symbol("root"),
//! }])
//! .unwrap();
//!
//! let blob = std::fs::read("clip.mwpose").unwrap();
//! let animation = Animation::from_blob(blob).unwrap();
//! let mut animator = Animator::bind(&skeleton, animation, 1.25);
//!
//! animator.advance(1.0 / 60.0);
//! let pose = animator.pose(&skeleton).unwrap();
//! let _bytes = pose.as_bytes();
//! ```

mod animator;
mod pose;
mod skeleton;

pub use animator::{AnimationBinding, Animator, resolve_pose};
pub use pose::PoseFrame;
pub use skeleton::{Bone, Skeleton};

/// Stable 64-bit content hash correlating a bone name with animation channels
pub fn bone_symbol(name: &str) -> u64 {
    xxhash_rust::xxh3::xxh3_64(name.as_bytes())
}

/// Errors raised while validating a skeleton
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SkeletonError {
    /// A bone's parent does not precede it in the bone list
    ///
    /// The resolver relies on parents sorting before children for its
    /// single-pass hierarchy walk; a list violating that is corrupt input.
    #[error("bone {bone} has parent {parent}, which does not precede it")]
    ParentOutOfOrder { bone: usize, parent: usize },
}
