//! Channel binding, pose resolution, and looping playback

use glam::Mat4;
use hashbrown::HashMap;
use marrow_posekeys::{Animation, DecodeError, DecodeSession};
use tracing::{debug, trace};

use crate::pose::PoseFrame;
use crate::skeleton::Skeleton;

/// Per-bone channel lookup for one (skeleton, animation) pair
///
/// Built once when an animation is bound; bones whose symbol matches no
/// channel stay `None` and resolve to their bind pose.
#[derive(Debug, Clone)]
pub struct AnimationBinding {
    bone_channels: Vec<Option<usize>>,
}

impl AnimationBinding {
    pub fn new(skeleton: &Skeleton, animation: &Animation) -> Self {
        let channels: HashMap<u64, usize> = animation
            .channel_symbols()
            .enumerate()
            .map(|(index, symbol)| (symbol, index))
            .collect();
        let bone_channels: Vec<Option<usize>> = skeleton
            .bones()
            .iter()
            .map(|bone| channels.get(&bone.symbol).copied())
            .collect();

        let matched = bone_channels.iter().flatten().count();
        debug!(
            bones = skeleton.bone_count(),
            channels = animation.channel_count(),
            matched,
            "bound animation channels to skeleton"
        );
        Self { bone_channels }
    }

    pub fn channel_for_bone(&self, bone: usize) -> Option<usize> {
        self.bone_channels[bone]
    }
}

/// Resolve the world-space pose at `time`
///
/// Decodes just far enough for every channel, then walks the bone list once:
/// animated bones take their latest decoded samples, unmatched bones (and
/// unseeded tracks) keep the bind pose, and each global transform composes
/// onto its parent's. Bones are parents-first, so one forward pass suffices.
///
/// # Errors
/// Propagates decode failures unrecovered; the caller should hold the last
/// good pose rather than render a partial one.
pub fn resolve_pose(
    skeleton: &Skeleton,
    animation: &Animation,
    binding: &AnimationBinding,
    session: &mut DecodeSession,
    time: f32,
) -> Result<PoseFrame, DecodeError> {
    session.advance_to(animation, time)?;

    let mut matrices: Vec<Mat4> = Vec::with_capacity(skeleton.bone_count());
    for (index, bone) in skeleton.bones().iter().enumerate() {
        let mut position = bone.bind_position;
        let mut rotation = bone.bind_rotation;
        if let Some(channel) = binding.bone_channels[index] {
            let state = session.channel(channel);
            if let Some(sample) = state.translation() {
                // Vector samples store a unit direction scaled by bone length
                position = sample.value * bone.bind_position.length();
            }
            if let Some(sample) = state.rotation() {
                rotation = sample.value;
            }
        }

        let local = Mat4::from_translation(position) * Mat4::from_quat(rotation);
        let global = match bone.parent {
            Some(parent) => matrices[parent] * local,
            None => local,
        };
        matrices.push(global);
    }

    trace!(time, bones = matrices.len(), "resolved pose");
    Ok(PoseFrame::new(matrices))
}

/// Looping playback of one animation over one skeleton
///
/// Owns the clip, its decode session, and the playback clock. Whenever time
/// moves backward (loop wrap or seek) the decode session is reset before the
/// next resolve. Times are never clamped; the clip duration comes from the
/// asset loader.
#[derive(Debug)]
pub struct Animator {
    animation: Animation,
    binding: AnimationBinding,
    session: DecodeSession,
    duration: f32,
    time: f32,
}

impl Animator {
    /// Bind an animation to the skeleton it will be resolved against
    pub fn bind(skeleton: &Skeleton, animation: Animation, duration: f32) -> Self {
        let binding = AnimationBinding::new(skeleton, &animation);
        let session = DecodeSession::new(&animation);
        Self {
            animation,
            binding,
            session,
            duration,
            time: 0.0,
        }
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    /// Accumulate playback time, wrapping to the clip start past the end
    pub fn advance(&mut self, dt: f32) {
        self.time += dt;
        if self.time > self.duration {
            self.time = 0.0;
            self.rewind();
        }
    }

    /// Jump to an absolute playback time
    pub fn seek(&mut self, time: f32) {
        if time < self.time {
            self.rewind();
        }
        self.time = time;
    }

    /// Resolve the pose at the current playback time
    ///
    /// `skeleton` must be the skeleton this animator was bound to.
    pub fn pose(&mut self, skeleton: &Skeleton) -> Result<PoseFrame, DecodeError> {
        resolve_pose(
            skeleton,
            &self.animation,
            &self.binding,
            &mut self.session,
            self.time,
        )
    }

    fn rewind(&mut self) {
        debug!("playback time moved backward; resetting decode session");
        self.session.reset();
    }
}
