//! Decode session state
//!
//! A session owns everything one playback traversal mutates: per-channel
//! sample cursors, the four staging batches, and the payload/control read
//! positions. Decoding advances monotonically; reset the session whenever
//! playback time moves backward.

use glam::{Quat, Vec3};

use crate::DecodeError;
use crate::animation::Animation;
use crate::batch::StagingBatch;
use crate::event::{DecodeEvent, SampleMode, TrackKind};
use crate::header::AxisMap;
use crate::reader::WordReader;

/// A decoded sample value and the time it was keyed at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedSample<T> {
    pub value: T,
    pub time: f32,
}

/// Previous and current decoded samples for one track
///
/// `current.time >= previous.time` always holds; an unseeded track has seen
/// no samples and reports `None`.
#[derive(Debug, Clone, Copy, Default)]
struct TrackCursor<T> {
    previous: Option<TimedSample<T>>,
    current: Option<TimedSample<T>>,
}

impl<T: Copy> TrackCursor<T> {
    fn push(&mut self, value: T, time: f32) {
        self.previous = self.current;
        self.current = Some(TimedSample { value, time });
    }

    fn previous_time(&self) -> Option<f32> {
        self.previous.map(|sample| sample.time)
    }
}

/// Decoded state of one animation channel
#[derive(Debug, Clone, Copy, Default)]
pub struct ChannelState {
    translation: TrackCursor<Vec3>,
    rotation: TrackCursor<Quat>,
}

impl ChannelState {
    /// Latest decoded vector sample, or `None` if the track is unseeded
    pub fn translation(&self) -> Option<TimedSample<Vec3>> {
        self.translation.current
    }

    /// Latest decoded rotation sample, or `None` if the track is unseeded
    pub fn rotation(&self) -> Option<TimedSample<Quat>> {
        self.rotation.current
    }
}

/// Mutable decode state for one playback traversal of an [`Animation`]
///
/// Exclusively owned by the caller driving one skeleton's playback. Separate
/// animations may decode concurrently on separate threads as long as each has
/// its own session; the `Animation` itself is read-only and shareable.
#[derive(Debug, Clone)]
pub struct DecodeSession {
    channels: Vec<ChannelState>,
    vector_absolute: StagingBatch,
    vector_delta: StagingBatch,
    rotation_absolute: StagingBatch,
    rotation_delta: StagingBatch,
    payload_pos: usize,
    control_pos: usize,
}

impl DecodeSession {
    pub fn new(animation: &Animation) -> Self {
        Self {
            channels: vec![ChannelState::default(); animation.channel_count()],
            vector_absolute: StagingBatch::new(),
            vector_delta: StagingBatch::new(),
            rotation_absolute: StagingBatch::new(),
            rotation_delta: StagingBatch::new(),
            payload_pos: 0,
            control_pos: 0,
        }
    }

    /// Forget all decoded state and rewind to the start of the stream
    pub fn reset(&mut self) {
        self.channels.fill(ChannelState::default());
        self.vector_absolute.reset();
        self.vector_delta.reset();
        self.rotation_absolute.reset();
        self.rotation_delta.reset();
        self.payload_pos = 0;
        self.control_pos = 0;
    }

    pub fn channel(&self, index: usize) -> &ChannelState {
        &self.channels[index]
    }

    pub fn channels(&self) -> &[ChannelState] {
        &self.channels
    }

    /// Decode control words until every channel's cursor has passed `target`
    /// or the stream is exhausted
    ///
    /// Scanning stops at the first event whose track already holds a previous
    /// sample later than `target`; that event is not consumed, so a later
    /// call with a larger target resumes at the same word. `target` must not
    /// move backward between calls without a [`reset`](Self::reset).
    ///
    /// # Errors
    /// Fails closed on a truncated control word or sample refill, or on a
    /// channel index beyond the declared bone count. The session is not safe
    /// to keep driving after an error.
    pub fn advance_to(&mut self, animation: &Animation, target: f32) -> Result<(), DecodeError> {
        let header = animation.header();
        let mut control = WordReader::new(animation.control_words(), self.control_pos);
        let mut payload = WordReader::new(animation.sample_payload(), self.payload_pos);

        while !control.is_empty() {
            let event = DecodeEvent::from_word(control.peek_u32()?, header)?;
            let channel = &self.channels[event.channel];
            let previous_time = match event.kind {
                TrackKind::Vector => channel.translation.previous_time(),
                TrackKind::Rotation => channel.rotation.previous_time(),
            };
            if previous_time.is_some_and(|time| time > target) {
                break;
            }
            control.next_u32()?;

            match (event.kind, event.mode) {
                (TrackKind::Vector, SampleMode::Absolute) => {
                    let fields = self
                        .vector_absolute
                        .take(&header.vector, true, &mut payload)?;
                    self.channels[event.channel]
                        .translation
                        .push(Vec3::from_array(fields), event.time);
                }
                (TrackKind::Vector, SampleMode::Delta) => {
                    let fields = self
                        .vector_delta
                        .take(&header.delta_vector, false, &mut payload)?;
                    let cursor = &mut self.channels[event.channel].translation;
                    let base = cursor.current.map_or(Vec3::ZERO, |sample| sample.value);
                    cursor.push(base + Vec3::from_array(fields), event.time);
                }
                (TrackKind::Rotation, SampleMode::Absolute) => {
                    let fields =
                        self.rotation_absolute
                            .take(&AxisMap::ABSOLUTE_ROTATION, true, &mut payload)?;
                    self.channels[event.channel]
                        .rotation
                        .push(reorder_rotation(fields, event.axis), event.time);
                }
                (TrackKind::Rotation, SampleMode::Delta) => {
                    let fields =
                        self.rotation_delta
                            .take(&header.delta_rotation, false, &mut payload)?;
                    let delta =
                        Quat::from_xyzw(fields[0], fields[1], fields[2], reconstructed(fields));
                    let cursor = &mut self.channels[event.channel].rotation;
                    let base = cursor.current.map_or(Quat::IDENTITY, |sample| sample.value);
                    // Encoder composes deltas on the left of the running orientation
                    cursor.push(delta * base, event.time);
                }
            }
        }

        self.control_pos = control.position();
        self.payload_pos = payload.position();
        Ok(())
    }
}

/// Reconstruct the untransmitted quaternion component
///
/// The squared-magnitude deficit is clamped to zero; slightly over-unit
/// transmitted triples are quantization noise, not errors.
#[inline]
fn reconstructed(fields: [f32; 3]) -> f32 {
    (1.0 - fields[0] * fields[0] - fields[1] * fields[1] - fields[2] * fields[2])
        .max(0.0)
        .sqrt()
}

/// Permute the transmitted fields and reconstructed component back into
/// canonical (x, y, z, w) order
///
/// `axis` names the component the encoder omitted; the XOR indexing inverts
/// the encoder's permutation.
fn reorder_rotation(fields: [f32; 3], axis: u8) -> Quat {
    let slots = [fields[0], fields[1], fields[2], reconstructed(fields)];
    let sel = axis as usize;
    Quat::from_xyzw(slots[sel ^ 1], slots[sel ^ 2], slots[sel ^ 3], slots[sel])
}
