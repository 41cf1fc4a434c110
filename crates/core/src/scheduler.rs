//! Scheduler module - dual-cadence frame driver
//!
//! A single real-time frame source is fanned out into two slower cadences:
//!
//! ```text
//! frame ──throttle──▶ accepted frame ──/frequency──▶ input tick ──/keyframes──▶ gravity tick
//! ```
//!
//! The scheduler owns a pending-frame flag that plays the role of an
//! animation-frame request: a frame is only processed when one is pending, and
//! processing consumes it. The session re-arms it at the end of every frame
//! while the game keeps running, and cancels it on pause or game over.
//!
//! Frames closer than `min_frame_ms` to the last accepted frame are dropped
//! without touching any counter.

use log::trace;

use crate::types::EngineConfig;

/// Result of offering a frame to the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStep {
    /// No frame was pending.
    NotArmed,
    /// Too soon after the last accepted frame; nothing advanced.
    Throttled,
    /// Accepted, but the fast countdown has not elapsed.
    Idle,
    /// Accepted and the fast countdown elapsed: run an input-response tick.
    Input,
}

#[derive(Debug, Clone)]
pub struct Scheduler {
    frequency: u32,
    keyframes: u32,
    min_frame_ms: u64,
    frame_count: u32,
    keyframe_count: u32,
    last_frame_ms: Option<u64>,
    pending: bool,
}

impl Scheduler {
    pub fn new(config: &EngineConfig) -> Self {
        let frequency = config.frequency.max(1);
        let keyframes = config.keyframes.max(1);
        Self {
            frequency,
            keyframes,
            min_frame_ms: config.min_frame_ms,
            frame_count: frequency,
            keyframe_count: keyframes,
            last_frame_ms: None,
            pending: false,
        }
    }

    /// Restore both countdowns to their starting values.
    ///
    /// The last accepted timestamp is kept so a new game cannot sneak in a
    /// frame below the throttle floor.
    pub fn reset(&mut self) {
        self.frame_count = self.frequency;
        self.keyframe_count = self.keyframes;
    }

    /// Request the next frame.
    pub fn arm(&mut self) {
        self.pending = true;
    }

    /// Drop the pending frame request, if any.
    pub fn cancel(&mut self) {
        self.pending = false;
    }

    pub fn is_armed(&self) -> bool {
        self.pending
    }

    /// Process one real-time frame at monotonic time `now_ms`.
    ///
    /// Consumes the pending request. A throttled frame re-arms itself, since
    /// the caller only re-arms frames that did work.
    pub fn frame(&mut self, now_ms: u64) -> FrameStep {
        if !self.pending {
            return FrameStep::NotArmed;
        }
        self.pending = false;

        if let Some(last) = self.last_frame_ms {
            if now_ms.saturating_sub(last) < self.min_frame_ms {
                trace!("frame at {}ms throttled (last {}ms)", now_ms, last);
                self.pending = true;
                return FrameStep::Throttled;
            }
        }
        self.last_frame_ms = Some(now_ms);

        self.frame_count -= 1;
        if self.frame_count > 0 {
            return FrameStep::Idle;
        }
        self.frame_count = self.frequency;
        FrameStep::Input
    }

    /// Count one input-response tick; true when a gravity tick is due.
    pub fn keyframe(&mut self) -> bool {
        self.keyframe_count -= 1;
        if self.keyframe_count > 0 {
            return false;
        }
        self.keyframe_count = self.keyframes;
        true
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn keyframe_count(&self) -> u32 {
        self.keyframe_count
    }

    pub fn last_frame_ms(&self) -> Option<u64> {
        self.last_frame_ms
    }

    pub fn min_frame_ms(&self) -> u64 {
        self.min_frame_ms
    }

    /// Accepted frames between two gravity ticks.
    pub fn frames_per_gravity(&self) -> u32 {
        self.frequency * self.keyframes
    }
}
