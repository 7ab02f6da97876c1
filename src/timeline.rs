use cgmath::{Euler, Rad, Vector3};

/// Replay sample rate, Hz.
pub const FRAME_RATE: u32 = 60;

/// Inclusive span of frames a transform sequence covers.
///
/// Frame -1 is the pre-roll start pose; playback proper runs from frame 0.
/// `first` must not exceed `last`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRange {
    pub first: i64,
    pub last: i64,
}

impl FrameRange {
    /// The full replay span: the start pose plus 3840 frames, 64 seconds
    /// at 60 Hz.
    pub const CANONICAL: FrameRange = FrameRange { first: -1, last: 3839 };

    pub fn sample_count(&self) -> usize {
        (self.last - self.first + 1) as usize
    }

    /// Per-frame entry count, which excludes the pre-roll pose.
    pub fn frame_count(&self) -> usize {
        self.sample_count() - 1
    }
}

/// One absolute keyframe in scene space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformSample {
    pub frame: i64,
    pub position: Vector3<f64>,
    pub ball_rotation: Euler<Rad<f64>>,
    pub stage_rotation: (Rad<f64>, Rad<f64>),
}

impl TransformSample {
    /// A sample holding a position and no rotation.
    pub fn at(frame: i64, position: Vector3<f64>) -> Self {
        TransformSample {
            frame,
            position,
            ball_rotation: Euler::new(Rad(0.0), Rad(0.0), Rad(0.0)),
            stage_rotation: (Rad(0.0), Rad(0.0)),
        }
    }
}
