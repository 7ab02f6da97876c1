pub mod coord;
pub mod error;
pub mod read;
pub mod timeline;
pub mod write;

pub use crate::coord::SchemaVersion;
pub use crate::error::ReplayError;
pub use crate::timeline::{FrameRange, TransformSample, FRAME_RATE};

use cgmath::Vector3;
use serde::{Deserialize, Serialize};

/// A replay motion document as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub root: ReplayBody,
}

/// The three motion streams plus the start pose. All three sequences must
/// have one entry per playback frame; the frame -1 pose lives in `header`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayBody {
    pub header: ReplayHeader,
    pub player_position_delta: Vec<[f64; 3]>,
    pub player_tilt: Vec<[f64; 3]>,
    pub stage_tilt: Vec<[f64; 2]>,
}

/// Absolute starting position in replay space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayHeader {
    pub start_position_x: f64,
    pub start_position_y: f64,
    pub start_position_z: f64,
}

impl ReplayHeader {
    pub fn start_position(&self) -> Vector3<f64> {
        Vector3::new(
            self.start_position_x,
            self.start_position_y,
            self.start_position_z,
        )
    }
}
