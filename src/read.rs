use cgmath::{Deg, Euler, Vector3};
use log::debug;

use crate::coord::{self, SchemaVersion};
use crate::error::ReplayError;
use crate::timeline::TransformSample;
use crate::{ReplayBody, ReplayDocument};

impl ReplayDocument {
    /// Parse a replay document from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        serde_json::from_str(json).map_err(|e| ReplayError::MalformedReplay {
            field: "document",
            detail: e.to_string(),
        })
    }

    /// Decode into absolute per-frame transforms in scene space.
    ///
    /// The output holds one sample per frame plus the frame -1 start pose,
    /// so its length is always input length + 1. Positions come from a
    /// running sum over the mapped deltas; the accumulator is carried from
    /// frame to frame rather than recomputed, so repeated decodes of the
    /// same document are bit-identical.
    ///
    /// Validation happens up front: a failed decode produces no partial
    /// output.
    pub fn decode(&self, version: SchemaVersion) -> Result<Vec<TransformSample>, ReplayError> {
        let body = &self.root;
        validate(body)?;

        let frames = body.player_position_delta.len();
        debug!("decoding {} frames ({:?})", frames, version);

        let start = coord::start_to_scene(version, body.header.start_position());
        let mut samples = Vec::with_capacity(frames + 1);
        //No rotation data exists for the pre-roll frame
        samples.push(TransformSample::at(-1, start));

        let mut position = start;
        for i in 0..frames {
            let [dx, dy, dz] = body.player_position_delta[i];
            position += coord::delta_to_scene(Vector3::new(dx, dy, dz));

            let [rx, ry, rz] = body.player_tilt[i];
            samples.push(TransformSample {
                frame: i as i64,
                position,
                ball_rotation: coord::ball_rotation_to_scene(Euler::new(
                    Deg(rx),
                    Deg(ry),
                    Deg(rz),
                )),
                stage_rotation: coord::stage_tilt_to_scene(body.stage_tilt[i]),
            });
        }

        Ok(samples)
    }
}

fn validate(body: &ReplayBody) -> Result<(), ReplayError> {
    let frames = body.player_position_delta.len();
    if body.player_tilt.len() != frames {
        return Err(ReplayError::MalformedReplay {
            field: "playerTilt",
            detail: format!(
                "{} entries against {} position deltas",
                body.player_tilt.len(),
                frames
            ),
        });
    }
    if body.stage_tilt.len() != frames {
        return Err(ReplayError::MalformedReplay {
            field: "stageTilt",
            detail: format!(
                "{} entries against {} position deltas",
                body.stage_tilt.len(),
                frames
            ),
        });
    }

    let start = body.header.start_position();
    if !start.x.is_finite() || !start.y.is_finite() || !start.z.is_finite() {
        return Err(ReplayError::NonFiniteValue {
            field: "header",
            frame: -1,
        });
    }
    for (i, d) in body.player_position_delta.iter().enumerate() {
        if d.iter().any(|v| !v.is_finite()) {
            return Err(ReplayError::NonFiniteValue {
                field: "playerPositionDelta",
                frame: i as i64,
            });
        }
    }
    for (i, t) in body.player_tilt.iter().enumerate() {
        if t.iter().any(|v| !v.is_finite()) {
            return Err(ReplayError::NonFiniteValue {
                field: "playerTilt",
                frame: i as i64,
            });
        }
    }
    for (i, t) in body.stage_tilt.iter().enumerate() {
        if t.iter().any(|v| !v.is_finite()) {
            return Err(ReplayError::NonFiniteValue {
                field: "stageTilt",
                frame: i as i64,
            });
        }
    }

    Ok(())
}
