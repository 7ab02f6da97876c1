use log::debug;
use serde_json::{json, Value};

use crate::coord::{self, SchemaVersion};
use crate::error::ReplayError;
use crate::timeline::{FrameRange, TransformSample};
use crate::{ReplayBody, ReplayDocument, ReplayHeader};

/// Marks fresh output as a splice source rather than a playable file.
pub const SNIPPET_COMMENT: &str =
    "Note - This JSON is NOT a valid replay! It provides snippets to splice into an existing replay";

impl ReplayDocument {
    /// Serialize with indentation and declaration key order so documents
    /// diff cleanly under source control.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).expect("replay documents always serialize")
    }
}

/// Encode absolute scene-space transforms back into a replay document.
///
/// `samples` must cover `range` exactly: one sample per frame, start pose
/// first. The result is a fresh snippet document; use [`encode_into`] to
/// splice the motion into an existing replay instead.
pub fn encode(
    samples: &[TransformSample],
    version: SchemaVersion,
    range: FrameRange,
) -> Result<ReplayDocument, ReplayError> {
    validate(samples, range)?;
    debug!("encoding {} samples ({:?})", samples.len(), version);

    let start = coord::start_to_replay(version, samples[0].position);

    //Difference consecutive replay-space positions. Convert first, subtract
    //after; this is the order the decoder's running sum inverts.
    let mut deltas = Vec::with_capacity(samples.len() - 1);
    let mut prev = coord::delta_to_replay(samples[0].position);
    for sample in &samples[1..] {
        let cur = coord::delta_to_replay(sample.position);
        deltas.push([cur.x - prev.x, cur.y - prev.y, cur.z - prev.z]);
        prev = cur;
    }

    //Rotations are absolute, so the frame -1 sample contributes none
    let player_tilt = samples[1..]
        .iter()
        .map(|s| {
            let e = coord::ball_rotation_to_replay(s.ball_rotation);
            [e.x.0, e.y.0, e.z.0]
        })
        .collect();
    let stage_tilt = samples[1..]
        .iter()
        .map(|s| coord::stage_tilt_to_replay(s.stage_rotation))
        .collect();

    Ok(ReplayDocument {
        comment: Some(SNIPPET_COMMENT.to_string()),
        root: ReplayBody {
            header: ReplayHeader {
                start_position_x: start.x,
                start_position_y: start.y,
                start_position_z: start.z,
            },
            player_position_delta: deltas,
            player_tilt,
            stage_tilt,
        },
    })
}

/// Splice encoded motion into a copy of `base`.
///
/// Only `root.header` and the three motion streams are overwritten; every
/// other field of the base document, known or not, is left untouched.
pub fn encode_into(
    samples: &[TransformSample],
    version: SchemaVersion,
    range: FrameRange,
    base: &Value,
) -> Result<Value, ReplayError> {
    let doc = encode(samples, version, range)?;

    let mut out = base.clone();
    let root = out
        .get_mut("root")
        .and_then(Value::as_object_mut)
        .ok_or(ReplayError::BaseDocumentMissing { field: "root" })?;
    for &field in &["header", "playerPositionDelta", "playerTilt", "stageTilt"] {
        if !root.contains_key(field) {
            return Err(ReplayError::BaseDocumentMissing { field });
        }
    }

    root.insert(
        "header".to_string(),
        json!({
            "startPositionX": doc.root.header.start_position_x,
            "startPositionY": doc.root.header.start_position_y,
            "startPositionZ": doc.root.header.start_position_z,
        }),
    );
    root.insert(
        "playerPositionDelta".to_string(),
        json!(doc.root.player_position_delta),
    );
    root.insert("playerTilt".to_string(), json!(doc.root.player_tilt));
    root.insert("stageTilt".to_string(), json!(doc.root.stage_tilt));

    Ok(out)
}

fn validate(samples: &[TransformSample], range: FrameRange) -> Result<(), ReplayError> {
    let expected = range.sample_count();
    if samples.len() != expected {
        return Err(ReplayError::FrameRangeMismatch {
            expected,
            actual: samples.len(),
        });
    }

    for sample in samples {
        let p = sample.position;
        if !p.x.is_finite() || !p.y.is_finite() || !p.z.is_finite() {
            return Err(ReplayError::NonFiniteValue {
                field: "position",
                frame: sample.frame,
            });
        }
        let r = sample.ball_rotation;
        if !r.x.0.is_finite() || !r.y.0.is_finite() || !r.z.0.is_finite() {
            return Err(ReplayError::NonFiniteValue {
                field: "ballRotation",
                frame: sample.frame,
            });
        }
        let (a, b) = sample.stage_rotation;
        if !a.0.is_finite() || !b.0.is_finite() {
            return Err(ReplayError::NonFiniteValue {
                field: "stageRotation",
                frame: sample.frame,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use cgmath::Vector3;

    fn still_samples(count: usize) -> Vec<TransformSample> {
        (0..count)
            .map(|i| TransformSample::at(i as i64 - 1, Vector3::new(0.0, 0.0, 0.0)))
            .collect()
    }

    #[test]
    fn two_frame_encode() {
        let samples = vec![
            TransformSample::at(-1, Vector3::new(0.0, 0.0, 0.0)),
            TransformSample::at(0, Vector3::new(-1.0, 0.0, 0.0)),
            TransformSample::at(1, Vector3::new(-1.0, 0.0, 1.0)),
        ];
        let range = FrameRange { first: -1, last: 1 };
        let doc = encode(&samples, SchemaVersion::V2, range).unwrap();

        assert_eq!(doc.root.header.start_position_x, 0.0);
        assert_eq!(doc.root.header.start_position_y, 0.0);
        assert_eq!(doc.root.header.start_position_z, 0.0);
        assert_eq!(
            doc.root.player_position_delta,
            vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]
        );
        assert_eq!(doc.root.player_tilt, vec![[0.0; 3]; 2]);
        assert_eq!(doc.root.stage_tilt, vec![[0.0; 2]; 2]);
        assert_eq!(doc.comment.as_deref(), Some(SNIPPET_COMMENT));
    }

    #[test]
    fn sample_count_must_match_the_range() {
        for &count in &[3840usize, 3842] {
            match encode(&still_samples(count), SchemaVersion::V2, FrameRange::CANONICAL) {
                Err(ReplayError::FrameRangeMismatch { expected: 3841, actual }) => {
                    assert_eq!(actual, count)
                }
                other => panic!("expected FrameRangeMismatch, got {:?}", other),
            }
        }
        assert!(encode(&still_samples(3841), SchemaVersion::V2, FrameRange::CANONICAL).is_ok());
    }

    #[test]
    fn non_finite_position_is_rejected() {
        let mut samples = still_samples(3);
        samples[1].position.z = f64::NAN;
        let range = FrameRange { first: -1, last: 1 };
        assert_eq!(
            encode(&samples, SchemaVersion::V2, range),
            Err(ReplayError::NonFiniteValue {
                field: "position",
                frame: 0,
            })
        );
    }

    #[test]
    fn splice_only_touches_the_motion_fields() {
        let base = json!({
            "comment": "a full replay",
            "extra": 42,
            "root": {
                "header": { "startPositionX": 9.0, "startPositionY": 9.0, "startPositionZ": 9.0 },
                "playerPositionDelta": [[9.0, 9.0, 9.0]],
                "playerTilt": [[9.0, 9.0, 9.0]],
                "stageTilt": [[9.0, 9.0]],
                "stageId": 13
            }
        });

        let samples = vec![
            TransformSample::at(-1, Vector3::new(0.0, 0.0, 0.0)),
            TransformSample::at(0, Vector3::new(-1.0, 0.0, 0.0)),
        ];
        let range = FrameRange { first: -1, last: 0 };
        let out = encode_into(&samples, SchemaVersion::V2, range, &base).unwrap();

        assert_eq!(out["extra"], 42);
        assert_eq!(out["comment"], "a full replay");
        assert_eq!(out["root"]["stageId"], 13);
        assert_eq!(out["root"]["playerPositionDelta"], json!([[1.0, 0.0, 0.0]]));
        assert_eq!(out["root"]["header"]["startPositionX"], 0.0);
        //the input document is untouched
        assert_eq!(base["root"]["playerPositionDelta"], json!([[9.0, 9.0, 9.0]]));
    }

    #[test]
    fn splice_requires_the_base_structure() {
        let samples = still_samples(2);
        let range = FrameRange { first: -1, last: 0 };

        let no_root = json!({ "comment": "nothing here" });
        assert_eq!(
            encode_into(&samples, SchemaVersion::V2, range, &no_root),
            Err(ReplayError::BaseDocumentMissing { field: "root" })
        );

        let no_stage_tilt = json!({
            "root": {
                "header": { "startPositionX": 0.0, "startPositionY": 0.0, "startPositionZ": 0.0 },
                "playerPositionDelta": [],
                "playerTilt": []
            }
        });
        assert_eq!(
            encode_into(&samples, SchemaVersion::V2, range, &no_stage_tilt),
            Err(ReplayError::BaseDocumentMissing { field: "stageTilt" })
        );
    }

    #[test]
    fn pretty_output_is_stable() {
        let samples = vec![
            TransformSample::at(-1, Vector3::new(1.0, 2.0, 3.0)),
            TransformSample::at(0, Vector3::new(1.0, 2.0, 3.0)),
        ];
        let range = FrameRange { first: -1, last: 0 };
        let doc = encode(&samples, SchemaVersion::V2, range).unwrap();

        let a = doc.to_json_pretty();
        let b = doc.to_json_pretty();
        assert_eq!(a, b);
        //comment first, then root: declaration order survives serialization
        let comment = a.find("\"comment\"").unwrap();
        let root = a.find("\"root\"").unwrap();
        assert!(comment < root);
        //and the output parses back to the same document
        assert_eq!(ReplayDocument::from_json(&a).unwrap(), doc);
    }
}
