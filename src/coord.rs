use cgmath::{Deg, Euler, Rad, Vector3};

/// Replay schema revision.
///
/// The sign convention for the start position changed between revisions of
/// the format while the delta convention did not. Both stay selectable so
/// either generation of file can be read back, and read back the same way
/// it was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    /// Earliest files: start position and deltas both map `(x, y, z)` to
    /// `(-x, z, y)`.
    V1,
    /// Later files: the start position maps to `(x, -z, y)`; deltas kept
    /// the old convention.
    V2,
}

impl Default for SchemaVersion {
    fn default() -> Self {
        SchemaVersion::V2
    }
}

/// Replay space is X right, Y up, Z forward; scene space is X right,
/// Y forward, Z up. This maps the absolute start position across.
pub fn start_to_scene(version: SchemaVersion, v: Vector3<f64>) -> Vector3<f64> {
    match version {
        SchemaVersion::V1 => Vector3::new(-v.x, v.z, v.y),
        SchemaVersion::V2 => Vector3::new(v.x, -v.z, v.y),
    }
}

pub fn start_to_replay(version: SchemaVersion, v: Vector3<f64>) -> Vector3<f64> {
    match version {
        //(-x, z, y) is its own inverse
        SchemaVersion::V1 => Vector3::new(-v.x, v.z, v.y),
        SchemaVersion::V2 => Vector3::new(v.x, v.z, -v.y),
    }
}

/// Per-frame deltas keep the `(-x, z, y)` convention in every revision;
/// only the start position mapping ever changed.
pub fn delta_to_scene(v: Vector3<f64>) -> Vector3<f64> {
    Vector3::new(-v.x, v.z, v.y)
}

pub fn delta_to_replay(v: Vector3<f64>) -> Vector3<f64> {
    Vector3::new(-v.x, v.z, v.y)
}

/// Ball rotation swaps pitch and roll and negates yaw. This is a different
/// permutation from the position axes and must not be merged with it.
pub fn ball_rotation_to_scene(e: Euler<Deg<f64>>) -> Euler<Rad<f64>> {
    Euler::new(Rad::from(e.z), -Rad::from(e.y), Rad::from(e.x))
}

pub fn ball_rotation_to_replay(e: Euler<Rad<f64>>) -> Euler<Deg<f64>> {
    Euler::new(Deg::from(e.z), -Deg::from(e.y), Deg::from(e.x))
}

/// Stage tilt only uses two axes, with the second negated going into the
/// scene. The third angle is fixed at zero and never stored.
pub fn stage_tilt_to_scene(t: [f64; 2]) -> (Rad<f64>, Rad<f64>) {
    (Rad::from(Deg(t[0])), -Rad::from(Deg(t[1])))
}

pub fn stage_tilt_to_replay(t: (Rad<f64>, Rad<f64>)) -> [f64; 2] {
    [Deg::from(t.0).0, -Deg::from(t.1).0]
}
