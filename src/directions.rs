//! Qualitative bend direction of a joint.
//!
//! The two rays leaving the vertex are normalized and summed; the resulting
//! vector points into the inside of the bend. Its dominant axis gives the
//! label, using the image convention where +y points down.

use crate::{
    constants::EPSILON,
    joints::{JointMap, JointTriple, Skeleton},
    landmarks::{Landmark, PoseLandmarks},
    Error,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Compass-like orientation label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
    Undefined,
}

impl Direction {
    /// All labels
    pub const ALL: [Direction; 9] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
        Direction::Undefined,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::UpLeft => "up-left",
            Direction::UpRight => "up-right",
            Direction::DownLeft => "down-left",
            Direction::DownRight => "down-right",
            Direction::Undefined => "undefined",
        }
    }

    /// Classify an orientation vector
    #[must_use]
    pub fn from_vector(dx: f64, dy: f64) -> Self {
        if !dx.is_finite() || !dy.is_finite() || dx.hypot(dy) < EPSILON {
            return Direction::Undefined;
        }

        let (ax, ay) = (dx.abs(), dy.abs());
        if ax > ay {
            if dx > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            }
        } else if ay > ax {
            if dy > 0.0 {
                Direction::Down
            } else {
                Direction::Up
            }
        } else {
            match (dx > 0.0, dy > 0.0) {
                (true, false) => Direction::UpRight,
                (false, false) => Direction::UpLeft,
                (true, true) => Direction::DownRight,
                (false, true) => Direction::DownLeft,
            }
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown direction label: {s}")))
    }
}

/// Bend direction at `vertex`
///
/// Coincident points, or rays that cancel out exactly, give `Undefined`.
#[must_use]
pub fn compute_direction(proximal: &Landmark, vertex: &Landmark, distal: &Landmark) -> Direction {
    let u = proximal.position() - vertex.position();
    let v = distal.position() - vertex.position();

    let (nu, nv) = (u.norm(), v.norm());
    if nu < EPSILON || nv < EPSILON {
        return Direction::Undefined;
    }

    let combined = u / nu + v / nv;
    Direction::from_vector(combined.x, combined.y)
}

/// Direction for one joint triple; `None` if any of its landmarks is missing
#[must_use]
pub fn joint_direction(landmarks: &PoseLandmarks, triple: JointTriple) -> Option<Direction> {
    Some(compute_direction(
        landmarks.get(triple.proximal)?,
        landmarks.get(triple.vertex)?,
        landmarks.get(triple.distal)?,
    ))
}

/// Directions for every joint of `skeleton`
#[must_use]
pub fn compute_skeleton_directions(
    skeleton: &Skeleton,
    landmarks: Option<&PoseLandmarks>,
) -> JointMap<Option<Direction>> {
    skeleton
        .iter()
        .map(|(joint, triple)| (joint, landmarks.and_then(|lm| joint_direction(lm, triple))))
        .collect()
}

/// Directions for the standard joint table; all absent without a detection
#[must_use]
pub fn compute_pose_directions(landmarks: Option<&PoseLandmarks>) -> JointMap<Option<Direction>> {
    compute_skeleton_directions(&Skeleton::standard(), landmarks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::joints::Joint;
    use proptest::prelude::*;

    fn lm(x: f64, y: f64) -> Landmark {
        Landmark::new(x, y)
    }

    #[test]
    fn test_axis_aligned() {
        let origin = lm(0.0, 0.0);
        assert_eq!(compute_direction(&lm(1.0, 0.0), &origin, &lm(1.0, 0.0)), Direction::Right);
        assert_eq!(compute_direction(&lm(-1.0, 0.0), &origin, &lm(-1.0, 0.0)), Direction::Left);
        assert_eq!(compute_direction(&lm(0.0, 1.0), &origin, &lm(0.0, 1.0)), Direction::Down);
        assert_eq!(compute_direction(&lm(0.0, -1.0), &origin, &lm(0.0, -1.0)), Direction::Up);
    }

    #[test]
    fn test_dominant_axis() {
        // Rays at (1, 0) and (0, 0.5) normalize to (1, 0) + (0, 1): a tie
        assert_eq!(
            compute_direction(&lm(1.0, 0.0), &lm(0.0, 0.0), &lm(0.0, 0.5)),
            Direction::DownRight
        );
        assert_eq!(
            compute_direction(&lm(1.0, 0.2), &lm(0.0, 0.0), &lm(1.0, -0.1)),
            Direction::Right
        );
    }

    #[test]
    fn test_diagonals() {
        assert_eq!(Direction::from_vector(1.0, -1.0), Direction::UpRight);
        assert_eq!(Direction::from_vector(-1.0, -1.0), Direction::UpLeft);
        assert_eq!(Direction::from_vector(1.0, 1.0), Direction::DownRight);
        assert_eq!(Direction::from_vector(-1.0, 1.0), Direction::DownLeft);
    }

    #[test]
    fn test_degenerate_inputs_are_undefined() {
        let p = lm(0.3, 0.3);
        assert_eq!(compute_direction(&p, &p, &lm(0.5, 0.5)), Direction::Undefined);
        // Straight limb: unit rays cancel
        assert_eq!(
            compute_direction(&lm(0.0, 0.0), &lm(0.5, 0.0), &lm(1.0, 0.0)),
            Direction::Undefined
        );
        assert_eq!(Direction::from_vector(f64::NAN, 1.0), Direction::Undefined);
    }

    #[test]
    fn test_label_parsing() {
        for d in Direction::ALL {
            assert_eq!(d.as_str().parse::<Direction>().unwrap(), d);
            assert_eq!(serde_json::to_string(&d).unwrap(), format!("\"{}\"", d.as_str()));
        }
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn test_no_detection_yields_all_absent() {
        let directions = compute_pose_directions(None);
        assert_eq!(directions.len(), Joint::ALL.len());
        assert!(directions.values().all(Option::is_none));
    }

    proptest! {
        #[test]
        fn prop_direction_is_deterministic_and_symmetric(
            px in -1.0..1.0f64, py in -1.0..1.0f64,
            dx in -1.0..1.0f64, dy in -1.0..1.0f64,
        ) {
            let v = lm(0.0, 0.0);
            let (p, d) = (lm(px, py), lm(dx, dy));
            let first = compute_direction(&p, &v, &d);
            prop_assert_eq!(first, compute_direction(&p, &v, &d));
            prop_assert_eq!(first, compute_direction(&d, &v, &p));
        }
    }
}
