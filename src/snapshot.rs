//! Angle and direction measurements for one detection.

use crate::{
    angles::compute_skeleton_angles,
    directions::{compute_skeleton_directions, Direction},
    joints::{Joint, JointMap, Skeleton},
    landmarks::PoseLandmarks,
};
use serde::{Deserialize, Serialize};

/// Immutable pair of per-joint angle and direction maps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseSnapshot {
    /// Joint angles in degrees
    pub angles: JointMap<Option<f64>>,
    /// Joint bend directions
    pub directions: JointMap<Option<Direction>>,
}

impl PoseSnapshot {
    /// Measure a detection with the standard joint table
    #[must_use]
    pub fn from_landmarks(landmarks: Option<&PoseLandmarks>) -> Self {
        Self::measure(&Skeleton::standard(), landmarks)
    }

    /// Measure a detection with a custom joint table
    #[must_use]
    pub fn measure(skeleton: &Skeleton, landmarks: Option<&PoseLandmarks>) -> Self {
        Self {
            angles: compute_skeleton_angles(skeleton, landmarks),
            directions: compute_skeleton_directions(skeleton, landmarks),
        }
    }

    /// Snapshot standing for "no pose found"
    #[must_use]
    pub fn absent() -> Self {
        Self::from_landmarks(None)
    }

    #[must_use]
    pub fn angle(&self, joint: Joint) -> Option<f64> {
        self.angles.get(&joint).copied().flatten()
    }

    #[must_use]
    pub fn direction(&self, joint: Joint) -> Option<Direction> {
        self.directions.get(&joint).copied().flatten()
    }

    /// True when no joint could be measured
    #[must_use]
    pub fn is_absent(&self) -> bool {
        self.angles.values().all(Option::is_none) && self.directions.values().all(Option::is_none)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{Landmark, LandmarkName};

    #[test]
    fn test_absent_snapshot_has_every_joint() {
        let snapshot = PoseSnapshot::absent();
        assert!(snapshot.is_absent());
        for joint in Joint::ALL {
            assert!(snapshot.angles.contains_key(&joint));
            assert!(snapshot.directions.contains_key(&joint));
            assert!(snapshot.angle(joint).is_none());
        }
    }

    #[test]
    fn test_angle_and_direction_absent_together() {
        let pose = PoseLandmarks::from_named([
            (LandmarkName::RightHip, Landmark::new(0.5, 0.5)),
            (LandmarkName::RightKnee, Landmark::new(0.5, 0.7)),
            (LandmarkName::RightAnkle, Landmark::new(0.6, 0.9)),
        ]);
        let snapshot = PoseSnapshot::from_landmarks(Some(&pose));
        assert!(!snapshot.is_absent());
        for joint in Joint::ALL {
            assert_eq!(snapshot.angle(joint).is_some(), snapshot.direction(joint).is_some());
        }
        assert!(snapshot.angle(Joint::RightKnee).is_some());
    }
}
