//! Joint angle calculation using the dot product.
//!
//! The angle at the vertex is measured between the rays towards the proximal
//! and distal landmarks:
//!
//! ```text
//! cos(θ) = (u · v) / (|u| × |v|)
//! ```
//!
//! The cosine is clamped to [-1, 1] before `acos`, so round-off can never
//! produce NaN. Degenerate rays and missing landmarks yield `None`.

use crate::{
    constants::EPSILON,
    joints::{Joint, JointMap, JointTriple, Skeleton},
    landmarks::{Landmark, PoseLandmarks},
};

/// Angle at `vertex` in degrees, in [0, 180]
///
/// Returns `None` when either ray has zero length.
#[must_use]
pub fn compute_angle(proximal: &Landmark, vertex: &Landmark, distal: &Landmark) -> Option<f64> {
    let u = proximal.position() - vertex.position();
    let v = distal.position() - vertex.position();

    let norms = u.norm() * v.norm();
    if !norms.is_finite() || u.norm() < EPSILON || v.norm() < EPSILON {
        return None;
    }

    let cos_angle = (u.dot(&v) / norms).clamp(-1.0, 1.0);
    Some(cos_angle.acos().to_degrees())
}

/// Angle for one joint triple; `None` if any of its landmarks is missing
#[must_use]
pub fn joint_angle(landmarks: &PoseLandmarks, triple: JointTriple) -> Option<f64> {
    compute_angle(
        landmarks.get(triple.proximal)?,
        landmarks.get(triple.vertex)?,
        landmarks.get(triple.distal)?,
    )
}

/// Angles for every joint of `skeleton`
///
/// Every joint is present as a key; without a detection all values are `None`.
#[must_use]
pub fn compute_skeleton_angles(skeleton: &Skeleton, landmarks: Option<&PoseLandmarks>) -> JointMap<Option<f64>> {
    skeleton
        .iter()
        .map(|(joint, triple)| (joint, landmarks.and_then(|lm| joint_angle(lm, triple))))
        .collect()
}

/// Angles for the standard joint table
#[must_use]
pub fn compute_pose_angles(landmarks: Option<&PoseLandmarks>) -> JointMap<Option<f64>> {
    compute_skeleton_angles(&Skeleton::standard(), landmarks)
}

/// Angle map with every joint absent
#[must_use]
pub fn absent_angles() -> JointMap<Option<f64>> {
    Joint::ALL.into_iter().map(|joint| (joint, None)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::LandmarkName;
    use proptest::prelude::*;

    fn lm(x: f64, y: f64) -> Landmark {
        Landmark::new(x, y)
    }

    #[test]
    fn test_straight_limb() {
        let angle = compute_angle(&lm(0.0, 0.0), &lm(0.5, 0.0), &lm(1.0, 0.0)).unwrap();
        assert!((angle - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_right_angle() {
        let angle = compute_angle(&lm(0.0, 0.0), &lm(0.5, 0.0), &lm(0.5, 0.5)).unwrap();
        assert!((angle - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_folded_limb() {
        let angle = compute_angle(&lm(0.2, 0.0), &lm(0.0, 0.0), &lm(0.7, 0.0)).unwrap();
        assert!(angle.abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_rays() {
        assert!(compute_angle(&lm(0.5, 0.5), &lm(0.5, 0.5), &lm(1.0, 0.0)).is_none());
        assert!(compute_angle(&lm(0.0, 0.0), &lm(0.5, 0.5), &lm(0.5, 0.5)).is_none());
    }

    #[test]
    fn test_no_detection_yields_all_absent() {
        let angles = compute_pose_angles(None);
        assert_eq!(angles.len(), Joint::ALL.len());
        assert!(angles.values().all(Option::is_none));
        assert_eq!(angles, absent_angles());
    }

    #[test]
    fn test_missing_landmark_only_affects_its_joints() {
        let pose = PoseLandmarks::from_named([
            (LandmarkName::LeftShoulder, lm(0.4, 0.3)),
            (LandmarkName::LeftElbow, lm(0.4, 0.5)),
            (LandmarkName::LeftWrist, lm(0.6, 0.5)),
        ]);
        let angles = compute_pose_angles(Some(&pose));
        assert!((angles[&Joint::LeftElbow].unwrap() - 90.0).abs() < 1e-9);
        assert!(angles[&Joint::LeftShoulder].is_none());
        assert!(angles[&Joint::RightElbow].is_none());
    }

    proptest! {
        #[test]
        fn prop_angle_symmetric_and_bounded(
            px in -1.0..1.0f64, py in -1.0..1.0f64,
            vx in -1.0..1.0f64, vy in -1.0..1.0f64,
            dx in -1.0..1.0f64, dy in -1.0..1.0f64,
        ) {
            let (p, v, d) = (lm(px, py), lm(vx, vy), lm(dx, dy));
            let forward = compute_angle(&p, &v, &d);
            let backward = compute_angle(&d, &v, &p);
            prop_assert_eq!(forward.is_some(), backward.is_some());
            if let (Some(a), Some(b)) = (forward, backward) {
                prop_assert!((a - b).abs() < 1e-9);
                prop_assert!((0.0..=180.0).contains(&a));
                prop_assert!(!a.is_nan());
            }
        }
    }
}
