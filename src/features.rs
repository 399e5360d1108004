//! Flat feature vectors for downstream classifiers.

use crate::{
    constants::{FEATURE_VECTOR_LEN, NUM_POSE_LANDMARKS, VALUES_PER_LANDMARK},
    joints::{Joint, JointMap},
    landmarks::PoseLandmarks,
};

/// Builds a 140-value vector per detection
///
/// Layout:
/// - 0..132: 33 landmarks × (x, y, z, visibility) in detector order
/// - 132..140: joint angles in canonical joint order (degrees)
///
/// Anything missing contributes `0.0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Extract features for one detection
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Features are consumed as f32
    pub fn extract(&self, landmarks: Option<&PoseLandmarks>, angles: &JointMap<Option<f64>>) -> Vec<f32> {
        let mut features = Vec::with_capacity(FEATURE_VECTOR_LEN);

        match landmarks {
            Some(pose) => {
                for slot in pose.iter() {
                    match slot {
                        Some(lm) => features.extend([
                            lm.x as f32,
                            lm.y as f32,
                            lm.z.unwrap_or(0.0) as f32,
                            lm.visibility.unwrap_or(0.0) as f32,
                        ]),
                        None => features.extend([0.0; VALUES_PER_LANDMARK]),
                    }
                }
            }
            None => features.extend([0.0; NUM_POSE_LANDMARKS * VALUES_PER_LANDMARK]),
        }

        for joint in Joint::ALL {
            let angle = angles.get(&joint).copied().flatten().unwrap_or(0.0);
            features.push(angle as f32);
        }

        features
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angles::{absent_angles, compute_pose_angles};

    #[test]
    fn test_length_without_detection() {
        let features = FeatureExtractor::new().extract(None, &absent_angles());
        assert_eq!(features.len(), FEATURE_VECTOR_LEN);
        assert!(features.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_layout() {
        let rows: Vec<[f64; 4]> = (0..NUM_POSE_LANDMARKS)
            .map(|i| [i as f64 / 100.0, 0.5, -0.25, 0.75])
            .collect();
        let pose = PoseLandmarks::from_rows(&rows).unwrap();
        let angles = compute_pose_angles(Some(&pose));
        let features = FeatureExtractor::new().extract(Some(&pose), &angles);

        assert_eq!(features.len(), FEATURE_VECTOR_LEN);
        assert_eq!(&features[4..8], &[0.01, 0.5, -0.25, 0.75]);
        let angle_block = &features[NUM_POSE_LANDMARKS * VALUES_PER_LANDMARK..];
        assert_eq!(angle_block.len(), Joint::ALL.len());
        // Shoulder, elbow and wrist lie on one horizontal line
        assert!((angle_block[0] - 180.0).abs() < 1e-3);
    }
}
