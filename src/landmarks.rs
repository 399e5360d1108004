//! Body landmarks as produced by a pose detector.
//!
//! A detection is a fixed table of 33 slots in MediaPipe Pose order. Only the
//! twelve limb landmarks named by [`LandmarkName`] are read by the angle and
//! direction engines; the rest are carried along for feature extraction.

use crate::{constants::NUM_POSE_LANDMARKS, Error, Result};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single detected point in normalized image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal position, roughly in [0, 1]
    pub x: f64,
    /// Vertical position, roughly in [0, 1], growing downwards
    pub y: f64,
    /// Relative depth
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    /// Detector confidence in [0, 1]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
}

impl Landmark {
    /// Create a 2D landmark without depth or visibility
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            visibility: None,
        }
    }

    /// Create a landmark with every field populated
    #[must_use]
    pub fn with_depth(x: f64, y: f64, z: f64, visibility: f64) -> Self {
        Self {
            x,
            y,
            z: Some(z),
            visibility: Some(visibility),
        }
    }

    /// Image-plane position
    #[must_use]
    pub fn position(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Whether the planar coordinates can take part in geometry
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Anatomical landmarks used by the joint table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LandmarkName {
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl LandmarkName {
    /// All named landmarks
    pub const ALL: [LandmarkName; 12] = [
        LandmarkName::LeftShoulder,
        LandmarkName::RightShoulder,
        LandmarkName::LeftElbow,
        LandmarkName::RightElbow,
        LandmarkName::LeftWrist,
        LandmarkName::RightWrist,
        LandmarkName::LeftHip,
        LandmarkName::RightHip,
        LandmarkName::LeftKnee,
        LandmarkName::RightKnee,
        LandmarkName::LeftAnkle,
        LandmarkName::RightAnkle,
    ];

    /// Slot of this landmark in the 33-point detector output
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            LandmarkName::LeftShoulder => 11,
            LandmarkName::RightShoulder => 12,
            LandmarkName::LeftElbow => 13,
            LandmarkName::RightElbow => 14,
            LandmarkName::LeftWrist => 15,
            LandmarkName::RightWrist => 16,
            LandmarkName::LeftHip => 23,
            LandmarkName::RightHip => 24,
            LandmarkName::LeftKnee => 25,
            LandmarkName::RightKnee => 26,
            LandmarkName::LeftAnkle => 27,
            LandmarkName::RightAnkle => 28,
        }
    }

    /// Snake-case name, e.g. `left_shoulder`
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            LandmarkName::LeftShoulder => "left_shoulder",
            LandmarkName::RightShoulder => "right_shoulder",
            LandmarkName::LeftElbow => "left_elbow",
            LandmarkName::RightElbow => "right_elbow",
            LandmarkName::LeftWrist => "left_wrist",
            LandmarkName::RightWrist => "right_wrist",
            LandmarkName::LeftHip => "left_hip",
            LandmarkName::RightHip => "right_hip",
            LandmarkName::LeftKnee => "left_knee",
            LandmarkName::RightKnee => "right_knee",
            LandmarkName::LeftAnkle => "left_ankle",
            LandmarkName::RightAnkle => "right_ankle",
        }
    }
}

impl fmt::Display for LandmarkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Landmarks of one detection; a slot is `None` when the detector left it out
#[derive(Debug, Clone, PartialEq)]
pub struct PoseLandmarks {
    points: Vec<Option<Landmark>>,
}

impl PoseLandmarks {
    /// Build from the detector's slot table
    ///
    /// # Errors
    ///
    /// Returns an error if the table does not hold exactly 33 slots
    pub fn new(points: Vec<Option<Landmark>>) -> Result<Self> {
        if points.len() != NUM_POSE_LANDMARKS {
            return Err(Error::InvalidInput(format!(
                "Expected {} landmarks, got {}",
                NUM_POSE_LANDMARKS,
                points.len()
            )));
        }
        Ok(Self { points })
    }

    /// Build from fully populated `[x, y, z, visibility]` rows
    ///
    /// # Errors
    ///
    /// Returns an error if there are not exactly 33 rows
    pub fn from_rows(rows: &[[f64; 4]]) -> Result<Self> {
        Self::new(
            rows.iter()
                .map(|&[x, y, z, v]| Some(Landmark::with_depth(x, y, z, v)))
                .collect(),
        )
    }

    /// Build a table where only the named landmarks are present
    #[must_use]
    pub fn from_named<I>(named: I) -> Self
    where
        I: IntoIterator<Item = (LandmarkName, Landmark)>,
    {
        let mut points = vec![None; NUM_POSE_LANDMARKS];
        for (name, landmark) in named {
            points[name.index()] = Some(landmark);
        }
        Self { points }
    }

    /// Look up a named landmark; non-finite coordinates count as absent
    #[must_use]
    pub fn get(&self, name: LandmarkName) -> Option<&Landmark> {
        self.points
            .get(name.index())
            .and_then(Option::as_ref)
            .filter(|lm| lm.is_finite())
    }

    /// Iterate over every slot in detector order
    pub fn iter(&self) -> impl Iterator<Item = Option<&Landmark>> {
        self.points.iter().map(Option::as_ref)
    }

    /// Mean visibility over the landmarks that report one
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // At most 33 values
    pub fn confidence(&self) -> Option<f64> {
        let visibilities: Vec<f64> = self.points.iter().flatten().filter_map(|lm| lm.visibility).collect();
        if visibilities.is_empty() {
            return None;
        }
        Some(visibilities.iter().sum::<f64>() / visibilities.len() as f64)
    }
}
