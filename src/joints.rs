//! Joint definitions and the landmark triples that measure them.

use crate::{landmarks::LandmarkName, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Per-joint mapping; iteration follows the canonical joint order
pub type JointMap<T> = BTreeMap<Joint, T>;

/// The eight measured joint angles
///
/// Serialized names carry the `_angle` suffix used by persisted reference files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Joint {
    #[serde(rename = "left_elbow_angle")]
    LeftElbow,
    #[serde(rename = "right_elbow_angle")]
    RightElbow,
    #[serde(rename = "left_shoulder_angle")]
    LeftShoulder,
    #[serde(rename = "right_shoulder_angle")]
    RightShoulder,
    #[serde(rename = "left_knee_angle")]
    LeftKnee,
    #[serde(rename = "right_knee_angle")]
    RightKnee,
    #[serde(rename = "left_hip_angle")]
    LeftHip,
    #[serde(rename = "right_hip_angle")]
    RightHip,
}

/// Body side of a joint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Lowercase label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// Mechanical class of a joint, which decides the corrective verb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointKind {
    /// Elbows and knees: bend / straighten
    Hinge,
    /// Shoulders and hips: open / close
    Ball,
}

impl Joint {
    /// All joints in canonical order
    pub const ALL: [Joint; 8] = [
        Joint::LeftElbow,
        Joint::RightElbow,
        Joint::LeftShoulder,
        Joint::RightShoulder,
        Joint::LeftKnee,
        Joint::RightKnee,
        Joint::LeftHip,
        Joint::RightHip,
    ];

    /// Persisted key, e.g. `left_elbow_angle`
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Joint::LeftElbow => "left_elbow_angle",
            Joint::RightElbow => "right_elbow_angle",
            Joint::LeftShoulder => "left_shoulder_angle",
            Joint::RightShoulder => "right_shoulder_angle",
            Joint::LeftKnee => "left_knee_angle",
            Joint::RightKnee => "right_knee_angle",
            Joint::LeftHip => "left_hip_angle",
            Joint::RightHip => "right_hip_angle",
        }
    }

    /// Parse a persisted key
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|joint| joint.key() == key)
    }

    #[must_use]
    pub const fn side(self) -> Side {
        match self {
            Joint::LeftElbow | Joint::LeftShoulder | Joint::LeftKnee | Joint::LeftHip => Side::Left,
            _ => Side::Right,
        }
    }

    #[must_use]
    pub const fn kind(self) -> JointKind {
        match self {
            Joint::LeftElbow | Joint::RightElbow | Joint::LeftKnee | Joint::RightKnee => JointKind::Hinge,
            _ => JointKind::Ball,
        }
    }

    /// Anatomical name without side, e.g. `elbow`
    #[must_use]
    pub const fn body_part(self) -> &'static str {
        match self {
            Joint::LeftElbow | Joint::RightElbow => "elbow",
            Joint::LeftShoulder | Joint::RightShoulder => "shoulder",
            Joint::LeftKnee | Joint::RightKnee => "knee",
            Joint::LeftHip | Joint::RightHip => "hip",
        }
    }

    /// Distal segment moved by a direction cue at this joint
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Joint::LeftElbow | Joint::RightElbow => "forearm",
            Joint::LeftShoulder | Joint::RightShoulder => "upper arm",
            Joint::LeftKnee | Joint::RightKnee => "shin",
            Joint::LeftHip | Joint::RightHip => "knee",
        }
    }

    /// Standard landmark triple for this joint
    #[must_use]
    pub const fn standard_triple(self) -> JointTriple {
        use LandmarkName as L;
        match self {
            Joint::LeftElbow => JointTriple::new(L::LeftShoulder, L::LeftElbow, L::LeftWrist),
            Joint::RightElbow => JointTriple::new(L::RightShoulder, L::RightElbow, L::RightWrist),
            Joint::LeftShoulder => JointTriple::new(L::LeftElbow, L::LeftShoulder, L::LeftHip),
            Joint::RightShoulder => JointTriple::new(L::RightElbow, L::RightShoulder, L::RightHip),
            Joint::LeftKnee => JointTriple::new(L::LeftHip, L::LeftKnee, L::LeftAnkle),
            Joint::RightKnee => JointTriple::new(L::RightHip, L::RightKnee, L::RightAnkle),
            Joint::LeftHip => JointTriple::new(L::LeftShoulder, L::LeftHip, L::LeftKnee),
            Joint::RightHip => JointTriple::new(L::RightShoulder, L::RightHip, L::RightKnee),
        }
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Ordered (proximal, vertex, distal) landmarks; the angle is measured at the vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JointTriple {
    pub proximal: LandmarkName,
    pub vertex: LandmarkName,
    pub distal: LandmarkName,
}

impl JointTriple {
    #[must_use]
    pub const fn new(proximal: LandmarkName, vertex: LandmarkName, distal: LandmarkName) -> Self {
        Self {
            proximal,
            vertex,
            distal,
        }
    }
}

/// Immutable joint table handed to the engines
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    triples: JointMap<JointTriple>,
}

impl Skeleton {
    /// The standard elbow / shoulder / knee / hip table
    #[must_use]
    pub fn standard() -> Self {
        Self {
            triples: Joint::ALL.into_iter().map(|j| (j, j.standard_triple())).collect(),
        }
    }

    /// Build a custom table
    ///
    /// # Errors
    ///
    /// Returns an error if a joint is listed twice or left out
    pub fn new<I>(triples: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Joint, JointTriple)>,
    {
        let mut table = JointMap::new();
        for (joint, triple) in triples {
            if table.insert(joint, triple).is_some() {
                return Err(Error::InvalidInput(format!("Joint {joint} defined twice")));
            }
        }
        if let Some(missing) = Joint::ALL.into_iter().find(|j| !table.contains_key(j)) {
            return Err(Error::InvalidInput(format!("Joint {missing} has no landmark triple")));
        }
        Ok(Self { triples: table })
    }

    /// Iterate joints with their triples in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Joint, JointTriple)> + '_ {
        self.triples.iter().map(|(j, t)| (*j, *t))
    }
}

impl Default for Skeleton {
    fn default() -> Self {
        Self::standard()
    }
}
