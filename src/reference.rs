//! Persisted reference pose records.
//!
//! A reference file is a JSON object:
//!
//! ```json
//! {
//!     "pose_name": "ardha_chandrasana",
//!     "angles": { "left_elbow_angle": 172.412, ... },
//!     "directions": { "left_elbow_angle": "up-right", ... }
//! }
//! ```
//!
//! Joints that could not be measured are stored as `null`.

use crate::{
    constants::REFERENCE_FILE_SUFFIX,
    directions::Direction,
    joints::{Joint, JointMap},
    snapshot::PoseSnapshot,
    utils::round_to,
    Result,
};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Named target pose
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferencePose {
    pub pose_name: String,
    pub angles: JointMap<Option<f64>>,
    pub directions: JointMap<Option<Direction>>,
}

impl ReferencePose {
    /// Name a snapshot, rounding its angles to `precision` decimals
    #[must_use]
    pub fn from_snapshot(pose_name: impl Into<String>, snapshot: &PoseSnapshot, precision: u32) -> Self {
        let mut reference = Self {
            pose_name: pose_name.into(),
            angles: snapshot
                .angles
                .iter()
                .map(|(joint, angle)| (*joint, angle.map(|a| round_to(a, precision))))
                .collect(),
            directions: snapshot.directions.clone(),
        };
        reference.fill_missing_joints();
        reference
    }

    /// The record as a snapshot usable by the comparator
    #[must_use]
    pub fn snapshot(&self) -> PoseSnapshot {
        PoseSnapshot {
            angles: self.angles.clone(),
            directions: self.directions.clone(),
        }
    }

    /// Default file name, `<lowercased name>_reference.json`
    ///
    /// Path separators in the name become `_`, so the file always lands in
    /// the directory it is saved in.
    #[must_use]
    pub fn file_name(&self) -> String {
        let stem: String = self
            .pose_name
            .to_lowercase()
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();
        format!("{stem}{REFERENCE_FILE_SUFFIX}")
    }

    /// Serialize with four-space indentation
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> Result<String> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Parse a record; joints missing from the file are treated as unmeasured
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid reference record
    pub fn from_json(content: &str) -> Result<Self> {
        let mut reference: Self = serde_json::from_str(content)?;
        reference.fill_missing_joints();
        Ok(reference)
    }

    /// Load a record from disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let reference = Self::from_json(&content)?;
        info!(
            "Loaded reference pose '{}' from {}",
            reference.pose_name,
            path.as_ref().display()
        );
        Ok(reference)
    }

    /// Write a record to `path`
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path.as_ref(), self.to_json()?)?;
        info!("Reference pose saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Write the record into `dir` under its default file name
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails
    pub fn save_in<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let path = dir.as_ref().join(self.file_name());
        self.to_file(&path)?;
        Ok(path)
    }

    fn fill_missing_joints(&mut self) {
        for joint in Joint::ALL {
            if !self.angles.contains_key(&joint) {
                warn!("Reference '{}' has no angle entry for {joint}", self.pose_name);
                self.angles.insert(joint, None);
            }
            if !self.directions.contains_key(&joint) {
                warn!("Reference '{}' has no direction entry for {joint}", self.pose_name);
                self.directions.insert(joint, None);
            }
        }
    }
}
