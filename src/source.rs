//! Landmark sources.
//!
//! Landmark detection itself happens outside this crate. A [`LandmarkSource`]
//! turns an input (usually an image path) into either a 33-slot detection or
//! `None` when no pose was found.

use crate::{
    landmarks::{Landmark, PoseLandmarks},
    Error, Result,
};
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Capability that yields landmarks for an input
pub trait LandmarkSource {
    /// Detect a pose; `Ok(None)` means no pose was found
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or decoded
    fn detect(&mut self, input: &Path) -> Result<Option<PoseLandmarks>>;

    /// Source name for logging
    fn name(&self) -> &str;
}

/// Reads landmark dumps written by an external detector
///
/// Expected shape:
///
/// ```json
/// { "landmarks": [[0.51, 0.22, -0.1, 0.99], {"x": 0.4, "y": 0.3}, null, ...] }
/// ```
///
/// Each of the 33 slots is `[x, y]`, `[x, y, z]`, `[x, y, z, visibility]`, an
/// object with the same field names, or `null`. `"landmarks": null` means no
/// pose was found.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLandmarkSource;

#[derive(Deserialize)]
struct LandmarkDump {
    landmarks: Option<Vec<Option<RawLandmark>>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLandmark {
    Row(Vec<f64>),
    Point(Landmark),
}

impl RawLandmark {
    fn into_landmark(self, slot: usize) -> Result<Landmark> {
        match self {
            RawLandmark::Point(landmark) => Ok(landmark),
            RawLandmark::Row(values) => match values.as_slice() {
                [x, y] => Ok(Landmark::new(*x, *y)),
                [x, y, z] => Ok(Landmark {
                    z: Some(*z),
                    ..Landmark::new(*x, *y)
                }),
                [x, y, z, v] => Ok(Landmark::with_depth(*x, *y, *z, *v)),
                _ => Err(Error::InvalidInput(format!(
                    "Landmark {slot} has {} values, expected 2 to 4",
                    values.len()
                ))),
            },
        }
    }
}

impl JsonLandmarkSource {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse a landmark dump
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or does not hold 33 slots
    pub fn parse(content: &str) -> Result<Option<PoseLandmarks>> {
        let dump: LandmarkDump = serde_json::from_str(content)?;
        let Some(slots) = dump.landmarks else {
            return Ok(None);
        };

        let points = slots
            .into_iter()
            .enumerate()
            .map(|(slot, raw)| raw.map(|r| r.into_landmark(slot)).transpose())
            .collect::<Result<Vec<_>>>()?;
        PoseLandmarks::new(points).map(Some)
    }
}

impl LandmarkSource for JsonLandmarkSource {
    fn detect(&mut self, input: &Path) -> Result<Option<PoseLandmarks>> {
        debug!("Reading landmarks from {}", input.display());
        let content = fs::read_to_string(input)?;
        Self::parse(&content)
    }

    fn name(&self) -> &str {
        "JsonLandmarkSource"
    }
}
