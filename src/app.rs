//! Application driver wiring a landmark source to the engines.

use crate::{
    aggregate::ReferenceAggregator,
    comparator::{FeedbackRecord, PoseComparator},
    config::Config,
    error::Result,
    features::FeatureExtractor,
    joints::JointMap,
    landmarks::PoseLandmarks,
    reference::ReferencePose,
    snapshot::PoseSnapshot,
    source::{JsonLandmarkSource, LandmarkSource},
};
use log::{info, warn};
use std::path::{Path, PathBuf};

/// One accepted detection and its measurements
#[derive(Debug, Clone)]
pub struct Measurement {
    pub landmarks: PoseLandmarks,
    pub snapshot: PoseSnapshot,
    /// Mean landmark visibility, when the source reports it
    pub confidence: Option<f64>,
}

/// Outcome of comparing one input against a reference
#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonOutcome {
    /// No pose was found in the input
    NoPose,
    /// Per-joint corrections; empty when the pose matches
    Feedback(JointMap<FeedbackRecord>),
}

impl ComparisonOutcome {
    #[must_use]
    pub fn is_match(&self) -> bool {
        matches!(self, ComparisonOutcome::Feedback(feedback) if feedback.is_empty())
    }
}

/// Main application struct
pub struct CoachApp {
    config: Config,
    source: Box<dyn LandmarkSource>,
    comparator: PoseComparator,
    extractor: FeatureExtractor,
}

impl CoachApp {
    /// Create an application reading JSON landmark dumps
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn new(config: Config) -> Result<Self> {
        Self::with_source(config, Box::new(JsonLandmarkSource::new()))
    }

    /// Create an application with a custom landmark source
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn with_source(config: Config, source: Box<dyn LandmarkSource>) -> Result<Self> {
        config.validate()?;
        info!(
            "Initializing pose coach with {} (threshold {}°)",
            source.name(),
            config.comparison.threshold_degrees
        );
        Ok(Self {
            comparator: PoseComparator::from_config(&config.comparison),
            extractor: FeatureExtractor::new(),
            config,
            source,
        })
    }

    /// Detect and measure one input
    ///
    /// Returns `None` when no pose was found or, with a non-zero
    /// `detection.min_confidence`, when the mean visibility is below it.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails to read the input
    pub fn measure(&mut self, input: &Path) -> Result<Option<Measurement>> {
        let Some(landmarks) = self.source.detect(input)? else {
            return Ok(None);
        };

        let confidence = landmarks.confidence();
        if let Some(c) = confidence {
            if c < self.config.detection.min_confidence {
                warn!(
                    "{}: detection confidence {c:.3} below {:.3}, treating as no pose",
                    input.display(),
                    self.config.detection.min_confidence
                );
                return Ok(None);
            }
        }

        let snapshot = PoseSnapshot::from_landmarks(Some(&landmarks));
        Ok(Some(Measurement {
            landmarks,
            snapshot,
            confidence,
        }))
    }

    /// Average several sample inputs into a reference pose
    ///
    /// Inputs without a pose are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if an input cannot be read or no input holds a pose
    pub fn build_reference(&mut self, pose_name: &str, inputs: &[PathBuf]) -> Result<ReferencePose> {
        let mut aggregator = ReferenceAggregator::new();

        for (idx, input) in inputs.iter().enumerate() {
            match self.measure(input)? {
                Some(measurement) => {
                    info!(
                        "Sample {} ({}): confidence {}",
                        idx + 1,
                        input.display(),
                        measurement
                            .confidence
                            .map_or_else(|| "n/a".to_string(), |c| format!("{c:.3}"))
                    );
                    aggregator.add(&measurement.snapshot);
                }
                None => warn!("Sample {} ({}): pose not detected", idx + 1, input.display()),
            }
        }

        info!("Aggregating {} of {} samples for '{pose_name}'", aggregator.len(), inputs.len());
        aggregator.build(pose_name, self.config.reference.angle_precision)
    }

    /// Save a reference into the configured output directory
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails
    pub fn save_reference(&self, reference: &ReferencePose) -> Result<PathBuf> {
        reference.save_in(&self.config.reference.output_dir)
    }

    /// Compare one input against a reference
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails to read the input
    pub fn compare(&mut self, reference: &ReferencePose, input: &Path) -> Result<ComparisonOutcome> {
        let Some(measurement) = self.measure(input)? else {
            warn!("{}: pose not detected", input.display());
            return Ok(ComparisonOutcome::NoPose);
        };

        let feedback = self
            .comparator
            .compare_snapshots(&measurement.snapshot, &reference.snapshot());
        info!(
            "{} against '{}': {} joint(s) to correct",
            input.display(),
            reference.pose_name,
            feedback.len()
        );
        Ok(ComparisonOutcome::Feedback(feedback))
    }

    /// Feature vector for one input; zeros when no pose was found
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails to read the input
    pub fn features(&mut self, input: &Path) -> Result<Vec<f32>> {
        Ok(match self.measure(input)? {
            Some(measurement) => self
                .extractor
                .extract(Some(&measurement.landmarks), &measurement.snapshot.angles),
            None => {
                let absent = PoseSnapshot::absent();
                self.extractor.extract(None, &absent.angles)
            }
        })
    }
}
