//! Pose coaching library: joint angles, bend directions and corrective feedback.
//!
//! This library measures a human pose from body landmarks and compares it with
//! a reference pose:
//! - Angle engine: eight joint angles (elbows, shoulders, knees, hips)
//! - Direction engine: a compass-like bend label per joint
//! - Pose comparator: per-joint corrections with an English message
//!
//! Landmark detection is out of scope; landmarks come from a
//! [`source::LandmarkSource`] such as dumps written by an external detector.
//!
//! # Examples
//!
//! ## Measuring a pose
//!
//! ```
//! use pose_coach::{
//!     joints::Joint,
//!     landmarks::{Landmark, LandmarkName, PoseLandmarks},
//!     snapshot::PoseSnapshot,
//! };
//!
//! let pose = PoseLandmarks::from_named([
//!     (LandmarkName::LeftShoulder, Landmark::new(0.40, 0.30)),
//!     (LandmarkName::LeftElbow, Landmark::new(0.40, 0.50)),
//!     (LandmarkName::LeftWrist, Landmark::new(0.60, 0.50)),
//! ]);
//!
//! let snapshot = PoseSnapshot::from_landmarks(Some(&pose));
//! let elbow = snapshot.angle(Joint::LeftElbow).unwrap();
//! assert!((elbow - 90.0).abs() < 1e-6);
//!
//! // Joints whose landmarks are missing stay absent
//! assert!(snapshot.angle(Joint::RightKnee).is_none());
//! ```
//!
//! ## Comparing against a reference
//!
//! ```
//! use pose_coach::{
//!     comparator::{AngleAction, PoseComparator},
//!     directions::Direction,
//!     joints::Joint,
//!     snapshot::PoseSnapshot,
//! };
//!
//! let mut user = PoseSnapshot::absent();
//! let mut reference = PoseSnapshot::absent();
//! user.angles.insert(Joint::LeftElbow, Some(100.0));
//! user.directions.insert(Joint::LeftElbow, Some(Direction::Up));
//! reference.angles.insert(Joint::LeftElbow, Some(140.0));
//! reference.directions.insert(Joint::LeftElbow, Some(Direction::Up));
//!
//! let comparator = PoseComparator::new(10.0);
//! let feedback = comparator.compare_snapshots(&user, &reference);
//! let record = &feedback[&Joint::LeftElbow];
//! assert_eq!(record.angle_action, AngleAction::Straighten);
//! assert_eq!(record.angle_diff_deg, 40);
//! println!("{}", record.message_en);
//! ```
//!
//! ## Building a reference from samples
//!
//! ```no_run
//! use pose_coach::{app::CoachApp, config::Config};
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut app = CoachApp::new(Config::default())?;
//! let samples: Vec<PathBuf> = (1..=10).map(|i| PathBuf::from(format!("{i}.json"))).collect();
//! let reference = app.build_reference("ardha_chandrasana", &samples)?;
//! let path = app.save_reference(&reference)?;
//! println!("Saved {}", path.display());
//! # Ok(())
//! # }
//! ```

/// Body landmarks and typed lookup
pub mod landmarks;

/// Joint definitions and landmark triples
pub mod joints;

/// Joint angle computation
pub mod angles;

/// Joint bend direction computation
pub mod directions;

/// Per-detection angle and direction measurements
pub mod snapshot;

/// Pose comparison and feedback messages
pub mod comparator;

/// Persisted reference poses
pub mod reference;

/// Reference pose aggregation over several samples
pub mod aggregate;

/// Flat feature vectors
pub mod features;

/// Landmark sources
pub mod source;

/// Numeric helpers
pub mod utils;

/// Error types and result handling
pub mod error;

/// Main application module
pub mod app;

/// Constants used throughout the library
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
