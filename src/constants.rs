//! Constants used throughout the library

/// Number of landmarks produced per detection (MediaPipe Pose topology)
pub const NUM_POSE_LANDMARKS: usize = 33;

/// Values per landmark in a flattened keypoint row (x, y, z, visibility)
pub const VALUES_PER_LANDMARK: usize = 4;

/// Number of measured joint angles
pub const NUM_JOINTS: usize = 8;

/// Length of the flat feature vector (keypoints followed by joint angles)
pub const FEATURE_VECTOR_LEN: usize = NUM_POSE_LANDMARKS * VALUES_PER_LANDMARK + NUM_JOINTS;

/// Default tolerance before an angle correction is issued
pub const DEFAULT_THRESHOLD_DEGREES: f64 = 10.0;

/// Differences below this are reported as "slightly"
pub const DEFAULT_SLIGHT_BELOW_DEGREES: f64 = 8.0;

/// Differences below this (and not slight) are reported as "a bit"
pub const DEFAULT_MODERATE_BELOW_DEGREES: f64 = 15.0;

/// Decimal places kept for aggregated reference angles
pub const DEFAULT_ANGLE_PRECISION: u32 = 3;

/// Mean visibility below which a detection is treated as "no pose"; zero disables the gate
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.0;

/// Vectors shorter than this are considered degenerate
pub const EPSILON: f64 = 1e-10;

/// Suffix of reference pose file names
pub const REFERENCE_FILE_SUFFIX: &str = "_reference.json";
