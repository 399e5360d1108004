//! Pose comparison and corrective feedback.
//!
//! For every joint measured on both sides, the comparator derives an angle
//! instruction from the signed difference (user minus reference), a direction
//! instruction from the reference bend direction, and an English message that
//! combines both. A pose matches when no joint needs a correction.

use crate::{
    config::ComparisonConfig,
    constants::{DEFAULT_MODERATE_BELOW_DEGREES, DEFAULT_SLIGHT_BELOW_DEGREES, DEFAULT_THRESHOLD_DEGREES},
    directions::Direction,
    joints::{Joint, JointKind, JointMap},
    snapshot::PoseSnapshot,
    utils::safe_cast::f64_to_i32_clamp,
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Corrective verb for the joint angle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AngleAction {
    /// Within tolerance
    Hold,
    /// Hinge joint more open than the reference
    Bend,
    /// Hinge joint more closed than the reference
    Straighten,
    /// Ball joint more closed than the reference
    Open,
    /// Ball joint more open than the reference
    Close,
}

impl AngleAction {
    /// Pick the action for a signed difference outside tolerance
    ///
    /// "Open" is decided by the sign of `diff` alone.
    #[must_use]
    pub fn for_difference(kind: JointKind, diff: f64) -> Self {
        match (kind, diff > 0.0) {
            (JointKind::Hinge, true) => AngleAction::Bend,
            (JointKind::Hinge, false) => AngleAction::Straighten,
            (JointKind::Ball, true) => AngleAction::Close,
            (JointKind::Ball, false) => AngleAction::Open,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            AngleAction::Hold => "Hold",
            AngleAction::Bend => "Bend",
            AngleAction::Straighten => "Straighten",
            AngleAction::Open => "Open",
            AngleAction::Close => "Close",
        }
    }
}

impl fmt::Display for AngleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Corrective cue for the bend direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectionAction {
    #[serde(rename = "Hold direction")]
    HoldDirection,
    Lift,
    Lower,
    #[serde(rename = "Shift left")]
    ShiftLeft,
    #[serde(rename = "Shift right")]
    ShiftRight,
    #[serde(rename = "Lift and shift left")]
    LiftAndShiftLeft,
    #[serde(rename = "Lift and shift right")]
    LiftAndShiftRight,
    #[serde(rename = "Lower and shift left")]
    LowerAndShiftLeft,
    #[serde(rename = "Lower and shift right")]
    LowerAndShiftRight,
}

impl DirectionAction {
    /// Cue that moves a joint towards the reference direction
    #[must_use]
    pub const fn towards(reference: Direction) -> Self {
        match reference {
            Direction::Up => DirectionAction::Lift,
            Direction::Down => DirectionAction::Lower,
            Direction::Left => DirectionAction::ShiftLeft,
            Direction::Right => DirectionAction::ShiftRight,
            Direction::UpLeft => DirectionAction::LiftAndShiftLeft,
            Direction::UpRight => DirectionAction::LiftAndShiftRight,
            Direction::DownLeft => DirectionAction::LowerAndShiftLeft,
            Direction::DownRight => DirectionAction::LowerAndShiftRight,
            Direction::Undefined => DirectionAction::HoldDirection,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            DirectionAction::HoldDirection => "Hold direction",
            DirectionAction::Lift => "Lift",
            DirectionAction::Lower => "Lower",
            DirectionAction::ShiftLeft => "Shift left",
            DirectionAction::ShiftRight => "Shift right",
            DirectionAction::LiftAndShiftLeft => "Lift and shift left",
            DirectionAction::LiftAndShiftRight => "Lift and shift right",
            DirectionAction::LowerAndShiftLeft => "Lower and shift left",
            DirectionAction::LowerAndShiftRight => "Lower and shift right",
        }
    }

    /// Imperative phrase applied to a body segment, lowercase
    fn phrase(self, segment: &str) -> String {
        match self {
            DirectionAction::HoldDirection => format!("keep your {segment} where it is"),
            DirectionAction::Lift => format!("lift your {segment}"),
            DirectionAction::Lower => format!("lower your {segment}"),
            DirectionAction::ShiftLeft => format!("shift your {segment} left"),
            DirectionAction::ShiftRight => format!("shift your {segment} right"),
            DirectionAction::LiftAndShiftLeft => format!("lift your {segment} and shift it left"),
            DirectionAction::LiftAndShiftRight => format!("lift your {segment} and shift it right"),
            DirectionAction::LowerAndShiftLeft => format!("lower your {segment} and shift it left"),
            DirectionAction::LowerAndShiftRight => format!("lower your {segment} and shift it right"),
        }
    }
}

impl fmt::Display for DirectionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How far off a joint is, in words
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Slightly,
    ABit,
    Degrees(i32),
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Slightly => f.write_str("slightly"),
            Severity::ABit => f.write_str("a bit"),
            Severity::Degrees(deg) => write!(f, "by {deg}°"),
        }
    }
}

/// Correction for one joint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// Absolute angle difference, rounded to whole degrees
    pub angle_diff_deg: i32,
    pub angle_action: AngleAction,
    pub direction_action: DirectionAction,
    /// Human-readable instruction
    pub message_en: String,
}

impl FeedbackRecord {
    /// Whether the user has to change anything at this joint
    #[must_use]
    pub fn needs_correction(&self) -> bool {
        self.angle_action != AngleAction::Hold || self.direction_action != DirectionAction::HoldDirection
    }
}

/// Compares a user pose with a reference pose
#[derive(Debug, Clone, PartialEq)]
pub struct PoseComparator {
    threshold_degrees: f64,
    slight_below_degrees: f64,
    moderate_below_degrees: f64,
}

impl Default for PoseComparator {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD_DEGREES)
    }
}

impl PoseComparator {
    /// Comparator with the given tolerance and default severity bands
    #[must_use]
    pub fn new(threshold_degrees: f64) -> Self {
        Self {
            threshold_degrees,
            slight_below_degrees: DEFAULT_SLIGHT_BELOW_DEGREES,
            moderate_below_degrees: DEFAULT_MODERATE_BELOW_DEGREES,
        }
    }

    /// Comparator configured from the `comparison` config section
    #[must_use]
    pub fn from_config(config: &ComparisonConfig) -> Self {
        Self {
            threshold_degrees: config.threshold_degrees,
            slight_below_degrees: config.slight_below_degrees,
            moderate_below_degrees: config.moderate_below_degrees,
        }
    }

    #[must_use]
    pub fn threshold_degrees(&self) -> f64 {
        self.threshold_degrees
    }

    /// Severity wording for an absolute difference
    #[must_use]
    pub fn severity(&self, abs_diff: f64) -> Severity {
        if abs_diff < self.slight_below_degrees {
            Severity::Slightly
        } else if abs_diff < self.moderate_below_degrees {
            Severity::ABit
        } else {
            Severity::Degrees(round_degrees(abs_diff))
        }
    }

    /// Evaluate one joint, always producing a record
    #[must_use]
    pub fn evaluate_joint(
        &self,
        joint: Joint,
        angle_user: f64,
        angle_ref: f64,
        direction_user: Direction,
        direction_ref: Direction,
    ) -> FeedbackRecord {
        let diff = angle_user - angle_ref;
        let abs_diff = diff.abs();

        let angle_action = if abs_diff <= self.threshold_degrees {
            AngleAction::Hold
        } else {
            AngleAction::for_difference(joint.kind(), diff)
        };

        let direction_action = if direction_user == direction_ref {
            DirectionAction::HoldDirection
        } else {
            DirectionAction::towards(direction_ref)
        };

        let message_en = self.compose_message(joint, angle_action, direction_action, abs_diff);
        debug!(
            "{joint}: diff={diff:.1}° angle_action={angle_action} direction_action={direction_action} ({direction_user} vs {direction_ref})"
        );

        FeedbackRecord {
            angle_diff_deg: round_degrees(abs_diff),
            angle_action,
            direction_action,
            message_en,
        }
    }

    /// Build the English instruction for one joint
    #[must_use]
    pub fn compose_message(
        &self,
        joint: Joint,
        angle_action: AngleAction,
        direction_action: DirectionAction,
        abs_diff: f64,
    ) -> String {
        let side = joint.side().as_str();
        let part = joint.body_part();

        let angle_part = (angle_action != AngleAction::Hold)
            .then(|| format!("{angle_action} your {side} {part} {}", self.severity(abs_diff)));
        let direction_part = (direction_action != DirectionAction::HoldDirection)
            .then(|| direction_action.phrase(&format!("{side} {}", joint.segment())));

        match (angle_part, direction_part) {
            (Some(angle), Some(direction)) => format!("{angle} and {direction}."),
            (Some(angle), None) => format!("{angle}."),
            (None, Some(direction)) => format!("{}.", capitalize(&direction)),
            (None, None) => format!("Your {side} {part} is in position, hold steady."),
        }
    }

    /// Records for every joint measured in both poses, including joints on target
    ///
    /// A joint is skipped when its angle or direction is absent on either side.
    #[must_use]
    pub fn assess(
        &self,
        angles_user: &JointMap<Option<f64>>,
        angles_ref: &JointMap<Option<f64>>,
        directions_user: &JointMap<Option<Direction>>,
        directions_ref: &JointMap<Option<Direction>>,
    ) -> JointMap<FeedbackRecord> {
        let mut report = JointMap::new();
        for joint in Joint::ALL {
            let measured = (
                finite(angles_user.get(&joint).copied().flatten()),
                finite(angles_ref.get(&joint).copied().flatten()),
                directions_user.get(&joint).copied().flatten(),
                directions_ref.get(&joint).copied().flatten(),
            );
            let (Some(au), Some(ar), Some(du), Some(dr)) = measured else {
                debug!("{joint}: skipped, not measured in both poses");
                continue;
            };
            report.insert(joint, self.evaluate_joint(joint, au, ar, du, dr));
        }
        report
    }

    /// Records for the joints that need a correction; empty means the pose matches
    #[must_use]
    pub fn compare(
        &self,
        angles_user: &JointMap<Option<f64>>,
        angles_ref: &JointMap<Option<f64>>,
        directions_user: &JointMap<Option<Direction>>,
        directions_ref: &JointMap<Option<Direction>>,
    ) -> JointMap<FeedbackRecord> {
        self.assess(angles_user, angles_ref, directions_user, directions_ref)
            .into_iter()
            .filter(|(_, record)| record.needs_correction())
            .collect()
    }

    /// Compare two snapshots
    #[must_use]
    pub fn compare_snapshots(&self, user: &PoseSnapshot, reference: &PoseSnapshot) -> JointMap<FeedbackRecord> {
        self.compare(&user.angles, &reference.angles, &user.directions, &reference.directions)
    }

    /// True when the user pose is within tolerance at every measurable joint
    #[must_use]
    pub fn matches(&self, user: &PoseSnapshot, reference: &PoseSnapshot) -> bool {
        self.compare_snapshots(user, reference).is_empty()
    }
}

/// Compare with default severity bands and the given tolerance
#[must_use]
pub fn compare(
    angles_user: &JointMap<Option<f64>>,
    angles_ref: &JointMap<Option<f64>>,
    directions_user: &JointMap<Option<Direction>>,
    directions_ref: &JointMap<Option<Direction>>,
    threshold_degrees: f64,
) -> JointMap<FeedbackRecord> {
    PoseComparator::new(threshold_degrees).compare(angles_user, angles_ref, directions_user, directions_ref)
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn round_degrees(value: f64) -> i32 {
    f64_to_i32_clamp(value.round(), 0, i32::MAX)
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
