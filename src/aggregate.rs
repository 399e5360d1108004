//! Reference pose aggregation.
//!
//! Builds a reference record from several sample snapshots: angles are
//! averaged, directions take the most frequent label. Unmeasured values are
//! ignored; a joint never measured stays absent.

use crate::{
    directions::Direction,
    joints::{Joint, JointMap},
    reference::ReferencePose,
    snapshot::PoseSnapshot,
    utils::round_to,
    Error, Result,
};
use log::debug;

/// Accumulates snapshots for one reference pose
#[derive(Debug, Clone, Default)]
pub struct ReferenceAggregator {
    samples: usize,
    angles: JointMap<Vec<f64>>,
    directions: JointMap<Vec<Direction>>,
}

impl ReferenceAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one sample
    pub fn add(&mut self, snapshot: &PoseSnapshot) {
        self.samples += 1;
        for joint in Joint::ALL {
            if let Some(angle) = snapshot.angle(joint).filter(|a| a.is_finite()) {
                self.angles.entry(joint).or_default().push(angle);
            }
            if let Some(direction) = snapshot.direction(joint) {
                self.directions.entry(joint).or_default().push(direction);
            }
        }
    }

    /// Number of samples added
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples == 0
    }

    /// Mean angle of a joint over the samples that measured it
    #[must_use]
    pub fn mean_angle(&self, joint: Joint) -> Option<f64> {
        self.statistics(joint).map(|stats| stats.mean)
    }

    /// Most frequent direction; ties go to the label seen first
    #[must_use]
    pub fn mode_direction(&self, joint: Joint) -> Option<Direction> {
        let labels = self.directions.get(&joint)?;
        let mut counts: Vec<(Direction, usize)> = Vec::new();
        for label in labels {
            match counts.iter_mut().find(|(d, _)| d == label) {
                Some((_, count)) => *count += 1,
                None => counts.push((*label, 1)),
            }
        }
        counts
            .into_iter()
            .fold(None, |best: Option<(Direction, usize)>, (label, count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((label, count)),
            })
            .map(|(label, _)| label)
    }

    /// Spread of the measured angles of a joint
    #[must_use]
    pub fn statistics(&self, joint: Joint) -> Option<Statistics> {
        self.angles
            .get(&joint)
            .filter(|values| !values.is_empty())
            .map(|values| Statistics::from_values(values))
    }

    /// Produce the reference record
    ///
    /// # Errors
    ///
    /// Returns an `AggregationError` if no sample was added
    pub fn build(&self, pose_name: &str, precision: u32) -> Result<ReferencePose> {
        if self.is_empty() {
            return Err(Error::AggregationError(format!(
                "No detected samples for pose '{pose_name}'"
            )));
        }

        let mut angles = JointMap::new();
        let mut directions = JointMap::new();
        for joint in Joint::ALL {
            let mean = self.mean_angle(joint).map(|m| round_to(m, precision));
            let mode = self.mode_direction(joint);
            if let Some(stats) = self.statistics(joint) {
                debug!(
                    "{joint}: n={} mean={:.3} std_dev={:.3} range={:.3}",
                    stats.count, stats.mean, stats.std_dev, stats.range
                );
            }
            angles.insert(joint, mean);
            directions.insert(joint, mode);
        }

        Ok(ReferencePose {
            pose_name: pose_name.to_string(),
            angles,
            directions,
        })
    }
}

/// Build a reference record from a finite sequence of snapshots
///
/// # Errors
///
/// Returns an `AggregationError` if `snapshots` is empty
pub fn aggregate<'a, I>(pose_name: &str, snapshots: I, precision: u32) -> Result<ReferencePose>
where
    I: IntoIterator<Item = &'a PoseSnapshot>,
{
    let mut aggregator = ReferenceAggregator::new();
    for snapshot in snapshots {
        aggregator.add(snapshot);
    }
    aggregator.build(pose_name, precision)
}

/// Statistical summary of the angle samples of one joint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    /// Number of samples
    pub count: usize,
    /// Mean value of the data
    pub mean: f64,
    /// Population standard deviation of the data
    pub std_dev: f64,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Range (max - min) of the data
    pub range: f64,
}

impl Statistics {
    #[allow(clippy::cast_precision_loss)] // Sample counts are small
    fn from_values(data: &[f64]) -> Self {
        let n = data.len() as f64;
        let mean = data.iter().sum::<f64>() / n;

        let variance = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

        let min = data.iter().copied().fold(f64::INFINITY, f64::min);
        let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            count: data.len(),
            mean,
            std_dev: variance.sqrt(),
            min,
            max,
            range: max - min,
        }
    }
}
