use chrono::{DateTime, Utc};

use crate::foundation::core::StreamKind;

/// One usable trackpoint: a timestamp plus the optional attributes overlays are drawn from.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    /// Absolute UTC time of the trackpoint.
    pub timestamp: DateTime<Utc>,
    /// Heart rate in beats per minute.
    pub heart_rate: Option<u32>,
    /// Speed in m/s.
    pub speed: Option<f64>,
}

impl Sample {
    /// Create a sample with no attributes set.
    pub fn at(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            heart_rate: None,
            speed: None,
        }
    }

    /// Builder-style setter for `heart_rate`.
    pub fn with_heart_rate(mut self, bpm: u32) -> Self {
        self.heart_rate = Some(bpm);
        self
    }

    /// Builder-style setter for `speed`.
    pub fn with_speed(mut self, mps: f64) -> Self {
        self.speed = Some(mps);
        self
    }

    /// The numeric attribute drawn by `kind`, if present.
    pub fn value_for(&self, kind: StreamKind) -> Option<f64> {
        match kind {
            StreamKind::Speed => self.speed,
            StreamKind::HeartRate => self.heart_rate.map(f64::from),
        }
    }
}

/// Samples in document order. Immutable once built.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampleSequence {
    samples: Vec<Sample>,
}

impl SampleSequence {
    /// Wrap samples without reordering them.
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Return `true` when no samples were extracted.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// First sample; its timestamp is the origin of every frame index.
    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    /// Last sample; no frames are produced after it.
    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Borrow all samples.
    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    /// Consecutive `(a, b)` pairs, one per segment.
    pub fn pairs(&self) -> impl Iterator<Item = (&Sample, &Sample)> + '_ {
        self.samples.windows(2).map(|w| (&w[0], &w[1]))
    }

    /// Number of segments (`len - 1`, or 0).
    pub fn segment_count(&self) -> usize {
        self.samples.len().saturating_sub(1)
    }

    /// Whole seconds from the first to the last sample.
    pub fn total_duration_secs(&self) -> u64 {
        match (self.first(), self.last()) {
            (Some(a), Some(b)) => whole_secs_between(a.timestamp, b.timestamp),
            _ => 0,
        }
    }
}

impl From<Vec<Sample>> for SampleSequence {
    fn from(samples: Vec<Sample>) -> Self {
        Self::new(samples)
    }
}

impl<'a> IntoIterator for &'a SampleSequence {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Whole seconds from `from` to `to`, truncated; negative spans count as 0.
pub(crate) fn whole_secs_between(from: DateTime<Utc>, to: DateTime<Utc>) -> u64 {
    u64::try_from((to - from).num_seconds()).unwrap_or(0)
}
