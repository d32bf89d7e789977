//! Frame planning on the fixed-rate grid.
//!
//! Every segment `(a, b)` of a [`SampleSequence`] contributes exactly `Δt × R` frames, where
//! `Δt` is the whole seconds between the two samples and `R` is the stream's [`FrameRate`]. A
//! segment's first frame index is the running total of all earlier segments' frame counts, so a
//! stream's indices are contiguous from 0. For recordings whose timestamps fall on whole seconds
//! from the first sample this is exactly `⌊a − t0⌋ × R`.

use crate::activity::sample::{Sample, SampleSequence, whole_secs_between};
use crate::config::SpeedUnit;
use crate::foundation::core::{FrameIndex, FrameRate, StreamKind};

/// Text shown where a segment lacks the attribute; keeps frame timing without a value.
pub const PLACEHOLDER: &str = " ";

/// One frame to be rendered: where it goes and what it says.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedFrame {
    /// Absolute index within the stream.
    pub index: FrameIndex,
    /// Display text (a number, or [`PLACEHOLDER`]).
    pub text: String,
}

impl PlannedFrame {
    /// Return `true` when this frame carries no value.
    pub fn is_placeholder(&self) -> bool {
        self.text == PLACEHOLDER
    }
}

/// Whole seconds between two samples, truncated; backwards time counts as 0.
pub fn segment_secs(a: &Sample, b: &Sample) -> u64 {
    whole_secs_between(a.timestamp, b.timestamp)
}

/// Number of frames the segment `(a, b)` contributes at `rate`.
pub fn segment_frame_count(a: &Sample, b: &Sample, rate: FrameRate) -> u64 {
    rate.frames_for_secs(segment_secs(a, b))
}

/// Linear interpolation at local offset `j` of a segment spanning `frames` frames.
pub fn interpolate(from: f64, to: f64, j: u64, frames: u64) -> f64 {
    from + (to - from) * j as f64 / frames as f64
}

/// Heart rate text: the interpolated value truncated to an integer.
pub fn format_heart_rate(value: f64) -> String {
    (value.trunc() as i64).to_string()
}

/// Frames of one segment of one stream.
#[derive(Clone, Debug)]
pub struct SegmentFrames {
    kind: StreamKind,
    unit: SpeedUnit,
    endpoints: Option<(f64, f64)>,
    base: u64,
    frames: u64,
    next: u64,
}

impl SegmentFrames {
    /// Plan the segment `(a, b)` whose first frame lands on index `base`.
    pub fn new(
        kind: StreamKind,
        rate: FrameRate,
        unit: SpeedUnit,
        a: &Sample,
        b: &Sample,
        base: u64,
    ) -> Self {
        let endpoints = a.value_for(kind).zip(b.value_for(kind));
        Self {
            kind,
            unit,
            endpoints,
            base,
            frames: segment_frame_count(a, b, rate),
            next: 0,
        }
    }

    /// Total frames in this segment.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Index of the segment's first frame.
    pub fn base(&self) -> FrameIndex {
        FrameIndex(self.base)
    }

    /// Return `true` when either endpoint lacks the attribute.
    pub fn is_placeholder(&self) -> bool {
        self.endpoints.is_none()
    }

    fn text_at(&self, j: u64) -> String {
        let Some((from, to)) = self.endpoints else {
            return PLACEHOLDER.to_string();
        };
        let value = interpolate(from, to, j, self.frames);
        match self.kind {
            StreamKind::Speed => self.unit.format_speed(value),
            StreamKind::HeartRate => format_heart_rate(value),
        }
    }
}

impl Iterator for SegmentFrames {
    type Item = PlannedFrame;

    fn next(&mut self) -> Option<PlannedFrame> {
        if self.next >= self.frames {
            return None;
        }
        let j = self.next;
        self.next += 1;
        Some(PlannedFrame {
            index: FrameIndex(self.base + j),
            text: self.text_at(j),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = usize::try_from(self.frames - self.next).unwrap_or(usize::MAX);
        (left, Some(left))
    }
}

/// All frames of one stream, segment after segment.
///
/// Sequences with fewer than two samples yield nothing, as does a disabled rate.
pub fn plan_stream(
    samples: &SampleSequence,
    kind: StreamKind,
    rate: FrameRate,
    unit: SpeedUnit,
) -> impl Iterator<Item = PlannedFrame> + '_ {
    samples
        .pairs()
        .scan(0u64, move |base, (a, b)| {
            let segment = SegmentFrames::new(kind, rate, unit, a, b, *base);
            *base += segment.frame_count();
            Some(segment)
        })
        .flatten()
}

#[cfg(test)]
#[path = "../../tests/unit/synth/plan.rs"]
mod tests;
