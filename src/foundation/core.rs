/// Absolute 0-based frame index, counted from the first sample of the activity.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames per second of elapsed activity time.
///
/// A rate of 0 disables the stream it is configured for.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct FrameRate(pub u32);

impl FrameRate {
    /// Return `true` when this rate produces no frames.
    pub fn is_disabled(self) -> bool {
        self.0 == 0
    }

    /// Number of frames covering `secs` whole seconds.
    pub fn frames_for_secs(self, secs: u64) -> u64 {
        secs.saturating_mul(u64::from(self.0))
    }
}

/// The two overlay streams produced from one activity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamKind {
    /// Interpolated instantaneous speed, converted to the display unit.
    Speed,
    /// Interpolated heart rate in beats per minute.
    HeartRate,
}

impl StreamKind {
    /// Both streams in emission order.
    pub const ALL: [StreamKind; 2] = [StreamKind::Speed, StreamKind::HeartRate];

    /// Name used for the output directory and the frame file prefix.
    pub fn name(self) -> &'static str {
        match self {
            StreamKind::Speed => "speed",
            StreamKind::HeartRate => "heart_rate",
        }
    }

    /// File name of frame `idx` within this stream's directory.
    pub fn frame_file_name(self, idx: FrameIndex) -> String {
        format!("{}.{}.png", self.name(), idx.0)
    }
}

impl std::fmt::Display for StreamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
