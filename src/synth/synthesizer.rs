use crate::activity::sample::{SampleSequence, whole_secs_between};
use crate::config::OverlayConfig;
use crate::foundation::core::StreamKind;
use crate::foundation::error::OverlayResult;
use crate::output::sink::FrameSink;
use crate::render::TextRenderer;
use crate::synth::plan::SegmentFrames;

/// Counters reported after a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct SynthStats {
    /// Segments walked (`samples - 1`, or 0).
    pub segments: u64,
    /// Frames emitted on the speed stream.
    pub speed_frames: u64,
    /// Frames emitted on the heart-rate stream.
    pub heart_rate_frames: u64,
    /// Frames (both streams) rendered as the blank placeholder.
    pub placeholder_frames: u64,
}

impl SynthStats {
    /// Frames emitted on `stream`.
    pub fn frames(&self, stream: StreamKind) -> u64 {
        match stream {
            StreamKind::Speed => self.speed_frames,
            StreamKind::HeartRate => self.heart_rate_frames,
        }
    }

    fn add_frame(&mut self, stream: StreamKind) {
        match stream {
            StreamKind::Speed => self.speed_frames += 1,
            StreamKind::HeartRate => self.heart_rate_frames += 1,
        }
    }
}

/// Drives both overlay streams over a sample sequence.
#[derive(Clone, Debug)]
pub struct Synthesizer {
    config: OverlayConfig,
}

impl Synthesizer {
    /// Validate `config` and build a synthesizer for it.
    pub fn new(config: OverlayConfig) -> OverlayResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration this synthesizer runs with.
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Render every frame of both streams into `sink`.
    ///
    /// Segments are walked in order; within a segment, speed frames are emitted before heart-rate
    /// frames. `on_progress` receives the percentage of activity time covered after each segment.
    #[tracing::instrument(
        skip_all,
        fields(samples = samples.len(), unit = %self.config.speed_unit)
    )]
    pub fn run(
        &self,
        samples: &SampleSequence,
        renderer: &mut dyn TextRenderer,
        sink: &mut dyn FrameSink,
        mut on_progress: impl FnMut(u32),
    ) -> OverlayResult<SynthStats> {
        sink.begin(&StreamKind::ALL)?;
        on_progress(0);

        let mut stats = SynthStats::default();
        let Some(first) = samples.first() else {
            tracing::info!("no samples, nothing to render");
            sink.end()?;
            return Ok(stats);
        };

        let t0 = first.timestamp;
        let total_secs = samples.total_duration_secs();
        let mut bases = [0u64; StreamKind::ALL.len()];

        for (seg_idx, (a, b)) in samples.pairs().enumerate() {
            for (slot, stream) in StreamKind::ALL.into_iter().enumerate() {
                let segment = SegmentFrames::new(
                    stream,
                    self.config.rate_for(stream),
                    self.config.speed_unit,
                    a,
                    b,
                    bases[slot],
                );
                bases[slot] += segment.frame_count();

                if segment.is_placeholder() && segment.frame_count() > 0 {
                    tracing::debug!(
                        segment = seg_idx,
                        %stream,
                        frames = segment.frame_count(),
                        "attribute missing, emitting placeholder frames"
                    );
                    stats.placeholder_frames += segment.frame_count();
                }

                for planned in segment {
                    let frame = renderer.render_text(&planned.text)?;
                    sink.push_frame(stream, planned.index, &frame)?;
                    stats.add_frame(stream);
                }
            }
            stats.segments += 1;

            let percent = progress_percent(whole_secs_between(t0, b.timestamp), total_secs);
            tracing::debug!(segment = seg_idx, percent, "segment done");
            on_progress(percent);
        }

        sink.end()?;
        tracing::info!(
            segments = stats.segments,
            speed_frames = stats.speed_frames,
            heart_rate_frames = stats.heart_rate_frames,
            placeholder_frames = stats.placeholder_frames,
            "overlay frames rendered"
        );
        Ok(stats)
    }
}

/// Whole-number share of `total_secs` covered by `elapsed_secs`, capped at 100.
///
/// A zero-length activity counts as complete.
pub(crate) fn progress_percent(elapsed_secs: u64, total_secs: u64) -> u32 {
    if total_secs == 0 {
        return 100;
    }
    let pct = (u128::from(elapsed_secs) * 100) / u128::from(total_secs);
    pct.min(100) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/synth/synthesizer.rs"]
mod tests;
