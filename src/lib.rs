//! tcx-overlay turns a TCX activity recording into transparent PNG overlay frames.
//!
//! The pipeline is one-way:
//!
//! - Extract ordered [`Sample`]s from a TCX document ([`parse_tcx_str`], [`read_tcx_file`])
//! - Plan per-stream frames on a fixed-rate grid ([`plan_stream`])
//! - Render and emit both streams through a [`FrameSink`] ([`Synthesizer::run`])
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Activity documents and the samples extracted from them.
pub mod activity;
/// Overlay configuration, unit table and input validation.
pub mod config;
/// Frame sinks (PNG directories, in-memory capture).
pub mod output;
/// Text rasterization.
pub mod render;
/// Interpolation onto the frame grid and stream synthesis.
pub mod synth;

pub use crate::foundation::core::{FrameIndex, FrameRate, StreamKind};
pub use crate::foundation::error::{OverlayError, OverlayResult};

pub use crate::activity::sample::{Sample, SampleSequence};
pub use crate::activity::tcx::{ACTIVITY_EXT_NS, TCX_NS, parse_tcx_str, read_tcx_file};
pub use crate::config::{
    OverlayConfig, SpeedUnit, UnitParams, parse_font_size, parse_frame_rate, parse_speed_unit,
};
pub use crate::output::png_dir::PngDirSink;
pub use crate::output::sink::{FrameSink, InMemorySink};
pub use crate::render::text::{CpuTextRenderer, TextBrushRgba8};
pub use crate::render::{FrameRGBA, TextRenderer};
pub use crate::synth::plan::{
    PLACEHOLDER, PlannedFrame, SegmentFrames, format_heart_rate, interpolate, plan_stream,
    segment_frame_count, segment_secs,
};
pub use crate::synth::synthesizer::{SynthStats, Synthesizer};
