use crate::foundation::core::{FrameIndex, StreamKind};
use crate::foundation::error::OverlayResult;
use crate::render::FrameRGBA;

/// Sink contract for consuming rendered overlay frames.
///
/// Ordering contract: within one stream, `push_frame` is called in strictly increasing
/// `FrameIndex` order starting at 0. Frames of the two streams are interleaved segment by
/// segment.
pub trait FrameSink {
    /// Called once before any frame is pushed, with every stream the run may emit.
    fn begin(&mut self, streams: &[StreamKind]) -> OverlayResult<()>;
    /// Push one frame of `stream`.
    fn push_frame(
        &mut self,
        stream: StreamKind,
        idx: FrameIndex,
        frame: &FrameRGBA,
    ) -> OverlayResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> OverlayResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    streams: Vec<StreamKind>,
    frames: Vec<(StreamKind, FrameIndex, FrameRGBA)>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Streams announced in `begin`.
    pub fn streams(&self) -> &[StreamKind] {
        &self.streams
    }

    /// Borrow the captured frames in push order.
    pub fn frames(&self) -> &[(StreamKind, FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// Captured frames of one stream, in push order.
    pub fn stream_frames(
        &self,
        stream: StreamKind,
    ) -> impl Iterator<Item = (FrameIndex, &FrameRGBA)> {
        self.frames
            .iter()
            .filter(move |(s, _, _)| *s == stream)
            .map(|(_, idx, frame)| (*idx, frame))
    }

    /// Return `true` once `end` was called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, streams: &[StreamKind]) -> OverlayResult<()> {
        self.streams = streams.to_vec();
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(
        &mut self,
        stream: StreamKind,
        idx: FrameIndex,
        frame: &FrameRGBA,
    ) -> OverlayResult<()> {
        self.frames.push((stream, idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> OverlayResult<()> {
        self.ended = true;
        Ok(())
    }
}
