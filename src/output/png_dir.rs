use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::{FrameIndex, StreamKind};
use crate::foundation::error::{OverlayError, OverlayResult};
use crate::output::sink::FrameSink;
use crate::render::FrameRGBA;

/// Writes `<root>/<stream>/<stream>.<index>.png`, one transparent PNG per frame.
///
/// `begin` wipes and recreates every stream directory: each run is a full regeneration. Two
/// sinks must never target the same root concurrently.
#[derive(Debug)]
pub struct PngDirSink {
    root: PathBuf,
    written: u64,
}

impl PngDirSink {
    /// Create a sink rooted at `root` (the directory that will hold `speed/` and `heart_rate/`).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            written: 0,
        }
    }

    /// Directory holding the frames of `stream`.
    pub fn stream_dir(&self, stream: StreamKind) -> PathBuf {
        self.root.join(stream.name())
    }

    /// Final path of frame `idx` of `stream`.
    pub fn frame_path(&self, stream: StreamKind, idx: FrameIndex) -> PathBuf {
        self.stream_dir(stream).join(stream.frame_file_name(idx))
    }

    /// Frames written since `begin`.
    pub fn frames_written(&self) -> u64 {
        self.written
    }
}

impl FrameSink for PngDirSink {
    fn begin(&mut self, streams: &[StreamKind]) -> OverlayResult<()> {
        for &stream in streams {
            let dir = self.stream_dir(stream);
            tracing::info!(dir = %dir.display(), "clearing output directory");
            recreate_dir(&dir)?;
        }
        self.written = 0;
        Ok(())
    }

    fn push_frame(
        &mut self,
        stream: StreamKind,
        idx: FrameIndex,
        frame: &FrameRGBA,
    ) -> OverlayResult<()> {
        let img = image::RgbaImage::from_raw(frame.width, frame.height, frame.to_straight_rgba8())
            .ok_or_else(|| {
                OverlayError::render(format!(
                    "frame {} of {stream} has {} bytes for {}x{}",
                    idx.0,
                    frame.data.len(),
                    frame.width,
                    frame.height
                ))
            })?;

        let path = self.frame_path(stream, idx);
        let tmp = path.with_extension("png.tmp");
        img.save_with_format(&tmp, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", tmp.display()))?;
        std::fs::rename(&tmp, &path)
            .with_context(|| format!("rename '{}' to '{}'", tmp.display(), path.display()))?;

        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> OverlayResult<()> {
        tracing::info!(frames = self.written, root = %self.root.display(), "png frames written");
        Ok(())
    }
}

fn recreate_dir(dir: &Path) -> OverlayResult<()> {
    if dir.exists() {
        std::fs::remove_dir_all(dir)
            .with_context(|| format!("failed to clear output directory '{}'", dir.display()))?;
    }
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory '{}'", dir.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/output/png_dir.rs"]
mod tests;
