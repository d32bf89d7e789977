use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{OverlayError, OverlayResult};
use crate::render::{FrameRGBA, TextRenderer};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl TextBrushRgba8 {
    /// Fully opaque white.
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };
}

/// Renders single-line text with one TrueType font onto a tightly sized transparent image.
///
/// The font is registered once; Parley contexts and the `vello_cpu` font handle are reused for
/// every frame.
pub struct CpuTextRenderer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
    size_px: f32,
    brush: TextBrushRgba8,
}

impl CpuTextRenderer {
    /// Build a renderer from raw TrueType bytes at `font_size` pixels.
    pub fn new(font_bytes: Vec<u8>, font_size: u32) -> OverlayResult<Self> {
        if font_size == 0 {
            return Err(OverlayError::invalid_config("font size must be > 0"));
        }

        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            OverlayError::invalid_config("no font families registered from font bytes")
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| OverlayError::invalid_config("registered font family has no name"))?
            .to_string();

        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);

        tracing::debug!(family = %family_name, font_size, "text renderer ready");
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font,
            size_px: font_size as f32,
            brush: TextBrushRgba8::WHITE,
        })
    }

    /// Read a font file and build a renderer from it.
    pub fn from_file(path: impl AsRef<Path>, font_size: u32) -> OverlayResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font '{}'", path.display()))?;
        Self::new(bytes, font_size)
    }

    /// Family name the font registered under.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Override the foreground color (opaque white by default).
    pub fn with_brush(mut self, brush: TextBrushRgba8) -> Self {
        self.brush = brush;
        self
    }

    fn layout(&mut self, text: &str) -> parley::Layout<TextBrushRgba8> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(self.size_px));
        builder.push_default(parley::style::StyleProperty::Brush(self.brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

impl TextRenderer for CpuTextRenderer {
    fn render_text(&mut self, text: &str) -> OverlayResult<FrameRGBA> {
        let layout = self.layout(text);

        // A lone space still has to produce a valid (transparent) image.
        let width = extent_px(layout.full_width())?;
        let height = extent_px(layout.height())?;

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                // Line-space positions: run offset plus advances on x, baseline on y.
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&self.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: u32::from(width),
            height: u32::from(height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn extent_px(v: f32) -> OverlayResult<u16> {
    if !v.is_finite() {
        return Err(OverlayError::render("text layout extent is not finite"));
    }
    let px = v.ceil().max(1.0);
    if px > f32::from(u16::MAX) {
        return Err(OverlayError::render(format!(
            "text layout extent {px}px exceeds u16"
        )));
    }
    Ok(px as u16)
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
