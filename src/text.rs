//! Typeface handling and initials shaping for the fallback path.

use std::sync::Arc;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{RoundelError, RoundelResult};

/// A typeface supplied by the host as raw TTF/OTF bytes.
///
/// The core does no font discovery or I/O; hosts that want the initials
/// fallback hand the bytes in explicitly.
#[derive(Clone)]
pub struct Typeface {
    bytes: Arc<Vec<u8>>,
    font: vello_cpu::peniko::FontData,
}

impl Typeface {
    /// Wrap raw font bytes.
    ///
    /// Family registration happens at shaping time; this only rejects an
    /// empty payload.
    pub fn from_bytes(bytes: Vec<u8>) -> RoundelResult<Self> {
        if bytes.is_empty() {
            return Err(RoundelError::text("font bytes must be non-empty"));
        }
        let font =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes.clone()), 0);
        Ok(Self {
            bytes: Arc::new(bytes),
            font,
        })
    }

    pub(crate) fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn font(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }
}

/// One shaped line of fallback text, cached between draws.
#[derive(Clone)]
pub(crate) struct ShapedLine {
    /// Glyphs normalized so the baseline sits at y = 0 and the pen starts
    /// at x = 0.
    pub(crate) glyphs: Vec<vello_cpu::Glyph>,
    /// Total advance width in pixels.
    pub(crate) advance: f32,
    /// Ascent above the baseline, positive.
    pub(crate) ascent: f32,
    /// Descent below the baseline, positive.
    pub(crate) descent: f32,
    /// Font size the line was shaped at.
    pub(crate) font_size: f32,
    /// Glyph color.
    pub(crate) color: Rgba8,
    /// Font the glyph ids refer to.
    pub(crate) font: vello_cpu::peniko::FontData,
}

/// Stateful helper for shaping plain text from raw font bytes, reused
/// across rebuilds.
pub(crate) struct TextShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl TextShaper {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Shape a single line of text at `size_px` and return its glyphs with
    /// the baseline normalized to y = 0.
    pub(crate) fn shape_line(
        &mut self,
        text: &str,
        typeface: &Typeface,
        size_px: f32,
        brush: Rgba8,
    ) -> RoundelResult<ShapedLine> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(RoundelError::text("text size_px must be finite and > 0"));
        }

        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(typeface.bytes().to_vec()),
            None,
        );
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| RoundelError::text("no font families registered from font bytes"))?;
        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| RoundelError::text("registered font family has no name"))?
            .to_string();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);

        let Some(line) = layout.lines().next() else {
            return Err(RoundelError::text("shaping produced no lines"));
        };
        let m = line.metrics();
        let (advance, ascent, descent) = (m.advance, m.ascent, m.descent);

        let mut glyphs = Vec::new();
        let mut color = brush;
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            color = run.style().brush;
            glyphs.extend(run.glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            }));
        }
        // Layout-space glyph y is the line baseline; shift it to 0 so the
        // draw step can place the baseline with a plain translation.
        if let Some(baseline) = glyphs.first().map(|g| g.y) {
            for g in &mut glyphs {
                g.y -= baseline;
            }
        }

        Ok(ShapedLine {
            glyphs,
            advance,
            ascent,
            descent,
            font_size: size_px,
            color,
            font: typeface.font().clone(),
        })
    }
}

/// First character of the initials text, uppercased. `None` for empty text.
pub(crate) fn initial_char(initials: &str) -> Option<String> {
    let first = initials.chars().next()?;
    Some(first.to_uppercase().collect())
}

/// Baseline offset below the box center that centers a line vertically:
/// baseline y = center y + (ascent - descent) / 2.
pub(crate) fn centered_baseline_offset(ascent: f32, descent: f32) -> f32 {
    (ascent - descent) / 2.0
}

#[cfg(test)]
#[path = "../tests/unit/text.rs"]
mod tests;
