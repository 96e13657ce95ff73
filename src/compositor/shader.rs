//! Shader-style strategy: clamped image fill at draw time, with a colored
//! circle plus centered initial as the no-source fallback.

use std::sync::Arc;

use crate::buffer::SourceImage;
use crate::compositor::Compositor;
use crate::foundation::core::{Affine, Geometry};
use crate::foundation::error::RoundelResult;
use crate::raster::{self, Rasterizer};
use crate::style::{AvatarStyle, INITIALS_BACKGROUND, INITIALS_COLOR};
use crate::text::{self, ShapedLine, TextShaper, Typeface};

/// Initials are shaped at this fraction of the widget side.
const INITIALS_SIZE_FRACTION: f32 = 0.7;

struct ShaderFill {
    paint: vello_cpu::Image,
    width: u32,
    height: u32,
}

/// Strategy that keeps the source wrapped as a clamped image fill and clips
/// it against the circle at draw time. Nothing is materialized per pixel
/// until the draw pass runs.
pub(crate) struct ShaderCompositor {
    fill: Option<ShaderFill>,
    initials_run: Option<ShapedLine>,
}

impl ShaderCompositor {
    pub(crate) fn new() -> Self {
        Self {
            fill: None,
            initials_run: None,
        }
    }
}

impl Compositor for ShaderCompositor {
    fn rebuild(
        &mut self,
        _raster: &mut Rasterizer,
        shaper: &mut TextShaper,
        geometry: Geometry,
        source: Option<&SourceImage>,
        style: &AvatarStyle,
        typeface: Option<&Typeface>,
    ) -> RoundelResult<()> {
        match source {
            Some(source) => {
                let pixmap = raster::rgba_straight_to_pixmap_premul(
                    &source.data,
                    source.width,
                    source.height,
                )?;
                self.fill = Some(ShaderFill {
                    paint: raster::image_paint_clamped(Arc::new(pixmap)),
                    width: source.width,
                    height: source.height,
                });
                self.initials_run = None;
            }
            None => {
                self.fill = None;
                self.initials_run = None;
                let Some(typeface) = typeface else {
                    tracing::debug!("initials shaping skipped: no typeface");
                    return Ok(());
                };
                let Some(initial) = text::initial_char(&style.initials) else {
                    tracing::debug!("initials shaping skipped: empty initials");
                    return Ok(());
                };
                let size_px = geometry.side as f32 * INITIALS_SIZE_FRACTION;
                self.initials_run =
                    Some(shaper.shape_line(&initial, typeface, size_px, INITIALS_COLOR)?);
            }
        }
        Ok(())
    }

    fn draw_content(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        geometry: Geometry,
    ) -> RoundelResult<()> {
        let side = f64::from(geometry.side);
        let oval = raster::oval_path(geometry.view_rect());

        if let Some(fill) = &self.fill {
            // The paint transform maps source pixels onto the widget square;
            // clamped extend covers any filtering overshoot at the edges.
            let sx = side / f64::from(fill.width);
            let sy = side / f64::from(fill.height);
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint_transform(raster::affine_to_cpu(Affine::scale_non_uniform(sx, sy)));
            ctx.set_paint(fill.paint.clone());
            ctx.fill_path(&oval);
            ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
            return Ok(());
        }

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(raster::color_to_cpu(INITIALS_BACKGROUND));
        ctx.fill_path(&oval);

        let Some(run) = &self.initials_run else {
            tracing::debug!("initials draw skipped: no shaped run");
            return Ok(());
        };
        let tx = side / 2.0 - f64::from(run.advance) / 2.0;
        let ty = side / 2.0 + f64::from(text::centered_baseline_offset(run.ascent, run.descent));
        ctx.set_transform(raster::affine_to_cpu(Affine::translate((tx, ty))));
        ctx.set_paint(raster::color_to_cpu(run.color));
        ctx.glyph_run(&run.font)
            .font_size(run.font_size)
            .fill_glyphs(run.glyphs.iter().cloned());
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/shader.rs"]
mod tests;
