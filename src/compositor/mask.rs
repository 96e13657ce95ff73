//! Mask-based strategy: source-in compositing into a materialized result.

use std::sync::Arc;

use crate::buffer::{PixelBuffer, PixelFormat, SourceImage};
use crate::compose;
use crate::compositor::Compositor;
use crate::foundation::core::{Affine, Geometry};
use crate::foundation::error::RoundelResult;
use crate::raster::{self, Rasterizer};
use crate::style::AvatarStyle;
use crate::text::{TextShaper, Typeface};

/// Strategy that bakes the clipped avatar at rebuild time.
///
/// Rebuild renders a circle coverage mask, stretches the source onto the
/// widget square, and keeps the source-in composite; draw paints the cached
/// composite 1:1 under the identity transform.
pub(crate) struct MaskCompositor {
    mask: Option<PixelBuffer>,
    result: Option<PixelBuffer>,
    paint: Option<vello_cpu::Image>,
}

impl MaskCompositor {
    pub(crate) fn new() -> Self {
        Self {
            mask: None,
            result: None,
            paint: None,
        }
    }
}

impl Compositor for MaskCompositor {
    fn rebuild(
        &mut self,
        raster: &mut Rasterizer,
        _shaper: &mut TextShaper,
        geometry: Geometry,
        source: Option<&SourceImage>,
        _style: &AvatarStyle,
        _typeface: Option<&Typeface>,
    ) -> RoundelResult<()> {
        let Some(source) = source else {
            // No initials fallback in this strategy: keep the previous
            // products until the next source update. Products from another
            // side would draw cropped, so those are dropped instead.
            if self.result.as_ref().is_some_and(|r| r.width != geometry.side) {
                self.mask = None;
                self.result = None;
                self.paint = None;
            }
            tracing::debug!("mask rebuild deferred: no source image");
            return Ok(());
        };
        let side = geometry.side;
        let w = raster::side_u16(side)?;

        // Circle coverage, kept as an alpha-only mask. It depends only on the
        // side, so source swaps at a settled size reuse it.
        let mask = match self.mask.take() {
            Some(m) if m.width == side => m,
            _ => {
                let mut mask_pm = vello_cpu::Pixmap::new(w, w);
                raster.with_ctx(w, w, |ctx| {
                    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
                    ctx.fill_path(&raster::oval_path(geometry.view_rect()));
                    ctx.flush();
                    ctx.render_to_pixmap(&mut mask_pm);
                    Ok(())
                })?;
                PixelBuffer::new(
                    side,
                    side,
                    PixelFormat::Alpha8,
                    raster::extract_alpha8(&mask_pm),
                )?
            }
        };

        // Stretch the source onto the widget square, both axes independently.
        let src_pm = Arc::new(raster::rgba_straight_to_pixmap_premul(
            &source.data,
            source.width,
            source.height,
        )?);
        let mut scaled_pm = vello_cpu::Pixmap::new(w, w);
        raster.with_ctx(w, w, |ctx| {
            let sx = f64::from(side) / f64::from(source.width);
            let sy = f64::from(side) / f64::from(source.height);
            ctx.set_transform(raster::affine_to_cpu(Affine::scale_non_uniform(sx, sy)));
            ctx.set_paint(raster::image_paint(Arc::clone(&src_pm)));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(source.width),
                f64::from(source.height),
            ));
            ctx.flush();
            ctx.render_to_pixmap(&mut scaled_pm);
            Ok(())
        })?;

        // The result starts as the mask promoted to RGBA, then the stretched
        // source replaces it under the source-in rule.
        let mut result = PixelBuffer::new(
            side,
            side,
            PixelFormat::Rgba8Premul,
            compose::promote_alpha8(&mask.data),
        )?;
        compose::source_in_rgba8_premul(
            scaled_pm.data_as_u8_slice(),
            &mask.data,
            &mut result.data,
        )?;

        let result_pm = raster::pixmap_from_premul_bytes(&result.data, side, side)?;
        self.paint = Some(raster::image_paint(Arc::new(result_pm)));
        self.mask = Some(mask);
        self.result = Some(result);
        Ok(())
    }

    fn draw_content(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        _geometry: Geometry,
    ) -> RoundelResult<()> {
        let (Some(paint), Some(result)) = (&self.paint, &self.result) else {
            tracing::debug!("mask draw skipped: nothing prepared");
            return Ok(());
        };
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(paint.clone());
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(result.width),
            f64::from(result.height),
        ));
        Ok(())
    }

    fn result_buffer(&self) -> Option<&PixelBuffer> {
        self.result.as_ref()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/mask.rs"]
mod tests;
