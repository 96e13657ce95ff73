//! The avatar widget core: sizing, live state, rebuilds, and the draw pass.

use crate::buffer::{PixelBuffer, PixelFormat, SourceImage};
use crate::compose;
use crate::compositor::{Compositor, CompositorKind, create_compositor};
use crate::foundation::core::{Density, Geometry, Rgba8};
use crate::foundation::error::{RoundelError, RoundelResult};
use crate::measure::{MeasureSpec, resolve_size};
use crate::raster::{self, Rasterizer};
use crate::style::{AvatarStyle, DEFAULT_BORDER_WIDTH_DP};
use crate::text::{TextShaper, Typeface};

/// A circular avatar widget core.
///
/// Owns the resolved style, the live geometry, and the active compositing
/// strategy. The host drives it through the measurement, resize, and setter
/// methods, then paints with [`AvatarView::draw`] or [`AvatarView::render`].
/// The value is exclusively owned; `&mut` discipline serializes all mutation.
pub struct AvatarView {
    style: AvatarStyle,
    density: Density,
    geometry: Geometry,
    source: Option<SourceImage>,
    typeface: Option<Typeface>,
    kind: CompositorKind,
    strategy: Box<dyn Compositor>,
    raster: Rasterizer,
    shaper: TextShaper,
    scratch: Option<vello_cpu::Pixmap>,
}

impl AvatarView {
    /// Construct an unsized view with the given style and strategy.
    pub fn new(style: AvatarStyle, density: Density, kind: CompositorKind) -> Self {
        let geometry = Geometry::new(0, style.border_width_px);
        Self {
            strategy: create_compositor(kind),
            geometry,
            source: None,
            typeface: None,
            kind,
            raster: Rasterizer::new(),
            shaper: TextShaper::new(),
            scratch: None,
            style,
            density,
        }
    }

    /// Strategy selected at construction.
    pub fn kind(&self) -> CompositorKind {
        self.kind
    }

    /// Resolved immutable style.
    pub fn style(&self) -> &AvatarStyle {
        &self.style
    }

    /// Current square side in pixels; zero while unsized.
    pub fn side(&self) -> u32 {
        self.geometry.side
    }

    /// Current border ring width in pixels.
    pub fn border_width(&self) -> f32 {
        self.geometry.stroke_width
    }

    /// The strategy's materialized composite, for hosts that want pixel
    /// read-back without a draw. The mask strategy keeps one after a sized
    /// rebuild with a source; the shader strategy never materializes.
    pub fn result_buffer(&self) -> Option<&PixelBuffer> {
        self.strategy.result_buffer()
    }

    fn default_side(&self) -> u32 {
        self.density.dp_to_px(DEFAULT_BORDER_WIDTH_DP) as u32
    }

    /// Resolve a host measure spec to the square side this view takes.
    ///
    /// Bounded specs resolve to the host's bound; unconstrained measurement
    /// falls back to the density-scaled default. The result applies to both
    /// axes.
    pub fn resolve_size(&self, spec: MeasureSpec) -> u32 {
        resolve_size(spec, self.default_side())
    }

    /// Adopt a new side length.
    ///
    /// A no-op when the side is unchanged, so settled layouts cause zero
    /// buffer churn. `side == 0` records the unsized state and suppresses all
    /// preparation; any other change rebuilds the strategy products.
    pub fn on_resize(&mut self, side: u32) -> RoundelResult<()> {
        if side == self.geometry.side {
            tracing::debug!(side, "resize ignored: side unchanged");
            return Ok(());
        }
        self.geometry.side = side;
        self.scratch = None;
        self.rebuild()
    }

    /// Supply or replace the source image, rebuilding under the current
    /// geometry (deferred while unsized).
    pub fn set_source_image(&mut self, image: SourceImage) -> RoundelResult<()> {
        self.source = Some(image);
        self.rebuild()
    }

    /// Remove the source image. The shader strategy falls back to initials
    /// on the next draw; the mask strategy keeps its previous composite.
    pub fn clear_source_image(&mut self) -> RoundelResult<()> {
        self.source = None;
        self.rebuild()
    }

    /// Supply the typeface used by the initials fallback.
    pub fn set_typeface(&mut self, typeface: Typeface) -> RoundelResult<()> {
        self.typeface = Some(typeface);
        self.rebuild()
    }

    /// Reassign the border ring width, clamped at zero.
    ///
    /// Takes effect on the next draw with no rebuild; cached strategy
    /// products are untouched.
    pub fn set_border_width(&mut self, width_px: f32) {
        self.geometry.stroke_width = width_px.max(0.0);
    }

    fn rebuild(&mut self) -> RoundelResult<()> {
        if self.geometry.is_unsized() {
            tracing::debug!("rebuild deferred: not yet sized");
            return Ok(());
        }
        self.strategy.rebuild(
            &mut self.raster,
            &mut self.shaper,
            self.geometry,
            self.source.as_ref(),
            &self.style,
            self.typeface.as_ref(),
        )
    }

    /// Paint the avatar into `target` at `origin`, clipped to its bounds.
    ///
    /// Pure with respect to observable state: geometry, cached products, and
    /// the source are only read. The `&mut` receiver exists to reuse the
    /// internal scratch surface and render context. Unsized views draw
    /// nothing.
    pub fn draw(&mut self, target: &mut PixelBuffer, origin: (i32, i32)) -> RoundelResult<()> {
        if target.format != PixelFormat::Rgba8Premul {
            return Err(RoundelError::validation(
                "draw target must be an Rgba8Premul buffer",
            ));
        }
        if self.geometry.is_unsized() {
            tracing::debug!("draw skipped: not yet sized");
            return Ok(());
        }
        let side = self.geometry.side;
        let w = raster::side_u16(side)?;

        let mut scratch = match self.scratch.take() {
            Some(pm) if u32::from(pm.width()) == side => pm,
            _ => vello_cpu::Pixmap::new(w, w),
        };
        raster::clear_pixmap_to_transparent(&mut scratch);

        let geometry = self.geometry;
        let border_color = self.style.border_color;
        let strategy = &*self.strategy;
        self.raster.with_ctx(w, w, |ctx| {
            strategy.draw_content(ctx, geometry)?;
            draw_border(ctx, geometry, border_color);
            ctx.flush();
            ctx.render_to_pixmap(&mut scratch);
            Ok(())
        })?;

        compose::blit_over_rgba8_premul(
            &mut target.data,
            target.width,
            target.height,
            scratch.data_as_u8_slice(),
            side,
            side,
            origin,
        )?;
        self.scratch = Some(scratch);
        Ok(())
    }

    /// Render the avatar into a fresh `side x side` premultiplied RGBA
    /// buffer. Errors while unsized.
    pub fn render(&mut self) -> RoundelResult<PixelBuffer> {
        if self.geometry.is_unsized() {
            return Err(RoundelError::validation("render requires a sized view"));
        }
        let side = self.geometry.side;
        let mut out = PixelBuffer::zeroed(side, side, PixelFormat::Rgba8Premul)?;
        self.draw(&mut out, (0, 0))?;
        Ok(out)
    }
}

/// Stroke the border ring: an oval inscribed in the view rectangle inset by
/// `trunc(stroke_width / 2)` whole pixels per side. Zero widths draw nothing.
fn draw_border(ctx: &mut vello_cpu::RenderContext, geometry: Geometry, color: Rgba8) {
    if geometry.stroke_width <= 0.0 {
        return;
    }
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(raster::color_to_cpu(color));
    ctx.set_stroke(vello_cpu::kurbo::Stroke::new(f64::from(
        geometry.stroke_width,
    )));
    ctx.stroke_path(&raster::oval_path(geometry.border_rect()));
}

#[cfg(test)]
#[path = "../tests/unit/view.rs"]
mod tests;
