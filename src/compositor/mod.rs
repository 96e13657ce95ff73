//! The two compositing strategies behind a common seam.

pub(crate) mod mask;
pub(crate) mod shader;

use crate::buffer::{PixelBuffer, SourceImage};
use crate::foundation::core::Geometry;
use crate::foundation::error::RoundelResult;
use crate::raster::Rasterizer;
use crate::style::AvatarStyle;
use crate::text::{TextShaper, Typeface};

/// Available compositing strategies.
///
/// - `Mask` composites the source through a circle mask into a materialized
///   result buffer at rebuild time and paints it 1:1.
/// - `Shader` clips at draw time with a clamped image fill, and falls back to
///   a colored circle with a centered initial when no source is set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompositorKind {
    /// Mask-based source-in compositing.
    Mask,
    /// Image-fill compositing with initials fallback.
    Shader,
}

/// Strategy seam between the view and the compositors.
///
/// Geometry handling, the border ring, and target blitting live in the view;
/// a strategy only owns its cached products and the clipped content pass.
pub(crate) trait Compositor {
    /// Recompute cached products for the given geometry and inputs.
    ///
    /// Called on resize and on source/typeface changes, never while unsized.
    fn rebuild(
        &mut self,
        raster: &mut Rasterizer,
        shaper: &mut TextShaper,
        geometry: Geometry,
        source: Option<&SourceImage>,
        style: &AvatarStyle,
        typeface: Option<&Typeface>,
    ) -> RoundelResult<()>;

    /// Paint the clipped content into `ctx`. The border ring is stroked on
    /// top by the caller.
    fn draw_content(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        geometry: Geometry,
    ) -> RoundelResult<()>;

    /// The materialized rebuild product, when the strategy keeps one. Lets
    /// the owner observe buffer reuse across resizes.
    fn result_buffer(&self) -> Option<&PixelBuffer> {
        None
    }
}

/// Create the strategy implementation for `kind`.
pub(crate) fn create_compositor(kind: CompositorKind) -> Box<dyn Compositor> {
    match kind {
        CompositorKind::Mask => Box::new(mask::MaskCompositor::new()),
        CompositorKind::Shader => Box::new(shader::ShaderCompositor::new()),
    }
}
