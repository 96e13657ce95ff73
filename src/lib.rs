//! Roundel is a circular avatar compositing core.
//!
//! It turns a square source pixel buffer of arbitrary size (or an initials
//! fallback) into a circular, ring-bordered avatar, with two selectable
//! compositing strategies and resize-aware caching. The API is host-driven:
//!
//! - Resolve an [`AvatarStyle`] from a [`StyleAttrs`] bundle
//! - Construct an [`AvatarView`] with a [`CompositorKind`]
//! - Size it via [`MeasureSpec`] / [`AvatarView::on_resize`]
//! - Feed it a [`SourceImage`] (and a [`Typeface`] for the fallback)
//! - Paint with [`AvatarView::draw`] or [`AvatarView::render`]
//!
//! The core never does I/O; image decode and PNG export belong to the host
//! (see the `roundel` demo binary).
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod compose;
mod foundation;
mod raster;

/// Pixel buffer and source image containers.
pub mod buffer;
/// Compositing strategies and their selection seam.
pub mod compositor;
/// Measure-spec resolution for the host layout pass.
pub mod measure;
/// Style attribute bundle and resolved configuration.
pub mod style;
/// Typeface handling for the initials fallback.
pub mod text;
/// The avatar widget core.
pub mod view;

pub use crate::buffer::{PixelBuffer, PixelFormat, SourceImage};
pub use crate::compositor::CompositorKind;
pub use crate::foundation::core::{Density, Geometry, Point, Rect, Rgba8};
pub use crate::foundation::error::{RoundelError, RoundelResult};
pub use crate::measure::{MeasureMode, MeasureSpec, resolve_size};
pub use crate::style::{
    AvatarStyle, ColorAttr, DEFAULT_BORDER_WIDTH_DP, DEFAULT_INITIALS, StyleAttrs,
};
pub use crate::text::Typeface;
pub use crate::view::AvatarView;
