use crate::foundation::math::mul_div255_u8;

pub use kurbo::{Affine, Point, Rect};

/// Straight (non-premultiplied) RGBA8 color.
///
/// Render-path buffers are premultiplied; this type carries colors at the API
/// boundary and converts on the way in via [`Rgba8::to_premul`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Construct from channel values.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Premultiplied `[r,g,b,a]` bytes for this color.
    pub fn to_premul(self) -> [u8; 4] {
        let a = u16::from(self.a);
        [
            mul_div255_u8(u16::from(self.r), a),
            mul_div255_u8(u16::from(self.g), a),
            mul_div255_u8(u16::from(self.b), a),
            self.a,
        ]
    }
}

/// Display density used to convert dp-denominated defaults into pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Density(pub f32);

impl Default for Density {
    fn default() -> Self {
        Self(1.0)
    }
}

impl Density {
    /// Convert a dp value to pixels at this density.
    pub fn dp_to_px(self, dp: f32) -> f32 {
        dp * self.0
    }
}

/// Live geometry of a sized widget.
///
/// The widget is square by construction, so one `side` covers both axes.
/// `side == 0` is the valid unsized state; all buffer preparation is
/// suppressed until the first non-zero resize.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Geometry {
    /// Square side in pixels. Zero means not yet sized.
    pub side: u32,
    /// Border ring stroke width in pixels, never negative.
    pub stroke_width: f32,
}

impl Geometry {
    /// Construct with the stroke width clamped at zero.
    pub fn new(side: u32, stroke_width: f32) -> Self {
        Self {
            side,
            stroke_width: stroke_width.max(0.0),
        }
    }

    /// True while the widget has no usable size.
    pub fn is_unsized(self) -> bool {
        self.side == 0
    }

    /// The full widget rectangle, origin at (0, 0).
    pub fn view_rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.side), f64::from(self.side))
    }

    /// The widget rectangle inset by `trunc(stroke_width / 2)` whole pixels
    /// per side; the border oval is inscribed in this rectangle.
    pub fn border_rect(self) -> Rect {
        let half = f64::from((self.stroke_width / 2.0) as i32);
        let r = self.view_rect();
        Rect::new(r.x0 + half, r.y0 + half, r.x1 - half, r.y1 - half)
    }
}
