//! Style attribute bundle and the resolved immutable configuration.

use serde::Deserialize;

use crate::foundation::core::{Density, Rgba8};
use crate::foundation::error::{RoundelError, RoundelResult};

/// Default border ring width in dp, converted to pixels at resolve time.
pub const DEFAULT_BORDER_WIDTH_DP: f32 = 2.0;

/// Default initials text shown when the host never supplied any.
pub const DEFAULT_INITIALS: &str = "??";

/// Fixed fallback palette: circle fill behind the initials glyph.
pub(crate) const INITIALS_BACKGROUND: Rgba8 = Rgba8::new(0, 0, 255, 255);

/// Fixed fallback palette: initials glyph color.
pub(crate) const INITIALS_COLOR: Rgba8 = Rgba8::WHITE;

/// A color attribute, accepted as `"#RRGGBB[AA]"`, `[r,g,b[,a]]`, or
/// `{r,g,b[,a]}` with normalized 0..1 channels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorAttr {
    /// Red, 0..1.
    pub r: f64,
    /// Green, 0..1.
    pub g: f64,
    /// Blue, 0..1.
    pub b: f64,
    /// Alpha, 0..1.
    pub a: f64,
}

impl ColorAttr {
    /// Construct from normalized channels.
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to straight RGBA8, clamping each channel.
    pub fn to_rgba8(self) -> Rgba8 {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }

        Rgba8::new(to_u8(self.r), to_u8(self.g), to_u8(self.b), to_u8(self.a))
    }
}

impl<'de> Deserialize<'de> for ColorAttr {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            RgbaObj {
                r: f64,
                g: f64,
                b: f64,
                #[serde(default = "one")]
                a: f64,
            },
            Arr(Vec<f64>),
        }

        fn one() -> f64 {
            1.0
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => Ok(Self::rgba(r, g, b, a)),
            Repr::Arr(v) => {
                if v.len() == 3 {
                    Ok(Self::rgba(v[0], v[1], v[2], 1.0))
                } else if v.len() == 4 {
                    Ok(Self::rgba(v[0], v[1], v[2], v[3]))
                } else {
                    Err(serde::de::Error::custom(
                        "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                    ))
                }
            }
        }
    }
}

fn parse_hex(s: &str) -> Result<ColorAttr, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    // Pair slicing below indexes by byte; multi-byte input must bail here.
    if !s.is_ascii() {
        return Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned());
    }

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    let (r, g, b, a) = match s.len() {
        6 => {
            let r = hex_byte(&s[0..2])?;
            let g = hex_byte(&s[2..4])?;
            let b = hex_byte(&s[4..6])?;
            (r, g, b, 255)
        }
        8 => {
            let r = hex_byte(&s[0..2])?;
            let g = hex_byte(&s[2..4])?;
            let b = hex_byte(&s[4..6])?;
            let a = hex_byte(&s[6..8])?;
            (r, g, b, a)
        }
        _ => {
            return Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned());
        }
    };

    Ok(ColorAttr::rgba(
        (r as f64) / 255.0,
        (g as f64) / 255.0,
        (b as f64) / 255.0,
        (a as f64) / 255.0,
    ))
}

/// Recognized style attributes, deserialized from the host's bundle.
///
/// Unknown keys are ignored; absent keys fall back to the documented defaults
/// in [`AvatarStyle::resolve`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleAttrs {
    /// Border ring width in pixels.
    #[serde(default)]
    pub border_width: Option<f32>,
    /// Border ring color.
    #[serde(default)]
    pub border_color: Option<ColorAttr>,
    /// Fallback initials text.
    #[serde(default)]
    pub initials: Option<String>,
}

impl StyleAttrs {
    /// Parse a JSON attribute bundle.
    pub fn from_json(json: &str) -> RoundelResult<Self> {
        serde_json::from_str(json).map_err(|e| RoundelError::serde(e.to_string()))
    }
}

/// Immutable widget configuration, resolved once at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct AvatarStyle {
    /// Border ring width in pixels, never negative.
    pub border_width_px: f32,
    /// Border ring color.
    pub border_color: Rgba8,
    /// Fallback initials text.
    pub initials: String,
}

impl AvatarStyle {
    /// Resolve an attribute bundle against the defaults at `density`.
    ///
    /// Absent `borderWidth` falls back to 2dp in pixels, absent `borderColor`
    /// to opaque white, absent `initials` to `"??"`. Negative widths clamp to
    /// zero.
    pub fn resolve(attrs: &StyleAttrs, density: Density) -> Self {
        let border_width_px = attrs
            .border_width
            .unwrap_or_else(|| density.dp_to_px(DEFAULT_BORDER_WIDTH_DP))
            .max(0.0);
        let border_color = attrs
            .border_color
            .map(ColorAttr::to_rgba8)
            .unwrap_or(Rgba8::WHITE);
        let initials = attrs
            .initials
            .clone()
            .unwrap_or_else(|| DEFAULT_INITIALS.to_owned());
        Self {
            border_width_px,
            border_color,
            initials,
        }
    }

    /// The style of an empty attribute bundle at `density`.
    pub fn default_at(density: Density) -> Self {
        Self::resolve(&StyleAttrs::default(), density)
    }
}

#[cfg(test)]
#[path = "../tests/unit/style.rs"]
mod tests;
