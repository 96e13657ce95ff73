//! Measure-spec resolution for the host's layout pass.

/// How the host constrains one axis during measurement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeasureMode {
    /// No constraint; the widget picks its default size.
    Unspecified,
    /// The widget may be at most `size` pixels.
    AtMost,
    /// The widget must be exactly `size` pixels.
    Exactly,
}

/// A sizing constraint from the host: a mode plus a pixel bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeasureSpec {
    /// Constraint mode.
    pub mode: MeasureMode,
    /// Pixel bound; meaningless when `mode` is `Unspecified`.
    pub size: u32,
}

impl MeasureSpec {
    /// An unconstrained spec.
    pub fn unspecified() -> Self {
        Self {
            mode: MeasureMode::Unspecified,
            size: 0,
        }
    }

    /// An upper-bounded spec.
    pub fn at_most(size: u32) -> Self {
        Self {
            mode: MeasureMode::AtMost,
            size,
        }
    }

    /// An exact spec.
    pub fn exactly(size: u32) -> Self {
        Self {
            mode: MeasureMode::Exactly,
            size,
        }
    }
}

/// Resolve a measure spec to a concrete side length in pixels.
///
/// Bounded modes take the host's bound verbatim; an unconstrained axis falls
/// back to `default_side`. The widget is square, so the caller applies the
/// resolved value to both axes.
pub fn resolve_size(spec: MeasureSpec, default_side: u32) -> u32 {
    match spec.mode {
        MeasureMode::Unspecified => default_side,
        MeasureMode::AtMost | MeasureMode::Exactly => spec.size,
    }
}

#[cfg(test)]
#[path = "../tests/unit/measure.rs"]
mod tests;
