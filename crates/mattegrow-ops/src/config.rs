//! Filter configuration.
//!
//! The filter takes one signed size per axis, following the host's knob
//! convention: the magnitude rounds to the window radius in pixels, the
//! sign selects the reduction — negative erodes (minimum), positive
//! dilates (maximum). `bbox_adjust` widens the output bounding box and the
//! upstream request by a uniform extra margin, and `driver` names the plane
//! that locally scales the window.

use mattegrow_core::Channel;

/// Whether the box window reduces by minimum (erode) or maximum (dilate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Take the minimum over the window (shrinks mattes).
    Min,
    /// Take the maximum over the window (grows mattes).
    Max,
}

impl FilterMode {
    /// Folds one sample into the accumulator.
    #[inline]
    pub fn reduce(self, acc: f32, value: f32) -> f32 {
        match self {
            FilterMode::Min => acc.min(value),
            FilterMode::Max => acc.max(value),
        }
    }
}

/// Derived window parameters for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Axis {
    /// Base window radius in pixels.
    pub radius: i32,
    /// Reduction mode for this axis.
    pub mode: FilterMode,
}

impl Axis {
    /// Decodes a signed size knob value: `radius = round(|size|)`,
    /// `mode = Min` if the size is negative.
    pub fn from_size(size: f32) -> Self {
        Self {
            radius: (size.abs() + 0.5) as i32,
            mode: if size < 0.0 {
                FilterMode::Min
            } else {
                FilterMode::Max
            },
        }
    }

    /// Returns `true` if this axis performs no windowing at all.
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.radius == 0
    }

    /// Half-width of the window at a pixel whose driver value is `driver`.
    ///
    /// Truncates toward zero; a negative driver yields an empty window.
    #[inline]
    pub fn window_half(&self, driver: f32) -> i32 {
        (self.radius as f32 * driver) as i32
    }

    /// Output/request padding for this axis.
    ///
    /// The driver value is used as a raw multiplier, so the effective
    /// radius can exceed the base radius when the driver exceeds 1; the pad
    /// covers the larger of the two so no window escapes the requested
    /// region.
    #[inline]
    pub fn pad(&self, bbox_adjust: i32, max_abs: f32) -> i32 {
        bbox_adjust + self.radius.max((self.radius as f32 * max_abs).round() as i32)
    }
}

/// Immutable-per-invocation filter configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DilateConfig {
    /// Signed horizontal size: magnitude is the radius, sign < 0 erodes.
    pub horizontal_size: f32,
    /// Signed vertical size: magnitude is the radius, sign < 0 erodes.
    pub vertical_size: f32,
    /// Extra uniform output/request padding in pixels.
    pub bbox_adjust: i32,
    /// The plane that locally scales the window. `None` means no
    /// modulation: the driver reads as a constant zero everywhere.
    pub driver: Option<Channel>,
}

impl Default for DilateConfig {
    fn default() -> Self {
        Self {
            horizontal_size: 0.0,
            vertical_size: 0.0,
            bbox_adjust: 0,
            driver: None,
        }
    }
}

impl DilateConfig {
    /// Derived horizontal window parameters.
    #[inline]
    pub fn horizontal(&self) -> Axis {
        Axis::from_size(self.horizontal_size)
    }

    /// Derived vertical window parameters.
    #[inline]
    pub fn vertical(&self) -> Axis {
        Axis::from_size(self.vertical_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_from_size_rounds_magnitude() {
        assert_eq!(Axis::from_size(10.0).radius, 10);
        assert_eq!(Axis::from_size(4.4).radius, 4);
        assert_eq!(Axis::from_size(4.6).radius, 5);
        assert_eq!(Axis::from_size(-4.6).radius, 5);
        assert_eq!(Axis::from_size(0.0).radius, 0);
    }

    #[test]
    fn test_axis_mode_from_sign() {
        assert_eq!(Axis::from_size(3.0).mode, FilterMode::Max);
        assert_eq!(Axis::from_size(-3.0).mode, FilterMode::Min);
        assert_eq!(Axis::from_size(0.0).mode, FilterMode::Max);
    }

    #[test]
    fn test_window_half_truncates() {
        let axis = Axis::from_size(5.0);
        assert_eq!(axis.window_half(0.5), 2);
        assert_eq!(axis.window_half(1.0), 5);
        assert_eq!(axis.window_half(0.0), 0);
        // Negative drivers collapse the window
        assert_eq!(axis.window_half(-0.5), -2);
    }

    #[test]
    fn test_pad_covers_raw_and_scaled_radius() {
        // h_size=10, v_size=-5, bbox_adjust=2, max_abs=0.5:
        // left/right = 2 + max(10, 5) = 12, bottom/top = 2 + max(5, 3) = 7
        let h = Axis::from_size(10.0);
        let v = Axis::from_size(-5.0);
        assert_eq!(h.pad(2, 0.5), 12);
        assert_eq!(v.pad(2, 0.5), 7);

        // Drivers above 1 widen the pad past the base radius
        assert_eq!(h.pad(0, 2.0), 20);
    }

    #[test]
    fn test_reduce() {
        assert_eq!(FilterMode::Min.reduce(0.5, 0.2), 0.2);
        assert_eq!(FilterMode::Min.reduce(0.5, 0.8), 0.5);
        assert_eq!(FilterMode::Max.reduce(0.5, 0.8), 0.8);
        assert_eq!(FilterMode::Max.reduce(0.5, 0.2), 0.5);
    }
}
