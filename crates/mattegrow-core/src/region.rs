//! Signed pixel rectangles in the host compositor's coordinate convention.
//!
//! A [`Region`] is the unit of every bounds, request and tile negotiation in
//! the pipeline: the upstream source declares its format and data bounds as
//! regions, the filter expands them for padding, and tiles carry the region
//! they were materialized for.
//!
//! # Coordinate System
//!
//! - `x` - left edge, inclusive
//! - `y` - bottom edge, inclusive
//! - `r` - right edge, exclusive
//! - `t` - top edge, exclusive
//!
//! Coordinates are signed: a padded bounding box routinely extends below
//! zero.
//!
//! # Usage
//!
//! ```rust
//! use mattegrow_core::Region;
//!
//! let bounds = Region::new(0, 0, 1920, 1080);
//! let padded = bounds.expanded(12, 7);
//! assert_eq!(padded, Region::new(-12, -7, 1932, 1087));
//! assert!(padded.contains(-12, -7));
//! ```

/// A rectangle defined by its left, bottom, right and top edges.
///
/// `x` and `y` are inclusive, `r` and `t` are exclusive. An empty region has
/// `r <= x` or `t <= y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Region {
    /// Left edge (inclusive).
    pub x: i32,
    /// Bottom edge (inclusive).
    pub y: i32,
    /// Right edge (exclusive).
    pub r: i32,
    /// Top edge (exclusive).
    pub t: i32,
}

impl Region {
    /// Creates a region from its four edges.
    #[inline]
    pub const fn new(x: i32, y: i32, r: i32, t: i32) -> Self {
        Self { x, y, r, t }
    }

    /// Creates a region at the origin with the given dimensions.
    #[inline]
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Width in pixels (zero for empty regions).
    #[inline]
    pub const fn width(&self) -> i32 {
        if self.r > self.x { self.r - self.x } else { 0 }
    }

    /// Height in pixels (zero for empty regions).
    #[inline]
    pub const fn height(&self) -> i32 {
        if self.t > self.y { self.t - self.y } else { 0 }
    }

    /// Returns `true` if the region encloses no pixels.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.r <= self.x || self.t <= self.y
    }

    /// Number of pixels in the region.
    #[inline]
    pub const fn area(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Returns `true` if the pixel (x, y) lies inside the region.
    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.r && y >= self.y && y < self.t
    }

    /// Returns `true` if `other` lies entirely inside this region.
    #[inline]
    pub const fn contains_region(&self, other: &Region) -> bool {
        other.x >= self.x && other.r <= self.r && other.y >= self.y && other.t <= self.t
    }

    /// Grows the region by `dx` on the left/right and `dy` on the
    /// bottom/top. Negative amounts shrink it.
    #[inline]
    pub const fn expanded(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x - dx, self.y - dy, self.r + dx, self.t + dy)
    }

    /// Intersection with another region. Empty if they do not overlap.
    #[inline]
    pub fn intersect(&self, other: &Region) -> Self {
        Self::new(
            self.x.max(other.x),
            self.y.max(other.y),
            self.r.min(other.r),
            self.t.min(other.t),
        )
    }

    /// Clamps a column coordinate into `[x, r)`.
    ///
    /// Used for edge replication: samples requested outside the region map
    /// to the nearest valid column.
    #[inline]
    pub fn clamp_x(&self, x: i32) -> i32 {
        x.clamp(self.x, self.r - 1)
    }

    /// Clamps a row coordinate into `[y, t)`.
    #[inline]
    pub fn clamp_y(&self, y: i32) -> i32 {
        y.clamp(self.y, self.t - 1)
    }

    /// Iterates the row coordinates `y..t`.
    #[inline]
    pub fn rows(&self) -> std::ops::Range<i32> {
        self.y..self.t
    }

    /// Iterates the column coordinates `x..r`.
    #[inline]
    pub fn columns(&self) -> std::ops::Range<i32> {
        self.x..self.r
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.r, self.t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_dimensions() {
        let region = Region::new(-5, -3, 15, 7);
        assert_eq!(region.width(), 20);
        assert_eq!(region.height(), 10);
        assert_eq!(region.area(), 200);
        assert!(!region.is_empty());
    }

    #[test]
    fn test_region_empty() {
        assert!(Region::new(10, 0, 10, 5).is_empty());
        assert!(Region::new(0, 5, 10, 5).is_empty());
        assert_eq!(Region::new(10, 0, 5, 5).width(), 0);
    }

    #[test]
    fn test_region_contains() {
        let region = Region::new(0, 0, 10, 10);
        assert!(region.contains(0, 0));
        assert!(region.contains(9, 9));
        assert!(!region.contains(10, 9));
        assert!(!region.contains(-1, 5));
    }

    #[test]
    fn test_region_expanded() {
        let region = Region::new(0, 0, 100, 50);
        let padded = region.expanded(12, 7);
        assert_eq!(padded, Region::new(-12, -7, 112, 57));
        assert!(padded.contains_region(&region));
    }

    #[test]
    fn test_region_intersect() {
        let a = Region::new(0, 0, 10, 10);
        let b = Region::new(5, 5, 20, 20);
        assert_eq!(a.intersect(&b), Region::new(5, 5, 10, 10));

        let disjoint = Region::new(50, 50, 60, 60);
        assert!(a.intersect(&disjoint).is_empty());
    }

    #[test]
    fn test_region_clamp() {
        let region = Region::new(0, 0, 10, 10);
        assert_eq!(region.clamp_x(-5), 0);
        assert_eq!(region.clamp_x(12), 9);
        assert_eq!(region.clamp_y(3), 3);
    }
}
