//! Read-only 2D views of pixel data.
//!
//! A [`Tile`] is a materialized rectangular view over a [`Region`] for a
//! set of channels, indexed by absolute pixel coordinates. The vertical
//! pass of the filter works on tiles: it asks the upstream source for a
//! vertically padded tile and reduces windows of rows inside it.
//!
//! Tiles are immutable once built. Producers construct them with
//! [`Tile::from_fn`], sampling whatever storage backs the source.
//!
//! # Usage
//!
//! ```rust
//! use mattegrow_core::{Channel, ChannelSet, Region, Tile};
//!
//! let region = Region::new(0, 0, 4, 4);
//! let tile = Tile::from_fn(region, ChannelSet::from(Channel::RED), |_, x, y| {
//!     (x + y) as f32
//! });
//! assert_eq!(tile.value(Channel::RED, 3, 1), 4.0);
//! ```

use crate::{Channel, ChannelSet, Region};

/// A materialized, read-only rectangular view of per-channel samples.
#[derive(Debug, Clone)]
pub struct Tile {
    region: Region,
    channels: ChannelSet,
    planes: Vec<Option<Vec<f32>>>,
}

impl Tile {
    /// Builds a tile over `region` by sampling `f(channel, x, y)` for every
    /// channel in `channels` and every pixel of the region.
    pub fn from_fn<F>(region: Region, channels: ChannelSet, f: F) -> Self
    where
        F: Fn(Channel, i32, i32) -> f32,
    {
        let width = region.width() as usize;
        let height = region.height() as usize;
        let mut planes = vec![None; Channel::MAX_CHANNELS as usize];
        for channel in channels.iter() {
            let mut plane = Vec::with_capacity(width * height);
            for y in region.rows() {
                for x in region.columns() {
                    plane.push(f(channel, x, y));
                }
            }
            planes[channel.index()] = Some(plane);
        }
        Self {
            region,
            channels,
            planes,
        }
    }

    /// The region this tile covers.
    #[inline]
    pub fn region(&self) -> Region {
        self.region
    }

    /// Left column (inclusive).
    #[inline]
    pub fn x(&self) -> i32 {
        self.region.x
    }

    /// Bottom row (inclusive).
    #[inline]
    pub fn y(&self) -> i32 {
        self.region.y
    }

    /// Right column (exclusive).
    #[inline]
    pub fn r(&self) -> i32 {
        self.region.r
    }

    /// Top row (exclusive).
    #[inline]
    pub fn t(&self) -> i32 {
        self.region.t
    }

    /// The channels this tile carries.
    #[inline]
    pub fn channels(&self) -> ChannelSet {
        self.channels
    }

    /// Sample at absolute coordinates. Returns 0.0 for absent channels.
    ///
    /// # Panics
    ///
    /// Panics if (x, y) lies outside the tile's region.
    #[inline]
    pub fn value(&self, channel: Channel, x: i32, y: i32) -> f32 {
        debug_assert!(
            self.region.contains(x, y),
            "sample ({}, {}) outside tile {}",
            x,
            y,
            self.region
        );
        match &self.planes[channel.index()] {
            Some(plane) => {
                let row = (y - self.region.y) as usize;
                let col = (x - self.region.x) as usize;
                plane[row * self.region.width() as usize + col]
            }
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_from_fn_layout() {
        let region = Region::new(-2, -1, 3, 2);
        let tile = Tile::from_fn(region, ChannelSet::from(Channel::GREEN), |_, x, y| {
            (10 * y + x) as f32
        });
        assert_eq!(tile.value(Channel::GREEN, -2, -1), -12.0);
        assert_eq!(tile.value(Channel::GREEN, 2, 1), 12.0);
        assert_eq!(tile.value(Channel::GREEN, 0, 0), 0.0);
    }

    #[test]
    fn test_tile_absent_channel_is_black() {
        let tile = Tile::from_fn(
            Region::from_size(2, 2),
            ChannelSet::from(Channel::RED),
            |_, _, _| 1.0,
        );
        assert_eq!(tile.value(Channel::MATTE, 0, 0), 0.0);
        assert!(!tile.channels().contains(Channel::MATTE));
    }

    #[test]
    fn test_tile_bounds_accessors() {
        let tile = Tile::from_fn(Region::new(1, 2, 5, 9), ChannelSet::none(), |_, _, _| 0.0);
        assert_eq!(tile.x(), 1);
        assert_eq!(tile.y(), 2);
        assert_eq!(tile.r(), 5);
        assert_eq!(tile.t(), 9);
    }
}
