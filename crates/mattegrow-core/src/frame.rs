//! Owned planar pixel storage.
//!
//! A [`FrameBuffer`] owns per-channel `f32` planes over a [`Region`]. It
//! backs the in-memory [`BufferSource`](crate::BufferSource) on the input
//! side and collects rendered rows on the output side.
//!
//! Storage is planar (one contiguous buffer per channel, row-major within
//! the plane) because the filter pipeline walks one channel at a time.

use crate::{Channel, ChannelSet, Region, Row};

/// Owned per-channel pixel planes over a region.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    region: Region,
    channels: ChannelSet,
    planes: Vec<Option<Vec<f32>>>,
}

impl FrameBuffer {
    /// Creates a zero-filled buffer for the given region and channels.
    pub fn new(region: Region, channels: ChannelSet) -> Self {
        let size = region.area();
        let mut planes = vec![None; Channel::MAX_CHANNELS as usize];
        for channel in channels.iter() {
            planes[channel.index()] = Some(vec![0.0; size]);
        }
        Self {
            region,
            channels,
            planes,
        }
    }

    /// Creates a buffer by sampling `f(channel, x, y)` over the region.
    pub fn from_fn<F>(region: Region, channels: ChannelSet, f: F) -> Self
    where
        F: Fn(Channel, i32, i32) -> f32,
    {
        let mut buffer = Self::new(region, channels);
        for channel in channels.iter() {
            for y in region.rows() {
                for x in region.columns() {
                    buffer.set(channel, x, y, f(channel, x, y));
                }
            }
        }
        buffer
    }

    /// The region this buffer covers.
    #[inline]
    pub fn region(&self) -> Region {
        self.region
    }

    /// The channels this buffer stores.
    #[inline]
    pub fn channels(&self) -> ChannelSet {
        self.channels
    }

    #[inline]
    fn offset(&self, x: i32, y: i32) -> usize {
        let row = (y - self.region.y) as usize;
        let col = (x - self.region.x) as usize;
        row * self.region.width() as usize + col
    }

    /// Sample at absolute coordinates. Returns 0.0 for absent channels.
    ///
    /// # Panics
    ///
    /// Panics if (x, y) lies outside the buffer's region.
    #[inline]
    pub fn value(&self, channel: Channel, x: i32, y: i32) -> f32 {
        debug_assert!(
            self.region.contains(x, y),
            "sample ({}, {}) outside frame {}",
            x,
            y,
            self.region
        );
        match &self.planes[channel.index()] {
            Some(plane) => plane[self.offset(x, y)],
            None => 0.0,
        }
    }

    /// Sample with coordinates clamped into the region (edge replication).
    ///
    /// Returns 0.0 if the region is empty or the channel absent.
    #[inline]
    pub fn value_clamped(&self, channel: Channel, x: i32, y: i32) -> f32 {
        if self.region.is_empty() {
            return 0.0;
        }
        self.value(channel, self.region.clamp_x(x), self.region.clamp_y(y))
    }

    /// Writes a sample, materializing the channel plane if needed.
    ///
    /// # Panics
    ///
    /// Panics if (x, y) lies outside the buffer's region.
    pub fn set(&mut self, channel: Channel, x: i32, y: i32, value: f32) {
        debug_assert!(
            self.region.contains(x, y),
            "write ({}, {}) outside frame {}",
            x,
            y,
            self.region
        );
        let offset = self.offset(x, y);
        let size = self.region.area();
        self.channels.insert(channel);
        let plane = self.planes[channel.index()].get_or_insert_with(|| vec![0.0; size]);
        plane[offset] = value;
    }

    /// Copies a produced row into the buffer at scanline `y`.
    ///
    /// Only the overlap of the row's columns with the buffer's columns is
    /// written, for every channel the row materialized.
    pub fn write_row(&mut self, y: i32, row: &Row) {
        if y < self.region.y || y >= self.region.t {
            return;
        }
        let lo = self.region.x.max(row.x());
        let hi = self.region.r.min(row.r());
        for channel in row.channels().iter() {
            for x in lo..hi {
                self.set(channel, x, y, row.sample(channel, x));
            }
        }
    }
}
