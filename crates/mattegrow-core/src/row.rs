//! Per-channel scanline storage.
//!
//! A [`Row`] holds one scanline's worth of `f32` samples for a set of
//! channels over the column range `[x, r)`. It is the unit of work the
//! filter pipeline produces and the unit the upstream source materializes
//! with `fetch_row`.
//!
//! Samples are addressed by absolute column coordinate, matching the host
//! convention, so code that walks a row looks the same regardless of where
//! the row starts. Channel planes materialize lazily on first write;
//! sampling an absent channel yields 0.0 (the "black" plane).
//!
//! # Usage
//!
//! ```rust
//! use mattegrow_core::{Channel, Row};
//!
//! let mut row = Row::new(-4, 12);
//! row.writable(Channel::RED)[0] = 1.0; // column -4
//! assert_eq!(row.sample(Channel::RED, -4), 1.0);
//! assert_eq!(row.sample(Channel::BLUE, 0), 0.0); // absent plane
//! ```

use crate::{Channel, ChannelSet};

/// One scanline of per-channel samples over `[x, r)`.
#[derive(Debug, Clone)]
pub struct Row {
    x: i32,
    r: i32,
    planes: Vec<Option<Vec<f32>>>,
}

impl Row {
    /// Creates an empty row covering columns `[x, r)`.
    ///
    /// # Panics
    ///
    /// Panics if `r < x`.
    pub fn new(x: i32, r: i32) -> Self {
        assert!(r >= x, "row right edge before left edge");
        Self {
            x,
            r,
            planes: vec![None; Channel::MAX_CHANNELS as usize],
        }
    }

    /// Left column (inclusive).
    #[inline]
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Right column (exclusive).
    #[inline]
    pub fn r(&self) -> i32 {
        self.r
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        (self.r - self.x) as usize
    }

    /// The channels that have been materialized in this row.
    pub fn channels(&self) -> ChannelSet {
        self.planes
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_some())
            .map(|(i, _)| Channel::new(i as u8))
            .collect()
    }

    /// Mutable access to a channel's samples, materializing the plane
    /// (zero-filled) if needed. Index 0 is column `x`.
    pub fn writable(&mut self, channel: Channel) -> &mut [f32] {
        let width = self.width();
        self.planes[channel.index()]
            .get_or_insert_with(|| vec![0.0; width])
            .as_mut_slice()
    }

    /// The samples of a channel, or `None` if the plane is absent.
    /// Index 0 is column `x`.
    #[inline]
    pub fn values(&self, channel: Channel) -> Option<&[f32]> {
        self.planes[channel.index()].as_deref()
    }

    /// Sample at absolute column `x`. Returns 0.0 for absent channels.
    ///
    /// # Panics
    ///
    /// Panics if `x` is outside `[self.x(), self.r())`.
    #[inline]
    pub fn sample(&self, channel: Channel, x: i32) -> f32 {
        debug_assert!(x >= self.x && x < self.r, "column {} out of row range", x);
        match &self.planes[channel.index()] {
            Some(plane) => plane[(x - self.x) as usize],
            None => 0.0,
        }
    }

    /// Copies the overlap of `src`'s channel plane into this row.
    ///
    /// Columns of this row outside `src`'s range are left untouched; absent
    /// source planes copy as zeros.
    pub fn copy_channel(&mut self, channel: Channel, src: &Row) {
        let lo = self.x.max(src.x);
        let hi = self.r.min(src.r);
        if lo >= hi {
            return;
        }
        let offset = self.x;
        let dst = self.writable(channel);
        for x in lo..hi {
            dst[(x - offset) as usize] = src.sample(channel, x);
        }
    }
}
