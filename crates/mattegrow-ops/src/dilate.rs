//! The mask-driven dilate/erode pipeline.
//!
//! [`DrivenDilate`] implements a separable box min/max filter as two
//! passes: a vertical pass that reduces a per-pixel window of rows from a
//! padded input tile, and a horizontal pass that reduces a per-pixel window
//! of columns from the vertical pass's output row. The window half-width at
//! every pixel is `radius * driver`, where `driver` is that pixel's value
//! in the configured driver channel.
//!
//! The host scheduler invokes [`DrivenDilate::produce_row`] once per output
//! scanline, from many threads at once. The only shared state is the
//! per-frame driver statistic (see [`crate::stats`]); the passes themselves
//! are pure functions of their inputs.
//!
//! Window bounds derived from per-pixel driver values are always clamped to
//! the materialized extent of the tile or intermediate row before indexing,
//! so a driver value above the frame's scanned maximum can never reach
//! outside the data that was actually fetched.

use mattegrow_core::{ChannelSet, ImageSource, Region, Row};
use tracing::trace;

use crate::config::DilateConfig;
use crate::stats::DriverStats;
use crate::{FilterError, FilterResult};

/// Declared output bounds and channel ownership, recomputed by
/// [`DrivenDilate::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterInfo {
    /// The region the filter claims to produce valid output for.
    pub bounds: Region,
    /// The channels the filter claims to produce.
    pub channels: ChannelSet,
}

/// Mask-driven morphological dilate/erode filter.
///
/// Maximum (or minimum) of a rectangular area around each pixel, with the
/// area scaled per pixel by the driver channel. Grows or shrinks mattes by
/// a locally controlled amount.
pub struct DrivenDilate {
    config: DilateConfig,
    stats: DriverStats,
}

impl DrivenDilate {
    /// Creates a filter with the given configuration and unknown frame
    /// statistics.
    pub fn new(config: DilateConfig) -> Self {
        Self {
            config,
            stats: DriverStats::new(),
        }
    }

    /// The filter's configuration.
    pub fn config(&self) -> &DilateConfig {
        &self.config
    }

    /// The per-frame statistics cache.
    pub fn stats(&self) -> &DriverStats {
        &self.stats
    }

    /// Resets the per-frame statistics to "unknown".
    ///
    /// Must be called whenever the upstream input is reopened or
    /// reconnected; the next `produce_row` rescans the frame.
    pub fn reopen(&self) {
        self.stats.invalidate();
    }

    /// Output/request pads for the current statistic: (horizontal,
    /// vertical).
    fn pads(&self, max_abs: f32) -> (i32, i32) {
        let adjust = self.config.bbox_adjust;
        (
            self.config.horizontal().pad(adjust, max_abs),
            self.config.vertical().pad(adjust, max_abs),
        )
    }

    /// Recomputes the declared output bounds and channel set.
    ///
    /// Consumes the cached frame statistic without forcing a scan: before
    /// the first `produce_row` of a frame the pads fall back to the base
    /// radii (a zero statistic), matching how the host validates before any
    /// pixels exist.
    pub fn validate(&self, source: &dyn ImageSource) -> FilterInfo {
        let (h_pad, v_pad) = self.pads(self.stats.cached());
        let identity =
            self.config.horizontal().is_identity() && self.config.vertical().is_identity();
        FilterInfo {
            bounds: source.bounds().expanded(h_pad, v_pad),
            channels: if identity {
                ChannelSet::none()
            } else {
                ChannelSet::all()
            },
        }
    }

    /// Propagates a padded request upstream.
    ///
    /// Expands the requested region by the same pads `validate` declares
    /// and adds the driver channel to the requested set.
    pub fn request(
        &self,
        source: &dyn ImageSource,
        region: Region,
        channels: ChannelSet,
        count: usize,
    ) {
        let (h_pad, v_pad) = self.pads(self.stats.cached());
        let mut channels = channels;
        if let Some(driver) = self.config.driver {
            channels.insert(driver);
        }
        source.request(region.expanded(h_pad, v_pad), channels, count);
    }

    /// Produces one output scanline over columns `[x, r)`.
    ///
    /// This is the entry point the host scheduler parallelizes over. It
    /// triggers the (idempotent) frame statistics scan, runs the vertical
    /// pass over a horizontally expanded range, then reduces per-pixel
    /// column windows of the intermediate row.
    pub fn produce_row(
        &self,
        source: &dyn ImageSource,
        y: i32,
        x: i32,
        r: i32,
        channels: ChannelSet,
    ) -> FilterResult<Row> {
        let max_abs = self.stats.max_abs(source, self.config.driver)?;
        if source.is_aborted() {
            return Err(FilterError::Aborted);
        }
        trace!(y, x, r, max_abs, "produce row");

        let h = self.config.horizontal();
        if h.is_identity() {
            return self.vertical_pass(source, y, x, r, channels, max_abs);
        }

        // Expand the column range so every per-pixel window of the
        // horizontal reduction stays inside the intermediate row.
        let pad = self.config.bbox_adjust + (h.radius as f32 * max_abs).round() as i32;
        let bounds = source.bounds();
        let rm = (x - pad).max(bounds.x).min(x);
        let rx = (r + pad).min(bounds.r).max(r);

        let mut mid_channels = channels;
        if let Some(driver) = self.config.driver {
            mid_channels.insert(driver);
        }
        let mid = self.vertical_pass(source, y, rm, rx, mid_channels, max_abs)?;
        if source.is_aborted() {
            return Err(FilterError::Aborted);
        }

        let driver = self
            .config
            .driver
            .filter(|d| mid.channels().contains(*d));

        let mut out = Row::new(x, r);
        for z in channels.iter() {
            if Some(z) == self.config.driver {
                // The driver plane itself is not filtered.
                out.copy_channel(z, &mid);
                continue;
            }
            let samples = out.writable(z);
            for column in x..r {
                let driver_value = match driver {
                    Some(d) => mid.sample(d, column),
                    None => 0.0,
                };
                let half = h.window_half(driver_value);
                let np = (column - half).max(mid.x());
                let pp = (column + half).min(mid.r());
                let mut acc = mid.sample(z, column);
                for cx in np..pp {
                    acc = h.mode.reduce(acc, mid.sample(z, cx));
                }
                samples[(column - x) as usize] = acc;
            }
        }
        Ok(out)
    }

    /// The vertical pass: reduces per-pixel windows of rows from a padded
    /// input tile into one row.
    ///
    /// With a zero vertical radius this is a plain row fetch. Columns of
    /// `[x, r)` beyond the materialized tile's extent replicate the nearest
    /// valid edge column.
    pub(crate) fn vertical_pass(
        &self,
        source: &dyn ImageSource,
        y: i32,
        x: i32,
        r: i32,
        channels: ChannelSet,
        max_abs: f32,
    ) -> FilterResult<Row> {
        let v = self.config.vertical();
        let mut fetch_channels = channels;
        if let Some(driver) = self.config.driver {
            fetch_channels.insert(driver);
        }
        if v.is_identity() {
            return Ok(source.fetch_row(y, x, r, fetch_channels)?);
        }

        let bounds = source.bounds();
        if bounds.is_empty() {
            return Ok(Row::new(x, r));
        }

        // Tile rows sized by the frame maximum, clamped into the input.
        let half_max = v.window_half(max_abs).abs();
        let tile_region = Region::new(
            x.clamp(bounds.x, bounds.r - 1),
            (y - half_max).clamp(bounds.y, bounds.t - 1),
            r.clamp(bounds.x + 1, bounds.r),
            (y + half_max + 1).clamp(bounds.y + 1, bounds.t),
        );
        let tile = source.fetch_tile(tile_region, fetch_channels)?;
        if source.is_aborted() {
            return Err(FilterError::Aborted);
        }

        let driver = self
            .config
            .driver
            .filter(|d| tile.channels().contains(*d));
        // The scanline this row is produced for, pinned into the tile for
        // seeds and driver reads when y lies in the padded margin.
        let ys = y.clamp(tile.y(), tile.t() - 1);

        let mut out = Row::new(x, r);
        for z in channels.iter() {
            let samples = out.writable(z);
            for column in x..r {
                // Columns outside the materialized tile replicate the
                // nearest valid edge column.
                let tc = column.clamp(tile.x(), tile.r() - 1);

                if Some(z) == self.config.driver {
                    samples[(column - x) as usize] = tile.value(z, tc, ys);
                    continue;
                }
                let driver_value = match driver {
                    Some(d) => tile.value(d, tc, ys),
                    None => 0.0,
                };
                let half = v.window_half(driver_value);
                let start = (y - half).max(tile.y());
                let end = (y + half).min(tile.t());
                let mut acc = tile.value(z, tc, ys);
                for row in start..end {
                    acc = v.mode.reduce(acc, tile.value(z, tc, row));
                }
                samples[(column - x) as usize] = acc;
            }
        }
        Ok(out)
    }
}
