//! The upstream tiled-image collaborator contract.
//!
//! [`ImageSource`] is the seam between the filter pipeline and whatever
//! produces its input pixels: the host's tiled-image access layer in
//! production, [`BufferSource`] in tests and standalone renders.
//!
//! The protocol per request cycle:
//!
//! 1. the consumer declares intent with [`ImageSource::request`] for the
//!    padded region it will later read,
//! 2. it materializes data with [`ImageSource::fetch_row`] /
//!    [`ImageSource::fetch_tile`],
//! 3. it polls [`ImageSource::is_aborted`] cooperatively and unwinds when
//!    the host cancels the render.
//!
//! Row fetches outside the declared bounds clamp to the nearest edge (the
//! host convention for out-of-bounds sampling). Tile fetches instead shrink
//! to the overlap with the declared bounds, and the consumer is responsible
//! for replicating edges beyond the materialized extent.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::{ChannelSet, Error, FrameBuffer, Region, Result, Row, Tile};

/// Upstream image producer consumed by the filter pipeline.
///
/// Implementations must be shareable across the host's worker threads.
pub trait ImageSource: Sync {
    /// The full-frame rectangle.
    fn format(&self) -> Region;

    /// The bounds the producer declares valid data for.
    fn bounds(&self) -> Region;

    /// The channels the producer can supply.
    fn channels(&self) -> ChannelSet;

    /// Declares intent to later read `region` for `channels`.
    ///
    /// Must be called with the fully padded region before any fetch of a
    /// given request cycle. `count` is the host's access-count hint.
    fn request(&self, region: Region, channels: ChannelSet, count: usize);

    /// Materializes one scanline over columns `[x, r)`.
    ///
    /// Out-of-bounds coordinates clamp to the nearest edge sample.
    fn fetch_row(&self, y: i32, x: i32, r: i32, channels: ChannelSet) -> Result<Row>;

    /// Materializes a 2D region.
    ///
    /// The returned tile covers the intersection of `region` with the
    /// declared bounds, which may be smaller than requested.
    fn fetch_tile(&self, region: Region, channels: ChannelSet) -> Result<Tile>;

    /// Returns `true` once the host has cancelled the in-flight render.
    fn is_aborted(&self) -> bool;
}

/// In-memory [`ImageSource`] backed by a [`FrameBuffer`].
///
/// Carries an abort flag and fetch counters so tests can drive cancellation
/// and verify how often the full frame was actually read.
pub struct BufferSource {
    frame: FrameBuffer,
    aborted: AtomicBool,
    row_fetches: AtomicUsize,
    tile_fetches: AtomicUsize,
    last_request: Mutex<Option<(Region, ChannelSet, usize)>>,
}

impl BufferSource {
    /// Wraps a frame buffer as an image source.
    pub fn new(frame: FrameBuffer) -> Self {
        Self {
            frame,
            aborted: AtomicBool::new(false),
            row_fetches: AtomicUsize::new(0),
            tile_fetches: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Flags or clears the cooperative abort signal.
    pub fn set_aborted(&self, aborted: bool) {
        self.aborted.store(aborted, Ordering::SeqCst);
    }

    /// Number of `fetch_row` calls served so far.
    pub fn row_fetches(&self) -> usize {
        self.row_fetches.load(Ordering::SeqCst)
    }

    /// Number of `fetch_tile` calls served so far.
    pub fn tile_fetches(&self) -> usize {
        self.tile_fetches.load(Ordering::SeqCst)
    }

    /// The most recent `request` declaration, if any.
    pub fn last_request(&self) -> Option<(Region, ChannelSet, usize)> {
        *self.last_request.lock().unwrap()
    }

    /// The backing frame buffer.
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }
}

impl ImageSource for BufferSource {
    fn format(&self) -> Region {
        self.frame.region()
    }

    fn bounds(&self) -> Region {
        self.frame.region()
    }

    fn channels(&self) -> ChannelSet {
        self.frame.channels()
    }

    fn request(&self, region: Region, channels: ChannelSet, count: usize) {
        *self.last_request.lock().unwrap() = Some((region, channels, count));
    }

    fn fetch_row(&self, y: i32, x: i32, r: i32, channels: ChannelSet) -> Result<Row> {
        if r < x {
            return Err(Error::invalid_region(
                Region::new(x, y, r, y + 1),
                self.frame.region(),
            ));
        }
        self.row_fetches.fetch_add(1, Ordering::SeqCst);
        let mut row = Row::new(x, r);
        for channel in channels.intersect(self.frame.channels()).iter() {
            let samples = row.writable(channel);
            for (i, column) in (x..r).enumerate() {
                samples[i] = self.frame.value_clamped(channel, column, y);
            }
        }
        Ok(row)
    }

    fn fetch_tile(&self, region: Region, channels: ChannelSet) -> Result<Tile> {
        let clamped = region.intersect(&self.frame.region());
        if clamped.is_empty() {
            return Err(Error::invalid_region(region, self.frame.region()));
        }
        self.tile_fetches.fetch_add(1, Ordering::SeqCst);
        let available = channels.intersect(self.frame.channels());
        Ok(Tile::from_fn(clamped, available, |channel, x, y| {
            self.frame.value(channel, x, y)
        }))
    }

    fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Channel;

    fn ramp_source() -> BufferSource {
        let frame = FrameBuffer::from_fn(
            Region::from_size(8, 8),
            ChannelSet::rgba().with(Channel::MATTE),
            |channel, x, y| (channel.index() as i32 * 100 + y * 8 + x) as f32,
        );
        BufferSource::new(frame)
    }

    #[test]
    fn test_fetch_row_in_bounds() {
        let source = ramp_source();
        let row = source.fetch_row(2, 1, 5, ChannelSet::from(Channel::RED)).unwrap();
        assert_eq!(row.x(), 1);
        assert_eq!(row.r(), 5);
        assert_eq!(row.sample(Channel::RED, 3), 19.0);
        assert_eq!(source.row_fetches(), 1);
    }

    #[test]
    fn test_fetch_row_clamps_to_edges() {
        let source = ramp_source();
        let row = source.fetch_row(0, -3, 11, ChannelSet::from(Channel::RED)).unwrap();
        // Left of the frame replicates column 0, right replicates column 7
        assert_eq!(row.sample(Channel::RED, -3), 0.0);
        assert_eq!(row.sample(Channel::RED, 10), 7.0);
    }

    #[test]
    fn test_fetch_row_skips_absent_channels() {
        let source = ramp_source();
        let row = source
            .fetch_row(0, 0, 4, ChannelSet::from(Channel::DEPTH))
            .unwrap();
        assert!(row.channels().is_empty());
        assert_eq!(row.sample(Channel::DEPTH, 0), 0.0);
    }

    #[test]
    fn test_fetch_tile_shrinks_to_bounds() {
        let source = ramp_source();
        let tile = source
            .fetch_tile(Region::new(-4, 2, 5, 20), ChannelSet::from(Channel::MATTE))
            .unwrap();
        assert_eq!(tile.region(), Region::new(0, 2, 5, 8));
        assert_eq!(tile.value(Channel::MATTE, 0, 2), 516.0);
    }

    #[test]
    fn test_fetch_tile_disjoint_is_error() {
        let source = ramp_source();
        let result = source.fetch_tile(Region::new(100, 100, 110, 110), ChannelSet::rgba());
        assert!(matches!(result, Err(Error::InvalidRegion { .. })));
    }

    #[test]
    fn test_abort_flag() {
        let source = ramp_source();
        assert!(!source.is_aborted());
        source.set_aborted(true);
        assert!(source.is_aborted());
        source.set_aborted(false);
        assert!(!source.is_aborted());
    }

    #[test]
    fn test_request_is_recorded() {
        let source = ramp_source();
        assert!(source.last_request().is_none());
        source.request(Region::new(-2, -2, 10, 10), ChannelSet::rgba(), 3);
        let (region, channels, count) = source.last_request().unwrap();
        assert_eq!(region, Region::new(-2, -2, 10, 10));
        assert_eq!(channels, ChannelSet::rgba());
        assert_eq!(count, 3);
    }
}
