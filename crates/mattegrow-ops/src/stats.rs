//! Lazily computed per-frame driver statistics.
//!
//! The filter's padding depends on the maximum absolute value of the driver
//! channel over the whole input frame. Scanning the frame is expensive, so
//! the value is computed once per opened frame, on first use, and shared by
//! every worker thread that produces output rows afterwards.
//!
//! The cache is a check-compute-store sequence under one mutex: the first
//! caller scans while any concurrent caller blocks on the lock, rechecks,
//! and reads the stored value. Reopening the input bumps an epoch counter
//! instead of clearing the cache in place, so invalidation never has to
//! wait for a scan that is still running.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use mattegrow_core::{Channel, ChannelSet, ImageSource};
use tracing::{debug, trace};

use crate::{FilterError, FilterResult};

#[derive(Default)]
struct State {
    /// Epoch the cached value was computed for, `None` before any scan.
    computed_for: Option<u64>,
    max_abs: f32,
}

/// Per-frame cache of the driver channel's maximum absolute value.
#[derive(Default)]
pub struct DriverStats {
    epoch: AtomicU64,
    state: Mutex<State>,
}

impl DriverStats {
    /// Creates a cache in the "unknown" state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the cached value stale. Called when the input is reopened.
    ///
    /// Does not take the statistics lock, so a reopen never blocks behind
    /// an in-flight scan; that scan's result is simply discarded by the
    /// epoch mismatch on the next lookup.
    pub fn invalidate(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
    }

    /// The last value a scan produced, possibly stale, 0.0 before any scan.
    ///
    /// Bounds validation consumes this without forcing a scan: it runs
    /// before any pixel pass and uses whatever the previous frame left
    /// behind, exactly like the host recomputes bounds from cached state.
    pub fn cached(&self) -> f32 {
        self.state.lock().unwrap().max_abs
    }

    /// Returns `true` if the cached value is current for this frame.
    pub fn is_computed(&self) -> bool {
        let epoch = self.epoch.load(Ordering::SeqCst);
        self.state.lock().unwrap().computed_for == Some(epoch)
    }

    /// The maximum absolute driver value for the current frame.
    ///
    /// Scans the full frame on first use per epoch; every later call
    /// returns the cached value without touching the source. An abort
    /// mid-scan leaves the cache unmarked so the next call retries.
    pub fn max_abs(
        &self,
        source: &dyn ImageSource,
        driver: Option<Channel>,
    ) -> FilterResult<f32> {
        let epoch = self.epoch.load(Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        if state.computed_for == Some(epoch) {
            return Ok(state.max_abs);
        }
        let max_abs = scan(source, driver)?;
        state.max_abs = max_abs;
        state.computed_for = Some(epoch);
        Ok(max_abs)
    }
}

/// Full-frame scan of the driver plane.
///
/// A missing or unselected driver is a constant zero: no scan, no
/// modulation, and the filter degenerates to a fixed-size box filter.
fn scan(source: &dyn ImageSource, driver: Option<Channel>) -> FilterResult<f32> {
    let Some(channel) = driver else {
        return Ok(0.0);
    };
    if !source.channels().contains(channel) {
        return Ok(0.0);
    }

    let format = source.format();
    let mut max_abs = 0.0f32;
    for y in format.rows() {
        if source.is_aborted() {
            trace!(y, "driver scan aborted");
            return Err(FilterError::Aborted);
        }
        let row = source.fetch_row(y, format.x, format.r, ChannelSet::from(channel))?;
        if let Some(samples) = row.values(channel) {
            for &v in samples {
                max_abs = max_abs.max(v.abs());
            }
        }
    }
    debug!(%channel, max_abs, "driver scan complete");
    Ok(max_abs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mattegrow_core::{BufferSource, FrameBuffer, Region};

    fn matte_source(peak: f32) -> BufferSource {
        let frame = FrameBuffer::from_fn(
            Region::from_size(8, 8),
            ChannelSet::rgba().with(Channel::MATTE),
            move |channel, x, y| {
                if channel == Channel::MATTE && x == 3 && y == 5 {
                    peak
                } else if channel == Channel::MATTE {
                    0.25
                } else {
                    1.0
                }
            },
        );
        BufferSource::new(frame)
    }

    #[test]
    fn test_scan_finds_max_abs() {
        let source = matte_source(-0.9);
        let stats = DriverStats::new();
        let value = stats.max_abs(&source, Some(Channel::MATTE)).unwrap();
        assert_eq!(value, 0.9);
    }

    #[test]
    fn test_scan_is_idempotent() {
        let source = matte_source(0.5);
        let stats = DriverStats::new();

        stats.max_abs(&source, Some(Channel::MATTE)).unwrap();
        let fetches_after_first = source.row_fetches();
        assert_eq!(fetches_after_first, 8);

        let value = stats.max_abs(&source, Some(Channel::MATTE)).unwrap();
        assert_eq!(value, 0.5);
        assert_eq!(source.row_fetches(), fetches_after_first);
    }

    #[test]
    fn test_invalidate_forces_rescan() {
        let source = matte_source(0.5);
        let stats = DriverStats::new();

        stats.max_abs(&source, Some(Channel::MATTE)).unwrap();
        assert!(stats.is_computed());

        stats.invalidate();
        assert!(!stats.is_computed());
        // Stale value still readable for bounds validation
        assert_eq!(stats.cached(), 0.5);

        stats.max_abs(&source, Some(Channel::MATTE)).unwrap();
        assert_eq!(source.row_fetches(), 16);
    }

    #[test]
    fn test_no_driver_is_zero_without_scanning() {
        let source = matte_source(0.5);
        let stats = DriverStats::new();
        assert_eq!(stats.max_abs(&source, None).unwrap(), 0.0);
        assert_eq!(source.row_fetches(), 0);
    }

    #[test]
    fn test_absent_channel_is_zero_without_scanning() {
        let frame = FrameBuffer::new(Region::from_size(4, 4), ChannelSet::rgba());
        let source = BufferSource::new(frame);
        let stats = DriverStats::new();
        assert_eq!(stats.max_abs(&source, Some(Channel::MATTE)).unwrap(), 0.0);
        assert_eq!(source.row_fetches(), 0);
    }

    #[test]
    fn test_abort_leaves_cache_unmarked() {
        let source = matte_source(0.5);
        let stats = DriverStats::new();

        source.set_aborted(true);
        let err = stats.max_abs(&source, Some(Channel::MATTE)).unwrap_err();
        assert!(err.is_aborted());
        assert!(!stats.is_computed());

        // Retry after the abort clears succeeds and caches
        source.set_aborted(false);
        assert_eq!(stats.max_abs(&source, Some(Channel::MATTE)).unwrap(), 0.5);
        assert!(stats.is_computed());
    }
}
