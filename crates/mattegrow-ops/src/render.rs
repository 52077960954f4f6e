//! Whole-frame render driver.
//!
//! The host dispatches `produce_row` per scanline from its own worker
//! pool; this module stands in for that scheduler when the filter is used
//! standalone: every output row of the requested region is an independent
//! task, fanned out with rayon and collected into a [`FrameBuffer`]. The
//! rows synchronize only through the shared statistics cache, so the first
//! row to run performs the frame scan and the rest reuse it.

use mattegrow_core::{ChannelSet, FrameBuffer, ImageSource, Region, Row};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::FilterResult;
use crate::dilate::DrivenDilate;

impl DrivenDilate {
    /// Renders every scanline of `region` into a frame buffer.
    ///
    /// Rows are produced in parallel when the `parallel` feature is
    /// enabled (the default); the first abort or source error wins.
    pub fn render(
        &self,
        source: &dyn ImageSource,
        region: Region,
        channels: ChannelSet,
    ) -> FilterResult<FrameBuffer> {
        let rows = self.render_rows(source, region, channels)?;
        let mut out = FrameBuffer::new(region, ChannelSet::none());
        for (y, row) in region.rows().zip(rows) {
            out.write_row(y, &row);
        }
        Ok(out)
    }

    #[cfg(feature = "parallel")]
    fn render_rows(
        &self,
        source: &dyn ImageSource,
        region: Region,
        channels: ChannelSet,
    ) -> FilterResult<Vec<Row>> {
        region
            .rows()
            .into_par_iter()
            .map(|y| self.produce_row(source, y, region.x, region.r, channels))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn render_rows(
        &self,
        source: &dyn ImageSource,
        region: Region,
        channels: ChannelSet,
    ) -> FilterResult<Vec<Row>> {
        region
            .rows()
            .map(|y| self.produce_row(source, y, region.x, region.r, channels))
            .collect()
    }
}
