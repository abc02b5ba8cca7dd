// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turns a view of the complex plane into a frame of colored pixels.
//! Every pixel is independent of every other, so the threaded render
//! just hands whole scanlines out to a pool of workers and stitches
//! the results back together in row order.

use crossbeam::thread::ScopedJoinHandle;
use image::{Rgb, RgbImage};
use itertools::iproduct;
use std::ops::Range;
use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};
use crate::escape::Fractal;
use crate::palette::Palette;
use crate::planes::{GridMapper, Pixel};

/// One rendered image: `2 * half_height + 1` rows by
/// `2 * half_width + 1` columns of RGB pixels, top row first.
pub type Frame = RgbImage;

type RowQueue = Arc<Mutex<Range<usize>>>;

/// The parameters of a render, minus the view.  The iteration budget is
/// the palette's length, so every escape time the kernel can report has
/// a color.  Clones share the palette, and one renderer serves every
/// frame of a zoom.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRenderer {
    fractal: Fractal,
    palette: Arc<Palette>,
}

impl FrameRenderer {
    /// Render `fractal` in the colors of `palette`, giving each point at
    /// most `palette.len()` steps.
    pub fn new(fractal: Fractal, palette: Palette) -> Result<Self> {
        if palette.is_empty() {
            return Err(Error::invalid("The palette must have at least one color"));
        }
        Ok(FrameRenderer {
            fractal,
            palette: Arc::new(palette),
        })
    }

    /// Which recurrence is drawn.
    pub fn fractal(&self) -> Fractal {
        self.fractal
    }

    /// The colors escape times are drawn in.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The per-point iteration budget.
    pub fn max_iterations(&self) -> usize {
        self.palette.len()
    }

    #[inline]
    fn color_at(&self, plane: &GridMapper, pixel: &Pixel) -> Rgb<u8> {
        let point = plane.pixel_to_point(pixel);
        self.palette
            .color(self.fractal.escape_time(point, self.max_iterations()))
    }

    fn render_row(&self, plane: &GridMapper, row: usize) -> Vec<Rgb<u8>> {
        (0..plane.columns())
            .map(|column| self.color_at(plane, &Pixel(column, row)))
            .collect()
    }

    /// The main function for single-threaded rendering.
    pub fn render(&self, plane: &GridMapper) -> Frame {
        let mut frame = Frame::new(plane.columns() as u32, plane.rows() as u32);
        for (row, column) in iproduct!(0..plane.rows(), 0..plane.columns()) {
            let color = self.color_at(plane, &Pixel(column, row));
            frame.put_pixel(column as u32, row as u32, color);
        }
        frame
    }

    /// A multi-threaded version of the render function that takes a
    /// thread count.  Produces exactly the same frame as `render`.
    pub fn render_threaded(
        &self,
        plane: &GridMapper,
        threads: usize,
    ) -> Result<Frame> {
        if threads <= 1 {
            return Ok(self.render(plane));
        }

        let rows: RowQueue = Arc::new(Mutex::new(0..plane.rows()));
        let scanlines = crossbeam::scope(|spawner| {
            let handles: Vec<ScopedJoinHandle<Vec<(usize, Vec<Rgb<u8>>)>>> = (0..threads)
                .map(|_| {
                    let rows = rows.clone();
                    spawner.spawn(move |_| {
                        let mut done = vec![];
                        loop {
                            // A poisoned queue means another worker died; the
                            // scope reports that, so just stop here.
                            let row = rows.lock().ok().and_then(|mut r| r.next());
                            match row {
                                Some(row) => done.push((row, self.render_row(plane, row))),
                                None => break,
                            }
                        }
                        done
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join())
                .collect::<std::result::Result<Vec<_>, _>>()
        })
        .map_err(|_| Error::Worker("a render thread panicked".to_string()))?
        .map_err(|_| Error::Worker("a render thread panicked".to_string()))?;

        let mut frame = Frame::new(plane.columns() as u32, plane.rows() as u32);
        for (row, colors) in scanlines.into_iter().flatten() {
            for (column, color) in colors.into_iter().enumerate() {
                frame.put_pixel(column as u32, row as u32, color);
            }
        }
        Ok(frame)
    }
}
