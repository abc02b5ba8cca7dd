// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the GridMapper struct, which describes a relationship
//! between the pixels of an output raster and a regularly spaced grid
//! of sample points on the complex plane.  The raster is centered on a
//! point of the complex plane and extends a whole number of pixels in
//! each direction from it; neighbouring pixels are `step` apart.
use itertools::iproduct;
use num::Complex;

use crate::error::{Error, Result};

/// Describes the column (left) and row (top) of a pixel in the raster.
/// Row 0 is the top scanline, column 0 the leftmost.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps raster pixels onto the complex plane.  The raster is
/// `2 * half_width + 1` pixels wide and `2 * half_height + 1` pixels
/// tall, so the center of the view always falls on a pixel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridMapper {
    /// The point under the middle pixel.
    pub center: Complex<f64>,
    /// Pixels to the left (and to the right) of the center column.
    pub half_width: usize,
    /// Pixels above (and below) the center row.
    pub half_height: usize,
    /// Distance on the complex plane between neighbouring pixels.
    pub step: f64,
}

impl GridMapper {
    /// Constructor.  Rejects a non-finite center, a step that is not a
    /// positive finite number, and a raster too large to encode.
    pub fn new(
        center: Complex<f64>,
        half_width: usize,
        half_height: usize,
        step: f64,
    ) -> Result<GridMapper> {
        if !(center.re.is_finite() && center.im.is_finite()) {
            return Err(Error::invalid(format!(
                "The center {} is not a finite point",
                center
            )));
        }
        if !(step.is_finite() && step > 0.0) {
            return Err(Error::invalid(format!(
                "The step size {} is not a positive number",
                step
            )));
        }
        // Each side must fit a u32, and the RGB buffer must fit a usize.
        let max_half = ((u32::MAX - 1) / 2) as usize;
        let bytes = if half_width > max_half || half_height > max_half {
            None
        } else {
            (2 * half_width + 1)
                .checked_mul(2 * half_height + 1)
                .and_then(|pixels| pixels.checked_mul(3))
        };
        if bytes.is_none() {
            return Err(Error::invalid(format!(
                "A {}x{} half-size raster is too large",
                half_width, half_height
            )));
        }
        Ok(GridMapper {
            center,
            half_width,
            half_height,
            step,
        })
    }

    /// The same view, sampled at a different step.
    pub fn with_step(&self, step: f64) -> Result<GridMapper> {
        GridMapper::new(self.center, self.half_width, self.half_height, step)
    }

    /// Number of pixel columns.
    pub fn columns(&self) -> usize {
        2 * self.half_width + 1
    }

    /// Number of pixel rows.
    pub fn rows(&self) -> usize {
        2 * self.half_height + 1
    }

    /// The total number of points in the grid.
    pub fn len(&self) -> usize {
        self.rows() * self.columns()
    }

    /// Never true: there is always at least the center pixel.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Given a pixel on the raster, return the complex number sampled
    /// for it.  Imaginary parts decrease down the rows and real parts
    /// increase along the columns.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        let n = pixel.0 as f64 - self.half_width as f64;
        let m = self.half_height as f64 - pixel.1 as f64;
        Complex::new(self.center.re + n * self.step, self.center.im + m * self.step)
    }

    /// Sample every pixel, row by row from the top.
    pub fn grid(&self) -> Grid {
        let columns = self.columns();
        let points = iproduct!(0..self.rows(), 0..columns)
            .map(|(row, column)| self.pixel_to_point(&Pixel(column, row)))
            .collect();
        Grid { columns, points }
    }
}

/// The sample points of a whole raster, stored row-major from the top
/// left.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    columns: usize,
    points: Vec<Complex<f64>>,
}

impl Grid {
    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.points.len() / self.columns
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// The point at `row`, `column`, if it is inside the grid.
    pub fn get(&self, row: usize, column: usize) -> Option<Complex<f64>> {
        if column >= self.columns {
            return None;
        }
        self.points.get(row * self.columns + column).copied()
    }

    /// One scanline, if `row` is inside the grid.
    pub fn row(&self, row: usize) -> Option<&[Complex<f64>]> {
        let start = row.checked_mul(self.columns)?;
        self.points.get(start..start.checked_add(self.columns)?)
    }

    /// Every point, in raster order.
    pub fn points(&self) -> &[Complex<f64>] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gridmapper_fails_on_bad_step() {
        let origin = Complex::new(0.0, 0.0);
        assert!(GridMapper::new(origin, 4, 4, 0.0).is_err());
        assert!(GridMapper::new(origin, 4, 4, -1e-3).is_err());
        assert!(GridMapper::new(origin, 4, 4, std::f64::NAN).is_err());
        assert!(GridMapper::new(origin, 4, 4, std::f64::INFINITY).is_err());
    }

    #[test]
    fn gridmapper_fails_on_bad_center() {
        let center = Complex::new(std::f64::NAN, 0.0);
        assert!(GridMapper::new(center, 4, 4, 1.0).is_err());
    }

    #[test]
    fn gridmapper_passes_on_good_shape() {
        let pm = GridMapper::new(Complex::new(-0.5, -0.5), 0, 0, 1e-3);
        assert!(pm.is_ok());
    }

    #[test]
    fn three_by_three_unit_grid() {
        let pm = GridMapper::new(Complex::new(0.0, 0.0), 1, 1, 1.0).unwrap();
        let grid = pm.grid();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.columns(), 3);
        assert_eq!(grid.get(1, 1), Some(Complex::new(0.0, 0.0)));
        assert_eq!(grid.get(0, 0), Some(Complex::new(-1.0, 1.0)));
        assert_eq!(grid.get(2, 2), Some(Complex::new(1.0, -1.0)));
        assert_eq!(grid.get(0, 2), Some(Complex::new(1.0, 1.0)));
        assert_eq!(grid.get(2, 0), Some(Complex::new(-1.0, -1.0)));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.get(0, 3), None);
    }

    #[test]
    fn pixel_to_point_on_offset_center() {
        let pm = GridMapper::new(Complex::new(2.0, -3.0), 2, 1, 0.5).unwrap();
        assert_eq!(pm.columns(), 5);
        assert_eq!(pm.rows(), 3);
        assert_eq!(pm.len(), 15);
        assert_eq!(pm.pixel_to_point(&Pixel(2, 1)), Complex::new(2.0, -3.0));
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(1.0, -2.5));
        assert_eq!(pm.pixel_to_point(&Pixel(4, 2)), Complex::new(3.0, -3.5));
    }

    #[test]
    fn rows_descend_and_columns_ascend() {
        let pm = GridMapper::new(Complex::new(-0.5, -0.5), 3, 2, 0.25).unwrap();
        let grid = pm.grid();
        for row in 0..grid.rows() {
            let line = grid.row(row).unwrap();
            assert_eq!(line.len(), 7);
            for pair in line.windows(2) {
                assert!(pair[1].re > pair[0].re);
                assert_eq!(pair[1].im, pair[0].im);
            }
        }
        for row in 1..grid.rows() {
            assert!(grid.row(row).unwrap()[0].im < grid.row(row - 1).unwrap()[0].im);
        }
        assert_eq!(grid.row(grid.rows()), None);
        assert_eq!(grid.row(usize::MAX), None);
    }

    #[test]
    fn oversized_raster_is_rejected() {
        let origin = Complex::new(0.0, 0.0);
        let max_half = ((u32::MAX - 1) / 2) as usize;
        assert!(GridMapper::new(origin, max_half + 1, 0, 1.0).is_err());
        assert!(GridMapper::new(origin, 0, max_half + 1, 1.0).is_err());
        // Each side fits a u32, but the pixel buffer overflows a usize.
        assert!(GridMapper::new(origin, max_half, max_half, 1.0).is_err());
        assert!(GridMapper::new(origin, usize::MAX, usize::MAX, 1.0).is_err());
        if cfg!(target_pointer_width = "64") {
            assert!(GridMapper::new(origin, max_half, 0, 1.0).is_ok());
        }
    }

    #[test]
    fn grid_matches_pixel_to_point() {
        let pm = GridMapper::new(Complex::new(-1.76, -0.028), 4, 3, 1e-4).unwrap();
        let grid = pm.grid();
        assert_eq!(grid.points().len(), pm.len());
        for row in 0..pm.rows() {
            for column in 0..pm.columns() {
                assert_eq!(
                    grid.get(row, column),
                    Some(pm.pixel_to_point(&Pixel(column, row)))
                );
            }
        }
    }

    #[test]
    fn with_step_keeps_the_view() {
        let pm = GridMapper::new(Complex::new(1.0, 1.0), 2, 2, 1.0).unwrap();
        let narrower = pm.with_step(0.5).unwrap();
        assert_eq!(narrower.center, pm.center);
        assert_eq!(narrower.rows(), pm.rows());
        assert!(pm.with_step(0.0).is_err());
    }
}
