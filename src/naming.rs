// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! File names.  Every output encodes the fractal, the view center and
//! the half-dimensions; zoom frames add their position in the plan so
//! the sequence can be found again in order.

use num::Complex;
use std::path::{Path, PathBuf};

use crate::escape::Fractal;

fn stem(fractal: Fractal, center: Complex<f64>, half_width: usize, half_height: usize) -> String {
    format!(
        "{}_{}_{}_{}_{}",
        fractal.name(),
        center.re,
        center.im,
        half_width,
        half_height
    )
}

/// `{fractal}_{re}_{im}_{hw}_{hh}.png`, for a single still render.
pub fn still_path(
    dir: &Path,
    fractal: Fractal,
    center: Complex<f64>,
    half_width: usize,
    half_height: usize,
) -> PathBuf {
    dir.join(format!("{}.png", stem(fractal, center, half_width, half_height)))
}

/// `{fractal}_{re}_{im}_{hw}_{hh}_{index}.png`, for frame `index` of a zoom.
pub fn frame_path(
    dir: &Path,
    fractal: Fractal,
    center: Complex<f64>,
    half_width: usize,
    half_height: usize,
    index: usize,
) -> PathBuf {
    dir.join(format!(
        "{}_{}.png",
        stem(fractal, center, half_width, half_height),
        index
    ))
}

/// `{fractal}_{re}_{im}_{hw}_{hh}.gif`, for the assembled zoom.
pub fn animation_path(
    dir: &Path,
    fractal: Fractal,
    center: Complex<f64>,
    half_width: usize,
    half_height: usize,
) -> PathBuf {
    dir.join(format!("{}.gif", stem(fractal, center, half_width, half_height)))
}
