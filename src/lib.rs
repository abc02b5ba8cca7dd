#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Escape-time fractal zoomer
//!
//! Every pixel of an image is assigned a point on the complex plane.
//! That point is fed, over and over, into a quadratic recurrence
//! starting from zero: the classic Mandelbrot `z*z + c`, or the
//! Burning Ship, which folds `z` into the first quadrant before
//! squaring it.  Points whose orbits leave the circle of radius two are
//! colored by how long that took; points whose orbits never leave are
//! black.
//!
//! Rendering the same center again and again with a smaller and
//! smaller distance between pixels, and stringing the results together,
//! gives a zoom.  A [`ZoomSequencer`] writes each frame as a PNG and
//! then assembles them, in order, into an animated GIF.
//!
//! The pieces, from the bottom up:
//!
//! - [`escape`]: the kernel, [`Fractal::escape_time`].
//! - [`planes`]: pixel to complex-plane mapping, [`GridMapper`].
//! - [`palette`]: escape time to color, [`Palette`].
//! - [`render`]: a whole frame, [`FrameRenderer`].
//! - [`zoom`]: plans and the sequencer; [`encode`] does the file I/O.

extern crate crossbeam;
extern crate failure;
extern crate image;
extern crate itertools;
extern crate log;
extern crate num;
extern crate num_cpus;

pub mod config;
pub mod encode;
pub mod error;
pub mod escape;
pub mod naming;
pub mod palette;
pub mod planes;
pub mod render;
pub mod zoom;

pub use config::{RenderConfig, ZoomConfig};
pub use encode::{AnimationEncoder, FrameEncoder, GifAssembler, PngWriter};
pub use error::{Error, Result};
pub use escape::{EscapeResult, Fractal};
pub use palette::{ColorScale, Palette};
pub use planes::{Grid, GridMapper, Pixel};
pub use render::{Frame, FrameRenderer};
pub use zoom::{render_still, ZoomPlan, ZoomSequencer};
