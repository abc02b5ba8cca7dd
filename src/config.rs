// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Run parameters.  Everything is supplied by the caller; `validate`
//! rejects a bad configuration before a single pixel is computed.

use num::Complex;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::escape::Fractal;
use crate::palette::{ColorScale, Palette};
use crate::planes::GridMapper;
use crate::render::FrameRenderer;

/// Default view center: a mini-ship on the Burning Ship's antenna.
pub const DEFAULT_CENTER: (f64, f64) = (-1.761_899_899_9, -0.027_99);
/// Default half-width and half-height, in pixels.
pub const DEFAULT_HALF_SIZE: usize = 500;
/// Default iteration budget, and so the default palette length.
pub const DEFAULT_ITERATIONS: usize = 60;
/// Default zoom: the first frame's step is 10^-4 ...
pub const DEFAULT_FROM_EXPONENT: f64 = -4.0;
/// ... and the last frame's is 10^-8.
pub const DEFAULT_TO_EXPONENT: f64 = -8.0;
/// Default number of frames in a zoom.
pub const DEFAULT_FRAMES: usize = 500;
/// Default animation frame rate.
pub const DEFAULT_FPS: f64 = 10.0;
/// Default directory for individual zoom frames.
pub const DEFAULT_FRAMES_DIR: &str = "zoom_small";

/// What to draw, and how.  Shared by still renders and zooms.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// The point under the middle pixel.
    pub center: Complex<f64>,
    /// Pixels either side of the center column.
    pub half_width: usize,
    /// Pixels above and below the center row.
    pub half_height: usize,
    /// Iteration budget per point.
    pub max_iterations: usize,
    /// Recurrence to iterate.
    pub fractal: Fractal,
    /// Color scale the palette is sampled from.
    pub scale: ColorScale,
    /// Render worker threads per frame.
    pub threads: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            center: Complex::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
            half_width: DEFAULT_HALF_SIZE,
            half_height: DEFAULT_HALF_SIZE,
            max_iterations: DEFAULT_ITERATIONS,
            fractal: Fractal::default(),
            scale: ColorScale::default(),
            threads: num_cpus::get(),
        }
    }
}

impl RenderConfig {
    /// Check everything but the step, which differs per frame.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(Error::invalid("The iteration count must be positive"));
        }
        if self.threads == 0 {
            return Err(Error::invalid("At least one render thread is needed"));
        }
        GridMapper::new(self.center, self.half_width, self.half_height, 1.0).map(|_| ())
    }

    /// The view at `step`.
    pub fn mapper(&self, step: f64) -> Result<GridMapper> {
        GridMapper::new(self.center, self.half_width, self.half_height, step)
    }

    /// The palette for this budget.  Build it once and reuse it.
    pub fn palette(&self) -> Palette {
        Palette::with_scale(self.scale, self.max_iterations)
    }

    /// The renderer for this fractal, owning the palette for this budget.
    pub fn renderer(&self) -> Result<FrameRenderer> {
        FrameRenderer::new(self.fractal, self.palette())
    }
}

/// A full zoom: the view, the geometric plan of steps, and where the
/// results go.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoomConfig {
    /// What every frame draws.
    pub render: RenderConfig,
    /// Base-10 exponent of the first frame's step.
    pub from_exponent: f64,
    /// Base-10 exponent of the last frame's step.
    pub to_exponent: f64,
    /// Number of frames.
    pub frames: usize,
    /// Playback rate of the animation.
    pub fps: f64,
    /// Where frames are written.
    pub frames_dir: PathBuf,
    /// Where the animation is written.
    pub output_dir: PathBuf,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        ZoomConfig {
            render: RenderConfig::default(),
            from_exponent: DEFAULT_FROM_EXPONENT,
            to_exponent: DEFAULT_TO_EXPONENT,
            frames: DEFAULT_FRAMES,
            fps: DEFAULT_FPS,
            frames_dir: PathBuf::from(DEFAULT_FRAMES_DIR),
            output_dir: PathBuf::from("."),
        }
    }
}

impl ZoomConfig {
    /// Check the view and the plan generator.  The steps themselves are
    /// checked when the plan is built.
    pub fn validate(&self) -> Result<()> {
        self.render.validate()?;
        if self.frames == 0 {
            return Err(Error::invalid("A zoom needs at least one frame"));
        }
        if !(self.from_exponent.is_finite() && self.to_exponent.is_finite()) {
            return Err(Error::invalid("The zoom exponents must be finite"));
        }
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(Error::invalid(format!(
                "The frame rate {} is not a positive number",
                self.fps
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(RenderConfig::default().validate().is_ok());
        assert!(ZoomConfig::default().validate().is_ok());
    }

    #[test]
    fn defaults_describe_the_antenna_zoom() {
        let config = ZoomConfig::default();
        assert_eq!(config.render.center, Complex::new(-1.7618998999, -0.02799));
        assert_eq!(config.render.fractal, Fractal::BurningShip);
        assert_eq!(config.render.max_iterations, 60);
        assert_eq!(config.frames, 500);
        assert_eq!(config.fps, 10.0);
        assert_eq!(config.frames_dir, PathBuf::from("zoom_small"));
    }

    #[test]
    fn bad_render_parameters_are_rejected() {
        let mut config = RenderConfig::default();
        config.max_iterations = 0;
        assert!(config.validate().is_err());

        let mut config = RenderConfig::default();
        config.threads = 0;
        assert!(config.validate().is_err());

        let mut config = RenderConfig::default();
        config.center = Complex::new(0.0, std::f64::INFINITY);
        assert!(config.validate().is_err());

        let mut config = RenderConfig::default();
        config.half_width = usize::MAX / 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn bad_zoom_parameters_are_rejected() {
        let mut config = ZoomConfig::default();
        config.frames = 0;
        assert!(config.validate().is_err());

        let mut config = ZoomConfig::default();
        config.fps = 0.0;
        assert!(config.validate().is_err());

        let mut config = ZoomConfig::default();
        config.fps = -5.0;
        assert!(config.validate().is_err());

        let mut config = ZoomConfig::default();
        config.to_exponent = std::f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn palette_matches_the_budget() {
        let mut config = RenderConfig::default();
        config.max_iterations = 37;
        assert_eq!(config.palette().len(), 37);
        assert_eq!(config.renderer().unwrap().max_iterations(), 37);
    }

    #[test]
    fn mapper_rejects_a_bad_step() {
        let config = RenderConfig::default();
        assert!(config.mapper(1e-3).is_ok());
        assert!(config.mapper(0.0).is_err());
    }
}
