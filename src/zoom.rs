// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Zoom sequences.  A plan is a fixed view sampled at a shrinking
//! series of step sizes; the sequencer renders each frame in plan
//! order, writes it out, and finally hands the written frames to the
//! animation encoder in that same order.

use log::{debug, info};
use num::Complex;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{RenderConfig, ZoomConfig};
use crate::encode::{AnimationEncoder, FrameEncoder};
use crate::error::{Error, Result};
use crate::naming;
use crate::planes::GridMapper;
use crate::render::FrameRenderer;

/// A fixed view and the ordered step sizes to sample it at.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoomPlan {
    center: Complex<f64>,
    half_width: usize,
    half_height: usize,
    steps: Vec<f64>,
}

impl ZoomPlan {
    /// A plan over explicit steps.  Each step must be a positive number
    /// and there must be at least one.
    pub fn new(
        center: Complex<f64>,
        half_width: usize,
        half_height: usize,
        steps: Vec<f64>,
    ) -> Result<ZoomPlan> {
        if steps.is_empty() {
            return Err(Error::invalid("A zoom needs at least one frame"));
        }
        for step in &steps {
            GridMapper::new(center, half_width, half_height, *step)?;
        }
        Ok(ZoomPlan {
            center,
            half_width,
            half_height,
            steps,
        })
    }

    /// `count` steps evenly spaced on a log scale, from `10^from_exponent`
    /// to `10^to_exponent`, both ends included.
    pub fn geometric(
        center: Complex<f64>,
        half_width: usize,
        half_height: usize,
        from_exponent: f64,
        to_exponent: f64,
        count: usize,
    ) -> Result<ZoomPlan> {
        let delta = if count > 1 {
            (to_exponent - from_exponent) / (count - 1) as f64
        } else {
            0.0
        };
        let steps = (0..count)
            .map(|k| {
                let exponent = if count > 1 && k == count - 1 {
                    to_exponent
                } else {
                    from_exponent + (k as f64) * delta
                };
                10.0_f64.powf(exponent)
            })
            .collect();
        ZoomPlan::new(center, half_width, half_height, steps)
    }

    /// The plan a zoom configuration describes.
    pub fn from_config(config: &ZoomConfig) -> Result<ZoomPlan> {
        ZoomPlan::geometric(
            config.render.center,
            config.render.half_width,
            config.render.half_height,
            config.from_exponent,
            config.to_exponent,
            config.frames,
        )
    }

    /// The step sizes, in playback order.
    pub fn steps(&self) -> &[f64] {
        &self.steps
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Never true for a constructed plan.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The view for every frame, in order.
    pub fn mappers<'a>(&'a self) -> impl Iterator<Item = GridMapper> + 'a {
        self.steps.iter().map(move |step| GridMapper {
            center: self.center,
            half_width: self.half_width,
            half_height: self.half_height,
            step: *step,
        })
    }
}

/// Renders and writes every frame of a plan, then assembles them.
pub struct ZoomSequencer {
    plan: ZoomPlan,
    renderer: FrameRenderer,
    threads: usize,
    fps: f64,
    frames_dir: PathBuf,
    output_dir: PathBuf,
}

impl ZoomSequencer {
    /// Validate `config` and build the plan and renderer it describes.
    pub fn new(config: &ZoomConfig) -> Result<ZoomSequencer> {
        config.validate()?;
        Ok(ZoomSequencer {
            plan: ZoomPlan::from_config(config)?,
            renderer: config.render.renderer()?,
            threads: config.render.threads,
            fps: config.fps,
            frames_dir: config.frames_dir.clone(),
            output_dir: config.output_dir.clone(),
        })
    }

    /// The plan this sequencer walks through.
    pub fn plan(&self) -> &ZoomPlan {
        &self.plan
    }

    /// Where frame `index` is written.
    pub fn frame_path(&self, index: usize) -> PathBuf {
        naming::frame_path(
            &self.frames_dir,
            self.renderer.fractal(),
            self.plan.center,
            self.plan.half_width,
            self.plan.half_height,
            index,
        )
    }

    /// Where the animation is written.
    pub fn animation_path(&self) -> PathBuf {
        naming::animation_path(
            &self.output_dir,
            self.renderer.fractal(),
            self.plan.center,
            self.plan.half_width,
            self.plan.half_height,
        )
    }

    /// Run the whole zoom.  The first failure stops everything: no
    /// further frames are rendered and no animation is written.
    /// Returns the path of the animation.
    pub fn run<F, A>(&self, frames: &F, animation: &A) -> Result<PathBuf>
    where
        F: FrameEncoder,
        A: AnimationEncoder,
    {
        create_dir(&self.frames_dir)?;
        create_dir(&self.output_dir)?;

        info!(
            "Rendering {} frames of {} at {} ({}x{} pixels, {} iterations, {} threads)",
            self.plan.len(),
            self.renderer.fractal(),
            self.plan.center,
            2 * self.plan.half_width + 1,
            2 * self.plan.half_height + 1,
            self.renderer.max_iterations(),
            self.threads
        );

        let mut written = Vec::with_capacity(self.plan.len());
        for (index, plane) in self.plan.mappers().enumerate() {
            let frame = self.renderer.render_threaded(&plane, self.threads)?;
            let path = self.frame_path(index);
            frames.write(&path, frame)?;
            debug!("Frame {} (step {:e}) written to {}", index, plane.step, path.display());
            written.push(path);
        }

        let output = self.animation_path();
        animation.assemble(&written, self.fps, &output)?;
        info!("Animation of {} frames written to {}", written.len(), output.display());
        Ok(output)
    }
}

fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|error| Error::Io {
        path: dir.display().to_string(),
        error,
    })
}

/// Render a single view at `step` and write it into `dir`, named after
/// the view.  Returns the path written.
pub fn render_still<F: FrameEncoder>(
    config: &RenderConfig,
    step: f64,
    dir: &Path,
    frames: &F,
) -> Result<PathBuf> {
    config.validate()?;
    let plane = config.mapper(step)?;
    let renderer = config.renderer()?;

    create_dir(dir)?;
    let frame = renderer.render_threaded(&plane, config.threads)?;
    let path = naming::still_path(
        dir,
        config.fractal,
        config.center,
        config.half_width,
        config.half_height,
    );
    frames.write(&path, frame)?;
    info!("Still written to {}", path.display());
    Ok(path)
}
