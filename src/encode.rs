// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The file boundary.  Frames go out as lossless PNGs; a zoom is put
//! together by reading those frames back, in order, into a looping GIF.

use image::codecs::gif::{GifEncoder, Repeat};
use image::codecs::png::PngEncoder;
use image::{ColorType, Delay, ImageEncoder};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::render::Frame;

fn encode_error(path: &Path) -> impl FnOnce(image::ImageError) -> Error + '_ {
    move |error| Error::Encode {
        path: path.display().to_string(),
        error,
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |error| Error::Io {
        path: path.display().to_string(),
        error,
    }
}

// Callers must flush: dropping a BufWriter discards its write error.
fn create(path: &Path) -> Result<BufWriter<File>> {
    File::create(path).map(BufWriter::new).map_err(io_error(path))
}

/// Writes a single frame to disk.
pub trait FrameEncoder {
    /// Persist `frame` at `path`, taking ownership of it.
    fn write(&self, path: &Path, frame: Frame) -> Result<()>;
}

/// Combines previously written frames into one animated file.
pub trait AnimationEncoder {
    /// Assemble `frames`, in the order given, into `path`, played back
    /// at `fps` frames per second.
    fn assemble(&self, frames: &[PathBuf], fps: f64, path: &Path) -> Result<()>;
}

/// Saves frames as PNG, which keeps every RGB value exactly.
#[derive(Copy, Clone, Debug, Default)]
pub struct PngWriter;

impl FrameEncoder for PngWriter {
    fn write(&self, path: &Path, frame: Frame) -> Result<()> {
        let mut writer = create(path)?;
        PngEncoder::new(&mut writer)
            .write_image(frame.as_raw(), frame.width(), frame.height(), ColorType::Rgb8)
            .map_err(encode_error(path))?;
        writer.flush().map_err(io_error(path))
    }
}

/// Reads frames back from disk and writes an endlessly looping GIF.
#[derive(Copy, Clone, Debug, Default)]
pub struct GifAssembler;

impl GifAssembler {
    /// The per-frame display time for a playback rate.
    pub fn delay(fps: f64) -> Delay {
        Delay::from_saturating_duration(Duration::from_secs_f64(1.0 / fps))
    }
}

impl AnimationEncoder for GifAssembler {
    fn assemble(&self, frames: &[PathBuf], fps: f64, path: &Path) -> Result<()> {
        let mut writer = create(path)?;
        {
            // The trailer goes out when the encoder is dropped.
            let mut encoder = GifEncoder::new(&mut writer);
            encoder
                .set_repeat(Repeat::Infinite)
                .map_err(encode_error(path))?;

            let delay = GifAssembler::delay(fps);
            for frame_path in frames {
                let pixels = image::open(frame_path)
                    .map_err(encode_error(frame_path))?
                    .to_rgba8();
                encoder
                    .encode_frame(image::Frame::from_parts(pixels, 0, 0, delay))
                    .map_err(encode_error(path))?;
            }
        }
        writer.flush().map_err(io_error(path))
    }
}
