// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate env_logger;
extern crate fractalzoom;
extern crate log;
extern crate num;
extern crate num_cpus;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use log::error;
use num::Complex;
use std::path::Path;
use std::fmt::Display;
use std::str::FromStr;

use fractalzoom::config::{
    DEFAULT_FPS, DEFAULT_FRAMES, DEFAULT_FROM_EXPONENT, DEFAULT_FRAMES_DIR, DEFAULT_HALF_SIZE,
    DEFAULT_ITERATIONS, DEFAULT_TO_EXPONENT,
};
use fractalzoom::{
    render_still, ColorScale, Error, Fractal, GifAssembler, PngWriter, RenderConfig, Result,
    ZoomConfig, ZoomSequencer,
};

/// Split `s` once at `separator` and parse both halves.
fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    let (left, right) = s.split_once(separator)?;
    Some((left.trim().parse().ok()?, right.trim().parse().ok()?))
}

fn parse_center(s: &str) -> Option<Complex<f64>> {
    parse_pair(s, ',').map(|(re, im)| Complex::new(re, im))
}

// Validators, in the shape clap wants: take the raw value, describe the
// problem.

fn parses<T: FromStr>(s: String) -> std::result::Result<(), String>
where
    T::Err: Display,
{
    s.parse::<T>().map(drop).map_err(|e| e.to_string())
}

fn pair_of<T: FromStr>(
    separator: char,
    what: &'static str,
) -> impl Fn(String) -> std::result::Result<(), String> {
    move |s| match parse_pair::<T>(&s, separator) {
        Some(_) => Ok(()),
        None => Err(format!("Could not parse {} '{}'", what, s)),
    }
}

fn between<T>(
    low: T,
    high: T,
    what: &'static str,
) -> impl Fn(String) -> std::result::Result<(), String>
where
    T: FromStr + PartialOrd + Display,
{
    move |s| {
        let value = s
            .parse::<T>()
            .map_err(|_| format!("Could not parse {} '{}'", what, s))?;
        if value < low || value > high {
            return Err(format!("The {} must be between {} and {}", what, low, high));
        }
        Ok(())
    }
}

fn positive_step(s: String) -> std::result::Result<(), String> {
    match s.parse::<f64>() {
        Ok(step) if step.is_finite() && step > 0.0 => Ok(()),
        Ok(_) => Err("Step size must be positive".to_string()),
        Err(_) => Err(format!("Could not parse step size '{}'", s)),
    }
}

const CENTER: &str = "center";
const SIZE: &str = "size";
const STEP: &str = "step";
const ITERATIONS: &str = "iterations";
const FRACTAL: &str = "fractal";
const PALETTE: &str = "palette";
const THREADS: &str = "threads";
const FROM: &str = "from";
const TO: &str = "to";
const FRAMES: &str = "frames";
const FPS: &str = "fps";
const FRAMES_DIR: &str = "frames-dir";
const OUTPUT: &str = "output";

fn view_args<'a, 'b>(max_threads: usize) -> Vec<Arg<'a, 'b>> {
    vec![
        Arg::with_name(CENTER)
            .long(CENTER)
            .short("c")
            .takes_value(true)
            .allow_hyphen_values(true)
            .default_value("-1.7618998999,-0.02799")
            .validator(pair_of::<f64>(',', "center point"))
            .help("Center of the view on the complex plane, as re,im"),
        Arg::with_name(SIZE)
            .long(SIZE)
            .short("s")
            .takes_value(true)
            .default_value("500x500")
            .validator(pair_of::<usize>('x', "half-size"))
            .help("Pixels either side of the center, as WIDTHxHEIGHT"),
        Arg::with_name(ITERATIONS)
            .long(ITERATIONS)
            .short("i")
            .takes_value(true)
            .default_value("60")
            .validator(between(1usize, 1_000_000, "iteration count"))
            .help("Maximum number of iterations per point"),
        Arg::with_name(FRACTAL)
            .long(FRACTAL)
            .short("f")
            .takes_value(true)
            .default_value("burning-ship")
            .validator(parses::<Fractal>)
            .help("Recurrence to draw: burning-ship or mandelbrot"),
        Arg::with_name(PALETTE)
            .long(PALETTE)
            .short("p")
            .takes_value(true)
            .default_value("turbo")
            .validator(parses::<ColorScale>)
            .help("Color scale: turbo or grayscale"),
        Arg::with_name(THREADS)
            .long(THREADS)
            .short("t")
            .takes_value(true)
            .validator(between(1, max_threads, "thread count"))
            .help("Number of threads to render with (default: all cores)"),
    ]
}

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("fractalzoom")
        .version("0.1.0")
        .about("Escape-time fractal renderer and zoom animator")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("still")
                .about("Render a single view as a PNG")
                .args(&view_args(max_threads))
                .arg(
                    Arg::with_name(STEP)
                        .long(STEP)
                        .takes_value(true)
                        .default_value("1e-3")
                        .validator(positive_step)
                        .help("Distance between neighbouring pixels"),
                )
                .arg(
                    Arg::with_name(OUTPUT)
                        .long(OUTPUT)
                        .short("o")
                        .takes_value(true)
                        .default_value(".")
                        .help("Directory to write the image into"),
                ),
        )
        .subcommand(
            SubCommand::with_name("zoom")
                .about("Render a zoom sequence and assemble it into a GIF")
                .args(&view_args(max_threads))
                .arg(
                    Arg::with_name(FROM)
                        .long(FROM)
                        .takes_value(true)
                        .allow_hyphen_values(true)
                        .default_value("-4")
                        .validator(parses::<f64>)
                        .help("Base-10 exponent of the first frame's step"),
                )
                .arg(
                    Arg::with_name(TO)
                        .long(TO)
                        .takes_value(true)
                        .allow_hyphen_values(true)
                        .default_value("-8")
                        .validator(parses::<f64>)
                        .help("Base-10 exponent of the last frame's step"),
                )
                .arg(
                    Arg::with_name(FRAMES)
                        .long(FRAMES)
                        .short("n")
                        .takes_value(true)
                        .default_value("500")
                        .validator(between(1usize, 100_000, "frame count"))
                        .help("Number of frames"),
                )
                .arg(
                    Arg::with_name(FPS)
                        .long(FPS)
                        .takes_value(true)
                        .default_value("10")
                        .validator(between(0.01, 100.0, "frame rate"))
                        .help("Animation frames per second"),
                )
                .arg(
                    Arg::with_name(FRAMES_DIR)
                        .long(FRAMES_DIR)
                        .takes_value(true)
                        .default_value(DEFAULT_FRAMES_DIR)
                        .help("Directory to write the individual frames into"),
                )
                .arg(
                    Arg::with_name(OUTPUT)
                        .long(OUTPUT)
                        .short("o")
                        .takes_value(true)
                        .default_value(".")
                        .help("Directory to write the animation into"),
                ),
        )
        .get_matches()
}

fn value<T: FromStr>(matches: &ArgMatches, name: &str, default: T) -> Result<T> {
    match matches.value_of(name) {
        None => Ok(default),
        Some(s) => {
            T::from_str(s).map_err(|_| Error::invalid(format!("Could not parse --{} {}", name, s)))
        }
    }
}

fn render_config(matches: &ArgMatches) -> Result<RenderConfig> {
    let center = matches
        .value_of(CENTER)
        .and_then(parse_center)
        .ok_or_else(|| Error::invalid("Could not parse center point"))?;
    let (half_width, half_height) = matches
        .value_of(SIZE)
        .and_then(|s| parse_pair::<usize>(s, 'x'))
        .unwrap_or((DEFAULT_HALF_SIZE, DEFAULT_HALF_SIZE));
    Ok(RenderConfig {
        center,
        half_width,
        half_height,
        max_iterations: value(matches, ITERATIONS, DEFAULT_ITERATIONS)?,
        fractal: value(matches, FRACTAL, Fractal::default())?,
        scale: value(matches, PALETTE, ColorScale::default())?,
        threads: value(matches, THREADS, num_cpus::get())?,
    })
}

fn still(matches: &ArgMatches) -> Result<()> {
    let config = render_config(matches)?;
    let step = value(matches, STEP, 1e-3)?;
    let dir = matches.value_of(OUTPUT).unwrap_or(".");
    render_still(&config, step, Path::new(dir), &PngWriter)?;
    Ok(())
}

fn zoom(matches: &ArgMatches) -> Result<()> {
    let config = ZoomConfig {
        render: render_config(matches)?,
        from_exponent: value(matches, FROM, DEFAULT_FROM_EXPONENT)?,
        to_exponent: value(matches, TO, DEFAULT_TO_EXPONENT)?,
        frames: value(matches, FRAMES, DEFAULT_FRAMES)?,
        fps: value(matches, FPS, DEFAULT_FPS)?,
        frames_dir: matches.value_of(FRAMES_DIR).unwrap_or(DEFAULT_FRAMES_DIR).into(),
        output_dir: matches.value_of(OUTPUT).unwrap_or(".").into(),
    };
    ZoomSequencer::new(&config)?.run(&PngWriter, &GifAssembler)?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = args();

    let result = match matches.subcommand() {
        ("still", Some(m)) => still(m),
        ("zoom", Some(m)) => zoom(m),
        (other, _) => Err(Error::invalid(format!("Unknown command '{}'", other))),
    };

    if let Err(e) = result {
        error!("Render failure: {}", e);
        std::process::exit(1);
    }
}
