//! The command line, driven as a user would.

extern crate assert_cmd;
extern crate image;
extern crate predicates;
extern crate tempfile;

use assert_cmd::Command;
use predicates::prelude::*;

fn fractalzoom() -> Command {
    Command::cargo_bin("fractalzoom").unwrap()
}

#[test]
fn no_subcommand_prints_usage() {
    fractalzoom()
        .assert()
        .failure()
        .stderr(predicate::str::contains("USAGE"));
}

#[test]
fn still_writes_the_named_png() {
    let dir = tempfile::tempdir().unwrap();
    fractalzoom()
        .args(&[
            "still",
            "--center=-0.5,-0.5",
            "--size",
            "10x6",
            "--step",
            "0.05",
            "--iterations",
            "25",
            "--threads",
            "1",
            "--output",
        ])
        .arg(dir.path())
        .assert()
        .success();

    let path = dir.path().join("burning_ship_-0.5_-0.5_10_6.png");
    let image = image::open(&path).unwrap();
    assert_eq!(image.to_rgb8().dimensions(), (21, 13));
}

#[test]
fn zoom_writes_frames_and_animation() {
    let dir = tempfile::tempdir().unwrap();
    let frames = dir.path().join("frames");
    fractalzoom()
        .args(&[
            "zoom",
            "--fractal",
            "mandelbrot",
            "--center",
            "-0.75,0.1",
            "--size",
            "4x4",
            "--from",
            "-1",
            "--to",
            "-2",
            "--frames",
            "3",
            "--fps",
            "5",
            "--threads",
            "1",
            "--frames-dir",
        ])
        .arg(&frames)
        .arg("--output")
        .arg(dir.path())
        .assert()
        .success();

    for index in 0..3 {
        let name = format!("mandelbrot_-0.75_0.1_4_4_{}.png", index);
        assert!(frames.join(name).is_file());
    }
    assert!(dir.path().join("mandelbrot_-0.75_0.1_4_4.gif").is_file());
}

#[test]
fn unknown_fractal_is_rejected() {
    fractalzoom()
        .args(&["still", "--fractal", "julia"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown fractal"));
}

#[test]
fn zero_step_is_rejected() {
    fractalzoom()
        .args(&["still", "--step", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Step size must be positive"));
}

#[test]
fn unwritable_output_reports_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"file").unwrap();
    fractalzoom()
        .args(&["still", "--size", "2x2", "--output"])
        .arg(blocker.join("inside"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("blocker"));
}

#[test]
fn out_of_range_values_are_rejected_before_rendering() {
    fractalzoom()
        .args(&["still", "--iterations", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "The iteration count must be between 1 and 1000000",
        ));
    fractalzoom()
        .args(&["zoom", "--size", "10by10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not parse half-size '10by10'"));
}
