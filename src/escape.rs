// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time kernel.  A point `c` on the complex plane is
//! iterated from z = 0 under one of the quadratic recurrences until
//! the orbit leaves the circle of radius 2, and the iteration at which
//! that happened becomes the point's color key.

use num::Complex;
use std::fmt;
use std::str::FromStr;

/// The escape radius.  Anything with a modulus at or beyond this is
/// guaranteed to diverge.
pub const ESCAPE_RADIUS: f64 = 2.0;

/// Which member of the iterated-quadratic family to draw.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Fractal {
    /// z <- (|Re z| + i|Im z|)^2 + c
    BurningShip,
    /// z <- z^2 + c
    Mandelbrot,
}

impl Fractal {
    /// Apply one step of the recurrence.
    #[inline]
    pub fn step(self, z: Complex<f64>, c: Complex<f64>) -> Complex<f64> {
        match self {
            Fractal::BurningShip => {
                let folded = Complex::new(z.re.abs(), z.im.abs());
                folded * folded + c
            }
            Fractal::Mandelbrot => z * z + c,
        }
    }

    /// The prefix used when naming output files.
    pub fn name(self) -> &'static str {
        match self {
            Fractal::BurningShip => "burning_ship",
            Fractal::Mandelbrot => "mandelbrot",
        }
    }

    /// Iterate `c` and report when (or whether) its orbit escapes.
    ///
    /// The orbit is checked at the top of each of `max_iterations + 1`
    /// passes.  Divergence detected on pass `i` is reported as
    /// `Escaped(i - 1)`, except on the very first pass, which reports
    /// `Escaped(0)`.  The reported value therefore always lies in
    /// `0..max_iterations` and indexes straight into a palette of
    /// `max_iterations` colors.  Shifting it by one moves every color
    /// band in the output, so it must stay as it is.
    pub fn escape_time(self, c: Complex<f64>, max_iterations: usize) -> EscapeResult {
        let mut z = Complex::new(0.0_f64, 0.0_f64);
        for i in 0..=max_iterations {
            if z.norm() >= ESCAPE_RADIUS {
                return EscapeResult::Escaped(i.saturating_sub(1));
            }
            z = self.step(z, c);
        }
        EscapeResult::Bounded
    }
}

impl Default for Fractal {
    fn default() -> Self {
        Fractal::BurningShip
    }
}

impl fmt::Display for Fractal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Fractal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "burning_ship" | "burningship" | "ship" => Ok(Fractal::BurningShip),
            "mandelbrot" | "mandel" => Ok(Fractal::Mandelbrot),
            _ => Err(format!("Unknown fractal '{}'", s)),
        }
    }
}

/// The outcome of iterating a single point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EscapeResult {
    /// The orbit left the escape radius; the payload is the reported
    /// escape time, in `0..max_iterations`.
    Escaped(usize),
    /// The orbit stayed inside for the whole iteration budget.
    Bounded,
}

impl EscapeResult {
    /// The escape time, or nothing for a bounded orbit.
    pub fn iterations(self) -> Option<usize> {
        match self {
            EscapeResult::Escaped(i) => Some(i),
            EscapeResult::Bounded => None,
        }
    }
}
