// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The discrete palette: one color per reportable escape time, sampled
//! once from a continuous color scale and then only ever read.

use image::Rgb;
use std::str::FromStr;

use crate::escape::EscapeResult;

/// The color of an orbit that never escapes.
pub const BOUNDED_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

// Polynomial fit of the turbo colormap, lowest power first.
const TURBO_RED: [f64; 6] = [
    0.135_721_38,
    4.615_392_60,
    -42.660_322_58,
    132.131_082_34,
    -152.942_393_96,
    59.286_379_43,
];
const TURBO_GREEN: [f64; 6] = [
    0.091_402_61,
    2.194_188_39,
    4.842_966_58,
    -14.185_033_33,
    4.277_298_57,
    2.829_566_04,
];
const TURBO_BLUE: [f64; 6] = [
    0.106_673_30,
    12.641_946_08,
    -60.582_048_36,
    110.362_767_71,
    -89.903_109_12,
    27.348_249_73,
];

fn polynomial(coefficients: &[f64; 6], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, k| acc * x + k)
}

/// A continuous color scale over the domain [0, 1].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColorScale {
    /// The rainbow-like turbo map: dark blue through green and yellow to
    /// dark red.
    ///
    /// This is a degree-five polynomial fit, not the published lookup
    /// table.  It tracks the table closely in the middle and drifts at
    /// the ends: the first entry of a 60-color palette is (34, 23, 27)
    /// where the table has (48, 18, 59), and the last is (144, 12, 0)
    /// where the table has (122, 4, 2).
    Turbo,
    /// Black to white.
    Grayscale,
}

impl ColorScale {
    /// Sample the scale at `x`, clamped into [0, 1].  Channels are in [0, 1].
    pub fn sample(self, x: f64) -> [f64; 3] {
        let x = x.max(0.0).min(1.0);
        match self {
            ColorScale::Turbo => [
                polynomial(&TURBO_RED, x),
                polynomial(&TURBO_GREEN, x),
                polynomial(&TURBO_BLUE, x),
            ],
            ColorScale::Grayscale => [x, x, x],
        }
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        ColorScale::Turbo
    }
}

impl FromStr for ColorScale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "turbo" => Ok(ColorScale::Turbo),
            "grayscale" | "greyscale" | "gray" | "grey" => Ok(ColorScale::Grayscale),
            _ => Err(format!("Unknown color scale '{}'", s)),
        }
    }
}

// Truncates, the same way for every channel.
fn to_channel(v: f64) -> u8 {
    (v.max(0.0).min(1.0) * 255.0) as u8
}

/// An immutable table of colors indexed by escape time.  Build it once
/// per run and share it by reference with every render.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: Vec<Rgb<u8>>,
}

impl Palette {
    /// The default palette: `max_iterations` colors from the turbo scale.
    pub fn build(max_iterations: usize) -> Palette {
        Palette::with_scale(ColorScale::Turbo, max_iterations)
    }

    /// Sample `scale` at `max_iterations` evenly spaced points spanning
    /// its whole domain, both ends included.
    pub fn with_scale(scale: ColorScale, max_iterations: usize) -> Palette {
        let last = max_iterations.saturating_sub(1).max(1) as f64;
        let colors = (0..max_iterations)
            .map(|i| {
                let [r, g, b] = scale.sample(i as f64 / last);
                Rgb([to_channel(r), to_channel(g), to_channel(b)])
            })
            .collect();
        Palette { colors }
    }

    /// Number of entries, equal to the iteration budget it was built for.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// True for a palette built with no entries.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The color for escape time `index`, if there is one.
    pub fn get(&self, index: usize) -> Option<Rgb<u8>> {
        self.colors.get(index).copied()
    }

    /// All the colors, in escape-time order.
    pub fn colors(&self) -> &[Rgb<u8>] {
        &self.colors
    }

    /// Color a single escape result.  Bounded orbits are black.
    ///
    /// # Panics
    ///
    /// If the escape time is past the end of the table, which means the
    /// result came from a larger iteration budget than this palette was
    /// built for.
    #[inline]
    pub fn color(&self, result: EscapeResult) -> Rgb<u8> {
        match result {
            EscapeResult::Bounded => BOUNDED_COLOR,
            EscapeResult::Escaped(k) => self.colors[k],
        }
    }
}
