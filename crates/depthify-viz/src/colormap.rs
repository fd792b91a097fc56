use std::{fmt, str::FromStr};

use crate::error::VizError;

/// Maps a normalized scalar in `[0, 1]` to an RGBA color.
///
/// Implementations must be pure: the same input always gives the same color.
pub trait ColorTransferFunction: Send + Sync {
    /// The color of the normalized value `t`. Values outside `[0, 1]` are clamped.
    fn map(&self, t: f32) -> [u8; 4];
}

/// Normalize a depth value so that near is bright and far is dark.
///
/// Computes `1 - (value - lo) / (hi - lo)` clamped to `[0, 1]`. An empty span
/// maps every value to 1.
///
/// # Example
///
/// ```
/// use depthify_viz::normalize_depth;
///
/// assert_eq!(normalize_depth(0.0, 0.0, 255.0), 1.0);
/// assert_eq!(normalize_depth(255.0, 0.0, 255.0), 0.0);
/// ```
pub fn normalize_depth(value: f32, lo: f32, hi: f32) -> f32 {
    let t = if hi > lo {
        (value - lo) / (hi - lo)
    } else {
        0.0
    };
    (1.0 - t).clamp(0.0, 1.0)
}

/// The color a depth value has in a depth map spanning `span = (lo, hi)`.
///
/// Used to preview the color of a value before it is added to the map.
pub fn color_for_value<C: ColorTransferFunction + ?Sized>(
    cmap: &C,
    value: f32,
    span: (f32, f32),
) -> [u8; 4] {
    cmap.map(normalize_depth(value, span.0, span.1))
}

/// Lookup table from every depth byte to its color over the full `[0, 255]` span.
pub(crate) fn depth_lut<C: ColorTransferFunction + ?Sized>(cmap: &C) -> [[u8; 4]; 256] {
    let mut lut = [[0u8; 4]; 256];
    for (value, color) in lut.iter_mut().enumerate() {
        *color = color_for_value(cmap, value as f32, (0.0, 255.0));
    }
    lut
}

const VIRIDIS: [[u8; 3]; 9] = [
    [68, 1, 84],
    [71, 45, 123],
    [59, 82, 139],
    [44, 114, 142],
    [33, 145, 140],
    [40, 174, 128],
    [94, 201, 98],
    [173, 220, 48],
    [253, 231, 37],
];

const MAGMA: [[u8; 3]; 9] = [
    [0, 0, 4],
    [28, 16, 68],
    [79, 18, 123],
    [129, 37, 129],
    [181, 54, 122],
    [229, 80, 100],
    [251, 136, 97],
    [254, 194, 135],
    [252, 253, 191],
];

const INFERNO: [[u8; 3]; 9] = [
    [0, 0, 4],
    [31, 12, 72],
    [85, 15, 109],
    [136, 34, 106],
    [186, 54, 85],
    [227, 89, 51],
    [249, 142, 9],
    [249, 203, 53],
    [252, 255, 164],
];

const PLASMA: [[u8; 3]; 9] = [
    [13, 8, 135],
    [76, 2, 161],
    [126, 3, 168],
    [169, 35, 149],
    [204, 71, 120],
    [229, 107, 93],
    [248, 149, 64],
    [253, 197, 39],
    [240, 249, 33],
];

const GRAY: [[u8; 3]; 2] = [[0, 0, 0], [255, 255, 255]];

/// The built-in color transfer functions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ColorMap {
    /// Perceptually uniform, dark purple to yellow.
    #[default]
    Viridis,
    /// Black to pale yellow through purple.
    Magma,
    /// Black to pale yellow through red.
    Inferno,
    /// Dark blue to yellow.
    Plasma,
    /// Black to white.
    Gray,
}

impl ColorMap {
    /// Every built-in colormap.
    pub const ALL: [ColorMap; 5] = [
        ColorMap::Viridis,
        ColorMap::Magma,
        ColorMap::Inferno,
        ColorMap::Plasma,
        ColorMap::Gray,
    ];

    /// The lowercase name of the colormap.
    pub fn name(&self) -> &'static str {
        match self {
            ColorMap::Viridis => "viridis",
            ColorMap::Magma => "magma",
            ColorMap::Inferno => "inferno",
            ColorMap::Plasma => "plasma",
            ColorMap::Gray => "gray",
        }
    }

    fn stops(&self) -> &'static [[u8; 3]] {
        match self {
            ColorMap::Viridis => &VIRIDIS,
            ColorMap::Magma => &MAGMA,
            ColorMap::Inferno => &INFERNO,
            ColorMap::Plasma => &PLASMA,
            ColorMap::Gray => &GRAY,
        }
    }
}

impl ColorTransferFunction for ColorMap {
    fn map(&self, t: f32) -> [u8; 4] {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        let x = t * (stops.len() - 1) as f32;
        let i = x.floor() as usize;
        if i >= stops.len() - 1 {
            let [r, g, b] = stops[stops.len() - 1];
            return [r, g, b, 255];
        }

        let f = x - i as f32;
        let (c0, c1) = (stops[i], stops[i + 1]);
        let lerp = |k: usize| (c0[k] as f32 + f * (c1[k] as f32 - c0[k] as f32)).round() as u8;
        [lerp(0), lerp(1), lerp(2), 255]
    }
}

impl fmt::Display for ColorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ColorMap {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        ColorMap::ALL
            .into_iter()
            .find(|cmap| cmap.name() == name || (name == "grey" && *cmap == ColorMap::Gray))
            .ok_or_else(|| VizError::UnknownColorMap(s.to_string()))
    }
}
