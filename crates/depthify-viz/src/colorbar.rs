use std::str::FromStr;

use depthify_image::ImageSize;
use depthify_imgproc::parallel;

use crate::{
    colormap::{color_for_value, ColorTransferFunction},
    colorize::ColorRaster,
    error::VizError,
};

/// Direction along which a color bar runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Orientation {
    /// The lowest value at the bottom, the highest at the top.
    #[default]
    Vertical,
    /// The lowest value on the left, the highest on the right.
    Horizontal,
}

impl FromStr for Orientation {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vertical" | "v" => Ok(Orientation::Vertical),
            "horizontal" | "h" => Ok(Orientation::Horizontal),
            _ => Err(VizError::UnknownOrientation(s.to_string())),
        }
    }
}

/// Render the color bar of a value span.
///
/// The span is sampled at `length` evenly spaced values from `lo` to `hi`, each
/// colored like the same value in a depth map, and every sample is repeated
/// across the `thickness` of the bar.
///
/// # Arguments
///
/// * `cmap` - The color transfer function.
/// * `span` - The `(lo, hi)` values at both ends of the bar.
/// * `length` - The number of pixels along the bar.
/// * `thickness` - The number of pixels across the bar.
/// * `orientation` - Whether the bar runs vertically or horizontally.
///
/// # Returns
///
/// An RGBA raster of `thickness x length` pixels when vertical, `length x thickness`
/// when horizontal.
///
/// # Errors
///
/// * [`VizError::InvalidColorBarSize`] when `length` or `thickness` is zero.
/// * [`VizError::InvalidSpan`] when `hi <= lo` or a bound is not finite.
pub fn render_colorbar<C>(
    cmap: &C,
    span: (f32, f32),
    length: usize,
    thickness: usize,
    orientation: Orientation,
) -> Result<ColorRaster, VizError>
where
    C: ColorTransferFunction + ?Sized,
{
    if length == 0 || thickness == 0 {
        return Err(VizError::InvalidColorBarSize(length, thickness));
    }

    let (lo, hi) = span;
    if !(lo.is_finite() && hi.is_finite() && hi > lo) {
        return Err(VizError::InvalidSpan(lo, hi));
    }

    // the colors along the bar, from lo to hi
    let step = if length > 1 {
        (hi - lo) / (length - 1) as f32
    } else {
        0.0
    };
    let gradient = (0..length)
        .map(|i| color_for_value(cmap, lo + step * i as f32, span))
        .collect::<Vec<_>>();

    let size = match orientation {
        Orientation::Vertical => ImageSize {
            width: thickness,
            height: length,
        },
        Orientation::Horizontal => ImageSize {
            width: length,
            height: thickness,
        },
    };

    let mut bar = ColorRaster::from_size_val(size, 0)?;
    parallel::par_fill_rows(&mut bar, |row, row_data| match orientation {
        Orientation::Vertical => {
            let color = gradient[length - 1 - row];
            row_data
                .chunks_exact_mut(4)
                .for_each(|px| px.copy_from_slice(&color));
        }
        Orientation::Horizontal => {
            row_data
                .chunks_exact_mut(4)
                .zip(gradient.iter())
                .for_each(|(px, color)| px.copy_from_slice(color));
        }
    });

    Ok(bar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormap::ColorMap;

    #[test]
    fn vertical_bar() -> Result<(), VizError> {
        let cmap = ColorMap::Viridis;
        let bar = render_colorbar(&cmap, (0.0, 255.0), 9, 3, Orientation::Vertical)?;
        assert_eq!(bar.size(), ImageSize::from([3, 9]));

        // the top row is the highest value, the farthest
        let top = &bar.as_slice()[..4];
        let bottom = &bar.as_slice()[bar.as_slice().len() - 4..];
        assert_eq!(top, &cmap.map(0.0));
        assert_eq!(bottom, &cmap.map(1.0));

        // constant across the thickness
        for row in bar.as_slice().chunks_exact(3 * 4) {
            assert_eq!(&row[..4], &row[4..8]);
            assert_eq!(&row[4..8], &row[8..12]);
        }
        Ok(())
    }

    #[test]
    fn horizontal_bar() -> Result<(), VizError> {
        let cmap = ColorMap::Gray;
        let bar = render_colorbar(&cmap, (10.0, 20.0), 3, 2, Orientation::Horizontal)?;
        assert_eq!(bar.size(), ImageSize::from([3, 2]));

        #[rustfmt::skip]
        let expected_row = [
            255, 255, 255, 255,
            128, 128, 128, 255,
            0, 0, 0, 255,
        ];
        assert_eq!(&bar.as_slice()[..12], &expected_row);
        assert_eq!(&bar.as_slice()[12..], &expected_row);
        Ok(())
    }

    #[test]
    fn matches_depth_colors() -> Result<(), VizError> {
        let cmap = ColorMap::Inferno;
        let bar = render_colorbar(&cmap, (0.0, 255.0), 256, 1, Orientation::Horizontal)?;
        for (value, px) in bar.as_slice().chunks_exact(4).enumerate() {
            assert_eq!(px, &color_for_value(&cmap, value as f32, (0.0, 255.0)));
        }
        Ok(())
    }

    #[test]
    fn single_pixel_bar() -> Result<(), VizError> {
        let bar = render_colorbar(&ColorMap::Magma, (0.0, 1.0), 1, 1, Orientation::Vertical)?;
        assert_eq!(bar.as_slice(), &ColorMap::Magma.map(1.0));
        Ok(())
    }

    #[test]
    fn invalid_inputs() {
        let cmap = ColorMap::Viridis;
        assert_eq!(
            render_colorbar(&cmap, (0.0, 255.0), 0, 4, Orientation::Vertical),
            Err(VizError::InvalidColorBarSize(0, 4))
        );
        assert_eq!(
            render_colorbar(&cmap, (5.0, 5.0), 10, 4, Orientation::Vertical),
            Err(VizError::InvalidSpan(5.0, 5.0))
        );
        assert!(matches!(
            render_colorbar(&cmap, (0.0, f32::NAN), 10, 4, Orientation::Horizontal),
            Err(VizError::InvalidSpan(_, _))
        ));
    }

    #[test]
    fn parse_orientation() {
        assert_eq!("Vertical".parse::<Orientation>(), Ok(Orientation::Vertical));
        assert_eq!("h".parse::<Orientation>(), Ok(Orientation::Horizontal));
        assert_eq!(
            "diagonal".parse::<Orientation>(),
            Err(VizError::UnknownOrientation("diagonal".to_string()))
        );
    }
}
