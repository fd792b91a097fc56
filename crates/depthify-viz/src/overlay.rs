use depthify_field::Sample;
use depthify_image::Image;
use depthify_imgproc::draw::{draw_circle, draw_filled_circle};

use crate::colormap::{color_for_value, ColorTransferFunction};

/// Color of the ring drawn around each marker.
const OUTLINE_COLOR: [u8; 3] = [255, 255, 255];

/// Draw every sample as a dot colored like its depth in the depth map.
///
/// Each dot has a one pixel white ring so that it stays visible over dark and
/// colored regions. Samples with non-finite positions are skipped.
///
/// # Arguments
///
/// * `img` - The RGB image to draw on, usually a copy of the source image.
/// * `samples` - The samples to mark.
/// * `cmap` - The color transfer function of the depth map.
/// * `radius` - The radius of the dots in pixels.
pub fn draw_samples<C>(img: &mut Image<u8, 3>, samples: &[Sample], cmap: &C, radius: f32)
where
    C: ColorTransferFunction + ?Sized,
{
    for sample in samples.iter().filter(|s| s.is_finite()) {
        let [r, g, b, _] = color_for_value(cmap, sample.depth as f32, (0.0, 255.0));
        draw_filled_circle(img, sample.position(), radius, [r, g, b]);
        draw_circle(img, sample.position(), radius + 1.0, OUTLINE_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormap::ColorMap;
    use depthify_image::ImageError;

    #[test]
    fn draws_depth_colored_dots() -> Result<(), ImageError> {
        let mut img = Image::<u8, 3>::from_size_val([20, 20].into(), 0)?;
        let samples = [Sample::new(5.0, 5.0, 0), Sample::new(14.0, 12.0, 255)];
        let cmap = ColorMap::Viridis;
        draw_samples(&mut img, &samples, &cmap, 2.0);

        let near = cmap.map(1.0);
        let far = cmap.map(0.0);
        assert_eq!(
            [*img.get_pixel(5, 5, 0)?, *img.get_pixel(5, 5, 1)?, *img.get_pixel(5, 5, 2)?],
            [near[0], near[1], near[2]]
        );
        assert_eq!(
            [*img.get_pixel(14, 12, 0)?, *img.get_pixel(14, 12, 1)?, *img.get_pixel(14, 12, 2)?],
            [far[0], far[1], far[2]]
        );
        // the outline
        assert_eq!(img.get_pixel(8, 5, 1)?, &255);
        // away from the markers
        assert_eq!(img.get_pixel(0, 19, 0)?, &0);
        Ok(())
    }

    #[test]
    fn skips_non_finite_samples() -> Result<(), ImageError> {
        let mut img = Image::<u8, 3>::from_size_val([4, 4].into(), 0)?;
        draw_samples(
            &mut img,
            &[Sample::new(f32::NAN, 1.0, 0)],
            &ColorMap::Viridis,
            1.0,
        );
        assert!(img.as_slice().iter().all(|&v| v == 0));
        Ok(())
    }
}
