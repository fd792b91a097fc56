use depthify_image::Image;

/// Helper function to set a pixel's color, ignoring coordinates outside the image.
#[inline]
fn set_pixel<const C: usize>(img: &mut Image<u8, C>, x: i64, y: i64, color: [u8; C]) {
    if x >= 0 && x < img.cols() as i64 && y >= 0 && y < img.rows() as i64 {
        let start = (y as usize * img.cols() + x as usize) * C;
        img.as_slice_mut()[start..start + C].copy_from_slice(&color);
    }
}

/// Draws a filled circle on an image inplace.
///
/// Pixels whose center lies within `radius` of `center` are painted. Parts of the
/// circle falling outside the image are clipped.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `center` - The center of the circle as (x, y) in pixel coordinates.
/// * `radius` - The radius of the circle in pixels.
/// * `color` - The fill color of the circle.
pub fn draw_filled_circle<const C: usize>(
    img: &mut Image<u8, C>,
    center: (f32, f32),
    radius: f32,
    color: [u8; C],
) {
    if !(center.0.is_finite() && center.1.is_finite()) || radius < 0.0 {
        return;
    }

    let (cx, cy) = center;
    let r2 = radius * radius;

    let y_min = (cy - radius).floor() as i64;
    let y_max = (cy + radius).ceil() as i64;
    let x_min = (cx - radius).floor() as i64;
    let x_max = (cx + radius).ceil() as i64;

    for y in y_min..=y_max {
        let dy = y as f32 - cy;
        for x in x_min..=x_max {
            let dx = x as f32 - cx;
            if dx * dx + dy * dy <= r2 {
                set_pixel(img, x, y, color);
            }
        }
    }
}

/// Draws a one pixel wide circle outline on an image inplace.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `center` - The center of the circle as (x, y) in pixel coordinates.
/// * `radius` - The radius of the circle in pixels.
/// * `color` - The color of the outline.
pub fn draw_circle<const C: usize>(
    img: &mut Image<u8, C>,
    center: (f32, f32),
    radius: f32,
    color: [u8; C],
) {
    if !(center.0.is_finite() && center.1.is_finite()) || radius < 0.0 {
        return;
    }

    let (cx, cy) = center;
    let outer = (radius + 0.5) * (radius + 0.5);
    let inner = (radius - 0.5).max(0.0).powi(2);

    let y_min = (cy - radius - 1.0).floor() as i64;
    let y_max = (cy + radius + 1.0).ceil() as i64;
    let x_min = (cx - radius - 1.0).floor() as i64;
    let x_max = (cx + radius + 1.0).ceil() as i64;

    for y in y_min..=y_max {
        let dy = y as f32 - cy;
        for x in x_min..=x_max {
            let dx = x as f32 - cx;
            let d2 = dx * dx + dy * dy;
            if d2 <= outer && d2 >= inner {
                set_pixel(img, x, y, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depthify_image::{Image, ImageError, ImageSize};

    #[rustfmt::skip]
    #[test]
    fn test_draw_filled_circle() -> Result<(), ImageError> {
        let mut img = Image::new(
            ImageSize { width: 5, height: 5 }, vec![0u8; 25],
        )?;
        draw_filled_circle(&mut img, (2.0, 2.0), 1.0, [255]);
        assert_eq!(
            img.as_slice(),
            &[
                0,   0,   0,   0, 0,
                0,   0, 255,   0, 0,
                0, 255, 255, 255, 0,
                0,   0, 255,   0, 0,
                0,   0,   0,   0, 0,
            ]
        );
        Ok(())
    }

    #[rustfmt::skip]
    #[test]
    fn test_draw_filled_circle_clipped() -> Result<(), ImageError> {
        let mut img = Image::new(
            ImageSize { width: 3, height: 3 }, vec![0u8; 9],
        )?;
        draw_filled_circle(&mut img, (0.0, 0.0), 1.0, [7]);
        assert_eq!(
            img.as_slice(),
            &[
                7, 7, 0,
                7, 0, 0,
                0, 0, 0,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_draw_circle_outline() -> Result<(), ImageError> {
        let mut img = Image::<u8, 3>::from_size_val([7, 7].into(), 0)?;
        draw_circle(&mut img, (3.0, 3.0), 2.0, [1, 2, 3]);

        // the center stays untouched, the ring is painted
        assert_eq!(img.get_pixel(3, 3, 0)?, &0);
        assert_eq!(img.get_pixel(5, 3, 0)?, &1);
        assert_eq!(img.get_pixel(3, 1, 2)?, &3);
        // far corner stays untouched
        assert_eq!(img.get_pixel(0, 0, 0)?, &0);
        Ok(())
    }

    #[test]
    fn test_draw_non_finite_center_is_noop() -> Result<(), ImageError> {
        let mut img = Image::<u8, 1>::from_size_val([3, 3].into(), 0)?;
        draw_filled_circle(&mut img, (f32::NAN, 1.0), 1.0, [9]);
        assert!(img.as_slice().iter().all(|&v| v == 0));
        Ok(())
    }
}
