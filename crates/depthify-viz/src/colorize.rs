use depthify_field::DepthField;
use depthify_image::Image;
use depthify_imgproc::parallel;

use crate::{
    colormap::{depth_lut, ColorTransferFunction},
    error::VizError,
};

/// An RGBA raster produced by a color transfer function.
pub type ColorRaster = Image<u8, 4>;

/// Colorize a depth field through a color transfer function.
///
/// Every pixel is normalized with [`normalize_depth`](crate::normalize_depth) over
/// the `[0, 255]` span before the lookup, so near pixels take the top of the ramp.
///
/// # Arguments
///
/// * `field` - The depth field to colorize.
/// * `cmap` - The color transfer function.
///
/// # Returns
///
/// An RGBA raster with the size of the field.
pub fn colorize<C>(field: &DepthField, cmap: &C) -> Result<ColorRaster, VizError>
where
    C: ColorTransferFunction + ?Sized,
{
    let mut dst = ColorRaster::from_size_val(field.size(), 0)?;
    colorize_into(field, cmap, &mut dst)?;
    Ok(dst)
}

/// Colorize a depth field into an RGB raster, dropping the opaque alpha channel.
pub fn colorize_rgb<C>(field: &DepthField, cmap: &C) -> Result<Image<u8, 3>, VizError>
where
    C: ColorTransferFunction + ?Sized,
{
    let mut dst = Image::<u8, 3>::from_size_val(field.size(), 0)?;
    colorize_into(field, cmap, &mut dst)?;
    Ok(dst)
}

/// Colorize into a preallocated RGB or RGBA raster. Only called with `N` of 3 or 4.
fn colorize_into<C, const N: usize>(
    field: &DepthField,
    cmap: &C,
    dst: &mut Image<u8, N>,
) -> Result<(), VizError>
where
    C: ColorTransferFunction + ?Sized,
{
    if field.size() != dst.size() {
        return Err(VizError::DimensionMismatch(field.size(), dst.size()));
    }

    let lut = depth_lut(cmap);
    parallel::par_iter_rows(field, dst, |src_pixel, dst_pixel| {
        let color = &lut[src_pixel[0] as usize];
        dst_pixel.copy_from_slice(&color[..N]);
    });

    Ok(())
}
