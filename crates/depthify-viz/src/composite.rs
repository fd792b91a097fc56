use depthify_field::DepthField;
use depthify_image::Image;
use depthify_imgproc::parallel;

use crate::error::VizError;

/// Stack a luminance image and a depth field into a three channel image.
///
/// The first channel holds the luminance, the second the depth and the third is
/// zero.
///
/// # Arguments
///
/// * `luminance` - The grayscale version of the source image.
/// * `field` - The depth field computed over the same grid.
///
/// # Errors
///
/// Returns [`VizError::DimensionMismatch`] when the two inputs differ in size.
///
/// # Example
///
/// ```
/// use depthify_image::Image;
/// use depthify_viz::composite;
///
/// let luminance = Image::<u8, 1>::new([2, 1].into(), vec![10, 20]).unwrap();
/// let field = Image::<u8, 1>::new([2, 1].into(), vec![30, 40]).unwrap();
/// let out = composite(&luminance, &field).unwrap();
/// assert_eq!(out.as_slice(), &[10, 30, 0, 20, 40, 0]);
/// ```
pub fn composite(luminance: &Image<u8, 1>, field: &DepthField) -> Result<Image<u8, 3>, VizError> {
    if luminance.size() != field.size() {
        return Err(VizError::DimensionMismatch(luminance.size(), field.size()));
    }

    let mut dst = Image::<u8, 3>::from_size_val(field.size(), 0)?;
    parallel::par_iter_rows_two(luminance, field, &mut dst, |gray, depth, out| {
        out[0] = gray[0];
        out[1] = depth[0];
    });

    Ok(dst)
}
