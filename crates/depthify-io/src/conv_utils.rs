use depthify_image::{Image, ImageSize};

use crate::error::IoError;

/// Utility function to turn an interleaved 8-bit buffer with `channels` samples
/// per pixel into an RGB8 image.
///
/// Gray and gray+alpha buffers are replicated, RGBA buffers drop the alpha channel.
pub fn rgb8_from_interleaved(
    buf: Vec<u8>,
    size: ImageSize,
    channels: usize,
) -> Result<Image<u8, 3>, IoError> {
    let rgb = match channels {
        3 => buf,
        1 => buf.iter().flat_map(|&v| [v, v, v]).collect(),
        2 => buf.chunks_exact(2).flat_map(|p| [p[0], p[0], p[0]]).collect(),
        4 => buf
            .chunks_exact(4)
            .flat_map(|p| [p[0], p[1], p[2]])
            .collect(),
        n => return Err(IoError::UnsupportedChannelCount(n)),
    };

    Ok(Image::new(size, rgb)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_gray() -> Result<(), IoError> {
        let img = rgb8_from_interleaved(vec![1, 2], [2, 1].into(), 1)?;
        assert_eq!(img.as_slice(), &[1, 1, 1, 2, 2, 2]);
        Ok(())
    }

    #[test]
    fn expand_gray_alpha() -> Result<(), IoError> {
        let img = rgb8_from_interleaved(vec![9, 255], [1, 1].into(), 2)?;
        assert_eq!(img.as_slice(), &[9, 9, 9]);
        Ok(())
    }

    #[test]
    fn drop_alpha() -> Result<(), IoError> {
        let img = rgb8_from_interleaved(vec![1, 2, 3, 255, 4, 5, 6, 0], [2, 1].into(), 4)?;
        assert_eq!(img.as_slice(), &[1, 2, 3, 4, 5, 6]);
        Ok(())
    }

    #[test]
    fn unsupported_channels() {
        let res = rgb8_from_interleaved(vec![0; 5], [1, 1].into(), 5);
        assert!(matches!(res, Err(IoError::UnsupportedChannelCount(5))));
    }
}
