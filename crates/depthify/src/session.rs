use std::path::{Path, PathBuf};

use depthify_field::{DepthField, DepthFieldSynthesizer, Sample, SampleStore, SynthesizerConfig};
use depthify_image::{Image, ImageSize};
use depthify_imgproc::color::gray_from_rgb_u8;
use depthify_io::functional::{
    export_path_with_suffix, read_image_any_rgb8, write_image_any_gray8, write_image_any_rgb8,
    ImageFormat,
};
use depthify_viz::{
    color_for_value, colorize, colorize_rgb, composite, draw_samples, render_colorbar,
    ColorMap, ColorRaster, ColorTransferFunction, Orientation,
};

use crate::error::SessionError;

/// Suffix of the default depth map export path.
const DEPTH_MAP_SUFFIX: &str = "_map";

/// Suffix of the default composite export path.
const COMPOSITE_SUFFIX: &str = "_depth";

/// The depth range shown by previews and color bars.
const DEPTH_SPAN: (f32, f32) = (0.0, 255.0);

/// How the depth map is written on export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DepthExportMode {
    /// The raw depth bytes as a single channel image.
    #[default]
    Grayscale,
    /// The depth map colored through the session colormap.
    Colorized,
}

/// Configuration of an annotation session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// The color transfer function of the previews.
    pub colormap: ColorMap,
    /// The depth field synthesis settings.
    pub synthesizer: SynthesizerConfig,
    /// How the depth map is exported.
    pub depth_export_mode: DepthExportMode,
    /// The quality of JPEG exports, from 0 to 100.
    pub jpeg_quality: u8,
    /// The radius of the sample markers in the annotated preview.
    pub marker_radius: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            colormap: ColorMap::default(),
            synthesizer: SynthesizerConfig::default(),
            depth_export_mode: DepthExportMode::default(),
            jpeg_quality: 95,
            marker_radius: 4.0,
        }
    }
}

impl SessionConfig {
    /// Set the colormap.
    pub fn with_colormap(mut self, colormap: ColorMap) -> Self {
        self.colormap = colormap;
        self
    }

    /// Set the depth field synthesis settings.
    pub fn with_synthesizer(mut self, synthesizer: SynthesizerConfig) -> Self {
        self.synthesizer = synthesizer;
        self
    }

    /// Set how the depth map is exported.
    pub fn with_depth_export_mode(mut self, mode: DepthExportMode) -> Self {
        self.depth_export_mode = mode;
        self
    }

    /// Set the JPEG export quality, capped at 100.
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.min(100);
        self
    }

    /// Set the radius of the sample markers.
    pub fn with_marker_radius(mut self, radius: f32) -> Self {
        self.marker_radius = radius.max(0.0);
        self
    }
}

/// The image being annotated, with the data derived from it once on load.
#[derive(Debug, Clone)]
struct SourceImage {
    path: Option<PathBuf>,
    rgb: Image<u8, 3>,
    luminance: Image<u8, 1>,
}

/// An annotation session over a single source image.
///
/// The session owns the source image and the depth samples placed on it. Every
/// mutation recomputes the depth field before returning, so the derived rasters
/// always reflect the current samples.
///
/// # Example
///
/// ```
/// use depthify::{image::Image, Session};
///
/// let mut session = Session::default();
/// session.set_image(Image::<u8, 3>::from_size_val([100, 100].into(), 128).unwrap()).unwrap();
///
/// session.add_point((10.0, 10.0), 0).unwrap();
/// session.add_point((90.0, 10.0), 255).unwrap();
/// session.add_point((10.0, 90.0), 128).unwrap();
/// session.add_point((90.0, 90.0), 64).unwrap();
///
/// let field = session.depth_field().unwrap();
/// assert_eq!(field.get_pixel(10, 10, 0).unwrap(), &0);
/// assert_eq!(field.get_pixel(0, 0, 0).unwrap(), &255);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: SessionConfig,
    synthesizer: DepthFieldSynthesizer,
    source: Option<SourceImage>,
    samples: SampleStore,
    field: Option<DepthField>,
}

impl Session {
    /// Create a session with the given configuration and no image.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            synthesizer: DepthFieldSynthesizer::new(config.synthesizer),
            config,
            source: None,
            samples: SampleStore::new(),
            field: None,
        }
    }

    /// The configuration of the session.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The colormap of the previews.
    pub fn colormap(&self) -> ColorMap {
        self.config.colormap
    }

    /// Change the colormap. Samples and depth field are left untouched.
    pub fn set_colormap(&mut self, colormap: ColorMap) {
        log::debug!("colormap set to {colormap}");
        self.config.colormap = colormap;
    }

    /// Load the source image from a JPEG or PNG file.
    ///
    /// Any previous samples are discarded. On error the session is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Io`] when the file is missing, has an unsupported
    /// extension or cannot be decoded.
    pub fn load_image(&mut self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let path = path.as_ref();
        // reject unsupported files before decoding anything
        ImageFormat::from_path(path)?;
        let rgb = read_image_any_rgb8(path)?;
        log::debug!("loaded `{}` ({})", path.display(), rgb.size());
        self.replace_source(Some(path.to_path_buf()), rgb)
    }

    /// Use an already decoded RGB image as the source.
    ///
    /// Any previous samples are discarded. Without a file path the default export
    /// paths are not available.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptyImage`] if the image has no pixels.
    pub fn set_image(&mut self, rgb: Image<u8, 3>) -> Result<(), SessionError> {
        self.replace_source(None, rgb)
    }

    fn replace_source(
        &mut self,
        path: Option<PathBuf>,
        rgb: Image<u8, 3>,
    ) -> Result<(), SessionError> {
        if rgb.size().is_empty() {
            return Err(SessionError::EmptyImage);
        }

        let mut luminance = Image::<u8, 1>::from_size_val(rgb.size(), 0)?;
        gray_from_rgb_u8(&rgb, &mut luminance)?;
        let field = self.synthesizer.synthesize(&[], rgb.size())?;

        self.source = Some(SourceImage {
            path,
            rgb,
            luminance,
        });
        self.samples.clear();
        self.field = Some(field);
        Ok(())
    }

    /// Drop the source image together with its samples and depth field.
    pub fn clear_image(&mut self) {
        self.source = None;
        self.samples.clear();
        self.field = None;
    }

    /// Whether a source image is loaded.
    pub fn has_image(&self) -> bool {
        self.source.is_some()
    }

    /// The size of the source image.
    pub fn image_size(&self) -> Option<ImageSize> {
        self.source.as_ref().map(|source| source.rgb.size())
    }

    /// The file the source image was loaded from.
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_ref().and_then(|source| source.path.as_deref())
    }

    /// The source image.
    pub fn source_image(&self) -> Result<&Image<u8, 3>, SessionError> {
        Ok(&self.source()?.rgb)
    }

    /// The grayscale version of the source image.
    pub fn luminance(&self) -> Result<&Image<u8, 1>, SessionError> {
        Ok(&self.source()?.luminance)
    }

    /// The samples in insertion order.
    pub fn samples(&self) -> &[Sample] {
        self.samples.snapshot()
    }

    /// Add a depth sample at `(x, y)` in source image pixels.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoImageLoaded`] without a source image.
    pub fn add_point(&mut self, position: (f32, f32), depth: u8) -> Result<(), SessionError> {
        self.source()?;
        self.samples.add(position, depth);
        log::debug!(
            "added sample ({}, {}) depth {depth}, {} samples",
            position.0,
            position.1,
            self.samples.len()
        );
        self.recompute()
    }

    /// Remove the most recent sample.
    ///
    /// Returns the removed sample, `None` when there was nothing to undo.
    pub fn undo(&mut self) -> Result<Option<Sample>, SessionError> {
        let removed = self.samples.undo();
        if removed.is_some() {
            log::debug!("undo, {} samples left", self.samples.len());
            self.recompute()?;
        }
        Ok(removed)
    }

    /// Remove every sample.
    pub fn clear_points(&mut self) -> Result<(), SessionError> {
        if self.samples.is_empty() {
            return Ok(());
        }
        self.samples.clear();
        self.recompute()
    }

    /// The depth field of the current samples.
    pub fn depth_field(&self) -> Result<&DepthField, SessionError> {
        self.field.as_ref().ok_or(SessionError::NoImageLoaded)
    }

    /// The depth field colored through the session colormap.
    pub fn depth_preview(&self) -> Result<ColorRaster, SessionError> {
        Ok(colorize(self.depth_field()?, &self.config.colormap)?)
    }

    /// The source luminance and the depth field stacked as `(luminance, depth, 0)`.
    pub fn composite(&self) -> Result<Image<u8, 3>, SessionError> {
        Ok(composite(self.luminance()?, self.depth_field()?)?)
    }

    /// The source image with every sample drawn as a dot of its depth color.
    pub fn annotated_preview(&self) -> Result<Image<u8, 3>, SessionError> {
        let mut preview = self.source()?.rgb.clone();
        draw_samples(
            &mut preview,
            self.samples.snapshot(),
            &self.config.colormap,
            self.config.marker_radius,
        );
        Ok(preview)
    }

    /// The color bar of the full depth range in the session colormap.
    pub fn colorbar(
        &self,
        length: usize,
        thickness: usize,
        orientation: Orientation,
    ) -> Result<ColorRaster, SessionError> {
        Ok(render_colorbar(
            &self.config.colormap,
            DEPTH_SPAN,
            length,
            thickness,
            orientation,
        )?)
    }

    /// The color a depth value gets in the depth preview.
    pub fn preview_color(&self, depth: u8) -> [u8; 4] {
        color_for_value(&self.config.colormap, depth as f32, DEPTH_SPAN)
    }

    /// The default depth map path, `<stem>_map.<ext>` next to the source file.
    pub fn suggested_depth_map_path(&self) -> Option<PathBuf> {
        self.source_path()
            .map(|path| export_path_with_suffix(path, DEPTH_MAP_SUFFIX))
    }

    /// The default composite path, `<stem>_depth.<ext>` next to the source file.
    pub fn suggested_composite_path(&self) -> Option<PathBuf> {
        self.source_path()
            .map(|path| export_path_with_suffix(path, COMPOSITE_SUFFIX))
    }

    /// Write the depth map, to `path` or to the suggested path.
    ///
    /// The encoder is chosen from the destination extension and the content from
    /// [`SessionConfig::depth_export_mode`].
    ///
    /// # Returns
    ///
    /// The path written to.
    pub fn export_depth_map(&self, path: Option<&Path>) -> Result<PathBuf, SessionError> {
        let field = self.depth_field()?;
        let path = self.export_destination(path, self.suggested_depth_map_path())?;

        match self.config.depth_export_mode {
            DepthExportMode::Grayscale => {
                write_image_any_gray8(&path, field, self.config.jpeg_quality)?
            }
            DepthExportMode::Colorized => {
                let rgb = colorize_rgb(field, &self.config.colormap)?;
                write_image_any_rgb8(&path, &rgb, self.config.jpeg_quality)?
            }
        }

        log::debug!("depth map written to `{}`", path.display());
        Ok(path)
    }

    /// Write the composite image, to `path` or to the suggested path.
    ///
    /// # Returns
    ///
    /// The path written to.
    pub fn export_composite(&self, path: Option<&Path>) -> Result<PathBuf, SessionError> {
        let composite = self.composite()?;
        let path = self.export_destination(path, self.suggested_composite_path())?;

        write_image_any_rgb8(&path, &composite, self.config.jpeg_quality)?;

        log::debug!("composite written to `{}`", path.display());
        Ok(path)
    }

    fn export_destination(
        &self,
        path: Option<&Path>,
        suggested: Option<PathBuf>,
    ) -> Result<PathBuf, SessionError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => suggested.ok_or(SessionError::NoExportPath)?,
        };
        // fail before encoding anything
        ImageFormat::from_path(&path)?;
        Ok(path)
    }

    fn source(&self) -> Result<&SourceImage, SessionError> {
        self.source.as_ref().ok_or(SessionError::NoImageLoaded)
    }

    fn recompute(&mut self) -> Result<(), SessionError> {
        let Some(size) = self.image_size() else {
            self.field = None;
            return Ok(());
        };
        self.field = Some(self.synthesizer.synthesize(self.samples.snapshot(), size)?);
        Ok(())
    }
}
