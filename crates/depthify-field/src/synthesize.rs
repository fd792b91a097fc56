use depthify_image::{Image, ImageSize};
use depthify_imgproc::parallel;

use crate::{error::FieldError, sample::Sample, triangulation::Triangulation};

/// A dense single channel depth raster with the size of the source image.
pub type DepthField = Image<u8, 1>;

/// Barycentric weights below this value put a pixel outside a triangle.
const INSIDE_TOLERANCE: f64 = -1e-9;

/// Configuration of the depth field synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthesizerConfig {
    /// Minimum number of samples to interpolate. Below it the field is blank.
    pub min_samples: usize,
    /// Value of the pixels outside the convex hull of the samples.
    pub fill_value: u8,
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self {
            min_samples: 4,
            fill_value: 255,
        }
    }
}

impl SynthesizerConfig {
    /// Set the minimum number of samples, never lower than the three a triangle needs.
    pub fn with_min_samples(mut self, min_samples: usize) -> Self {
        self.min_samples = min_samples.max(3);
        self
    }

    /// Set the value used outside the convex hull and for blank fields.
    pub fn with_fill_value(mut self, fill_value: u8) -> Self {
        self.fill_value = fill_value;
        self
    }
}

/// A field filled with a single value.
///
/// # Errors
///
/// Returns [`FieldError::InvalidGridSize`] when a dimension is zero.
pub fn blank_field(size: ImageSize, fill_value: u8) -> Result<DepthField, FieldError> {
    if size.is_empty() {
        return Err(FieldError::InvalidGridSize(size.width, size.height));
    }
    Ok(DepthField::from_size_val(size, fill_value)?)
}

/// Interpolate a dense depth field from sparse samples with the default configuration.
///
/// See [`DepthFieldSynthesizer::synthesize`].
pub fn synthesize(samples: &[Sample], size: ImageSize) -> Result<DepthField, FieldError> {
    DepthFieldSynthesizer::default().synthesize(samples, size)
}

/// Turns sparse depth samples into a dense depth field.
///
/// The samples are triangulated with a Delaunay triangulation and every pixel
/// inside a triangle gets the linear (barycentric) blend of its three vertices.
/// Pixels are evaluated at their integer `(col, row)` coordinates.
#[derive(Debug, Clone, Default)]
pub struct DepthFieldSynthesizer {
    config: SynthesizerConfig,
}

impl DepthFieldSynthesizer {
    /// Create a synthesizer with the given configuration.
    pub fn new(config: SynthesizerConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &SynthesizerConfig {
        &self.config
    }

    /// Compute the depth field over a `size` grid.
    ///
    /// With fewer samples than [`SynthesizerConfig::min_samples`], or samples that
    /// cannot be triangulated (coincident, collinear, non-finite), the field is
    /// uniformly the fill value. Pixels outside the convex hull of the samples get
    /// the fill value too. Interpolated values are clamped to `[0, 255]` and
    /// truncated.
    ///
    /// # Arguments
    ///
    /// * `samples` - The depth samples in image pixel coordinates.
    /// * `size` - The size of the output field.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidGridSize`] when a dimension is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use depthify_field::{DepthFieldSynthesizer, Sample};
    ///
    /// let samples = [
    ///     Sample::new(0.0, 0.0, 0),
    ///     Sample::new(4.0, 0.0, 40),
    ///     Sample::new(0.0, 4.0, 80),
    ///     Sample::new(4.0, 4.0, 120),
    /// ];
    /// let field = DepthFieldSynthesizer::default()
    ///     .synthesize(&samples, [5, 5].into())
    ///     .unwrap();
    /// assert_eq!(field.get_pixel(4, 0, 0).unwrap(), &40);
    /// ```
    pub fn synthesize(
        &self,
        samples: &[Sample],
        size: ImageSize,
    ) -> Result<DepthField, FieldError> {
        let fill_value = self.config.fill_value;
        let mut field = blank_field(size, fill_value)?;

        if samples.len() < self.config.min_samples {
            log::debug!(
                "{} samples, at least {} needed, blank field",
                samples.len(),
                self.config.min_samples
            );
            return Ok(field);
        }

        let points = samples
            .iter()
            .map(|s| (s.x as f64, s.y as f64))
            .collect::<Vec<_>>();

        let triangulation = match Triangulation::new(&points) {
            Ok(triangulation) => triangulation,
            Err(err) => {
                log::warn!("cannot interpolate the samples, blank field: {err}");
                return Ok(field);
            }
        };

        let facets = triangulation
            .triangles()
            .iter()
            .filter_map(|tri| Facet::new(tri.map(|i| samples[i])))
            .collect::<Vec<_>>();

        let last_col = (size.width - 1) as f64;

        parallel::par_fill_rows(&mut field, |row, row_data| {
            let y = row as f64;
            let mut covered = vec![false; row_data.len()];

            for facet in facets.iter().filter(|f| f.y_min <= y && y <= f.y_max) {
                if facet.x_max < 0.0 || facet.x_min > last_col {
                    continue;
                }
                let x0 = facet.x_min.ceil().max(0.0) as usize;
                let x1 = facet.x_max.floor().min(last_col) as usize;

                for col in x0..=x1 {
                    if covered[col] {
                        continue;
                    }
                    if let Some(value) = facet.interpolate(col as f64, y) {
                        row_data[col] = quantize(value);
                        covered[col] = true;
                    }
                }
            }
        });

        Ok(field)
    }
}

/// Clamp to the depth range and truncate toward zero.
#[inline]
fn quantize(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

/// A triangle of samples ready for rasterization.
struct Facet {
    vertices: [(f64, f64); 3],
    depths: [f64; 3],
    det: f64,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Facet {
    /// Returns `None` for a zero area triangle.
    fn new(samples: [Sample; 3]) -> Option<Self> {
        let vertices = samples.map(|s| (s.x as f64, s.y as f64));
        let depths = samples.map(|s| s.depth as f64);
        let [(x1, y1), (x2, y2), (x3, y3)] = vertices;

        let det = (y2 - y3) * (x1 - x3) + (x3 - x2) * (y1 - y3);
        if det == 0.0 {
            return None;
        }

        Some(Self {
            vertices,
            depths,
            det,
            x_min: x1.min(x2).min(x3),
            x_max: x1.max(x2).max(x3),
            y_min: y1.min(y2).min(y3),
            y_max: y1.max(y2).max(y3),
        })
    }

    /// The linear blend of the vertex depths at `(x, y)`, if the point is inside.
    ///
    /// At a vertex the weights are exactly one and zero, so the vertex depth is
    /// returned unchanged.
    #[inline]
    fn interpolate(&self, x: f64, y: f64) -> Option<f64> {
        let [(x1, y1), (x2, y2), (x3, y3)] = self.vertices;

        let l1 = ((y2 - y3) * (x - x3) + (x3 - x2) * (y - y3)) / self.det;
        let l2 = ((y3 - y1) * (x - x3) + (x1 - x3) * (y - y3)) / self.det;
        let l3 = 1.0 - l1 - l2;

        if l1 < INSIDE_TOLERANCE || l2 < INSIDE_TOLERANCE || l3 < INSIDE_TOLERANCE {
            return None;
        }

        let [d1, d2, d3] = self.depths;
        Some(l1 * d1 + l2 * d2 + l3 * d3)
    }
}
