use std::str::FromStr;

use crate::error::FieldError;

/// A single depth annotation on the source image.
///
/// The position is a continuous pixel coordinate with the origin at the top-left
/// corner, `x` along the columns and `y` along the rows. Depth is a relative
/// distance where 0 is the nearest and 255 the farthest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// The column coordinate in pixels.
    pub x: f32,
    /// The row coordinate in pixels.
    pub y: f32,
    /// The relative depth of the sample.
    pub depth: u8,
}

impl Sample {
    /// Create a new sample.
    pub fn new(x: f32, y: f32, depth: u8) -> Self {
        Self { x, y, depth }
    }

    /// Create a sample from a real valued depth, rounded and clamped to `[0, 255]`.
    ///
    /// A NaN depth maps to 0.
    ///
    /// # Example
    ///
    /// ```
    /// use depthify_field::Sample;
    ///
    /// assert_eq!(Sample::clamped(1.0, 2.0, 300.0).depth, 255);
    /// assert_eq!(Sample::clamped(1.0, 2.0, -4.0).depth, 0);
    /// assert_eq!(Sample::clamped(1.0, 2.0, 63.6).depth, 64);
    /// ```
    pub fn clamped(x: f32, y: f32, depth: f32) -> Self {
        // `as` saturates and maps NaN to zero
        let depth = depth.round().clamp(0.0, 255.0) as u8;
        Self { x, y, depth }
    }

    /// The position of the sample as `(x, y)`.
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Whether both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl FromStr for Sample {
    type Err = FieldError;

    /// Parse a sample written as `x,y,depth`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FieldError::InvalidSample(s.to_string());

        let mut parts = s.split(',').map(|p| p.trim().parse::<f32>());
        let (x, y, depth) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(Ok(x)), Some(Ok(y)), Some(Ok(depth)), None) => (x, y, depth),
            _ => return Err(invalid()),
        };

        if !(x.is_finite() && y.is_finite() && depth.is_finite()) {
            return Err(invalid());
        }

        Ok(Sample::clamped(x, y, depth))
    }
}

/// An ordered collection of depth samples.
///
/// Samples keep their insertion order so that [`SampleStore::undo`] removes the
/// most recent one. Duplicated positions are allowed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleStore {
    samples: Vec<Sample>,
}

impl SampleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample at the given `(x, y)` position.
    pub fn add(&mut self, position: (f32, f32), depth: u8) {
        self.push(Sample::new(position.0, position.1, depth));
    }

    /// Append an already built sample.
    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    /// Remove the most recently added sample.
    ///
    /// Returns the removed sample, or `None` when the store was already empty.
    pub fn undo(&mut self) -> Option<Sample> {
        self.samples.pop()
    }

    /// Remove every sample.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// A read-only view of the samples in insertion order.
    pub fn snapshot(&self) -> &[Sample] {
        &self.samples
    }

    /// The number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the store holds no sample.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl Extend<Sample> for SampleStore {
    fn extend<I: IntoIterator<Item = Sample>>(&mut self, iter: I) {
        self.samples.extend(iter);
    }
}

impl FromIterator<Sample> for SampleStore {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_sample() -> Result<(), FieldError> {
        let s: Sample = "10, 20.5,128".parse()?;
        assert_eq!(s, Sample::new(10.0, 20.5, 128));

        let s: Sample = "1,2,999".parse()?;
        assert_eq!(s.depth, 255);

        assert!(matches!(
            "1,2".parse::<Sample>(),
            Err(FieldError::InvalidSample(_))
        ));
        assert!(matches!(
            "1,2,3,4".parse::<Sample>(),
            Err(FieldError::InvalidSample(_))
        ));
        assert!(matches!(
            "a,2,3".parse::<Sample>(),
            Err(FieldError::InvalidSample(_))
        ));
        assert!(matches!(
            "NaN,2,3".parse::<Sample>(),
            Err(FieldError::InvalidSample(_))
        ));
        Ok(())
    }

    #[test]
    fn store_add_undo_clear() {
        let mut store = SampleStore::new();
        assert!(store.is_empty());
        assert_eq!(store.undo(), None);

        store.add((1.0, 2.0), 10);
        store.add((3.0, 4.0), 20);
        store.add((1.0, 2.0), 30);
        assert_eq!(store.len(), 3);
        assert_eq!(
            store.snapshot().iter().map(|s| s.depth).collect::<Vec<_>>(),
            vec![10, 20, 30]
        );

        assert_eq!(store.undo(), Some(Sample::new(1.0, 2.0, 30)));
        assert_eq!(store.len(), 2);

        store.clear();
        assert!(store.is_empty());
        store.clear();
        assert_eq!(store.undo(), None);
    }

    #[test]
    fn store_from_iter() {
        let store: SampleStore = (0..5).map(|i| Sample::new(i as f32, 0.0, i)).collect();
        assert_eq!(store.len(), 5);
        assert_eq!(store.snapshot()[4].depth, 4);
    }
}
