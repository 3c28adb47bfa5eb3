//! Parameter types for image operations.
//!
//! These describe *what* to produce, not *how*. The batch runner holds one
//! [`TargetSpec`] for the whole run and shares it read-only between files and
//! strategies.

/// Ordered set of output heights every source image is resized to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSpec {
    heights: Vec<u32>,
}

impl TargetSpec {
    /// Heights produced for every image, in output order.
    pub const STANDARD_HEIGHTS: [u32; 3] = [1080, 720, 480];

    /// The fixed 1080p / 720p / 480p set.
    pub fn standard() -> Self {
        Self {
            heights: Self::STANDARD_HEIGHTS.to_vec(),
        }
    }

    /// Custom heights, for exercising the runner with cheap outputs in tests.
    #[cfg(test)]
    pub(crate) fn with_heights(heights: &[u32]) -> Self {
        Self {
            heights: heights.to_vec(),
        }
    }

    pub fn heights(&self) -> &[u32] {
        &self.heights
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }
}

impl Default for TargetSpec {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_heights_in_declared_order() {
        assert_eq!(TargetSpec::standard().heights(), &[1080, 720, 480]);
    }

    #[test]
    fn default_is_standard() {
        assert_eq!(TargetSpec::default(), TargetSpec::standard());
        assert_eq!(TargetSpec::default().len(), 3);
    }
}
