//! Configuration options for voxelization.

use serde::{Deserialize, Serialize};

use crate::error::{NeurocanvasError, Result};

/// Inside/outside test used to classify sample points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierKind {
    /// Nearest-feature test against angle-weighted pseudo-normals (default).
    /// Requires a closed, outward-oriented surface.
    #[default]
    PseudoNormal,
    /// Generalized winding number - tolerates small holes and inverted orientation.
    WindingNumber,
}

/// Options for a voxelization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoxelizeOptions {
    /// Grid spacing and voxel edge length, in mesh units.
    pub density: f64,

    /// Inside/outside test.
    pub classifier: ClassifierKind,

    /// Upper bound on sample grid points (`None` = unlimited).
    pub max_grid_points: Option<u64>,

    /// Whether to classify and build voxels on the rayon thread pool.
    /// Ignored when built without the `parallel` feature.
    pub parallel: bool,
}

impl Default for VoxelizeOptions {
    fn default() -> Self {
        Self {
            density: 0.1,
            classifier: ClassifierKind::PseudoNormal,
            max_grid_points: Some(100_000_000),
            parallel: true,
        }
    }
}

impl VoxelizeOptions {
    /// Creates default options with the given spacing.
    #[must_use]
    pub fn with_density(density: f64) -> Self {
        Self {
            density,
            ..Self::default()
        }
    }

    /// Sets the classifier.
    #[must_use]
    pub fn classifier(mut self, classifier: ClassifierKind) -> Self {
        self.classifier = classifier;
        self
    }

    /// Sets the grid point budget.
    #[must_use]
    pub fn max_grid_points(mut self, limit: Option<u64>) -> Self {
        self.max_grid_points = limit;
        self
    }

    /// Enables or disables parallel execution.
    #[must_use]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Parses options from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Serializes the options to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that the options describe a runnable voxelization.
    pub fn validate(&self) -> Result<()> {
        validate_density(self.density)?;
        if self.max_grid_points == Some(0) {
            return Err(NeurocanvasError::InvalidParameter(
                "max_grid_points must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Rejects non-positive or non-finite spacing.
pub fn validate_density(density: f64) -> Result<()> {
    if density.is_finite() && density > 0.0 {
        Ok(())
    } else {
        Err(NeurocanvasError::InvalidParameter(format!(
            "density must be positive and finite, got {density}"
        )))
    }
}
