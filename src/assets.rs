//! Seam to the external model loader
//!
//! The simulation never parses model files. It only needs each model's
//! bounding box at unit scale, which the host's loader provides.

use std::collections::HashMap;

use crate::sim::Aabb;

/// Errors surfaced by a model loader
#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    /// Loader has no such asset
    #[error("asset not found: {0}")]
    NotFound(String),

    /// Loader failed while fetching or parsing
    #[error("failed to load `{asset}`: {reason}")]
    Load { asset: String, reason: String },

    /// Loaded model has non-finite or empty bounds
    #[error("asset `{0}` has degenerate bounds")]
    DegenerateBounds(String),
}

/// Source of model-space bounding boxes, keyed by asset path
#[allow(async_fn_in_trait)]
pub trait ModelSource {
    async fn model_bounds(&self, asset: &str) -> Result<Aabb, AssetError>;
}

/// Reject bounds the simulation cannot use
pub fn check_bounds(asset: &str, bounds: Aabb) -> Result<Aabb, AssetError> {
    let size = bounds.size();
    if !bounds.is_finite() || size.x < 0.0 || size.y < 0.0 || size.z < 0.0 {
        return Err(AssetError::DegenerateBounds(asset.to_string()));
    }
    Ok(bounds)
}

/// In-memory model table, for headless runs and tests
#[derive(Debug, Clone, Default)]
pub struct StaticModels {
    models: HashMap<String, Aabb>,
}

impl StaticModels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, asset: impl Into<String>, bounds: Aabb) -> Self {
        self.models.insert(asset.into(), bounds);
        self
    }

    pub fn insert(&mut self, asset: impl Into<String>, bounds: Aabb) {
        self.models.insert(asset.into(), bounds);
    }
}

impl ModelSource for StaticModels {
    async fn model_bounds(&self, asset: &str) -> Result<Aabb, AssetError> {
        let bounds = self
            .models
            .get(asset)
            .copied()
            .ok_or_else(|| AssetError::NotFound(asset.to_string()))?;
        check_bounds(asset, bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_static_models_lookup() {
        let models = StaticModels::new().with("ball.gltf", Aabb::new(Vec3::splat(-0.5), Vec3::splat(0.5)));

        let bounds = pollster::block_on(models.model_bounds("ball.gltf")).unwrap();
        assert_eq!(bounds.size(), Vec3::ONE);

        let err = pollster::block_on(models.model_bounds("missing.gltf")).unwrap_err();
        assert!(matches!(err, AssetError::NotFound(ref name) if name == "missing.gltf"));
    }

    #[test]
    fn test_degenerate_bounds_rejected() {
        let models = StaticModels::new()
            .with("inverted", Aabb::new(Vec3::ONE, Vec3::ZERO))
            .with("nan", Aabb::new(Vec3::splat(f32::NAN), Vec3::ONE));

        assert!(matches!(
            pollster::block_on(models.model_bounds("inverted")),
            Err(AssetError::DegenerateBounds(_))
        ));
        assert!(matches!(
            pollster::block_on(models.model_bounds("nan")),
            Err(AssetError::DegenerateBounds(_))
        ));
    }
}
