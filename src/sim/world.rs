//! World layout and initialization
//!
//! Pickup placement is drawn from a seeded PCG stream, so a layout plus its
//! model bounds always produces the same world.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::state::{GameState, WorldBounds};
use crate::assets::{AssetError, ModelSource};
use crate::consts::*;
use crate::tuning::{GameConfig, TuningError};

/// Vehicle model and its scale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleLayout {
    pub asset: String,
    pub scale: f32,
}

impl Default for VehicleLayout {
    fn default() -> Self {
        Self {
            asset: "assets/worn_baseball_ball/scene.gltf".to_string(),
            scale: VEHICLE_SCALE,
        }
    }
}

/// One level's worth of pickups, all from the same model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelLayout {
    pub asset: String,
    pub count: u32,
    pub scale: f32,
    /// Spawn rectangle on the ground plane: (x, z) lower corner
    pub spawn_min: [f32; 2],
    /// Spawn rectangle upper corner (exclusive)
    pub spawn_max: [f32; 2],
}

/// Static description of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldLayout {
    pub seed: u64,
    pub half_extent: f32,
    pub vehicle: VehicleLayout,
    /// Index in this list is the level number
    pub levels: Vec<LevelLayout>,
}

impl Default for WorldLayout {
    fn default() -> Self {
        Self {
            seed: 0x5EED_BA11,
            half_extent: WORLD_HALF_EXTENT,
            vehicle: VehicleLayout::default(),
            levels: vec![
                LevelLayout {
                    asset: "assets/dragon_ball/scene.gltf".to_string(),
                    count: 2,
                    scale: 10.0,
                    spawn_min: [-5.0, -5.0],
                    spawn_max: [45.0, 45.0],
                },
                LevelLayout {
                    asset: "assets/poke_ball/scene.gltf".to_string(),
                    count: 2,
                    scale: 0.5,
                    spawn_min: [-4.0, -4.0],
                    spawn_max: [46.0, 46.0],
                },
            ],
        }
    }
}

impl WorldLayout {
    pub fn validate(&self, terminal_level: u32) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: String) -> TuningError {
            TuningError::Invalid { field, reason }
        }

        if !(self.half_extent.is_finite() && self.half_extent > 0.0) {
            return Err(invalid("half_extent", "must be finite and > 0".to_string()));
        }
        if !(self.vehicle.scale.is_finite() && self.vehicle.scale > 0.0) {
            return Err(invalid("vehicle.scale", "must be finite and > 0".to_string()));
        }
        if (self.levels.len() as u32) < terminal_level {
            return Err(invalid(
                "levels",
                format!("{} levels configured but terminal level is {terminal_level}", self.levels.len()),
            ));
        }
        for (index, level) in self.levels.iter().enumerate() {
            if level.count == 0 {
                return Err(invalid("levels.count", format!("level {index} has no pickups")));
            }
            if !(level.scale.is_finite() && level.scale >= 0.0) {
                return Err(invalid("levels.scale", format!("level {index} scale must be finite and >= 0")));
            }
            let finite = (0..2).all(|axis| {
                let (lo, hi) = (level.spawn_min[axis], level.spawn_max[axis]);
                lo.is_finite() && hi.is_finite() && (hi - lo).is_finite()
            });
            if !finite {
                return Err(invalid("levels.spawn", format!("level {index} spawn rectangle must be finite")));
            }
            let ordered = (0..2).all(|axis| level.spawn_min[axis] < level.spawn_max[axis]);
            if !ordered {
                return Err(invalid("levels.spawn", format!("level {index} spawn rectangle is empty")));
            }
        }
        Ok(())
    }
}

/// Errors surfaced by world initialization
#[derive(thiserror::Error, Debug)]
pub enum InitError {
    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Config(#[from] TuningError),
}

impl GameState {
    /// Build a ready world from already-loaded model bounds.
    ///
    /// `level_bounds[i]` is the unit-scale model box for level `i`.
    pub fn build(config: GameConfig, vehicle_bounds: Aabb, level_bounds: &[Aabb]) -> Result<Self, InitError> {
        config.validate()?;
        let GameConfig { tuning, layout } = config;

        let mut state = GameState::loading(tuning, WorldBounds::square(layout.half_extent));
        state.spawn_vehicle(vehicle_bounds, layout.vehicle.scale);

        let mut rng = Pcg32::seed_from_u64(layout.seed);
        for (index, level) in layout.levels.iter().enumerate() {
            let bounds = level_bounds
                .get(index)
                .copied()
                .ok_or_else(|| AssetError::NotFound(level.asset.clone()))?;
            // Rest on the ground plane
            let lift = -bounds.scaled(level.scale).min.y;

            for _ in 0..level.count {
                let x = rng.random_range(level.spawn_min[0]..level.spawn_max[0]);
                let z = rng.random_range(level.spawn_min[1]..level.spawn_max[1]);
                state.spawn_pickup(index as u32, Vec3::new(x, lift, z), level.scale, bounds);
            }
        }

        log::info!(
            "World ready: {} pickups over {} levels, seed {:#x}",
            state.pickups.len(),
            layout.levels.len(),
            layout.seed
        );
        Ok(state)
    }
}

/// Load every model through `models` and build the world.
///
/// Any loader failure aborts initialization; there is no retry.
pub async fn initialize<M: ModelSource>(models: &M, config: GameConfig) -> Result<GameState, InitError> {
    config.validate()?;

    let vehicle_bounds = models.model_bounds(&config.layout.vehicle.asset).await?;
    let mut level_bounds = Vec::with_capacity(config.layout.levels.len());
    for level in &config.layout.levels {
        level_bounds.push(models.model_bounds(&level.asset).await?);
    }

    GameState::build(config, vehicle_bounds, &level_bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::StaticModels;

    fn unit() -> Aabb {
        Aabb::new(Vec3::splat(-0.5), Vec3::splat(0.5))
    }

    fn default_models() -> StaticModels {
        let layout = WorldLayout::default();
        let mut models = StaticModels::new().with(layout.vehicle.asset.clone(), unit());
        for level in &layout.levels {
            models.insert(level.asset.clone(), unit());
        }
        models
    }

    #[test]
    fn test_initialize_default_world() {
        let state = pollster::block_on(initialize(&default_models(), GameConfig::default())).unwrap();

        assert!(state.is_ready());
        assert_eq!(state.pickups.len(), 4);
        assert_eq!(state.remaining_in_level(0), 2);
        assert_eq!(state.remaining_in_level(1), 2);
        assert_eq!(state.level(), 0);

        for pickup in &state.pickups {
            let b = pickup.world_bounds();
            assert!(b.min.y.abs() < 1e-5, "pickup should rest on the ground");
            assert!(pickup.position.x >= -5.0 && pickup.position.x < 46.0);
        }
    }

    #[test]
    fn test_same_seed_same_world() {
        let a = GameState::build(GameConfig::default(), unit(), &[unit(), unit()]).unwrap();
        let b = GameState::build(GameConfig::default(), unit(), &[unit(), unit()]).unwrap();
        let positions = |s: &GameState| s.pickups.iter().map(|p| p.position).collect::<Vec<_>>();
        assert_eq!(positions(&a), positions(&b));

        let mut config = GameConfig::default();
        config.layout.seed = 7;
        let c = GameState::build(config, unit(), &[unit(), unit()]).unwrap();
        assert_ne!(positions(&a), positions(&c));
    }

    #[test]
    fn test_missing_asset_rejects_init() {
        let models = StaticModels::new().with(VehicleLayout::default().asset, unit());
        let err = pollster::block_on(initialize(&models, GameConfig::default())).unwrap_err();
        assert!(matches!(err, InitError::Asset(AssetError::NotFound(_))));
    }

    #[test]
    fn test_unbounded_spawn_rectangle_rejected() {
        // Width overflows f32 even though both ends are finite
        let wide = r#"{ "layout": { "levels": [
            { "asset": "a", "count": 1, "scale": 1.0, "spawn_min": [-3e38, 0.0], "spawn_max": [3e38, 1.0] },
            { "asset": "b", "count": 1, "scale": 1.0, "spawn_min": [0.0, 0.0], "spawn_max": [1.0, 1.0] }
        ] } }"#;
        let err = GameConfig::from_json(wide).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "levels.spawn", .. }));

        let mut config = GameConfig::default();
        config.layout.levels[0].spawn_min = [f32::NEG_INFINITY, 0.0];
        let err = GameState::build(config, unit(), &[unit(), unit()]).unwrap_err();
        assert!(matches!(err, InitError::Config(TuningError::Invalid { field: "levels.spawn", .. })));
    }

    #[test]
    fn test_layout_must_cover_terminal_level() {
        let mut config = GameConfig::default();
        config.tuning.terminal_level = 4;
        let err = GameState::build(config, unit(), &[unit(), unit()]).unwrap_err();
        assert!(matches!(err, InitError::Config(TuningError::Invalid { field: "levels", .. })));
    }
}
