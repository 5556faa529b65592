//! Ball Collector entry point
//!
//! The browser build is driven from JavaScript through `ball_collector::web`.
//! Natively this runs a headless autopilot session and logs what happens.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use ball_collector::sim::{Aabb, GameEvent, GameState, TickInput, WorldLayout, initialize, tick};
    use ball_collector::{GameConfig, StaticModels};
    use glam::Vec3;

    /// 60 fps frame delta
    const FRAME_MS: f32 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 60 * 5;

    /// Stand-in models: unit spheres' bounding boxes
    fn unit_models(layout: &WorldLayout) -> StaticModels {
        let unit = Aabb::new(Vec3::splat(-0.5), Vec3::splat(0.5));
        let mut models = StaticModels::new().with(layout.vehicle.asset.clone(), unit);
        for level in &layout.levels {
            models.insert(level.asset.clone(), unit);
        }
        models
    }

    /// Steer toward the nearest uncollected pickup on the active level
    fn autopilot(state: &GameState) -> TickInput {
        let Some(vehicle) = state.vehicle.as_ref() else {
            return TickInput::default();
        };
        let target = state
            .pickups
            .iter()
            .filter(|p| !p.inert && p.level == state.level())
            .min_by(|a, b| {
                let da = a.position.distance_squared(vehicle.position);
                let db = b.position.distance_squared(vehicle.position);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            });
        let Some(target) = target else {
            return TickInput::default();
        };

        let to_target = target.position - vehicle.position;
        let desired = to_target.x.atan2(to_target.z);
        let error = ball_collector::wrap_angle(desired - vehicle.heading);

        let mut keys = vec!["ArrowUp"];
        if error > 0.05 {
            keys.push("ArrowLeft");
        } else if error < -0.05 {
            keys.push("ArrowRight");
        }
        TickInput::new(keys)
    }

    pub fn run() {
        let config = match std::env::args().nth(1) {
            Some(path) => {
                let loaded = std::fs::read_to_string(&path)
                    .map_err(|e| e.to_string())
                    .and_then(|json| GameConfig::from_json(&json).map_err(|e| e.to_string()));
                match loaded {
                    Ok(config) => config,
                    Err(e) => {
                        log::error!("Could not load config `{path}`: {e}");
                        std::process::exit(1);
                    }
                }
            }
            None => GameConfig::default(),
        };

        let models = unit_models(&config.layout);
        let mut state = match pollster::block_on(initialize(&models, config)) {
            Ok(state) => state,
            Err(e) => {
                log::error!("Initialization failed: {e}");
                std::process::exit(1);
            }
        };

        for frame in 0..MAX_FRAMES {
            let input = autopilot(&state);
            for event in tick(&mut state, &input, FRAME_MS) {
                match event {
                    GameEvent::GameComplete { level } => {
                        log::info!("GAME OVER after {frame} frames ({level} levels)");
                        return;
                    }
                    other => log::debug!("frame {frame}: {other:?}"),
                }
            }
        }

        log::warn!(
            "Stopped after {MAX_FRAMES} frames on level {} of {}",
            state.level(),
            state.progress.terminal
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Ball Collector (native, headless) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}
