//! Browser host glue
//!
//! The page owns rendering, model loading and the frame loop. It hands us a
//! loader callback once, then calls `step` every animation frame with the
//! frame delta and the currently held key codes.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::assets::{AssetError, ModelSource, check_bounds};
use crate::sim::{Aabb, GameEvent, GameState, TickInput, initialize, tick};
use crate::tuning::GameConfig;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Ball Collector starting...");
}

/// Loader backed by a JS function `(asset) => Promise<[minX, minY, minZ, maxX, maxY, maxZ]>`
struct JsModelSource {
    loader: js_sys::Function,
}

fn load_error(asset: &str, err: JsValue) -> AssetError {
    AssetError::Load {
        asset: asset.to_string(),
        reason: format!("{err:?}"),
    }
}

impl ModelSource for JsModelSource {
    async fn model_bounds(&self, asset: &str) -> Result<Aabb, AssetError> {
        let result = self
            .loader
            .call1(&JsValue::NULL, &JsValue::from_str(asset))
            .map_err(|e| load_error(asset, e))?;
        let promise: js_sys::Promise = result
            .dyn_into()
            .map_err(|e| load_error(asset, e))?;
        let value = JsFuture::from(promise)
            .await
            .map_err(|e| load_error(asset, e))?;

        let array = js_sys::Array::from(&value);
        let mut numbers = [0.0f32; 6];
        for (i, slot) in numbers.iter_mut().enumerate() {
            *slot = array
                .get(i as u32)
                .as_f64()
                .ok_or_else(|| AssetError::DegenerateBounds(asset.to_string()))? as f32;
        }
        let [x0, y0, z0, x1, y1, z1] = numbers;
        check_bounds(asset, Aabb::new(glam::Vec3::new(x0, y0, z0), glam::Vec3::new(x1, y1, z1)))
    }
}

/// Load models and build the world; rejects if any model fails to load
#[wasm_bindgen]
pub async fn init_game(config_json: Option<String>, loader: js_sys::Function) -> Result<WebGame, JsValue> {
    let config = match config_json {
        Some(json) => GameConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => GameConfig::default(),
    };
    let models = JsModelSource { loader };
    let state = initialize(&models, config)
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(WebGame { state })
}

/// Game instance held by the page
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
}

#[wasm_bindgen]
impl WebGame {
    /// Advance one frame; returns this frame's events as JSON
    pub fn step(&mut self, dt_ms: f32, held_keys: Vec<String>) -> String {
        let input = TickInput::new(held_keys);
        let events = tick(&mut self.state, &input, dt_ms);

        if events.iter().any(|e| matches!(e, GameEvent::GameComplete { .. })) {
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.alert_with_message("GAME OVER") {
                    log::warn!("Could not show game over alert: {e:?}");
                }
            }
        }

        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    }

    /// Vehicle pose as [x, y, z, heading]
    pub fn vehicle_pose(&self) -> Vec<f32> {
        self.state
            .vehicle
            .as_ref()
            .map(|v| vec![v.position.x, v.position.y, v.position.z, v.heading])
            .unwrap_or_default()
    }

    /// World position of every pickup, flattened [x, y, z, ...] in spawn order
    pub fn pickup_positions(&self) -> Vec<f32> {
        let Some(vehicle) = self.state.vehicle.as_ref() else {
            return Vec::new();
        };
        self.state
            .pickups
            .iter()
            .flat_map(|p| p.world_position(vehicle).to_array())
            .collect()
    }

    pub fn level(&self) -> u32 {
        self.state.level()
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }
}
