#![cfg(target_arch = "wasm32")]
//! Browser binding: a `BlobStage` class the page's renderer drives once per
//! animation frame.

use anyhow::Context;
use blob_core::{CharacterConfig, DetailLevel, StagedFrame, Stage};
use wasm_bindgen::prelude::*;

mod constants;
mod host;
mod snapshot;

fn to_js(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:#}", e))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("blob-web starting");
    Ok(())
}

#[wasm_bindgen]
pub struct BlobStage {
    stage: Stage,
    frames: Vec<StagedFrame>,
}

#[wasm_bindgen]
impl BlobStage {
    /// `config` is an optional partial `CharacterConfig` for the primary
    /// mascot; anything omitted keeps its default.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<BlobStage, JsValue> {
        let config = parse_config(&config).map_err(to_js)?;
        build_stage(config).map_err(to_js)
    }

    /// Like `new`, but seeded from the browser's crypto RNG so each page load
    /// moves differently.
    #[wasm_bindgen(js_name = withEntropy)]
    pub fn with_entropy(config: JsValue) -> Result<BlobStage, JsValue> {
        let config = parse_config(&config).map_err(to_js)?;
        build_stage(config.with_seed(rand::random())).map_err(to_js)
    }

    /// Advance one frame. `px`/`py` are the pointer in NDC.
    pub fn tick(&mut self, elapsed: f32, delta: f32, px: f32, py: f32) {
        let input = host::sanitize_input(elapsed, delta, px, py);
        self.frames = self.stage.tick(input);
    }

    pub fn click(&mut self) {
        self.stage.click();
    }

    /// `"rough"` or `"smooth"`.
    #[wasm_bindgen(js_name = setDetail)]
    pub fn set_detail(&mut self, detail: &str) -> Result<(), JsValue> {
        let detail: DetailLevel = detail
            .parse()
            .map_err(|e: blob_core::BlobError| JsValue::from_str(&e.to_string()))?;
        self.stage.set_detail(detail);
        Ok(())
    }

    #[wasm_bindgen(js_name = setCompetingUiOpen)]
    pub fn set_competing_ui_open(&mut self, open: bool) {
        self.stage.set_competing_ui_open(open);
    }

    #[wasm_bindgen(js_name = visibleCount)]
    pub fn visible_count(&self) -> usize {
        self.stage.visible_count()
    }

    /// Interleaved position/normal floats for visible character `index`.
    pub fn vertices(&self, index: usize) -> Option<js_sys::Float32Array> {
        let c = self.stage.visible_character(index)?;
        Some(js_sys::Float32Array::from(snapshot::flatten_vertices(
            c.vertices(),
        )))
    }

    pub fn indices(&self, index: usize) -> Option<js_sys::Uint32Array> {
        let c = self.stage.visible_character(index)?;
        Some(js_sys::Uint32Array::from(c.indices()))
    }

    /// Transforms, face, overlay lines and sparkles from the last tick.
    #[allow(deprecated)]
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        let snap = snapshot::StageSnapshot {
            competing_ui_open: self.stage.competing_ui_open(),
            characters: &self.frames,
        };
        JsValue::from_serde(&snap).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// Pointer helper for hosts that only have client pixels.
#[wasm_bindgen(js_name = clientToNdc)]
pub fn client_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Vec<f32> {
    host::client_to_ndc(x, y, width, height).to_array().to_vec()
}

fn build_stage(config: CharacterConfig) -> anyhow::Result<BlobStage> {
    let stage = Stage::new(config).context("building stage")?;
    Ok(BlobStage {
        stage,
        frames: Vec::new(),
    })
}

#[allow(deprecated)]
fn parse_config(value: &JsValue) -> anyhow::Result<CharacterConfig> {
    if value.is_undefined() || value.is_null() {
        return Ok(CharacterConfig::primary());
    }
    let config: CharacterConfig = value
        .into_serde()
        .context("parsing character config")?;
    config.validate().context("validating character config")?;
    Ok(config)
}
