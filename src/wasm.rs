//! WebAssembly bindings for asciix

use crate::options::RenderOptions;
use crate::session::Session;
use crate::text;
use crate::AsciixError;
use wasm_bindgen::prelude::*;

fn to_js(err: AsciixError) -> JsValue {
    let msg = err.to_string();
    web_sys::console::error_1(&JsValue::from_str(&msg));
    JsValue::from_str(&msg)
}

/// Browser-side session: holds the uploaded image and the current controls.
#[wasm_bindgen]
pub struct WasmSession {
    session: Session,
}

#[wasm_bindgen]
impl WasmSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmSession {
        WasmSession { session: Session::new() }
    }

    /// Decode an uploaded file (PNG, JPEG, GIF, ...).
    #[wasm_bindgen]
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.session.load_bytes(bytes).map_err(to_js)
    }

    /// Replace all controls from a JSON snapshot; missing fields take defaults.
    #[wasm_bindgen]
    pub fn set_options(&mut self, json: &str) -> Result<(), JsValue> {
        let options = RenderOptions::from_json(json).map_err(to_js)?;
        self.session.set_options(options).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn options(&self) -> Result<String, JsValue> {
        self.session.options().to_json().map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.session.reset_options();
    }

    /// Render with the current controls.
    /// Returns `{ text, width, height, run }`.
    #[wasm_bindgen]
    pub fn render(&mut self) -> Result<js_sys::Object, JsValue> {
        let job = self.session.start().map_err(to_js)?;
        let (ticket, result) = job.run();
        let grid = self
            .session
            .complete(ticket, result)
            .map_err(to_js)?
            .ok_or_else(|| JsValue::from_str("render superseded"))?;

        let out = js_sys::Object::new();
        js_sys::Reflect::set(&out, &"text".into(), &grid.to_text().into())?;
        js_sys::Reflect::set(&out, &"width".into(), &grid.width().into())?;
        js_sys::Reflect::set(&out, &"height".into(), &grid.height().into())?;
        js_sys::Reflect::set(&out, &"run".into(), &(ticket.id() as f64).into())?;
        Ok(out)
    }

    /// Last successfully rendered art, or an empty string.
    #[wasm_bindgen]
    pub fn output(&self) -> String {
        self.session.output().map(|g| g.to_text()).unwrap_or_default()
    }
}

impl Default for WasmSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Render text with a built-in FIGlet font.
#[wasm_bindgen]
pub fn text_to_ascii(text: &str, font: &str, spacing: usize) -> Result<String, JsValue> {
    text::render_text(text, font, spacing).map_err(to_js)
}

/// Route Rust panics to the browser console instead of a bare `unreachable`.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}
