//! Binding to the page's global Chart.js.

use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement};

use super::js_error;
use crate::chart::config::BarChartConfig;
use crate::error::ClientError;

#[wasm_bindgen]
extern "C" {
    type Chart;

    #[wasm_bindgen(constructor, catch)]
    fn new(context: &JsValue, config: &JsValue) -> Result<Chart, JsValue>;
}

/// Draw `config` on the canvas with id `canvas_id`.
pub fn render(document: &Document, canvas_id: &str, config: &BarChartConfig) -> Result<(), ClientError> {
    let canvas = document
        .get_element_by_id(canvas_id)
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        .ok_or_else(|| ClientError::MissingElement(canvas_id.to_string()))?;
    let context = canvas
        .get_context("2d")
        .map_err(js_error)?
        .ok_or_else(|| ClientError::MissingElement(format!("{canvas_id} 2d context")))?;

    // Plain objects, not `Map`s: Chart.js reads options by property
    let config = config
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| ClientError::Malformed(e.to_string()))?;
    let _chart = Chart::new(&context, &config).map_err(js_error)?;
    Ok(())
}
