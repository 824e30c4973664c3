//! One request, one text body: `fetch` online, `handle_request` offline.

use log::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use super::js_error;
use crate::config::ClientConfig;
use crate::error::ClientError;

/// Send `body` (JSON, if any) to `path` and return the response text.
///
/// Non-2xx statuses still yield their body: the server explains rejections
/// in an `error` field the caller parses.
pub async fn send(
    config: &ClientConfig,
    method: &str,
    path: &str,
    body: Option<&str>,
    csrf_token: &str,
) -> Result<String, ClientError> {
    if config.offline {
        let (path, query) = path.split_once('?').unwrap_or((path, ""));
        return Ok(crate::handle_request(method, path, query, body.unwrap_or("")));
    }

    let window = web_sys::window().ok_or_else(|| ClientError::Transport("no window".to_string()))?;

    let headers = Headers::new().map_err(js_error)?;
    if body.is_some() {
        headers.set("Content-Type", "application/json").map_err(js_error)?;
    }
    if !csrf_token.is_empty() {
        headers.set("X-CSRFToken", csrf_token).map_err(js_error)?;
    }

    let init = RequestInit::new();
    init.set_method(method);
    init.set_headers(&headers);
    if let Some(body) = body {
        init.set_body(&JsValue::from_str(body));
    }
    let request = Request::new_with_str_and_init(path, &init).map_err(js_error)?;

    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?
        .dyn_into()
        .map_err(js_error)?;
    debug!("{} {} -> {}", method, path, response.status());

    let text = JsFuture::from(response.text().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    text.as_string()
        .ok_or_else(|| ClientError::Malformed("response body is not text".to_string()))
}
