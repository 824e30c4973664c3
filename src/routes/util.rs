//! Shared body parsing and JSON reply helpers for route handlers.

use serde::Serialize;
use serde_json::json;

/// Parse an URL-encoded form body (`key=value&key2=value2`) into pairs.
pub fn parse_form_body(body: &str) -> Vec<(String, String)> {
    body.trim()
        .strip_prefix('?')
        .unwrap_or(body.trim())
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, val) = pair.split_once('=').unwrap_or((pair, ""));
            (percent_decode(key), percent_decode(val))
        })
        .collect()
}

/// Percent-decode a form value. Multi-byte UTF-8 sequences ("Facci%C3%B3n")
/// are reassembled; malformed escapes pass through literally.
pub fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let Some(b) = hex_pair(bytes[i + 1], bytes[i + 2]) {
                out.push(b);
                i += 3;
                continue;
            }
        }
        out.push(if bytes[i] == b'+' { b' ' } else { bytes[i] });
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_pair(hi: u8, lo: u8) -> Option<u8> {
    let hi = (hi as char).to_digit(16)?;
    let lo = (lo as char).to_digit(16)?;
    Some((hi * 16 + lo) as u8)
}

/// Value for `key` among parsed pairs.
pub fn get_param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// `{"error": msg}`: the backend's failure body.
pub fn error_body(msg: &str) -> String {
    json!({ "error": msg }).to_string()
}

/// Serialize a reply, or report the serialization failure as an error body.
pub fn json_body<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| error_body(&e.to_string()))
}

/// Collapse a handler result into a response body.
pub fn reply<T: Serialize>(result: Result<T, String>) -> String {
    match result {
        Ok(value) => json_body(&value),
        Err(msg) => {
            log::warn!("request rejected: {}", msg);
            error_body(&msg)
        }
    }
}
