//! `Page` over the live document.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlButtonElement, HtmlInputElement};

use crate::error::ClientError;
use crate::page::Page;

#[derive(Debug, Clone)]
pub struct DomPage {
    document: Document,
}

impl DomPage {
    pub fn from_window() -> Result<Self, ClientError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| ClientError::Transport("no window document".to_string()))?;
        Ok(DomPage { document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl Page for DomPage {
    fn field_value(&self, id: &str) -> Option<String> {
        let el = self.document.get_element_by_id(id)?;
        match el.dyn_ref::<HtmlInputElement>() {
            Some(input) => Some(input.value()),
            None => el.get_attribute("value").or_else(|| el.text_content()),
        }
    }

    fn named_value(&self, name: &str) -> Option<String> {
        let el = self
            .document
            .query_selector(&format!("[name=\"{name}\"]"))
            .ok()
            .flatten()?;
        match el.dyn_ref::<HtmlInputElement>() {
            Some(input) => Some(input.value()),
            None => el.get_attribute("value"),
        }
    }

    fn set_text(&mut self, id: &str, text: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_disabled(&mut self, id: &str, disabled: bool) {
        let Some(el) = self.document.get_element_by_id(id) else {
            return;
        };
        if let Some(button) = el.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else if disabled {
            el.set_attribute("disabled", "").ok();
        } else {
            el.remove_attribute("disabled").ok();
        }
    }
}
