//! The page contract: what the controllers need from the surrounding markup.
//!
//! The browser implementation lives in `web::dom`. Controllers only ever go
//! through this trait, which keeps them testable without a DOM.

pub trait Page {
    /// Value of the input element with this id.
    fn field_value(&self, id: &str) -> Option<String>;

    /// Value of the first form field carrying this `name` attribute.
    fn named_value(&self, name: &str) -> Option<String>;

    /// Replace the text content of an element. Missing elements are ignored.
    fn set_text(&mut self, id: &str, text: &str);

    /// Set the `disabled` flag of a button. Missing elements are ignored.
    fn set_disabled(&mut self, id: &str, disabled: bool);
}
