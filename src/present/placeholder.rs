//! Placeholder markup
//!
//! Loading, error and empty states written into a container by element id.

use std::collections::HashMap;

/// Spinner shown while a request is in flight
pub const LOADING_MARKUP: &str = r#"<div class="spinner"></div>"#;

/// Container lookup and content replacement by element id
pub trait Document {
    /// Replace the content of `element_id`; `false` when there is no such element
    fn replace_content(&mut self, element_id: &str, markup: &str) -> bool;
}

/// Document holding element contents in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    elements: HashMap<String, String>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style element registration
    pub fn with_element(mut self, id: &str) -> Self {
        self.add_element(id);
        self
    }

    pub fn add_element(&mut self, id: &str) {
        self.elements.entry(id.to_string()).or_default();
    }

    pub fn content(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(String::as_str)
    }
}

impl Document for MemoryDocument {
    fn replace_content(&mut self, element_id: &str, markup: &str) -> bool {
        match self.elements.get_mut(element_id) {
            Some(content) => {
                *content = markup.to_string();
                true
            }
            None => false,
        }
    }
}

pub fn error_markup(message: &str) -> String {
    format!(r#"<div class="error-state">{}</div>"#, escape_html(message))
}

pub fn empty_markup(message: &str) -> String {
    format!(r#"<div class="empty-state">{}</div>"#, escape_html(message))
}

/// Show the loading spinner in `element_id`
pub fn show_loading(doc: &mut dyn Document, element_id: &str) -> bool {
    doc.replace_content(element_id, LOADING_MARKUP)
}

/// Show an error message in `element_id`
pub fn show_error(doc: &mut dyn Document, element_id: &str, message: &str) -> bool {
    doc.replace_content(element_id, &error_markup(message))
}

/// Show an empty-state message in `element_id`
pub fn show_empty(doc: &mut dyn Document, element_id: &str, message: &str) -> bool {
    doc.replace_content(element_id, &empty_markup(message))
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
