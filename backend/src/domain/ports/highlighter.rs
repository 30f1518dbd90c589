//! Driven port that renders snippet content into a standalone HTML document.
//!
//! Rendering is CPU-bound and synchronous; adapters load their syntax and
//! theme tables once and share them across requests.

use crate::domain::{Language, SnippetContent, Style};

use super::define_port_error;

define_port_error! {
    /// Errors raised while rendering a snippet.
    pub enum HighlightError {
        /// The language has no syntax definition.
        UnsupportedLanguage { name: String } => "unsupported language: {name}",
        /// The style has no theme.
        UnsupportedStyle { name: String } => "unsupported style: {name}",
        /// The highlighter failed part way through the input.
        Render { message: String } => "highlighting failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait Highlighter: Send + Sync {
    fn supports_language(&self, language: &Language) -> bool;

    fn supports_style(&self, style: &Style) -> bool;

    /// Render `content` as a full HTML document titled with the snippet title.
    fn render(&self, content: &SnippetContent) -> Result<String, HighlightError>;
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Highlighter that knows a handful of names and emits unstyled markup.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureHighlighter;

impl FixtureHighlighter {
    pub const LANGUAGES: [&'static str; 3] = ["python", "rust", "text"];
    pub const STYLES: [&'static str; 2] = ["inspired-github", "solarized-dark"];
}

impl Highlighter for FixtureHighlighter {
    fn supports_language(&self, language: &Language) -> bool {
        Self::LANGUAGES.contains(&language.as_str())
    }

    fn supports_style(&self, style: &Style) -> bool {
        Self::STYLES.contains(&style.as_str())
    }

    fn render(&self, content: &SnippetContent) -> Result<String, HighlightError> {
        if !self.supports_language(&content.language) {
            return Err(HighlightError::unsupported_language(content.language.as_str()));
        }
        Ok(format!(
            "<!DOCTYPE html><html><head><title>{}</title></head><body><pre class=\"{}\">{}</pre></body></html>",
            escape_html(content.title.as_str()),
            escape_html(content.style.as_str()),
            escape_html(content.code.as_str()),
        ))
    }
}
