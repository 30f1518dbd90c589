//! `syntect`-backed [`Highlighter`] adapter.
//!
//! Syntax definitions and themes are the sets bundled with `syntect`. Style
//! names on the wire are lower-case slugs mapped onto the bundled theme
//! names.

use std::fmt::Write as _;

use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{IncludeBackground, start_highlighted_html_snippet, styled_line_to_highlighted_html};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::domain::ports::{HighlightError, Highlighter, escape_html};
use crate::domain::{Language, SnippetContent, Style};

/// Style slug to bundled theme name.
pub const STYLES: [(&str, &str); 7] = [
    ("inspired-github", "InspiredGitHub"),
    ("solarized-dark", "Solarized (dark)"),
    ("solarized-light", "Solarized (light)"),
    ("base16-eighties-dark", "base16-eighties.dark"),
    ("base16-mocha-dark", "base16-mocha.dark"),
    ("base16-ocean-dark", "base16-ocean.dark"),
    ("base16-ocean-light", "base16-ocean.light"),
];

const LINENO_STYLE: &str = "color:#8c8c8c;user-select:none;padding-right:1em";

pub struct SyntectHighlighter {
    syntaxes: SyntaxSet,
    themes: ThemeSet,
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SyntectHighlighter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntectHighlighter")
            .field("syntaxes", &self.syntaxes.syntaxes().len())
            .field("themes", &self.themes.themes.len())
            .finish()
    }
}

impl SyntectHighlighter {
    /// Load the bundled syntax and theme sets. This parses compressed dumps
    /// and should happen once per process.
    pub fn new() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            themes: ThemeSet::load_defaults(),
        }
    }

    fn syntax(&self, language: &Language) -> Option<&SyntaxReference> {
        self.syntaxes.find_syntax_by_token(language.as_str())
    }

    fn theme(&self, style: &Style) -> Option<&Theme> {
        let slug = style.as_str().to_ascii_lowercase();
        STYLES
            .iter()
            .find(|(name, _)| *name == slug)
            .and_then(|(_, theme)| self.themes.themes.get(*theme))
    }

    fn render_lines(
        &self,
        code: &str,
        syntax: &SyntaxReference,
        theme: &Theme,
        linenos: bool,
        out: &mut String,
    ) -> Result<(), HighlightError> {
        let mut highlighter = HighlightLines::new(syntax, theme);
        let width = code.lines().count().max(1).to_string().len();
        for (index, line) in LinesWithEndings::from(code).enumerate() {
            let regions = highlighter
                .highlight_line(line, &self.syntaxes)
                .map_err(|err| HighlightError::render(err.to_string()))?;
            let html = styled_line_to_highlighted_html(&regions[..], IncludeBackground::No)
                .map_err(|err| HighlightError::render(err.to_string()))?;
            if linenos {
                write!(
                    out,
                    "<span style=\"{LINENO_STYLE}\">{:>width$}</span>",
                    index + 1
                )
                .map_err(|err| HighlightError::render(err.to_string()))?;
            }
            out.push_str(&html);
        }
        Ok(())
    }
}

impl Highlighter for SyntectHighlighter {
    fn supports_language(&self, language: &Language) -> bool {
        self.syntax(language).is_some()
    }

    fn supports_style(&self, style: &Style) -> bool {
        self.theme(style).is_some()
    }

    fn render(&self, content: &SnippetContent) -> Result<String, HighlightError> {
        let syntax = self
            .syntax(&content.language)
            .ok_or_else(|| HighlightError::unsupported_language(content.language.as_str()))?;
        let theme = self
            .theme(&content.style)
            .ok_or_else(|| HighlightError::unsupported_style(content.style.as_str()))?;

        let title = escape_html(content.title.as_str());
        let mut out = String::with_capacity(content.code.as_str().len() * 4 + 256);
        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        writeln!(out, "<title>{title}</title>")
            .map_err(|err| HighlightError::render(err.to_string()))?;
        out.push_str("</head>\n<body>\n");
        if !title.is_empty() {
            writeln!(out, "<h2>{title}</h2>")
                .map_err(|err| HighlightError::render(err.to_string()))?;
        }
        let (pre_open, _background) = start_highlighted_html_snippet(theme);
        out.push_str(&pre_open);
        self.render_lines(
            content.code.as_str(),
            syntax,
            theme,
            content.linenos,
            &mut out,
        )?;
        out.push_str("</pre>\n</body>\n</html>\n");
        Ok(out)
    }
}
