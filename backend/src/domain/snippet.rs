//! Snippet aggregate and its validated field types.
//!
//! A snippet is a stored code sample with presentation metadata, exactly one
//! owner, and a derived `highlighted` HTML document that is regenerated
//! whenever the content changes.

use std::fmt;

use chrono::{DateTime, Utc};

use super::UserId;
use super::field_errors::FieldError;

/// Maximum number of characters in a snippet title.
pub const TITLE_MAX: usize = 100;
/// Maximum number of characters in a language or style name.
pub const CHOICE_MAX: usize = 100;
/// Language used when a payload does not name one.
pub const DEFAULT_LANGUAGE: &str = "python";
/// Highlight style used when a payload does not name one.
pub const DEFAULT_STYLE: &str = "inspired-github";

/// Validation errors raised by snippet field constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnippetValidationError {
    #[error("snippet id must be a positive integer")]
    InvalidId,
    #[error("ensure this field has no more than {max} characters")]
    TooLong { max: usize },
    #[error("this field may not be blank")]
    Blank,
}

impl FieldError for SnippetValidationError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidId => "invalid",
            Self::TooLong { .. } => "max_length",
            Self::Blank => "blank",
        }
    }
}

/// Positive integer snippet identifier, assigned by the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SnippetId(i64);

impl SnippetId {
    pub fn new(raw: i64) -> Result<Self, SnippetValidationError> {
        if raw < 1 {
            return Err(SnippetValidationError::InvalidId);
        }
        Ok(Self(raw))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for SnippetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Optional human title, possibly empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SnippetTitle(String);

impl SnippetTitle {
    pub fn new(title: impl Into<String>) -> Result<Self, SnippetValidationError> {
        let title = title.into();
        if title.chars().count() > TITLE_MAX {
            return Err(SnippetValidationError::TooLong { max: TITLE_MAX });
        }
        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Source text; must contain something other than whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetCode(String);

impl SnippetCode {
    pub fn new(code: impl Into<String>) -> Result<Self, SnippetValidationError> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(SnippetValidationError::Blank);
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

macro_rules! choice_name {
    ($(#[$meta:meta])* $name:ident, $default:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            /// Trim and validate a name. Whether the highlighter knows it is
            /// checked separately.
            pub fn new(raw: impl AsRef<str>) -> Result<Self, SnippetValidationError> {
                let trimmed = raw.as_ref().trim();
                if trimmed.is_empty() {
                    return Err(SnippetValidationError::Blank);
                }
                if trimmed.chars().count() > CHOICE_MAX {
                    return Err(SnippetValidationError::TooLong { max: CHOICE_MAX });
                }
                Ok(Self(trimmed.to_owned()))
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self($default.to_owned())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

choice_name!(
    /// Name of the source language used to pick a syntax definition.
    Language,
    DEFAULT_LANGUAGE
);
choice_name!(
    /// Name of the colour scheme applied when rendering.
    Style,
    DEFAULT_STYLE
);

/// The user-editable part of a snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetContent {
    pub title: SnippetTitle,
    pub code: SnippetCode,
    pub linenos: bool,
    pub language: Language,
    pub style: Style,
}

impl SnippetContent {
    /// Content with defaults for everything but the code.
    pub fn with_code(code: SnippetCode) -> Self {
        Self {
            title: SnippetTitle::default(),
            code,
            linenos: false,
            language: Language::default(),
            style: Style::default(),
        }
    }
}

/// Field-by-field replacement for existing content. `None` keeps the
/// current value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SnippetChanges {
    pub title: Option<SnippetTitle>,
    pub code: Option<SnippetCode>,
    pub linenos: Option<bool>,
    pub language: Option<Language>,
    pub style: Option<Style>,
}

impl SnippetChanges {
    pub fn apply_to(self, current: SnippetContent) -> SnippetContent {
        SnippetContent {
            title: self.title.unwrap_or(current.title),
            code: self.code.unwrap_or(current.code),
            linenos: self.linenos.unwrap_or(current.linenos),
            language: self.language.unwrap_or(current.language),
            style: self.style.unwrap_or(current.style),
        }
    }
}

/// A snippet ready to be inserted; the repository assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSnippet {
    pub created: DateTime<Utc>,
    pub owner: UserId,
    pub content: SnippetContent,
    pub highlighted: String,
}

impl NewSnippet {
    pub fn into_snippet(self, id: SnippetId) -> Snippet {
        Snippet {
            id,
            created: self.created,
            owner: self.owner,
            content: self.content,
            highlighted: self.highlighted,
        }
    }
}

/// Stored snippet.
///
/// ## Invariants
/// - `owner` is fixed at creation and never changes.
/// - `highlighted` was rendered from the current `content`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    id: SnippetId,
    created: DateTime<Utc>,
    owner: UserId,
    content: SnippetContent,
    highlighted: String,
}

impl Snippet {
    pub fn id(&self) -> SnippetId {
        self.id
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn content(&self) -> &SnippetContent {
        &self.content
    }

    pub fn highlighted(&self) -> &str {
        self.highlighted.as_str()
    }

    /// Replace the content and its rendering, keeping id, owner and creation
    /// time.
    pub fn revise(self, content: SnippetContent, highlighted: String) -> Self {
        Self {
            content,
            highlighted,
            ..self
        }
    }
}
