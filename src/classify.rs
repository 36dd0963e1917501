//! Extension-based request classification.
//!
//! A request belongs to the CFML backend when the trailer after the last `.`
//! of its URI, cut at the first `/`, equals one of the configured handler
//! extensions. Whatever follows that `/` is path-info.
//!
//! ```text
//! /app/index.cfm/extra/path
//!           └──┘└─────────┘
//!      extension  path-info
//! ```

use serde::Deserialize;
use tracing::info;

/// Handler list used when none is configured.
pub const DEFAULT_HANDLERS: &str = ".cfm .cfc .cfml";

// ── Handlers ──────────────────────────────────────────────────────────────────

/// The ordered set of handled extensions, each with its leading dot.
///
/// Deserializes from either a space-delimited string (`".cfm .cfc"`) or an
/// array of strings (`[".cfm", ".cfc"]`).
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(from = "HandlersRepr")]
pub struct Handlers {
    joined: String,
    tokens: Vec<String>,
}

impl Handlers {
    /// Parses a space-delimited list. Runs of whitespace count as one separator.
    pub fn parse(list: &str) -> Self {
        Self::from_tokens(list.split_whitespace().map(str::to_owned).collect())
    }

    fn from_tokens(tokens: Vec<String>) -> Self {
        Self { joined: tokens.join(" "), tokens }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> { self.tokens.iter().map(String::as_str) }
    pub fn is_empty(&self) -> bool { self.tokens.is_empty() }
    pub fn len(&self) -> usize { self.tokens.len() }

    /// The list as one string, as configured.
    pub fn as_str(&self) -> &str { &self.joined }
}

impl Default for Handlers {
    fn default() -> Self { Self::parse(DEFAULT_HANDLERS) }
}

impl From<&str> for Handlers {
    fn from(list: &str) -> Self { Self::parse(list) }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HandlersRepr {
    Line(String),
    List(Vec<String>),
}

impl From<HandlersRepr> for Handlers {
    fn from(repr: HandlersRepr) -> Self {
        match repr {
            HandlersRepr::Line(line) => Self::parse(&line),
            HandlersRepr::List(list) => {
                // Array items may themselves carry several space-separated tokens.
                Self::from_tokens(
                    list.iter().flat_map(|s| s.split_whitespace()).map(str::to_owned).collect(),
                )
            }
        }
    }
}

// ── Classification ────────────────────────────────────────────────────────────

/// Outcome of [`classify`]. Borrows from the classified URI.
///
/// `extension` and `path_info` are filled in whenever the URI has a `.`,
/// even when `matched` is false.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Classification<'a> {
    pub matched: bool,
    pub extension: &'a str,
    pub path_info: &'a str,
}

const NO_EXTENSION: Classification<'static> =
    Classification { matched: false, extension: "", path_info: "" };

/// Decides whether `uri` names a resource handled by the backend.
///
/// # Example
///
/// ```rust
/// use cfgate::{classify, Handlers};
///
/// let c = classify("/app/index.cfm/extra/path", &Handlers::default());
/// assert!(c.matched);
/// assert_eq!(c.extension, ".cfm");
/// assert_eq!(c.path_info, "/extra/path");
/// ```
pub fn classify<'a>(uri: &'a str, handlers: &Handlers) -> Classification<'a> {
    classify_traced(uri, handlers, false)
}

/// [`classify`], optionally reporting every handler token it compares.
pub(crate) fn classify_traced<'a>(
    uri: &'a str,
    handlers: &Handlers,
    log_handlers: bool,
) -> Classification<'a> {
    let Some(dot) = uri.rfind('.') else {
        return NO_EXTENSION;
    };

    let trailer = &uri[dot..];
    let (extension, path_info) = match trailer.find('/') {
        Some(slash) => trailer.split_at(slash),
        None => (trailer, ""),
    };

    // Cheap reject only: ".cf" is a substring of ".cfm" and must not match.
    if !handlers.as_str().contains(extension) {
        return Classification { matched: false, extension, path_info };
    }

    let mut matched = false;
    for handler in handlers.iter() {
        if log_handlers {
            info!(handler, "handler pattern found");
        }
        if handler == extension {
            matched = true;
            if log_handlers {
                info!(extension, handler, "extension matches handler");
            }
        }
    }

    Classification { matched, extension, path_info }
}
