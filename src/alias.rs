//! Virtual-directory aliases and their wire form.
//!
//! The backend has no view of the front-end server's `Alias` directives, so
//! every matched request carries them in one header:
//!
//! ```text
//! /images,/var/www/images;/css,/srv/shared/css;
//! ```
//!
//! One `fake,real;` fragment per literal alias, in configuration order.
//! Pattern-based aliases have no single real path and are left out.

use crate::error::Error;

/// A configured mapping from a public URL path to a filesystem path.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AliasEntry {
    pub fake: String,
    pub real: String,
    pub regex: bool,
}

impl AliasEntry {
    /// A literal alias.
    pub fn new(fake: impl Into<String>, real: impl Into<String>) -> Self {
        Self { fake: fake.into(), real: real.into(), regex: false }
    }

    /// A pattern-based alias (`AliasMatch`). Never serialized.
    pub fn pattern(fake: impl Into<String>, real: impl Into<String>) -> Self {
        Self { fake: fake.into(), real: real.into(), regex: true }
    }
}

// ── Provider ──────────────────────────────────────────────────────────────────

/// Source of the alias set for the current virtual host.
///
/// The host integration binds this to whatever holds the aliases. An `Err`
/// means the source could not be consulted; the caller omits the header.
pub trait AliasProvider: Send + Sync {
    fn aliases(&self) -> Result<Vec<AliasEntry>, Error>;
}

/// An alias set fixed at startup.
#[derive(Clone, Debug, Default)]
pub struct StaticAliases(Vec<AliasEntry>);

impl StaticAliases {
    pub fn new(entries: Vec<AliasEntry>) -> Self { Self(entries) }
}

impl AliasProvider for StaticAliases {
    fn aliases(&self) -> Result<Vec<AliasEntry>, Error> {
        Ok(self.0.clone())
    }
}

impl FromIterator<AliasEntry> for StaticAliases {
    fn from_iter<I: IntoIterator<Item = AliasEntry>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ── Table ─────────────────────────────────────────────────────────────────────

/// Serializes the literal entries of `aliases`, in order.
///
/// ```rust
/// use cfgate::alias::{build_table, AliasEntry};
///
/// let table = build_table(&[
///     AliasEntry::new("/images/", "/var/www/images/"),
///     AliasEntry::pattern("/css", "/var/www/css"),
/// ]);
/// assert_eq!(table, "/images,/var/www/images;");
/// ```
pub fn build_table(aliases: &[AliasEntry]) -> String {
    let mut table = String::new();
    for alias in aliases.iter().filter(|a| !a.regex) {
        table.push_str(trim_separator(&alias.fake));
        table.push(',');
        table.push_str(trim_separator(&alias.real));
        table.push(';');
    }
    table
}

/// Reads a table produced by [`build_table`] back into `(fake, real)` pairs.
///
/// Fragments without a `,` are skipped.
pub fn parse_table(table: &str) -> Vec<(String, String)> {
    table
        .split(';')
        .filter_map(|fragment| fragment.split_once(','))
        .map(|(fake, real)| (fake.to_owned(), real.to_owned()))
        .collect()
}

/// Drops one trailing `/` or `\`, unless the path is a single character.
fn trim_separator(path: &str) -> &str {
    match path.strip_suffix(['/', '\\']) {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    }
}
