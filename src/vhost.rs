//! Stable identifiers for virtual-host configurations.
//!
//! The backend creates one application context per identifier, so the same
//! `<VirtualHost>` block must always yield the same string and two blocks
//! must not collide. Hostname alone is not enough: several blocks may share
//! a name. Adding the defining file and line makes the triple unique.

/// Hostname used when the virtual host has none.
pub const FALLBACK_HOSTNAME: &str = "nohostname";

/// File name used when the defining config file is unknown.
pub const FALLBACK_CONFIG_NAME: &str = "server-conf";

// ── VirtualHost ───────────────────────────────────────────────────────────────

/// The owning virtual host of a request, as the host server describes it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VirtualHost {
    pub hostname: Option<String>,
    pub config_file: Option<String>,
    pub config_line: u32,
    pub document_root: String,
}

impl VirtualHost {
    pub fn new(document_root: impl Into<String>) -> Self {
        Self { document_root: document_root.into(), ..Self::default() }
    }

    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// Where the virtual host was defined.
    pub fn defined_at(mut self, config_file: impl Into<String>, line: u32) -> Self {
        self.config_file = Some(config_file.into());
        self.config_line = line;
        self
    }

    pub fn identity(&self) -> String {
        identity(self.hostname.as_deref(), self.config_file.as_deref(), self.config_line)
    }
}

// ── Identifier ────────────────────────────────────────────────────────────────

/// Builds the sanitized identifier for a `(hostname, config file, line)` triple.
///
/// ```rust
/// use cfgate::vhost::identity;
///
/// assert_eq!(
///     identity(Some("www.example.org"), Some("/etc/httpd/sites/010-main.conf"), 42),
///     "www-example-org-010-main-confl42",
/// );
/// assert_eq!(identity(None, None, 7), "nohostname-server-confl7");
/// ```
pub fn identity(hostname: Option<&str>, config_file: Option<&str>, line: u32) -> String {
    let hostname = hostname.filter(|h| !h.is_empty()).unwrap_or(FALLBACK_HOSTNAME);
    let file = config_file.map(basename).filter(|b| !b.is_empty()).unwrap_or(FALLBACK_CONFIG_NAME);

    sanitize(&format!("{hostname}-{file}l{line}"))
}

/// Final path segment, splitting on both `/` and `\`.
///
/// A leading drive prefix (`C:`) is dropped first. A path ending in a
/// separator has an empty basename.
pub fn basename(path: &str) -> &str {
    let path = match path.as_bytes() {
        [drive, b':', ..] if drive.is_ascii_alphabetic() => &path[2..],
        _ => path,
    };
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// ASCII alphanumerics pass; everything else becomes `-`, or `x` when it is
/// the first character.
fn sanitize(raw: &str) -> String {
    raw.chars()
        .enumerate()
        .map(|(i, c)| match c {
            c if c.is_ascii_alphanumeric() => c,
            _ if i == 0 => 'x',
            _ => '-',
        })
        .collect()
}
