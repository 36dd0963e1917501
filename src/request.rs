//! Per-request view handed to the augmenter.

use http::HeaderMap;

use crate::vhost::VirtualHost;

/// What the augmenter needs to know about one inbound request.
///
/// Everything is borrowed from the host for the duration of the call. Only
/// `headers` is written to.
pub struct RequestView<'a> {
    /// Request path, already decoded by the host.
    pub uri: &'a str,
    pub hostname: Option<&'a str>,
    pub config_file: Option<&'a str>,
    pub config_line: u32,
    /// Effective document root resolved by the host.
    pub document_root: &'a str,
    pub headers: &'a mut HeaderMap,
}

impl<'a> RequestView<'a> {
    /// A view over `uri` and `headers`, with everything else taken from `vhost`.
    pub fn new(uri: &'a str, vhost: &'a VirtualHost, headers: &'a mut HeaderMap) -> Self {
        Self {
            uri,
            hostname: vhost.hostname.as_deref(),
            config_file: vhost.config_file.as_deref(),
            config_line: vhost.config_line,
            document_root: &vhost.document_root,
            headers,
        }
    }

    /// Header lookup. Names are case-insensitive; non-UTF-8 values read as `None`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
