//! Request augmentation: the decision and the headers that carry it.
//!
//! # Per-request flow
//!
//! ```text
//! strip inbound x-tomcat-docroot          ← always, match or not
//!        ↓
//! classify(uri)  ──no──▶  Passthrough     ← nothing else touched
//!        ↓ yes
//! xajp-path-info        (non-empty, enabled)
//! x-tomcat-docroot      (always)
//! x-webserver-context   (always)
//! x-modcfml-sharedkey   (secret configured)
//! x-vdirs               (enabled, provider answered)
//!        ↓
//! Augmented
//! ```
//!
//! Nothing here rejects a request. A step that cannot complete leaves its
//! header out and the rest proceed.

use std::sync::Arc;

use http::{HeaderMap, HeaderValue};
use tracing::{info, warn};

use crate::alias::{self, AliasProvider};
use crate::classify::classify_traced;
use crate::config::Config;
use crate::headers::{DOC_ROOT, PATH_INFO, SHARED_KEY, VDIRS, WEBSERVER_CONTEXT};
use crate::request::RequestView;
use crate::vhost;

/// What [`augment`] did with a request.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Outcome {
    /// Not a backend request. Only the anti-spoof strip may have happened.
    Passthrough,
    /// Routing headers attached.
    Augmented,
}

/// Classifies `req` and, on a match, writes the routing headers into it.
///
/// Any inbound document-root header is removed first, whatever the outcome:
/// clients must not be able to choose the backend's document root.
pub fn augment(
    req: &mut RequestView<'_>,
    config: &Config,
    aliases: Option<&dyn AliasProvider>,
) -> Outcome {
    if let Some(spoofed) = req.headers.remove(DOC_ROOT) {
        warn!(uri = req.uri, value = ?spoofed, "inbound {} header removed", DOC_ROOT);
    }

    let class = classify_traced(req.uri, config.handler_list(), config.logs_handlers());
    if !class.matched {
        return Outcome::Passthrough;
    }

    if config.emits_path_info() && !class.path_info.is_empty() {
        set(req.headers, PATH_INFO, class.path_info);
    }

    let context = vhost::identity(req.hostname, req.config_file, req.config_line);
    set(req.headers, DOC_ROOT, req.document_root);
    set(req.headers, WEBSERVER_CONTEXT, &context);

    if let Some(secret) = config.secret() {
        set(req.headers, SHARED_KEY, secret);
    }

    if config.emits_vdirs() {
        attach_vdirs(req.headers, config.logs_aliases(), aliases);
    }

    if config.logs_headers() {
        info!(uri = req.uri, document_root = req.document_root, "augmented request");
        for (name, value) in req.headers.iter() {
            info!(%name, ?value, "incoming header");
        }
    }

    Outcome::Augmented
}

fn attach_vdirs(headers: &mut HeaderMap, log_aliases: bool, aliases: Option<&dyn AliasProvider>) {
    let Some(provider) = aliases else {
        if log_aliases {
            info!("no alias provider, {} omitted", VDIRS);
        }
        return;
    };

    let entries = match provider.aliases() {
        Ok(entries) => entries,
        Err(e) => {
            warn!("{e}, {} omitted", VDIRS);
            return;
        }
    };

    if log_aliases {
        info!(count = entries.len(), "aliases found");
        for (i, entry) in entries.iter().enumerate() {
            if entry.regex {
                info!(i, fake = %entry.fake, real = %entry.real, "pattern alias not forwarded");
            } else {
                info!(i, fake = %entry.fake, real = %entry.real, "alias");
            }
        }
    }

    set(headers, VDIRS, &alias::build_table(&entries));
}

/// Replaces every value of `name` with `value`. Values `http` refuses
/// (control characters) leave the header unset.
fn set(headers: &mut HeaderMap, name: &'static str, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(value) => {
            headers.insert(name, value);
        }
        Err(_) => warn!(header = name, "value is not a valid header value, skipped"),
    }
}

// ── Augmenter ─────────────────────────────────────────────────────────────────

/// A [`Config`] and an optional [`AliasProvider`], bound together once and
/// shared by every request.
#[derive(Clone)]
pub struct Augmenter {
    config: Arc<Config>,
    aliases: Option<Arc<dyn AliasProvider>>,
}

impl Augmenter {
    pub fn new(config: Config) -> Self {
        Self { config: Arc::new(config), aliases: None }
    }

    /// Supplies the alias set for the `x-vdirs` header.
    pub fn aliases(mut self, provider: impl AliasProvider + 'static) -> Self {
        self.aliases = Some(Arc::new(provider));
        self
    }

    pub fn config(&self) -> &Config { &self.config }

    pub fn augment(&self, req: &mut RequestView<'_>) -> Outcome {
        augment(req, &self.config, self.aliases.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::{AliasEntry, StaticAliases};
    use crate::error::Error;

    struct Offline;

    impl AliasProvider for Offline {
        fn aliases(&self) -> Result<Vec<AliasEntry>, Error> {
            Err(Error::AliasesUnavailable("alias module not loaded".to_owned()))
        }
    }

    fn view<'a>(uri: &'a str, headers: &'a mut HeaderMap) -> RequestView<'a> {
        RequestView {
            uri,
            hostname: Some("www.example.org"),
            config_file: Some("/etc/httpd/sites/010-main.conf"),
            config_line: 42,
            document_root: "/var/www/example",
            headers,
        }
    }

    #[test]
    fn passthrough_leaves_headers_alone() {
        let mut headers = HeaderMap::new();
        headers.insert("accept", HeaderValue::from_static("*/*"));
        let outcome = augment(&mut view("/static/site.css", &mut headers), &Config::default(), None);

        assert_eq!(outcome, Outcome::Passthrough);
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn spoofed_doc_root_is_stripped_on_passthrough() {
        let mut headers = HeaderMap::new();
        headers.insert(DOC_ROOT, HeaderValue::from_static("/etc"));
        let outcome = augment(&mut view("/robots.txt", &mut headers), &Config::default(), None);

        assert_eq!(outcome, Outcome::Passthrough);
        assert!(headers.get(DOC_ROOT).is_none());
    }

    #[test]
    fn spoofed_doc_root_is_replaced_on_match() {
        let mut headers = HeaderMap::new();
        headers.append(DOC_ROOT, HeaderValue::from_static("/etc"));
        headers.append(DOC_ROOT, HeaderValue::from_static("/root"));
        augment(&mut view("/index.cfm", &mut headers), &Config::default(), None);

        let values: Vec<_> = headers.get_all(DOC_ROOT).iter().collect();
        assert_eq!(values, ["/var/www/example"]);
    }

    #[test]
    fn match_writes_context_and_doc_root() {
        let mut headers = HeaderMap::new();
        let outcome = augment(&mut view("/app/index.cfm", &mut headers), &Config::default(), None);

        assert_eq!(outcome, Outcome::Augmented);
        assert_eq!(headers[DOC_ROOT], "/var/www/example");
        assert_eq!(headers[WEBSERVER_CONTEXT], "www-example-org-010-main-confl42");
        assert!(headers.get(PATH_INFO).is_none());
        assert!(headers.get(SHARED_KEY).is_none());
        assert!(headers.get(VDIRS).is_none());
    }

    #[test]
    fn path_info_header_follows_flag() {
        let mut headers = HeaderMap::new();
        augment(&mut view("/app/index.cfm/extra/path", &mut headers), &Config::default(), None);
        assert_eq!(headers[PATH_INFO], "/extra/path");

        let mut headers = HeaderMap::new();
        let config = Config::new().path_info_header(false);
        augment(&mut view("/app/index.cfm/extra/path", &mut headers), &config, None);
        assert!(headers.get(PATH_INFO).is_none());
    }

    #[test]
    fn declined_request_gets_no_path_info() {
        let mut headers = HeaderMap::new();
        augment(&mut view("/file.php/extra", &mut headers), &Config::default(), None);
        assert!(headers.is_empty());
    }

    #[test]
    fn shared_key_is_forwarded() {
        let mut headers = HeaderMap::new();
        let config = Config::new().shared_key("s3cret");
        augment(&mut view("/x.cfc", &mut headers), &config, None);
        assert_eq!(headers[SHARED_KEY], "s3cret");
    }

    #[test]
    fn vdirs_from_provider() {
        let provider = StaticAliases::new(vec![
            AliasEntry::new("/images/", "/var/www/images/"),
            AliasEntry::pattern("/css", "/var/www/css"),
        ]);
        let mut headers = HeaderMap::new();
        let config = Config::new().log_aliases(true);
        augment(&mut view("/index.cfml", &mut headers), &config, Some(&provider));
        assert_eq!(headers[VDIRS], "/images,/var/www/images;");
    }

    #[test]
    fn vdirs_disabled_by_flag() {
        let provider = StaticAliases::new(vec![AliasEntry::new("/a", "/b")]);
        let mut headers = HeaderMap::new();
        let config = Config::new().vdir_header(false);
        augment(&mut view("/index.cfm", &mut headers), &config, Some(&provider));
        assert!(headers.get(VDIRS).is_none());
    }

    #[test]
    fn failing_provider_omits_vdirs_only() {
        let mut headers = HeaderMap::new();
        let outcome = augment(&mut view("/index.cfm", &mut headers), &Config::default(), Some(&Offline));

        assert_eq!(outcome, Outcome::Augmented);
        assert!(headers.get(VDIRS).is_none());
        assert!(headers.get(WEBSERVER_CONTEXT).is_some());
    }

    #[test]
    fn unrepresentable_value_is_skipped() {
        let mut headers = HeaderMap::new();
        let mut req = view("/index.cfm", &mut headers);
        req.document_root = "/var/www\nInjected: yes";
        let outcome = augment(&mut req, &Config::default(), None);

        assert_eq!(outcome, Outcome::Augmented);
        assert!(headers.get(DOC_ROOT).is_none());
        assert!(headers.get(WEBSERVER_CONTEXT).is_some());
    }

    #[test]
    fn augmenter_binds_config_and_aliases() {
        let augmenter = Augmenter::new(Config::new().shared_key("k"))
            .aliases(StaticAliases::new(vec![AliasEntry::new("/a/", "/srv/a")]));
        let mut headers = HeaderMap::new();
        let outcome = augmenter.augment(&mut view("/index.cfm", &mut headers));

        assert_eq!(outcome, Outcome::Augmented);
        assert_eq!(augmenter.config().secret(), Some("k"));
        assert_eq!(headers[VDIRS], "/a,/srv/a;");
    }

    #[test]
    fn empty_alias_set_still_writes_vdirs() {
        let only_patterns = StaticAliases::new(vec![AliasEntry::pattern("^/old/(.*)$", "/srv/new/$1")]);
        let mut headers = HeaderMap::new();
        augment(&mut view("/index.cfm", &mut headers), &Config::default(), Some(&only_patterns));
        assert_eq!(headers[VDIRS], "");

        let nothing = StaticAliases::default();
        let mut headers = HeaderMap::new();
        augment(&mut view("/index.cfm", &mut headers), &Config::default(), Some(&nothing));
        assert_eq!(headers[VDIRS], "");
    }

    #[test]
    fn view_reads_written_headers_case_insensitively() {
        let mut headers = HeaderMap::new();
        headers.insert(DOC_ROOT, HeaderValue::from_static("/spoofed"));
        let mut req = view("/index.cfm/p", &mut headers);
        assert_eq!(req.header("x-tomcat-docroot"), Some("/spoofed"));

        augment(&mut req, &Config::default(), None);

        assert_eq!(req.header("X-Tomcat-DocRoot"), Some("/var/www/example"));
        assert_eq!(req.header("XAJP-Path-Info"), Some("/p"));
        assert_eq!(req.header("x-missing"), None);
    }
}
