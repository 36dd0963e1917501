//! # cfgate
//!
//! Decides, per request, whether a front-end web server should hand the
//! request to a CFML engine, and if so attaches what the engine's connector
//! needs to map it onto the right application context.
//!
//! ## The contract
//!
//! cfgate sits in the request path and only annotates. It neither proxies
//! nor rejects requests; transport (AJP, HTTP) belongs to whatever runs
//! after it.
//!
//! On a request whose extension is one of the configured handlers
//! (`.cfm .cfc .cfml` by default) it writes:
//!
//! - `x-tomcat-docroot`: the virtual host's document root
//! - `x-webserver-context`: a stable, sanitized virtual-host identifier
//! - `xajp-path-info`: anything after the extension (`/index.cfm/a/b` → `/a/b`)
//! - `x-modcfml-sharedkey`: the shared secret, when configured
//! - `x-vdirs`: the alias table, `fake,real;` per alias
//!
//! An inbound `x-tomcat-docroot` is always removed first. Only cfgate may
//! set it.
//!
//! ## Quick start
//!
//! ```rust
//! use cfgate::{Augmenter, Config, Outcome, RequestView, VirtualHost};
//! use cfgate::alias::{AliasEntry, StaticAliases};
//! use http::HeaderMap;
//!
//! let augmenter = Augmenter::new(Config::new().shared_key("s3cret"))
//!     .aliases(StaticAliases::new(vec![AliasEntry::new("/images/", "/var/www/images/")]));
//!
//! let vhost = VirtualHost::new("/var/www/example")
//!     .hostname("www.example.org")
//!     .defined_at("/etc/httpd/sites/010-main.conf", 42);
//!
//! let mut headers = HeaderMap::new();
//! let mut req = RequestView::new("/index.cfm/extra", &vhost, &mut headers);
//! assert_eq!(augmenter.augment(&mut req), Outcome::Augmented);
//!
//! assert_eq!(headers["x-webserver-context"], "www-example-org-010-main-confl42");
//! assert_eq!(headers["xajp-path-info"], "/extra");
//! assert_eq!(headers["x-vdirs"], "/images,/var/www/images;");
//! ```
//!
//! Inside a hyper server, wrap the next service in
//! [`middleware::Annotate`] instead of calling the augmenter by hand.

mod augment;
mod classify;
mod config;
mod error;
mod request;

pub mod alias;
pub mod headers;
pub mod middleware;
pub mod vhost;

pub use alias::{AliasEntry, AliasProvider, StaticAliases};
pub use augment::{augment, Augmenter, Outcome};
pub use classify::{classify, Classification, Handlers, DEFAULT_HANDLERS};
pub use config::Config;
pub use error::Error;
pub use request::RequestView;
pub use vhost::VirtualHost;
