//! Names of the request headers written for the backend connector.
//!
//! | Header | Written when |
//! |---|---|
//! | [`DOC_ROOT`] | every matched request (and stripped from every inbound one) |
//! | [`WEBSERVER_CONTEXT`] | every matched request |
//! | [`PATH_INFO`] | matched, non-empty path-info, `path_info_header` on |
//! | [`SHARED_KEY`] | matched, `shared_key` configured |
//! | [`VDIRS`] | matched, `vdir_header` on, alias provider answered |
//!
//! `http::HeaderName` is case-insensitive, so the lowercase spelling here is
//! the same header the connector reads as `X-Tomcat-DocRoot` etc.

/// Effective document root. Doubles as the trust marker: clients must never
/// be able to send it themselves.
pub const DOC_ROOT: &str = "x-tomcat-docroot";

/// Sanitized virtual-host identifier.
pub const WEBSERVER_CONTEXT: &str = "x-webserver-context";

/// Residual path-info following the matched extension.
pub const PATH_INFO: &str = "xajp-path-info";

/// Shared secret the backend valve verifies.
pub const SHARED_KEY: &str = "x-modcfml-sharedkey";

/// Serialized alias table.
pub const VDIRS: &str = "x-vdirs";
