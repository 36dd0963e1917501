//! Middleware layer.
//!
//! [`Annotate`] wraps any hyper [`Service`] and runs the augmenter on each
//! request before handing it on. It never answers a request itself: the
//! inner service (a proxy, a connector, a test double) always gets the
//! request, with or without routing headers, and can read what happened
//! from the request extensions:
//!
//! ```rust
//! use cfgate::Outcome;
//!
//! fn forward_to_backend<B>(req: &http::Request<B>) -> bool {
//!     req.extensions().get::<Outcome>() == Some(&Outcome::Augmented)
//! }
//! ```
//!
//! The path is percent-decoded before classification, so `/index%2Ecfm` is
//! a backend request and path-info reaches the backend decoded. A path that
//! does not decode to UTF-8 is classified as received.
//!
//! One `Annotate` per virtual host, cloned per connection. Cloning is two
//! `Arc` increments plus whatever the inner service costs.

use std::borrow::Cow;
use std::sync::Arc;

use http::Request;
use hyper::service::Service;
use percent_encoding::percent_decode_str;

use crate::augment::Augmenter;
use crate::request::RequestView;
use crate::vhost::VirtualHost;

/// A [`Service`] that annotates requests for the backend before calling `S`.
#[derive(Clone)]
pub struct Annotate<S> {
    inner: S,
    augmenter: Augmenter,
    vhost: Arc<VirtualHost>,
}

impl<S> Annotate<S> {
    pub fn new(inner: S, augmenter: Augmenter, vhost: impl Into<Arc<VirtualHost>>) -> Self {
        Self { inner, augmenter, vhost: vhost.into() }
    }
}

impl<S, B> Service<Request<B>> for Annotate<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn call(&self, req: Request<B>) -> Self::Future {
        let (mut parts, body) = req.into_parts();

        let outcome = {
            let raw = parts.uri.path();
            let path = percent_decode_str(raw).decode_utf8().unwrap_or(Cow::Borrowed(raw));
            let mut view = RequestView::new(&path, &self.vhost, &mut parts.headers);
            self.augmenter.augment(&mut view)
        };
        parts.extensions.insert(outcome);

        self.inner.call(Request::from_parts(parts, body))
    }
}
