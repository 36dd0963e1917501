//! Serves an echo backend behind the cfgate middleware.
//!
//! ```text
//! cargo run --example gate -- [config.toml]
//! curl -i http://127.0.0.1:3000/app/index.cfm/extra/path
//! ```
//!
//! The echo service replies with the routing headers it received, so what
//! cfgate attached (or didn't) is visible in the response body.

use std::convert::Infallible;
use std::net::SocketAddr;

use bytes::Bytes;
use cfgate::middleware::Annotate;
use cfgate::{AliasEntry, Augmenter, Config, Outcome, StaticAliases, VirtualHost, headers};
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info};

const ROUTING_HEADERS: [&str; 5] = [
    headers::DOC_ROOT,
    headers::WEBSERVER_CONTEXT,
    headers::PATH_INFO,
    headers::SHARED_KEY,
    headers::VDIRS,
];

async fn echo(req: http::Request<Incoming>) -> Result<http::Response<Full<Bytes>>, Infallible> {
    let outcome = req.extensions().get::<Outcome>().copied();
    let mut body = format!("{} {:?}\n", req.uri().path(), outcome);
    for name in ROUTING_HEADERS {
        if let Some(value) = req.headers().get(name) {
            body.push_str(&format!("{name}: {}\n", String::from_utf8_lossy(value.as_bytes())));
        }
    }
    Ok(http::Response::new(Full::new(Bytes::from(body))))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(path)?,
        None => Config::new().shared_key("demo-secret").log_handlers(true),
    };
    let augmenter = Augmenter::new(config).aliases(StaticAliases::new(vec![
        AliasEntry::new("/images/", "/var/www/shared/images/"),
        AliasEntry::pattern("^/legacy/(.*)$", "/var/www/old/$1"),
    ]));
    let vhost = VirtualHost::new("/var/www/example")
        .hostname("www.example.org")
        .defined_at("/etc/httpd/sites/010-main.conf", 42);
    let gate = Annotate::new(service_fn(echo), augmenter, vhost);

    let addr: SocketAddr = "127.0.0.1:3000".parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "cfgate demo listening");

    let mut tasks = tokio::task::JoinSet::new();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;

            _ = &mut shutdown => {
                info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                break;
            }

            res = listener.accept() => {
                let (stream, peer) = match res {
                    Ok(v) => v,
                    Err(e) => {
                        error!("accept error: {e}");
                        continue;
                    }
                };

                let gate = gate.clone();
                tasks.spawn(async move {
                    if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                        .serve_connection(TokioIo::new(stream), gate)
                        .await
                    {
                        error!(%peer, "connection error: {e}");
                    }
                });
            }

            Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
        }
    }

    while tasks.join_next().await.is_some() {}
    info!("cfgate demo stopped");
    Ok(())
}
