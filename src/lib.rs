//! URL shortener library.
//!
//! Short paths are resolved through an ordered chain of route sources
//! (file overrides, then a SQLite table, then a default greeting) and
//! answered with an HTTP redirect.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routes;
pub mod routing;

pub use config::ShortenerConfig;
pub use http::HttpServer;
pub use routing::HandlerChain;
