//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → HandlerChain::handle (redirect or fallback)
//!     → Send to client
//! ```

pub mod server;

pub use server::HttpServer;
